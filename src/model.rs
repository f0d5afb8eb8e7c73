//! Core data model for wip.
//!
//! Items are opaque labels. Every change to the stack is an [`Operation`]:
//! a timestamped [`Payload`] whose [`Kind`] names the transformation to replay.

mod item;
mod kind;
mod occurred_at;
mod operation;

pub use item::Item;
pub use kind::Kind;
pub use occurred_at::{OccurredAt, TimestampError};
pub use operation::{DecodeError, Operation, Payload};
