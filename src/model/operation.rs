//! Operation: one timestamped mutation, serialized as one line of JSONL.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Item, Kind, OccurredAt, TimestampError};

/// Errors that can occur while decoding a stored operation.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized operation type: {0:?}")]
    UnknownKind(String),

    #[error("{kind} payload must be {expected}")]
    InvalidPayload {
        kind: Kind,
        expected: &'static str,
    },

    #[error("invalid occurred_at {value:?}: {source}")]
    Timestamp {
        value: String,
        source: TimestampError,
    },
}

/// The kind-specific data of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Put a new item on top.
    Push(Item),

    /// Drop the top item.
    Pop,

    /// Move the item at this depth (0 = top) to the top.
    Focus(u64),
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Push(_) => Kind::Push,
            Self::Pop => Kind::Pop,
            Self::Focus(_) => Kind::Focus,
        }
    }

    /// The stored form of the payload; `None` means the field is omitted.
    fn encode(&self) -> Option<Value> {
        match self {
            Self::Push(item) => Some(Value::String(item.as_str().to_string())),
            Self::Pop => None,
            Self::Focus(index) => Some(Value::from(*index)),
        }
    }
}

/// An immutable record of one requested mutation.
///
/// The kind is derived from the payload, so the two always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub occurred_at: OccurredAt,
    pub payload: Payload,
}

/// The on-disk shape of an operation.
#[derive(Serialize, Deserialize)]
struct Record {
    #[serde(rename = "type")]
    kind: String,
    occurred_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl Operation {
    pub fn new(occurred_at: OccurredAt, payload: Payload) -> Self {
        Self {
            occurred_at,
            payload,
        }
    }

    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    /// Encodes the operation as a single JSON line, without the newline.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Record {
            kind: self.kind().as_str().to_string(),
            occurred_at: self.occurred_at.to_string(),
            payload: self.payload.encode(),
        })
    }

    /// Decodes one JSON line, checking the payload against its declared kind.
    pub fn from_line(line: &str) -> Result<Self, DecodeError> {
        let record: Record = serde_json::from_str(line)?;
        let kind: Kind = record.kind.parse()?;
        let occurred_at = record
            .occurred_at
            .parse::<OccurredAt>()
            .map_err(|source| DecodeError::Timestamp {
                value: record.occurred_at.clone(),
                source,
            })?;
        let payload = kind.decode(record.payload)?;
        Ok(Self::new(occurred_at, payload))
    }
}
