//! Replay: rebuild the stack by folding the operation history.
//!
//! The list is ordered bottom to top: the last element is the top, which is
//! what `focus` depths and display indices count from.

use crate::model::{Item, Operation, Payload};

/// Errors that can occur while replaying a history.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("operation #{position} focuses index {index}, but the list has {len} item(s)")]
    FocusOutOfRange {
        /// Zero-based position of the offending operation in the history.
        position: usize,
        index: u64,
        len: usize,
    },
}

/// Folds `history`, oldest first, into the current list.
pub fn replay(history: &[Operation]) -> Result<Vec<Item>, ReplayError> {
    let mut items = Vec::new();
    for (position, op) in history.iter().enumerate() {
        apply(&mut items, &op.payload).map_err(|index| ReplayError::FocusOutOfRange {
            position,
            index,
            len: items.len(),
        })?;
    }
    tracing::debug!(
        operations = history.len(),
        items = items.len(),
        "replayed history"
    );
    Ok(items)
}

/// Converts a depth counted from the top into a position in the list.
///
/// Returns `None` when the depth is past the bottom.
pub fn position_of_depth(len: usize, depth: u64) -> Option<usize> {
    let depth = usize::try_from(depth).ok()?;
    (depth < len).then(|| len - 1 - depth)
}

/// Applies one payload. On an out-of-range focus the list is left untouched
/// and the offending index is returned.
fn apply(items: &mut Vec<Item>, payload: &Payload) -> Result<(), u64> {
    match payload {
        Payload::Push(item) => items.push(item.clone()),
        Payload::Pop => {
            items.pop();
        }
        Payload::Focus(depth) => {
            let position = position_of_depth(items.len(), *depth).ok_or(*depth)?;
            let item = items.remove(position);
            items.push(item);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::OccurredAt;

    fn op(payload: Payload) -> Operation {
        Operation::new("2006-01-02T15:04:05-0700".parse().unwrap(), payload)
    }

    fn push(text: &str) -> Operation {
        op(Payload::Push(Item::from(text)))
    }

    fn pop() -> Operation {
        op(Payload::Pop)
    }

    fn focus(depth: u64) -> Operation {
        op(Payload::Focus(depth))
    }

    fn labels(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::as_str).collect()
    }

    #[test]
    fn empty_history_is_an_empty_list() {
        assert!(replay(&[]).unwrap().is_empty());
    }

    #[test]
    fn push_appends_to_the_top() {
        assert_eq!(labels(&replay(&[push("A")]).unwrap()), ["A"]);
        assert_eq!(
            labels(&replay(&[push("A"), push("B")]).unwrap()),
            ["A", "B"]
        );
    }

    #[test]
    fn pop_removes_the_top() {
        let items = replay(&[push("A"), push("B"), pop()]).unwrap();
        assert_eq!(labels(&items), ["A"]);
    }

    #[test]
    fn pop_on_empty_is_a_no_op() {
        assert!(replay(&[pop()]).unwrap().is_empty());
        assert_eq!(labels(&replay(&[pop(), push("A")]).unwrap()), ["A"]);
    }

    #[test]
    fn focus_moves_the_item_at_depth_to_the_top() {
        let items = replay(&[push("A"), push("B"), push("C"), focus(1)]).unwrap();
        assert_eq!(labels(&items), ["A", "C", "B"]);
    }

    #[test]
    fn focus_on_the_bottom_and_top() {
        let history = [push("A"), push("B"), push("C")];

        let mut bottom = history.to_vec();
        bottom.push(focus(2));
        assert_eq!(labels(&replay(&bottom).unwrap()), ["B", "C", "A"]);

        let mut top = history.to_vec();
        top.push(focus(0));
        assert_eq!(labels(&replay(&top).unwrap()), ["A", "B", "C"]);
    }

    #[test]
    fn focus_out_of_range_fails_with_its_position() {
        let err = replay(&[push("A"), pop(), push("B"), focus(1)]).unwrap_err();
        assert_eq!(
            err,
            ReplayError::FocusOutOfRange {
                position: 3,
                index: 1,
                len: 1,
            }
        );
    }

    #[test]
    fn focus_on_empty_fails() {
        let err = replay(&[focus(0)]).unwrap_err();
        assert!(matches!(err, ReplayError::FocusOutOfRange { len: 0, .. }));
    }

    #[test]
    fn replay_is_deterministic() {
        let history = vec![
            push("A"),
            push("B"),
            op(Payload::Push(Item::from("C"))),
            focus(2),
            pop(),
            Operation::new(OccurredAt::now().unwrap(), Payload::Push(Item::from("D"))),
        ];
        let snapshot = history.clone();

        let first = replay(&history).unwrap();
        let second = replay(&history).unwrap();

        assert_eq!(first, second);
        assert_eq!(labels(&first), ["B", "C", "D"]);
        assert_eq!(history, snapshot);
    }

    #[test]
    fn depth_maps_from_the_top() {
        assert_eq!(position_of_depth(3, 0), Some(2));
        assert_eq!(position_of_depth(3, 2), Some(0));
        assert_eq!(position_of_depth(3, 3), None);
        assert_eq!(position_of_depth(0, 0), None);
        assert_eq!(position_of_depth(1, u64::MAX), None);
    }
}
