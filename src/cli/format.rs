//! Output formatting for CLI display.

use crate::model::Item;

/// Format the stack top first, one `index: item` line each.
///
/// Index 0 is the top, which is the last item in replay order.
pub(super) fn format_list(items: &[Item]) -> String {
    if items.is_empty() {
        return "no WIP\n".to_string();
    }
    items
        .iter()
        .rev()
        .enumerate()
        .map(|(index, item)| format!("{index}: {item}\n"))
        .collect()
}
