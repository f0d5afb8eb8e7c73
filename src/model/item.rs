//! Item: one in-progress task label.

use std::fmt;

/// An opaque in-progress task description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item(String);

impl Item {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
