//! Operation kinds and the decoder each one maps to.
//!
//! The set is closed: every kind the log may contain is a variant here, and
//! [`Kind::decode`] is the only way a stored payload becomes a [`Payload`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::{DecodeError, Item, Payload};

/// The discriminator written to the `type` field of each log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Push,
    Pop,
    Focus,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Push, Kind::Pop, Kind::Focus];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Focus => "focus",
        }
    }

    /// Reconstructs the typed payload for this kind.
    ///
    /// - `push` needs a JSON string.
    /// - `pop` carries nothing; whatever is stored is ignored.
    /// - `focus` needs a non-negative JSON integer.
    pub fn decode(self, payload: Option<Value>) -> Result<Payload, DecodeError> {
        match self {
            Self::Push => match payload {
                Some(Value::String(text)) => Ok(Payload::Push(Item::from(text))),
                _ => Err(self.invalid("a string")),
            },
            Self::Pop => Ok(Payload::Pop),
            Self::Focus => payload
                .as_ref()
                .and_then(Value::as_u64)
                .map(Payload::Focus)
                .ok_or_else(|| self.invalid("a non-negative integer")),
        }
    }

    fn invalid(self, expected: &'static str) -> DecodeError {
        DecodeError::InvalidPayload {
            kind: self,
            expected,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_kind_maps_back_from_its_name() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        for name in ["", "peek", "Push", "POP", " focus"] {
            let err = name.parse::<Kind>().unwrap_err();
            assert!(matches!(err, DecodeError::UnknownKind(ref k) if k == name));
        }
    }

    #[test]
    fn push_requires_a_string() {
        let payload = Kind::Push.decode(Some(json!("write docs"))).unwrap();
        assert_eq!(payload, Payload::Push(Item::from("write docs")));

        for bad in [None, Some(json!(3)), Some(json!(null)), Some(json!(["a"]))] {
            let err = Kind::Push.decode(bad).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::InvalidPayload {
                    kind: Kind::Push,
                    ..
                }
            ));
        }
    }

    #[test]
    fn pop_ignores_its_payload() {
        assert_eq!(Kind::Pop.decode(None).unwrap(), Payload::Pop);
        assert_eq!(Kind::Pop.decode(Some(json!(null))).unwrap(), Payload::Pop);
        assert_eq!(Kind::Pop.decode(Some(json!("x"))).unwrap(), Payload::Pop);
    }

    #[test]
    fn focus_requires_a_non_negative_integer() {
        assert_eq!(
            Kind::Focus.decode(Some(json!(2))).unwrap(),
            Payload::Focus(2)
        );

        for bad in [None, Some(json!(-1)), Some(json!(1.5)), Some(json!("1"))] {
            let err = Kind::Focus.decode(bad).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::InvalidPayload {
                    kind: Kind::Focus,
                    ..
                }
            ));
        }
    }
}
