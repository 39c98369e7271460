use serde::{Deserialize, Serialize};

/// The user behind the current session, as returned by `GET /users/me`.
///
/// Decoding is the validation step: a payload without an integer `id` and
/// a string `name` is rejected rather than carried around half-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
}

impl Identity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}
