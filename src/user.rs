//! The `User` entity and its request payload.

use serde::{Deserialize, Serialize};

/// Store-assigned user identifier.
pub type UserId = u64;

/// A stored user. Serialises as `{"Id": 1, "Email": "…", "Name": "…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Body of a create or update request.
///
/// There is no `Id` field: an id sent by the client is ignored by the
/// deserialiser and the store always assigns its own. Absent and `null`
/// fields deserialise to `None` and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserPayload {
    #[serde(alias = "email")]
    pub email: Option<String>,
    #[serde(alias = "name")]
    pub name: Option<String>,
}

impl UserPayload {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self { email: Some(email.into()), name: Some(name.into()) }
    }

    /// `(email, name)`, with absent fields as empty strings.
    pub fn into_fields(self) -> (String, String) {
        (self.email.unwrap_or_default(), self.name.unwrap_or_default())
    }
}
