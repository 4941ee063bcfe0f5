use serde::{Deserialize, Serialize};

/// The kind of account a session belongs to.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "PascalCase")]
pub enum UserType {
    #[default]
    Employee,
    Admin,
}

serde_plain::derive_display_from_serialize!(UserType);
serde_plain::derive_fromstr_from_deserialize!(UserType);

/// The authenticated identity held in the session store, e.g.
/// `{"type":"Employee","email":"a@a"}`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub(crate) user_type: UserType,
    #[serde(default)]
    pub(crate) email: String,
}

impl User {
    pub fn new(user_type: UserType, email: impl Into<String>) -> Self {
        Self {
            user_type,
            email: email.into(),
        }
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
