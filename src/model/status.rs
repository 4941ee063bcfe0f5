use serde::{Deserialize, Serialize};

/// The review state of a bill as stored remotely.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Accepted,
    Refused,
}

serde_plain::derive_display_from_serialize!(Status);
serde_plain::derive_fromstr_from_deserialize!(Status);

impl Status {
    /// The label shown to users for this status.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "En attente",
            Status::Accepted => "Accepté",
            Status::Refused => "Refused",
        }
    }
}
