//! Customer entity and related types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Create a new CustomerId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A tailoring client record.
///
/// Measurement fields are free-form summaries and are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub shirt: String,
    pub pants: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_measurements: Option<String>,
}

impl Customer {
    /// Create a customer without extra measurements
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        shirt: impl Into<String>,
        pants: impl Into<String>,
    ) -> Self {
        Self {
            id: CustomerId::new(id),
            name: name.into(),
            phone: phone.into(),
            shirt: shirt.into(),
            pants: pants.into(),
            other_measurements: None,
        }
    }

    /// Set the other measurements summary
    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other_measurements = Some(other.into());
        self
    }

    /// Other measurements, treating an empty string the same as absent
    pub fn other(&self) -> Option<&str> {
        self.other_measurements
            .as_deref()
            .filter(|other| !other.is_empty())
    }
}
