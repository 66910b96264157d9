//! Account-related types and structures

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of an account, used as the store key
pub type AccountId = String;

/// A single account record
///
/// Every field decodes to an empty string when absent or `null`, and unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Id of the account
    #[serde(deserialize_with = "null_as_empty")]
    pub id: AccountId,
    /// First name of the account holder
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    /// Last name of the account holder
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    /// Username of the account holder
    #[serde(deserialize_with = "null_as_empty")]
    pub user_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Account {
    /// Create a new account
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_name: user_name.into(),
        }
    }

    /// Decode an account from a raw JSON body
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{} {} {} {}}}",
            self.id, self.first_name, self.last_name, self.user_name
        )
    }
}
