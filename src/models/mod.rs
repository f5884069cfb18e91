pub mod user;
pub mod auth;
pub mod attendance;
pub mod document;
pub mod profile;
pub mod dashboard;

pub use user::{Credential, Role, User};
pub use auth::{AuthError, Authenticated, ErrorBody, SignupData};
pub use attendance::AttendanceRecord;
pub use document::{Document, DocumentOwner};
pub use profile::EmployeeProfile;
pub use dashboard::{DashboardStats, Leave};

use serde::{Deserialize, Deserializer};

/// `{ data: T }` success envelope used by every endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Treats an explicit `null` like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers arrive as strings (Mongo) or numbers (SQL backends)
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("unexpected id: {}", other))),
    }
}
