use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::user::{Credential, Role, User};
use crate::utils::constants::MSG_NETWORK_ERROR;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Profile fields collected by the registration form
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SignupData {
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Role>,
}

impl SignupRequest {
    pub fn new(email: &str, password: &str, data: SignupData) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            first_name: data.first_name,
            last_name: data.last_name,
            role: data.role.unwrap_or_default(),
        }
    }
}

/// `{ data: { user, token } }`
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginResponse {
    pub data: LoginPayload,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginPayload {
    pub user: User,
    pub token: Credential,
}

/// Result of a successful login
#[derive(Clone, PartialEq, Debug)]
pub struct Authenticated {
    pub user: User,
    pub token: Credential,
}

impl From<LoginResponse> for Authenticated {
    fn from(response: LoginResponse) -> Self {
        Self {
            user: response.data.user,
            token: response.data.token,
        }
    }
}

// ============================================================================
// ERROR BODY - `{ error?, details?: [{ msg | message }] }`
// ============================================================================

/// Failure envelope returned by the backend with a non-2xx status.
/// Parsed from loose JSON so that odd shapes degrade to the fallback message.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub details: Vec<String>,
}

impl ErrorBody {
    pub fn from_value(value: &Value) -> Self {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let details = value
            .get("details")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        entry
                            .get("msg")
                            .and_then(Value::as_str)
                            .or_else(|| entry.get("message").and_then(Value::as_str))
                    })
                    .filter(|msg| !msg.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { error, details }
    }

    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    /// Joined detail messages, else `error`, else `fallback`
    pub fn message_or(&self, fallback: &str) -> String {
        if self.has_details() {
            self.details.join(", ")
        } else {
            self.error.clone().unwrap_or_else(|| fallback.to_string())
        }
    }
}

// ============================================================================
// AUTH ERROR - what sign in / sign up report to the UI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// Field-level validation problems reported by the backend
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    /// Backend rejection with a single message (or the operation fallback)
    #[error("{0}")]
    Rejected(String),
    /// No usable response. The payload is diagnostic only.
    #[error("{}", MSG_NETWORK_ERROR)]
    Network(String),
    /// A newer sign-in or a sign-out happened while this one was in flight
    #[error("Sign-in was cancelled")]
    Superseded,
    #[error("Unable to save your session. Please try again.")]
    Storage,
}

impl AuthError {
    /// Classifies a failure envelope
    pub fn from_body(body: &ErrorBody, fallback: &str) -> Self {
        if body.has_details() {
            AuthError::Validation(body.details.clone())
        } else {
            AuthError::Rejected(body.message_or(fallback))
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
