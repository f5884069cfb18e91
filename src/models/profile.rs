use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::{Role, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    #[serde(default, alias = "_id", deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub department: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub hire_date: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub salary: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    /// Optional HR fields (dob, bloodGroup, emergencyContactNo, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmployeeProfile {
    /// Profile shown when the employee record cannot be fetched
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: String::new(),
            position: match user.role {
                Role::Admin => "Administrator".to_string(),
                Role::Employee => "Employee".to_string(),
            },
            department: "General".to_string(),
            hire_date: String::new(),
            salary: 0.0,
            status: "active".to_string(),
            extra: Map::new(),
        }
    }

    /// Applies a patch the way the backend does: present keys overwrite
    pub fn merged(&self, patch: &ProfileUpdate) -> Result<Self, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut value {
            for (key, v) in patch.fields() {
                fields.insert(key.clone(), v.clone());
            }
        }
        serde_json::from_value(value)
    }

    pub fn extra_text(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileUpdateError {
    #[error("Salary must be a number")]
    InvalidSalary,
}

/// Fields submitted from the profile form. Empty inputs are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfileUpdate(Map<String, Value>);

impl ProfileUpdate {
    pub fn from_form<'a, I>(entries: I) -> Result<Self, ProfileUpdateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = Map::new();
        for (key, raw) in entries {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let value = match key {
                "salary" => {
                    let salary: f64 = raw.parse().map_err(|_| ProfileUpdateError::InvalidSalary)?;
                    serde_json::Number::from_f64(salary)
                        .map(Value::Number)
                        .ok_or(ProfileUpdateError::InvalidSalary)?
                }
                "documentsSubmitted" => Value::Array(vec![Value::String(raw.to_string())]),
                _ => Value::String(raw.to_string()),
            };
            fields.insert(key.to_string(), value);
        }
        Ok(Self(fields))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
