use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEmployee {
    #[serde(rename = "_id", default, deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id", deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub employee: Option<AttendanceEmployee>,
    pub date: String,
    #[serde(default)]
    pub clock_in: Option<String>,
    #[serde(default)]
    pub clock_out: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub working_hours: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// UTC calendar day of the record
    pub fn day(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        self.date
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Clocked in and not yet out
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockInRequest {
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockOutRequest {
    pub notes: String,
}
