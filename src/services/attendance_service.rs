use crate::models::attendance::{AttendanceRecord, ClockInRequest, ClockOutRequest};
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Clone)]
pub struct AttendanceService {
    api: ApiClient,
}

impl AttendanceService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.api
            .get_data("/attendance", "Failed to load attendance records")
            .await
    }

    pub async fn clock_in(&self, location: &str) -> Result<(), ApiError> {
        let body = serde_json::to_value(ClockInRequest {
            location: location.to_string(),
        })
        .map_err(|e| ApiError::Parse(e.to_string()))?;
        self.api
            .post_json("/attendance/clock-in", body, "Failed to clock in")
            .await
            .map(|_| ())
    }

    pub async fn clock_out(&self, notes: &str) -> Result<(), ApiError> {
        let body = serde_json::to_value(ClockOutRequest {
            notes: notes.to_string(),
        })
        .map_err(|e| ApiError::Parse(e.to_string()))?;
        self.api
            .post_json("/attendance/clock-out", body, "Failed to clock out")
            .await
            .map(|_| ())
    }
}
