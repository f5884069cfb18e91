use crate::models::profile::{EmployeeProfile, ProfileUpdate};
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch(&self, employee_id: &str) -> Result<EmployeeProfile, ApiError> {
        let path = format!("/employees/{}", employee_id);
        self.api.get_data(&path, "Failed to load profile").await
    }

    pub async fn update(&self, employee_id: &str, update: &ProfileUpdate) -> Result<(), ApiError> {
        let path = format!("/employees/{}", employee_id);
        let body = serde_json::to_value(update).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.api
            .put_json(&path, body, "Failed to update profile. Please try again.")
            .await
            .map(|_| ())
    }
}
