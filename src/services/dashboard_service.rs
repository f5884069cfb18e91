use crate::models::dashboard::StatsPayload;
use crate::models::{DashboardStats, Document, Leave};
use crate::services::api_client::{ApiClient, ApiError};

/// Admin-only endpoints; callers gate on `is_admin` first
#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.api
            .get_data::<StatsPayload>("/dashboard/stats", "Failed to fetch dashboard stats")
            .await
            .map(|payload| payload.stats)
    }

    pub async fn recent_documents(&self, limit: u32) -> Result<Vec<Document>, ApiError> {
        let path = format!("/documents?page=1&limit={}", limit);
        self.api.get_data(&path, "Failed to load documents").await
    }

    pub async fn recent_leaves(&self, limit: u32) -> Result<Vec<Leave>, ApiError> {
        let path = format!("/leaves?page=1&limit={}", limit);
        self.api.get_data(&path, "Failed to load leaves").await
    }

    pub async fn leave(&self, id: &str) -> Result<Leave, ApiError> {
        let path = format!("/leaves/{}", id);
        self.api.get_data(&path, "Failed to fetch leave details").await
    }
}
