pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod attendance_service;
pub mod document_service;
pub mod profile_service;
pub mod dashboard_service;

#[cfg(test)]
pub mod testing;

pub use http::{GlooTransport, HttpTransport};
pub use api_client::{ApiClient, ApiError};
pub use auth_service::AuthService;
pub use attendance_service::AttendanceService;
pub use document_service::{DocumentService, DownloadedFile, UploadFile};
pub use profile_service::ProfileService;
pub use dashboard_service::DashboardService;
