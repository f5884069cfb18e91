pub mod session_manager;
pub mod attendance_viewmodel;
pub mod documents_viewmodel;
pub mod profile_viewmodel;
pub mod dashboard_viewmodel;

pub use session_manager::SessionManager;
pub use attendance_viewmodel::{AttendanceError, AttendanceSheet, AttendanceViewModel};
pub use documents_viewmodel::{DocumentError, DocumentRow, DocumentsViewModel};
pub use profile_viewmodel::{ProfileError, ProfileViewModel};
pub use dashboard_viewmodel::{DashboardData, DashboardView, DashboardViewModel};
