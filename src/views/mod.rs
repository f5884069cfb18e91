// ============================================================================
// VIEWS - DOM rendering only
// ============================================================================
// Each screen builds its element tree from AppState and hands user actions to
// a viewmodel. Screens that load data render a placeholder first and fill
// their own container once the request settles.
// ============================================================================

pub mod shell;
pub mod login;
pub mod register;
pub mod access_denied;
pub mod attendance;
pub mod documents;
pub mod profile;
pub mod dashboard;

pub use shell::render_shell;
