/// Storage key holding the raw bearer token
pub const STORAGE_KEY_AUTH_TOKEN: &str = "authToken";

/// Storage key holding the JSON snapshot of the signed-in user
pub const STORAGE_KEY_CURRENT_USER: &str = "currentUser";

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";

pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_SIGNUP_FAILED: &str = "Signup failed";
pub const MSG_NETWORK_ERROR: &str = "Network error. Please try again.";

/// Largest document accepted for upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
