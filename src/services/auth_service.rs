use serde_json::Value;

use crate::models::auth::{LoginRequest, LoginResponse, SignupRequest};
use crate::models::{AuthError, Authenticated, ErrorBody, SignupData};
use crate::services::api_client::ApiClient;
use crate::services::http::{HttpRequest, HttpResponse, Method};
use crate::utils::constants::{LOGIN_PATH, MSG_LOGIN_FAILED, MSG_SIGNUP_FAILED, SIGNUP_PATH};

/// Calls to `/auth/*`. Classifies every outcome; never touches session state.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Perform login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<Authenticated, AuthError> {
        let body = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| AuthError::Network(e.to_string()))?;

        log::info!("🔐 [AUTH] Login attempt for {}", email);
        let response = self.post(LOGIN_PATH, body).await?;
        let payload = Self::read_json(&response)?;

        if !response.ok() {
            let err = AuthError::from_body(&ErrorBody::from_value(&payload), MSG_LOGIN_FAILED);
            log::warn!("⚠️ [AUTH] Login rejected (HTTP {}): {}", response.status, err);
            return Err(err);
        }

        let login = serde_json::from_value::<LoginResponse>(payload).map_err(|e| {
            log::error!("❌ [AUTH] Login response without a usable session: {}", e);
            AuthError::Network(format!("malformed login payload: {}", e))
        })?;
        Ok(Authenticated::from(login))
    }

    /// Register a new account. Success carries no session.
    pub async fn signup(&self, email: &str, password: &str, data: SignupData) -> Result<(), AuthError> {
        let body = serde_json::to_value(SignupRequest::new(email, password, data))
            .map_err(|e| AuthError::Network(e.to_string()))?;

        log::info!("📝 [AUTH] Signup for {}", email);
        let response = self.post(SIGNUP_PATH, body).await?;
        let payload = Self::read_json(&response)?;

        if response.ok() {
            return Ok(());
        }

        let err = AuthError::from_body(&ErrorBody::from_value(&payload), MSG_SIGNUP_FAILED);
        log::warn!("⚠️ [AUTH] Signup rejected (HTTP {}): {}", response.status, err);
        Err(err)
    }

    async fn post(&self, path: &str, body: Value) -> Result<HttpResponse, AuthError> {
        let request = HttpRequest::new(Method::Post, self.api.url(path))
            .header("Content-Type", "application/json")
            .json(body);
        self.api.send_public(request).await.map_err(|e| {
            log::error!("❌ [AUTH] {} unreachable: {}", path, e);
            AuthError::Network(e.to_string())
        })
    }

    fn read_json(response: &HttpResponse) -> Result<Value, AuthError> {
        response.json::<Value>().map_err(|e| {
            log::error!("❌ [AUTH] Unreadable response (HTTP {}): {}", response.status, e);
            AuthError::Network(format!("invalid JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::models::Role;
    use crate::services::http::{HttpBody, TransportError};
    use crate::services::testing::{json_response, raw_response, FakeTransport};
    use crate::utils::storage::{CredentialStore, MemoryStorage};

    fn service(transport: &FakeTransport) -> AuthService {
        let store = CredentialStore::new(Rc::new(MemoryStorage::new()));
        AuthService::new(ApiClient::new("http://api.test/api", Rc::new(transport.clone()), store))
    }

    #[tokio::test]
    async fn login_posts_credentials_and_parses_session() {
        let transport = FakeTransport::new();
        transport.push(json_response(
            200,
            json!({"data": {"user": {"id": "1", "email": "a@b.com", "firstName": "A", "lastName": "B", "role": "employee"}, "token": "tok123"}}),
        ));

        let auth = service(&transport).login("a@b.com", "secret").await.unwrap();

        assert_eq!(auth.user.role, Role::Employee);
        assert_eq!(auth.token.as_str(), "tok123");
        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "http://api.test/api/auth/login");
        assert_eq!(sent[0].body, HttpBody::Json(json!({"email": "a@b.com", "password": "secret"})));
        assert_eq!(sent[0].header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn login_classifies_failures() {
        let transport = FakeTransport::new();
        transport.push(json_response(401, json!({"error": "Invalid credentials"})));
        transport.push(json_response(400, json!({"details": [{"msg": "Email required"}, {"msg": "Password too short"}]})));
        transport.push(json_response(500, json!({})));
        transport.push(raw_response(502, "text/html", b"<html>bad gateway</html>"));
        transport.push_error(TransportError::Network("offline".to_string()));
        let auth = service(&transport);

        assert_eq!(
            auth.login("a", "b").await,
            Err(AuthError::Rejected("Invalid credentials".to_string()))
        );
        assert_eq!(
            auth.login("a", "b").await,
            Err(AuthError::Validation(vec![
                "Email required".to_string(),
                "Password too short".to_string()
            ]))
        );
        assert_eq!(auth.login("a", "b").await, Err(AuthError::Rejected("Login failed".to_string())));
        assert!(matches!(auth.login("a", "b").await, Err(AuthError::Network(_))));
        assert!(matches!(auth.login("a", "b").await, Err(AuthError::Network(_))));
    }

    #[tokio::test]
    async fn success_without_token_is_malformed() {
        let transport = FakeTransport::new();
        transport.push(json_response(200, json!({"data": {"user": null}})));

        let err = service(&transport).login("a", "b").await.unwrap_err();

        assert_eq!(err.to_string(), "Network error. Please try again.");
    }

    #[tokio::test]
    async fn signup_defaults_role_and_uses_its_own_fallback() {
        let transport = FakeTransport::new();
        transport.push(json_response(201, json!({"success": true})));
        transport.push(json_response(409, json!({})));
        let auth = service(&transport);
        let data = SignupData {
            first_name: "N".to_string(),
            last_name: "X".to_string(),
            role: None,
        };

        assert_eq!(auth.signup("n@x.com", "pw", data.clone()).await, Ok(()));
        assert_eq!(
            auth.signup("n@x.com", "pw", data).await,
            Err(AuthError::Rejected("Signup failed".to_string()))
        );

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://api.test/api/auth/signup");
        match &sent[0].body {
            HttpBody::Json(body) => assert_eq!(body["role"], "employee"),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[tokio::test]
    async fn signup_success_with_unreadable_body_is_a_network_error() {
        let transport = FakeTransport::new();
        transport.push(raw_response(201, "text/html", b"<html>created</html>"));
        let data = SignupData {
            first_name: "N".to_string(),
            last_name: "X".to_string(),
            role: None,
        };

        let err = service(&transport).signup("n@x.com", "pw", data).await.unwrap_err();

        assert!(matches!(err, AuthError::Network(_)));
        assert_eq!(err.to_string(), "Network error. Please try again.");
    }
}
