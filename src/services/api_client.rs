// ============================================================================
// API CLIENT - HTTP only, no business logic
// ============================================================================
// Every call after sign-in carries `Authorization: Bearer <token>`, read from
// the credential store at call time.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{DataEnvelope, ErrorBody};
use crate::services::http::{FormValue, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use crate::utils::constants::MSG_NETWORK_ERROR;
use crate::utils::storage::CredentialStore;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Please log in to continue.")]
    Unauthenticated,
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{}", MSG_NETWORK_ERROR)]
    Network(String),
    #[error("Unexpected response from server: {0}")]
    Parse(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response, using the shared message policy
    pub fn from_response(response: &HttpResponse, fallback: &str) -> Self {
        let message = response
            .json::<serde_json::Value>()
            .map(|value| ErrorBody::from_value(&value).message_or(fallback))
            .unwrap_or_else(|_| fallback.to_string());
        ApiError::Rejected {
            status: response.status,
            message,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// Stateless client; cheap to clone
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    credentials: CredentialStore,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>, credentials: CredentialStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            credentials,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unauthenticated request (login, signup). Status is not checked.
    pub async fn send_public(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.transport.send(request).await
    }

    fn authorized(&self, method: Method, path: &str) -> Result<HttpRequest, ApiError> {
        let token = self.credentials.token().ok_or(ApiError::Unauthenticated)?;
        Ok(HttpRequest::new(method, self.url(path)).header("Authorization", token.bearer()))
    }

    /// Sends and maps non-2xx to `ApiError::Rejected`
    async fn execute(&self, request: HttpRequest, fallback: &str) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {:?} {} failed: {}", method, url, e);
            ApiError::from(e)
        })?;

        if !response.ok() {
            let err = ApiError::from_response(&response, fallback);
            log::warn!("⚠️ [API] {:?} {} -> HTTP {}: {}", method, url, response.status, err);
            return Err(err);
        }
        Ok(response)
    }

    fn parse_data<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
        response
            .json::<DataEnvelope<T>>()
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// GET returning the `data` field of the envelope
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ApiError> {
        let request = self.authorized(Method::Get, path)?;
        let response = self.execute(request, fallback).await?;
        Self::parse_data(&response)
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
        fallback: &str,
    ) -> Result<HttpResponse, ApiError> {
        let request = self
            .authorized(Method::Post, path)?
            .header("Content-Type", "application/json")
            .json(body);
        self.execute(request, fallback).await
    }

    pub async fn put_json(
        &self,
        path: &str,
        body: serde_json::Value,
        fallback: &str,
    ) -> Result<HttpResponse, ApiError> {
        let request = self
            .authorized(Method::Put, path)?
            .header("Content-Type", "application/json")
            .json(body);
        self.execute(request, fallback).await
    }

    pub async fn delete(&self, path: &str, fallback: &str) -> Result<(), ApiError> {
        let request = self.authorized(Method::Delete, path)?;
        self.execute(request, fallback).await.map(|_| ())
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        parts: Vec<(String, FormValue)>,
        fallback: &str,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.authorized(Method::Post, path)?.multipart(parts);
        self.execute(request, fallback).await
    }

    /// GET of a raw body (downloads)
    pub async fn get_raw(&self, path: &str, fallback: &str) -> Result<HttpResponse, ApiError> {
        let request = self.authorized(Method::Get, path)?;
        self.execute(request, fallback).await
    }
}
