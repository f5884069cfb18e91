// ============================================================================
// HTTP TRANSPORT - the only place that talks to fetch()
// ============================================================================

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(String, FormValue)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: HttpBody::Empty,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = HttpBody::Json(body);
        self
    }

    pub fn multipart(mut self, parts: Vec<(String, FormValue)>) -> Self {
        self.body = HttpBody::Multipart(parts);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("could not build request: {0}")]
    Build(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

/// Sends one request. Single-threaded, so futures need not be `Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Browser fetch via gloo-net. Requests still pending after the timeout are
/// aborted and surface as network errors.
#[derive(Debug, Clone, Copy)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_seconds: u32) -> Self {
        Self {
            timeout_ms: timeout_seconds.saturating_mul(1000),
        }
    }

    fn build(
        request: &HttpRequest,
        signal: Option<&web_sys::AbortSignal>,
    ) -> Result<gloo_net::http::Request, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = builder.abort_signal(signal);

        let built = match &request.body {
            HttpBody::Empty => builder.build(),
            HttpBody::Json(body) => builder.json(body),
            HttpBody::Multipart(parts) => builder.body(Self::form_data(parts)?),
        };
        built.map_err(|e| TransportError::Build(e.to_string()))
    }

    fn form_data(parts: &[(String, FormValue)]) -> Result<web_sys::FormData, TransportError> {
        let js_err = |e: wasm_bindgen::JsValue| TransportError::Build(format!("{:?}", e));
        let form = web_sys::FormData::new().map_err(js_err)?;
        for (name, value) in parts {
            match value {
                FormValue::Text(text) => form.append_with_str(name, text).map_err(js_err)?,
                FormValue::File {
                    filename,
                    content_type,
                    bytes,
                } => {
                    let chunk = js_sys::Uint8Array::from(bytes.as_slice());
                    let sequence = js_sys::Array::of1(&chunk);
                    let options = web_sys::BlobPropertyBag::new();
                    options.set_type(content_type);
                    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&sequence, &options)
                        .map_err(js_err)?;
                    form.append_with_blob_and_filename(name, &blob, filename)
                        .map_err(js_err)?;
                }
            }
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let controller = web_sys::AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        let built = Self::build(&request, signal.as_ref())?;
        // Dropping the timer at the end of this call cancels it
        let _deadline = controller.map(|c| gloo_timers::callback::Timeout::new(self.timeout_ms, move || c.abort()));

        let response = built
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .binary()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        log::debug!("🌐 [HTTP] {:?} {} -> {}", request.method, request.url, status);
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
