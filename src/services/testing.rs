// Scripted transport for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};

struct Scripted {
    result: Result<HttpResponse, TransportError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Answers requests in FIFO order from a script, recording every request
#[derive(Clone, Default)]
pub struct FakeTransport {
    script: Rc<RefCell<VecDeque<Scripted>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) {
        self.script.borrow_mut().push_back(Scripted {
            result: Ok(response),
            gate: None,
        });
    }

    pub fn push_error(&self, error: TransportError) {
        self.script.borrow_mut().push_back(Scripted {
            result: Err(error),
            gate: None,
        });
    }

    /// Response held back until the returned sender fires
    pub fn push_gated(&self, response: HttpResponse) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted {
            result: Ok(response),
            gate: Some(rx),
        });
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        let Some(scripted) = next else {
            return Err(TransportError::Network("no scripted response".to_string()));
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.result
    }
}

pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json; charset=utf-8".to_string()),
        body: body.to_string().into_bytes(),
    }
}

pub fn raw_response(status: u16, content_type: &str, body: &[u8]) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some(content_type.to_string()),
        body: body.to_vec(),
    }
}
