//! Scripted transport for unit tests
//!
//! Each URL gets a queue of outcomes. The last outcome repeats once the
//! queue is down to one entry; unscripted URLs answer 404.

use crate::crawler::transport::{PageRequest, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Outcome = Result<TransportResponse, TransportError>;

pub fn ok(body: &str) -> TransportResponse {
    TransportResponse {
        status: 200,
        body: body.to_string(),
        retry_after: None,
    }
}

pub fn status(code: u16) -> TransportResponse {
    TransportResponse {
        status: code,
        body: String::new(),
        retry_after: None,
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Outcome>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, url: &str, responses: Vec<TransportResponse>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), responses.into_iter().map(Ok).collect());
    }

    pub fn script_error(&self, url: &str, error: TransportError) {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), VecDeque::from(vec![Err(error)]));
    }

    pub fn calls(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<PageRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, request: &PageRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(&request.url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| Ok(status(404))),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| Ok(status(404))),
            None => Ok(status(404)),
        }
    }
}
