//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use formstate_lib::Fields;
use formstate_lib::FormOptions;
use formstate_lib::Method;
use formstate_lib::error::TransportError;
use formstate_lib::payload::Payload;
use formstate_lib::transport::Transport;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TestLogger;

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// What the scripted transport answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(serde_json::Value),
    Fail(u16, serde_json::Value),
    Offline,
}

/// A request captured by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct Sent {
    pub method: Method,
    pub url: String,
    pub payload: Payload,
}

/// In-memory transport that answers requests with scripted replies.
///
/// Replies are used in order; the last one repeats.
pub struct ScriptedTransport {
    replies: Mutex<Vec<Reply>>,
    sent: Mutex<Vec<Sent>>,
}

impl ScriptedTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Self::sequence(vec![reply])
    }

    pub fn sequence(replies: Vec<Reply>) -> Arc<Self> {
        assert!(!replies.is_empty(), "at least one reply is required");
        Arc::new(Self {
            replies: Mutex::new(replies),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: serde_json::Value) -> Arc<Self> {
        Self::new(Reply::Ok(body))
    }

    pub fn fail(status: u16, body: serde_json::Value) -> Arc<Self> {
        Self::new(Reply::Fail(status, body))
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Sent {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.sent.lock().unwrap().push(Sent {
            method,
            url: url.to_string(),
            payload,
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 { replies.remove(0) } else { replies[0].clone() }
        };

        match reply {
            Reply::Ok(body) => Ok(body),
            Reply::Fail(status, body) => Err(TransportError::http(status, body)),
            Reply::Offline => Err(TransportError::Other("connection refused".to_string())),
        }
    }
}

pub fn options(transport: &Arc<ScriptedTransport>) -> FormOptions {
    FormOptions::default().with_shared_transport(transport.clone())
}

pub fn fields(json: serde_json::Value) -> Fields {
    match formstate_lib::Value::from(json) {
        formstate_lib::Value::Object(fields) => fields,
        other => panic!("expected an object, got {}", other.type_name()),
    }
}
