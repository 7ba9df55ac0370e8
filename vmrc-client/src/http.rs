//! Minimal JSON-over-HTTP gateway implementation.
//!
//! The web service speaks a single-endpoint envelope protocol: every call
//! is a POST carrying `{"method": ..., "args": [...]}`, answered by either
//! `{"result": ...}` or `{"fault": {"code": ..., "message": ...}}`.
//! Connections are per-request; the protocol is stateless apart from the
//! references embedded in arguments.

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use vmrc_core::{RemoteFault, Value};

use crate::RpcGateway;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    method: &'a str,
    args: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    fault: Option<RemoteFault>,
}

/// Gateway speaking the JSON envelope protocol over HTTP/1.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// `host:port` of the web service endpoint.
    authority: String,
}

impl HttpGateway {
    /// Create a gateway for the given `host:port` endpoint.
    #[must_use]
    pub fn new(authority: impl Into<String>) -> Self {
        Self { authority: authority.into() }
    }

    /// POST the serialized envelope and return the raw response body.
    async fn post(&self, body: String) -> Result<String, RemoteFault> {
        let stream = TcpStream::connect(&self.authority).await.map_err(|e| {
            RemoteFault::transport(format!("connect to {}: {e}", self.authority))
        })?;
        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| RemoteFault::transport(format!("HTTP handshake: {e}")))?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("web service connection closed: {e}");
            }
        });

        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("Host", self.authority.as_str())
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len().to_string())
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| RemoteFault::transport(format!("build request: {e}")))?;

        let resp: Response<_> = sender
            .send_request(req)
            .await
            .map_err(|e| RemoteFault::transport(format!("send request: {e}")))?;

        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| RemoteFault::transport(format!("read response body: {e}")))?
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).into_owned();

        if !status.is_success() {
            return Err(RemoteFault::transport(format!("HTTP {status}: {text}")));
        }
        Ok(text)
    }
}

#[async_trait]
impl RpcGateway for HttpGateway {
    async fn call(&self, method: &str, args: &[Value]) -> Result<Value, RemoteFault> {
        let body = serde_json::to_string(&Envelope { method, args })
            .map_err(|e| RemoteFault::transport(format!("encode {method}: {e}")))?;

        let text = self.post(body).await?;

        let reply: Reply = serde_json::from_str(&text)
            .map_err(|e| RemoteFault::transport(format!("decode {method} reply: {e}")))?;
        if let Some(fault) = reply.fault {
            return Err(fault);
        }
        // A missing result field is a void return.
        Ok(reply.result.unwrap_or(Value::Void))
    }
}
