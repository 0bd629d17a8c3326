//! Blocking HTTP transport backed by reqwest.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use restmodel_core::{Error, Result, TransportError};

use crate::config::ClientConfig;
use crate::transport::{Method, RawResponse, Request, Transport};

/// Synchronous transport: one connection per request, no reuse, no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    user_agent: String,
    log_path: Option<PathBuf>,
}

impl HttpTransport {
    /// Create a transport from client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            user_agent: config.user_agent().to_string(),
            log_path: config.log_path().map(PathBuf::from),
        }
    }

    fn log_exchange(&self, request: &Request, response: &RawResponse) {
        let Some(path) = &self.log_path else { return };

        let (url, body) = if request.method.sends_body() {
            (request.url.clone(), query_string(&request.params))
        } else {
            (url_with_query(request), String::new())
        };
        let entry = format!(
            "\n[{}] {} {} HTTP/1.1\nUser-Agent: {}\nAccept: application/json\n\n{}\n{}\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
            request.method.as_str(),
            url,
            self.user_agent,
            body,
            response.body,
        );
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(entry.as_bytes()));
        if let Err(error) = written {
            // Best-effort: a broken log destination must not fail the request.
            tracing::warn!(path = %path.display(), error = %error, "failed to write request log");
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<RawResponse> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| connect_error("failed to build HTTP client", e))?;

        let builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
            Method::Put => client.put(&request.url),
            Method::Delete => client.delete(&request.url),
        };
        let builder = builder.header("Accept", "application/json");
        let builder = if request.method.sends_body() {
            builder.form(&request.params)
        } else {
            builder.query(&request.params)
        };

        let response = builder
            .send()
            .map_err(|e| connect_error("request failed", e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| connect_error("failed to read response body", e))?;

        let raw = RawResponse { status, body };
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            status,
            "request completed"
        );
        self.log_exchange(request, &raw);
        Ok(raw)
    }
}

fn connect_error(message: &str, source: reqwest::Error) -> Error {
    Error::Transport(TransportError {
        message: format!("{message}: {source}"),
        status: None,
        source: Some(Box::new(source)),
    })
}

fn query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn url_with_query(request: &Request) -> String {
    if request.params.is_empty() {
        request.url.clone()
    } else {
        format!("{}?{}", request.url, query_string(&request.params))
    }
}
