//! Telegram adapter (Bot API `sendMessage`).
//!
//! This crate implements the `vnr-core` Notifier port over plain HTTPS + JSON.

use async_trait::async_trait;
use serde::Serialize;

use vnr_core::{errors::Error, ports::Notifier, Result};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramNotifier {
    token: String,
    api_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::External(format!("telegram client build error: {e}")))?;
        Ok(Self {
            token: token.into(),
            api_url: api_url.into(),
            http,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.token
        )
    }

    /// Reqwest errors embed the request URL, which carries the bot token.
    fn map_err(e: reqwest::Error) -> Error {
        Error::External(format!("telegram request error: {}", e.without_url()))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        let resp = self
            .http
            .post(self.send_message_url())
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(Self::map_err)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Self::map_err)?;

        if !status.is_success() {
            let description = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("description")
                        .and_then(|d| d.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(Error::External(format!(
                "telegram sendMessage failed: {status} {description}"
            )));
        }

        tracing::debug!(%status, bytes = body.len(), "telegram sendMessage ok");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[test]
    fn builds_bot_url() {
        let n = TelegramNotifier::with_api_url("123:abc", "http://localhost:8081/").unwrap();
        assert_eq!(
            n.send_message_url(),
            "http://localhost:8081/bot123:abc/sendMessage"
        );
        let n = TelegramNotifier::new("123:abc").unwrap();
        assert_eq!(
            n.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn debug_hides_token() {
        let n = TelegramNotifier::new("123:secret").unwrap();
        assert!(!format!("{n:?}").contains("secret"));
    }

    #[tokio::test]
    async fn posts_chat_id_and_text_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "chat_id": "-100200300",
                "text": "📊 VNSTAT\nUsage on eth0 in March 2024:"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let n = TelegramNotifier::with_api_url("123:abc", server.uri()).unwrap();
        n.send_text("-100200300", "📊 VNSTAT\nUsage on eth0 in March 2024:")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn api_errors_are_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let n = TelegramNotifier::with_api_url("123:abc", server.uri()).unwrap();
        let err = n.send_text("42", "hi").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("chat not found"));
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_token() {
        // Grab a free port, then close it so the connect is refused.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let n = TelegramNotifier::with_api_url("123:secret", format!("http://127.0.0.1:{port}"))
            .unwrap();
        let err = n.send_text("42", "hi").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("external error: telegram request error"));
        assert!(!msg.contains("secret"));
    }
}
