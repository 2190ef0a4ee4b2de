use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::TelegramError;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound side of a messaging channel.
///
/// Every method takes text in Telegram HTML markup and either succeeds or
/// reports why it did not. Fallback policy lives with the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), TelegramError>;
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), TelegramError>;
    async fn send_animation(&self, animation_url: &str, caption: &str)
        -> Result<(), TelegramError>;
}

/// Subset of the Bot API response envelope we care about.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client bound to a single chat.
pub struct TelegramClient {
    client: Client,
    api_base: String,
    bot_token: SecretString,
    chat_id: String,
    request_timeout: Duration,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramClient {
    /// Create a new Telegram client
    pub fn new(client: Client, bot_token: SecretString, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            bot_token,
            chat_id: chat_id.into(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Point the client at a different API host (self-hosted Bot API server, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the deadline for one API call, response body included.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    async fn call(&self, api_method: &str, mut body: Value) -> Result<(), TelegramError> {
        body["chat_id"] = json!(self.chat_id);
        body["parse_mode"] = json!("HTML");

        let url = format!(
            "{}/bot{}/{}",
            self.api_base,
            self.bot_token.expose_secret(),
            api_method
        );

        let exchange = async {
            let resp = self.client.post(&url).json(&body).send().await?;
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            Ok::<_, reqwest::Error>((status, text))
        };
        let (status, text) = tokio::time::timeout(self.request_timeout, exchange)
            .await
            .map_err(|_| TelegramError::Timeout)?
            // Strip the URL: it embeds the bot token.
            .map_err(|e| TelegramError::Http(e.without_url()))?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&text).ok();

        let ok = status.is_success() && parsed.as_ref().map_or(true, |r| r.ok);
        if !ok {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or_else(|| text.chars().take(200).collect());
            tracing::debug!(method = api_method, status = %status, "Telegram API rejected request");
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description,
            });
        }

        tracing::debug!(method = api_method, "Telegram API call succeeded");
        Ok(())
    }
}

#[async_trait]
impl Transport for TelegramClient {
    /// Send a text message
    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        self.call("sendMessage", json!({ "text": text })).await
    }

    /// Send a photo with caption
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), TelegramError> {
        self.call("sendPhoto", json!({ "photo": photo_url, "caption": caption }))
            .await
    }

    /// Send an animation (GIF) with caption
    async fn send_animation(
        &self,
        animation_url: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        self.call(
            "sendAnimation",
            json!({ "animation": animation_url, "caption": caption }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TelegramClient {
        TelegramClient::new(
            Client::new(),
            SecretString::from("123:TOKEN".to_string()),
            "@channel",
        )
        .with_api_base(server.uri())
    }

    fn ok_body() -> serde_json::Value {
        json!({ "ok": true, "result": {} })
    }

    #[tokio::test]
    async fn test_send_message_posts_html() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:TOKEN/sendMessage"))
            .and(body_partial_json(json!({
                "chat_id": "@channel",
                "text": "<b>hi</b>",
                "parse_mode": "HTML"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).send_message("<b>hi</b>").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_photo_and_animation_use_their_methods() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:TOKEN/sendPhoto"))
            .and(body_partial_json(json!({
                "photo": "https://a/1.png",
                "caption": "cap"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bot123:TOKEN/sendAnimation"))
            .and(body_partial_json(json!({
                "animation": "https://a/1.gif",
                "caption": "cap"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.send_photo("https://a/1.png", "cap").await.unwrap();
        client.send_animation("https://a/1.gif", "cap").await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_surfaces_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: wrong file identifier/HTTP URL specified"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_photo("https://a/broken.png", "cap")
            .await
            .unwrap_err();
        match err {
            TelegramError::Api {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert!(description.contains("wrong file identifier"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ok_false_with_200_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": false, "description": "nope" })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).send_message("x").await;
        assert!(matches!(result, Err(TelegramError::Api { status: 200, .. })));
    }

    #[tokio::test]
    async fn test_stalled_response_body_times_out() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 500\r\n\r\n{\"ok\"")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(socket);
        });

        let client = TelegramClient::new(
            Client::new(),
            SecretString::from("123:TOKEN".to_string()),
            "@channel",
        )
        .with_api_base(format!("http://{addr}"))
        .with_request_timeout(Duration::from_millis(200));

        let result = tokio::time::timeout(Duration::from_secs(10), client.send_message("hi"))
            .await
            .expect("send must not hang on a stalled body");
        assert!(matches!(result, Err(TelegramError::Timeout)), "{result:?}");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(
            Client::new(),
            SecretString::from("123:SECRET".to_string()),
            "@c",
        );
        assert!(!format!("{:?}", client).contains("SECRET"));
    }
}
