//! HTTP client for the chat REST API.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use luachat_core::{ChatId, ChatSummary, Message, SendReceipt};

use crate::api::ChatApi;
use crate::error::ClientError;
use crate::wire::{ChatResponse, MessageResponse, SendRequest, SendResponse};

/// Base URL of the hosted assistant API.
pub const DEFAULT_API_URL: &str = "https://77h9ikcjy1g6.manus.space/api";

/// HTTP client for the chat API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended with `segments`, each percent-encoded on its own.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Get JSON from an endpoint.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        debug!(url = %url, "GET request");

        let response = self.inner.get(url.clone()).send().await?;
        let response = check_status(response, url.path())?;

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Post a JSON body and decode the JSON reply.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        debug!(url = %url, "POST request");

        let response = self.inner.post(url.clone()).json(body).send().await?;
        let response = check_status(response, url.path())?;

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Issue a DELETE; the body, if any, is ignored.
    async fn delete(&self, segments: &[&str]) -> Result<(), ClientError> {
        let url = self.url(segments)?;
        debug!(url = %url, "DELETE request");

        let response = self.inner.delete(url.clone()).send().await?;
        check_status(response, url.path())?;
        Ok(())
    }
}

/// Any non-success status is a failure, whatever the body says.
fn check_status(response: reqwest::Response, path: &str) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status,
            path: path.to_string(),
        });
    }
    Ok(response)
}

#[async_trait]
impl ChatApi for HttpClient {
    async fn list_chats(&self) -> Result<Vec<ChatSummary>, ClientError> {
        let chats: Vec<ChatResponse> = self.get_json(&["chats"]).await?;
        Ok(chats.into_iter().map(ChatSummary::from).collect())
    }

    async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ClientError> {
        let messages: Vec<MessageResponse> = self
            .get_json(&["chat", chat_id.as_str(), "messages"])
            .await?;
        messages
            .into_iter()
            .map(|m| Message::try_from(m).map_err(ClientError::from))
            .collect()
    }

    async fn send_message(
        &self,
        message: &str,
        chat_id: Option<&ChatId>,
    ) -> Result<SendReceipt, ClientError> {
        let request = SendRequest {
            message,
            chat_id: chat_id.map(ChatId::as_str),
        };
        let response: SendResponse = self.post_json(&["chat"], &request).await?;
        Ok(response.into())
    }

    async fn delete_chat(&self, chat_id: &ChatId) -> Result<(), ClientError> {
        self.delete(&["chat", chat_id.as_str()]).await
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use luachat_core::Role;

    use super::*;

    /// Serve a stand-in API on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/", addr)
    }

    fn fake_api() -> Router {
        Router::new()
            .route(
                "/api/chats",
                get(|| async {
                    Json(json!([
                        {"id": 1, "title": "Metatables", "last_message": "A metatable is...", "timestamp": "2024-03-01T12:00:00"},
                        {"id": 2, "title": "Watermarks", "last_message": null, "timestamp": "2024-03-02T09:15:00"}
                    ]))
                }),
            )
            .route(
                "/api/chat/:chat_id/messages",
                get(|Path(chat_id): Path<String>| async move {
                    if chat_id != "1" {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    Ok(Json(json!([
                        {"id": 10, "type": "user", "content": "What is a metatable?", "timestamp": "2024-03-01T12:00:00"},
                        {"id": 11, "type": "bot", "content": "A metatable is...", "timestamp": "2024-03-01T12:00:03"}
                    ])))
                }),
            )
            .route(
                "/api/chat",
                post(|Json(body): Json<Value>| async move {
                    let message = body["message"].clone();
                    let chat_id = match &body["chat_id"] {
                        Value::Null => json!(99),
                        other => other.clone(),
                    };
                    Json(json!({
                        "chat_id": chat_id,
                        "user_message": {"id": 42, "content": message, "timestamp": "2024-03-01T12:00:00"},
                        "bot_response": {"id": 43, "content": "echo", "timestamp": "2024-03-01T12:00:02"}
                    }))
                }),
            )
            .route(
                "/api/chat/:chat_id",
                delete(|Path(chat_id): Path<String>| async move {
                    if chat_id == "1" || chat_id == "team/lua?v=2" {
                        StatusCode::NO_CONTENT
                    } else {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                }),
            )
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn test_list_chats() {
        let client = HttpClient::new(&serve(fake_api()).await);

        let chats = client.list_chats().await.unwrap();

        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, ChatId::new("1"));
        assert_eq!(chats[0].last_message_preview, "A metatable is...");
        assert_eq!(chats[1].last_message_preview, "");
    }

    #[tokio::test]
    async fn test_chat_messages() {
        let client = HttpClient::new(&serve(fake_api()).await);

        let messages = client.chat_messages(&ChatId::new("1")).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);

        let missing = client.chat_messages(&ChatId::new("5")).await;
        assert!(matches!(
            missing,
            Err(ClientError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_send_message_new_and_existing_chat() {
        let client = HttpClient::new(&serve(fake_api()).await);

        let receipt = client.send_message("hello", None).await.unwrap();
        assert_eq!(receipt.chat_id, ChatId::new("99"));
        assert_eq!(receipt.user_message.content, "hello");
        assert_eq!(receipt.user_message.id.as_str(), "42");
        assert_eq!(receipt.assistant_message.content, "echo");

        let receipt = client
            .send_message("again", Some(&ChatId::new("7")))
            .await
            .unwrap();
        assert_eq!(receipt.chat_id, ChatId::new("7"));
    }

    #[tokio::test]
    async fn test_delete_chat_status() {
        let client = HttpClient::new(&serve(fake_api()).await);

        assert!(client.delete_chat(&ChatId::new("1")).await.is_ok());
        assert!(matches!(
            client.delete_chat(&ChatId::new("2")).await,
            Err(ClientError::Status { .. })
        ));
    }

    #[tokio::test]
    async fn test_chat_id_is_one_path_segment() {
        let client = HttpClient::new(&serve(fake_api()).await);

        let url = client.url(&["chat", "team/lua?v=2"]).unwrap();
        assert!(url.as_str().ends_with("/api/chat/team%2Flua%3Fv=2"));
        assert!(client.delete_chat(&ChatId::new("team/lua?v=2")).await.is_ok());

        let missing = client.chat_messages(&ChatId::new("1/x")).await;
        assert!(matches!(
            missing,
            Err(ClientError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(&format!("http://{}/api", addr));
        assert!(matches!(client.list_chats().await, Err(ClientError::Http(_))));
    }
}
