//! HTTP Remote Collection
//!
//! REST bindings for the item service:
//! `GET /items`, `POST /items`, `PUT /items/{id}`, `DELETE /items/{id}`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::{ApiConfig, ConfigError};
use crate::item::{Item, ItemFields, ItemId};
use crate::remote::{RemoteCollection, RemoteError, RemoteResult};

/// Item service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpCollection {
    client: Client,
    base: Url,
    endpoint: String,
}

impl HttpCollection {
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        Self::with_client(Client::new(), config)
    }

    /// Use a preconfigured client (proxies, default headers, ...)
    pub fn with_client(client: Client, config: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            base: config.parsed_base()?,
            endpoint: config.base_url().to_string(),
        })
    }

    /// `{base}/items` or `{base}/items/{id}`; the id is escaped as one path segment
    fn items_url(&self, id: Option<&ItemId>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("items");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies optionally carry {"error": "..."}
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        log::warn!("[HTTP] {} -> {} ({:?})", self.endpoint, status, reason);
        Err(RemoteError::Status {
            status: status.as_u16(),
            reason,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// The backend answers a no-op update with a message instead of the item
#[derive(Deserialize)]
#[serde(untagged)]
enum UpdateReply {
    Item(Item),
    Unchanged {
        #[allow(dead_code)]
        message: String,
    },
}

#[async_trait(?Send)]
impl RemoteCollection for HttpCollection {
    async fn list(&self) -> RemoteResult<Vec<Item>> {
        let url = self.items_url(None);
        log::debug!("[HTTP] GET {}", url);
        let response = self.send(self.client.get(url)).await?;

        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        // `null` is as good as an empty list
        let items: Option<Vec<Item>> =
            serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(items.unwrap_or_default())
    }

    async fn create(&self, fields: &ItemFields) -> RemoteResult<Item> {
        let url = self.items_url(None);
        log::debug!("[HTTP] POST {}", url);
        let response = self.send(self.client.post(url).json(fields)).await?;
        Self::read_json(response).await
    }

    async fn update(&self, id: &ItemId, fields: &ItemFields) -> RemoteResult<Item> {
        let url = self.items_url(Some(id));
        log::debug!("[HTTP] PUT {}", url);
        let response = self.send(self.client.put(url).json(fields)).await?;

        match Self::read_json::<UpdateReply>(response).await? {
            UpdateReply::Item(item) => Ok(item),
            // Stored values already equal the submitted ones
            UpdateReply::Unchanged { .. } => Ok(Item {
                id: id.clone(),
                name: fields.name.clone(),
                description: fields.description.clone(),
            }),
        }
    }

    async fn delete(&self, id: &ItemId) -> RemoteResult<()> {
        let url = self.items_url(Some(id));
        log::debug!("[HTTP] DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn collection_for(server: &MockServer) -> HttpCollection {
        HttpCollection::new(&ApiConfig::new(server.uri())).expect("valid mock server uri")
    }

    #[test]
    fn test_items_url_layout() {
        let remote = HttpCollection::new(&ApiConfig::new("http://api.local/v1/")).unwrap();
        assert_eq!(remote.items_url(None).as_str(), "http://api.local/v1/items");
        assert_eq!(
            remote.items_url(Some(&ItemId::from("a/b c"))).as_str(),
            "http://api.local/v1/items/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn test_list_decodes_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"_id":"1","name":"A","description":"d"},{"_id":"2","name":"B","description":"e"}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let items = collection_for(&server).await.list().await.unwrap();
        assert_eq!(items, vec![Item::new("1", "A", "d"), Item::new("2", "B", "e")]);
    }

    #[tokio::test]
    async fn test_list_accepts_numeric_and_duplicate_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id":1,"name":"A","description":"d"},{"_id":"65f0","id":"65f0","name":"B","description":"e"}]"#,
            ))
            .mount(&server)
            .await;

        let items = collection_for(&server).await.list().await.unwrap();
        assert_eq!(items, vec![Item::new("1", "A", "d"), Item::new("65f0", "B", "e")]);
    }

    #[tokio::test]
    async fn test_custom_client_is_used() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(header("x-client", "item-desk"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-client", reqwest::header::HeaderValue::from_static("item-desk"));
        let client = Client::builder().default_headers(headers).build().unwrap();
        let remote = HttpCollection::with_client(client, &ApiConfig::new(server.uri())).unwrap();

        assert!(remote.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_null_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        assert!(collection_for(&server).await.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missing_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(collection_for(&server).await.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(body_json(serde_json::json!({"name": "A", "description": "d"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_string(r#"{"_id":"abc","name":"A","description":"d"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let item = collection_for(&server)
            .await
            .create(&ItemFields::new("A", "d"))
            .await
            .unwrap();
        assert_eq!(item.id, ItemId::from("abc"));
    }

    #[tokio::test]
    async fn test_error_body_reason_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"error":"Missing 'name' or 'description' in request body"}"#,
            ))
            .mount(&server)
            .await;

        let err = collection_for(&server)
            .await
            .create(&ItemFields::new("A", "d"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::Status {
                status: 400,
                reason: Some("Missing 'name' or 'description' in request body".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_error_without_reason_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = collection_for(&server).await.list().await.unwrap_err();
        assert_eq!(err.reason(), "Request failed with status code 502");
    }

    #[tokio::test]
    async fn test_update_returns_server_item() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/items/1"))
            .and(body_json(serde_json::json!({"name": "B", "description": "d2"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"_id":"1","name":"B","description":"d2"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let item = collection_for(&server)
            .await
            .update(&ItemId::from("1"), &ItemFields::new("B", "d2"))
            .await
            .unwrap();
        assert_eq!(item, Item::new("1", "B", "d2"));
    }

    #[tokio::test]
    async fn test_update_without_changes_echoes_submission() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/items/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"message":"Item found but no changes applied"}"#),
            )
            .mount(&server)
            .await;

        let item = collection_for(&server)
            .await
            .update(&ItemId::from("1"), &ItemFields::new("same", "same"))
            .await
            .unwrap();
        assert_eq!(item, Item::new("1", "same", "same"));
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"message":"Item deleted successfully"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        collection_for(&server)
            .await
            .delete(&ItemId::from("1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"Item not found"}"#))
            .mount(&server)
            .await;

        let err = collection_for(&server)
            .await
            .delete(&ItemId::from("9"))
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "Item not found");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"unexpected":true}"#))
            .mount(&server)
            .await;

        let err = collection_for(&server)
            .await
            .create(&ItemFields::new("A", "d"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // nothing listens on port 1
        let remote = HttpCollection::new(&ApiConfig::new("http://127.0.0.1:1")).unwrap();

        let err = remote.list().await.unwrap_err();
        assert!(matches!(err, RemoteError::Transport(_)));
    }
}
