//! Stateless HTTP request builder and response parser for the collection API.
//!
//! # Design
//! `ApiClient` holds only the base URL and API prefix. Every operation is a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the typed variants are thin wrappers over
//! `build_request` / `parse_response`, so header merging, `detail`
//! extraction and the 204 rule apply to every resource alike.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::command::{ResourceKind, Toggleable};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ImageFile, ItemId, RecognitionResult};

const JSON_CONTENT_TYPE: &str = "application/json";
const REQUEST_FAILED: &str = "Request failed";
const RECOGNITION_FAILED: &str = "Recognition failed";

/// Caller-supplied parts of a JSON request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::method(HttpMethod::Get)
    }
}

impl RequestOptions {
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request whose body is `payload` serialized as JSON.
    pub fn json<T: Serialize>(method: HttpMethod, payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(Self {
            method,
            headers: Vec::new(),
            body: Some(body),
        })
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Stateless client for the collection API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    api_prefix: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: ClientConfig::default().api_prefix,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_path(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.api_prefix, kind.collection())
    }

    pub fn item_path(&self, kind: ResourceKind, id: ItemId) -> String {
        format!("{}/{id}", self.collection_path(kind))
    }

    pub fn recognize_path(&self) -> String {
        format!("{}/recognize", self.collection_path(ResourceKind::Pantry))
    }

    /// Build a JSON request for `path` (relative to the base URL).
    ///
    /// A JSON content type is always sent; a caller header with the same
    /// name (case-insensitive) replaces it.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())];
        for (name, value) in options.headers {
            match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(&name)) {
                Some(existing) => *existing = (name, value),
                None => headers.push((name, value)),
            }
        }
        HttpRequest {
            method: options.method,
            path: format!("{}{path}", self.base_url),
            headers,
            body: options.body,
        }
    }

    pub fn build_list(&self, kind: ResourceKind) -> HttpRequest {
        self.build_request(&self.collection_path(kind), RequestOptions::method(HttpMethod::Get))
    }

    pub fn build_create<P: Serialize>(&self, kind: ResourceKind, payload: &P) -> Result<HttpRequest, ApiError> {
        let options = RequestOptions::json(HttpMethod::Post, payload)?;
        Ok(self.build_request(&self.collection_path(kind), options))
    }

    /// PATCH without a body; the server flips the flag.
    pub fn build_toggle(&self, kind: Toggleable, id: ItemId) -> HttpRequest {
        self.build_request(&self.item_path(kind.into(), id), RequestOptions::method(HttpMethod::Patch))
    }

    pub fn build_delete(&self, kind: ResourceKind, id: ItemId) -> HttpRequest {
        self.build_request(&self.item_path(kind, id), RequestOptions::method(HttpMethod::Delete))
    }

    /// Multipart upload with a single `image` part. Not a JSON request, so
    /// the default content type does not apply.
    pub fn build_recognize(&self, image: &ImageFile) -> HttpRequest {
        let boundary = format!("nexus-{}", Uuid::new_v4().simple());
        let mut body = Vec::with_capacity(image.bytes.len() + 256);
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                escape_filename(&image.name)
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.content_type).as_bytes());
        body.extend_from_slice(&image.bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{}", self.base_url, self.recognize_path()),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            )],
            body: Some(body),
        }
    }

    /// Normalize a JSON response: non-2xx becomes `RequestFailed`, 204 is
    /// `None`, anything else must be a JSON document.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        if !response.is_success() {
            return Err(failure(&response, REQUEST_FAILED));
        }
        if response.status == 204 {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_list<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>, ApiError> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_create<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(self.parse_response(response)?)
    }

    /// Toggle and delete: only the status matters. A success body is never
    /// decoded, so it may be empty or not JSON at all.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        if !response.is_success() {
            return Err(failure(&response, REQUEST_FAILED));
        }
        Ok(())
    }

    pub fn parse_recognize(&self, response: HttpResponse) -> Result<RecognitionResult, ApiError> {
        if !response.is_success() {
            return Err(failure(&response, RECOGNITION_FAILED));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::Deserialization("response had no body".to_string()))?;
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// `RequestFailed` carrying the body's string `detail`, or `fallback`.
fn failure(response: &HttpResponse, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| fallback.to_string());
    ApiError::RequestFailed {
        status: response.status,
        message,
    }
}

fn escape_filename(name: &str) -> String {
    name.replace('"', "%22").replace('\r', "%0D").replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreateGrocery, Message};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body)
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list(ResourceKind::Messages);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/messages");
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn build_create_serializes_payload() {
        let input = CreateGrocery {
            name: "Milk".to_string(),
            quantity: "1".to_string(),
        };
        let req = client().build_create(ResourceKind::Groceries, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/groceries");
        let body: Value = serde_json::from_str(req.body_text().unwrap()).unwrap();
        assert_eq!(body["name"], "Milk");
        assert_eq!(body["quantity"], "1");
    }

    #[test]
    fn build_toggle_is_patch_without_body() {
        let req = client().build_toggle(Toggleable::Todos, 7);
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/api/todos/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_targets_item_path() {
        let req = client().build_delete(ResourceKind::Pantry, 3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/pantry/3");
    }

    #[test]
    fn caller_headers_merge_with_json_default() {
        let options = RequestOptions::method(HttpMethod::Get)
            .header("Content-Type", "text/plain")
            .header("x-trace", "abc");
        let req = client().build_request("/api/posts", options);
        assert_eq!(
            req.headers,
            vec![
                ("Content-Type".to_string(), "text/plain".to_string()),
                ("x-trace".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn empty_base_url_yields_relative_paths() {
        let req = ApiClient::new("").build_list(ResourceKind::Todos);
        assert_eq!(req.path, "/api/todos");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = ApiClient::new("http://localhost:3000/").build_list(ResourceKind::Todos);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
    }

    #[test]
    fn config_prefix_is_applied() {
        let config = ClientConfig {
            base_url: "http://nexus.local".to_string(),
            api_prefix: "/v2/".to_string(),
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.build_delete(ResourceKind::Posts, 1).path, "http://nexus.local/v2/posts/1");
        assert_eq!(client.recognize_path(), "/v2/pantry/recognize");
    }

    #[test]
    fn build_recognize_encodes_single_image_part() {
        let image = ImageFile::new("fridge \"left\".png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let req = client().build_recognize(&image);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/pantry/recognize");

        let boundary = req
            .header("content-type")
            .and_then(|ct| ct.strip_prefix("multipart/form-data; boundary="))
            .unwrap()
            .to_string();
        let body = req.body.unwrap();
        let head = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"fridge %22left%22.png\"\r\nContent-Type: image/png\r\n\r\n"
        );
        assert!(body.starts_with(head.as_bytes()));
        assert!(body.ends_with(format!("\r\n--{boundary}--\r\n").as_bytes()));
        assert!(body.windows(4).any(|w| w == [0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn parse_response_204_is_none() {
        assert_eq!(client().parse_response(response(204, "")).unwrap(), None);
    }

    #[test]
    fn parse_response_failure_uses_detail() {
        let err = client()
            .parse_response(response(404, r#"{"detail":"Message not found"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::RequestFailed {
                status: 404,
                message: "Message not found".to_string()
            }
        );
    }

    #[test]
    fn parse_response_failure_without_detail_falls_back() {
        let err = client().parse_response(response(500, "internal error")).unwrap_err();
        assert_eq!(err.to_string(), "Request failed");

        let err = client()
            .parse_response(response(422, r#"{"detail":[{"msg":"field required"}]}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn parse_list_success() {
        let body = r#"[{"id":1,"author":"Ana","content":"Hi","created_at":"2024-05-01T08:30:00"}]"#;
        let messages: Vec<Message> = client().parse_list(response(200, body)).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].author, "Ana");
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list::<Message>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_rejects_204() {
        let err = client().parse_list::<Message>(response(204, "")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_empty_accepts_record_body() {
        let body = r#"{"id":1,"description":"x","completed":true,"created_at":"2024-05-01T08:30:00"}"#;
        assert!(client().parse_empty(response(200, body)).is_ok());
    }

    #[test]
    fn parse_empty_ignores_non_json_success_body() {
        assert!(client().parse_empty(response(200, "")).is_ok());
        assert!(client().parse_empty(response(200, "OK")).is_ok());
        assert!(client().parse_empty(response(204, "")).is_ok());
    }

    #[test]
    fn parse_empty_failure_uses_detail() {
        let err = client()
            .parse_empty(response(404, r#"{"detail":"Todo item not found"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::RequestFailed {
                status: 404,
                message: "Todo item not found".to_string()
            }
        );
    }

    #[test]
    fn parse_recognize_failure_falls_back_to_recognition_message() {
        let err = client().parse_recognize(response(502, "<html>")).unwrap_err();
        assert_eq!(err.to_string(), "Recognition failed");

        let err = client()
            .parse_recognize(response(500, r#"{"detail":"Vision recognition is not configured."}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "Vision recognition is not configured.");
    }
}
