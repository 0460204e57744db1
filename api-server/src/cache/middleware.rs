//! Response cache wrapped around a request handler.
//!
//! `Cached` reads the request once, derives a [`CacheKey`] from it and either
//! replays a stored response or runs the wrapped [`ResponseProducer`] and
//! stores what it produced.

use super::{CacheKey, CacheStore};
use rocket::data::{Data, Limits};
use rocket::http::{ContentType, Status};
use rocket::outcome::Outcome;
use rocket::route::{self, Handler};
use rocket::{Request, Response};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// The parts of an HTTP request a cached handler may depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheableRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

/// Everything a client observes of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    #[serde(with = "base64_body")]
    pub body: Vec<u8>,
}

/// Stores the body as one base64 string instead of an array of numbers.
mod base64_body {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(body))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

impl CapturedResponse {
    /// JSON response with the given status.
    pub fn json<T: Serialize + ?Sized>(status: Status, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status: status.code,
                headers: vec![("Content-Type".to_string(), ContentType::JSON.to_string())],
                body,
            },
            Err(err) => {
                log::error!("Failed to serialize response body: {}", err);
                Self {
                    status: Status::InternalServerError.code,
                    headers: vec![("Content-Type".to_string(), ContentType::JSON.to_string())],
                    body: br#"{"error":"failed to serialize response"}"#.to_vec(),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_response<'r>(self) -> Response<'r> {
        let mut builder = Response::build();
        builder.status(Status::new(self.status));
        for (name, value) in self.headers {
            builder.raw_header_adjoin(name, value);
        }
        builder.sized_body(self.body.len(), Cursor::new(self.body));
        builder.finalize()
    }
}

/// Anything that turns a request into a full response.
#[rocket::async_trait]
pub trait ResponseProducer: Send + Sync + 'static {
    async fn produce(&self, request: &CacheableRequest) -> CapturedResponse;
}

/// Caches the successful responses of `P` for `ttl`.
///
/// Non-2xx responses are passed through and never stored. A zero `ttl`
/// disables storing altogether.
pub struct Cached<P> {
    producer: Arc<P>,
    store: Arc<CacheStore>,
    ttl: Duration,
}

impl<P> Clone for Cached<P> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
            store: self.store.clone(),
            ttl: self.ttl,
        }
    }
}

impl<P: ResponseProducer> Cached<P> {
    pub fn new(ttl: Duration, producer: P, store: Arc<CacheStore>) -> Self {
        Self {
            producer: Arc::new(producer),
            store,
            ttl,
        }
    }

    pub async fn respond(&self, request: &CacheableRequest) -> CapturedResponse {
        let key = CacheKey::from_request(request);

        if let Some(payload) = self.store.get(key.as_str()) {
            match serde_json::from_slice::<CapturedResponse>(&payload) {
                Ok(cached) => {
                    log::debug!("Cache hit for {} {} ({})", request.method, request.path, key);
                    return cached;
                }
                Err(err) => log::warn!("Ignoring unreadable cache entry {}: {}", key, err),
            }
        }

        log::debug!("Cache miss for {} {} ({})", request.method, request.path, key);
        let response = self.producer.produce(request).await;

        if response.is_success() {
            match serde_json::to_vec(&response) {
                Ok(payload) => {
                    self.store.set(key.into_string(), payload, self.ttl);
                }
                Err(err) => log::warn!("Not caching response for {}: {}", key, err),
            }
        }

        response
    }
}

#[rocket::async_trait]
impl<P: ResponseProducer> Handler for Cached<P> {
    async fn handle<'r>(&self, request: &'r Request<'_>, data: Data<'r>) -> route::Outcome<'r> {
        let limit = request.limits().get("json").unwrap_or(Limits::JSON);
        let body = match data.open(limit).into_bytes().await {
            Ok(body) if body.is_complete() => body.into_inner(),
            Ok(_) => return Outcome::Error(Status::PayloadTooLarge),
            Err(err) => {
                log::warn!("Failed to read request body: {}", err);
                return Outcome::Error(Status::BadRequest);
            }
        };

        let cacheable = CacheableRequest {
            method: request.method().as_str().to_string(),
            path: request.uri().path().as_str().to_string(),
            query: request.uri().query().map(|query| query.as_str().to_string()),
            body,
        };

        Outcome::Success(self.respond(&cacheable).await.into_response())
    }
}
