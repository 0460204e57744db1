use crate::cache::{CacheableRequest, CapturedResponse, ResponseProducer};
use post_search_client::{PostClient, SearchOptions};
use rocket::http::Status;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ErrorPacket {
    pub error: String,
}

/// Raw request fields, before validation.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct FetchPacket {
    tags: Option<String>,
    sort_by: Option<String>,
    direction: Option<String>,
}

impl FetchPacket {
    /// Fields come from the JSON body. A blank body falls back to the query
    /// string. A body that does not decode is treated as an empty object.
    fn from_request(request: &CacheableRequest) -> Self {
        if request.body.iter().all(u8::is_ascii_whitespace) {
            let query = request.query.as_deref().unwrap_or_default();
            return Self::from_query(query);
        }

        serde_json::from_slice(&request.body).unwrap_or_else(|err| {
            log::debug!("Ignoring undecodable request body: {}", err);
            Self::default()
        })
    }

    fn from_query(query: &str) -> Self {
        let mut packet = Self::default();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*name {
                "tags" => &mut packet.tags,
                "sortBy" => &mut packet.sort_by,
                "direction" => &mut packet.direction,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        packet
    }
}

/// Produces the `/api/posts` response: validate, aggregate, serialize.
pub struct PostsHandler {
    client: PostClient,
}

impl PostsHandler {
    pub fn new(client: PostClient) -> Self {
        Self { client }
    }
}

fn error(status: Status, message: String) -> CapturedResponse {
    CapturedResponse::json(status, &ErrorPacket { error: message })
}

#[rocket::async_trait]
impl ResponseProducer for PostsHandler {
    async fn produce(&self, request: &CacheableRequest) -> CapturedResponse {
        let packet = FetchPacket::from_request(request);
        let options = match SearchOptions::parse(
            packet.tags.as_deref(),
            packet.sort_by.as_deref(),
            packet.direction.as_deref(),
        ) {
            Ok(options) => options,
            Err(err) => {
                log::debug!("Rejected posts request, invalid {}: {}", err.option(), err);
                return error(Status::BadRequest, err.to_string());
            }
        };

        match self.client.search(&options).await {
            Ok(posts) => CapturedResponse::json(Status::Ok, &posts),
            Err(err) => {
                log::error!("Posts aggregation failed: {}", err);
                error(Status::InternalServerError, err.to_string())
            }
        }
    }
}
