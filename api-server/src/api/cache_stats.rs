use crate::cache::CacheStats;
use crate::models::context::ContextPointer;
use rocket::serde::json::Json;
use rocket::State;

/// Current cache statistics. Reading them never evicts entries.
#[get("/cache/stats")]
pub fn cache_stats(context: &State<ContextPointer>) -> Json<CacheStats> {
    Json(context.cache().stats())
}
