pub mod cache_stats;
pub mod ping;
pub mod posts;

use crate::cache::Cached;
use crate::models::context::ContextPointer;
use posts::PostsHandler;
use rocket::http::Method;
use rocket::Route;

/// Every route served under `/api`.
pub fn routes(context: &ContextPointer) -> Vec<Route> {
    let posts = Cached::new(
        *context.cache_ttl(),
        PostsHandler::new(context.post_client().clone()),
        context.cache().clone(),
    );

    let mut routes = routes![ping::ping, cache_stats::cache_stats];
    routes.push(Route::new(Method::Get, "/posts", posts));
    routes
}
