#[macro_use]
extern crate rocket;

pub mod api;
pub mod cache;
pub mod models;


use models::context::ContextPointer;
use rocket::{Build, Rocket};

/// Assemble the server. The listener address and port come only from the
/// context's `server` config and override `ROCKET_ADDRESS`/`ROCKET_PORT`;
/// every other rocket setting keeps rocket's own sources.
pub fn rocket(context: ContextPointer) -> Rocket<Build> {
    let server = context.config().server();
    let figment = rocket::Config::figment()
        .merge(("address", server.address().clone()))
        .merge(("port", server.port()));

    rocket::custom(figment)
        .mount("/api", api::routes(&context))
        .manage(context)
}
