use crate::models::context::ContextPointer;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;
use std::time::Duration;
use tokio::net::TcpStream;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PingPacket {
    pub success: bool,
}

/// Whether a TCP connection to `host` can be opened within `timeout`.
pub async fn is_reachable(host: &str, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect(host)).await {
        Ok(Ok(_)) => true,
        Ok(Err(err)) => {
            log::warn!("Upstream {} unreachable: {}", host, err);
            false
        }
        Err(_) => {
            log::warn!("Upstream {} did not answer within {:?}", host, timeout);
            false
        }
    }
}

#[get("/ping")]
pub async fn ping(context: &State<ContextPointer>) -> Json<PingPacket> {
    let health = context.config().health();
    Json(PingPacket {
        success: is_reachable(health.host(), health.timeout()).await,
    })
}
