use api_server::models::config::Config;
use api_server::models::context::Context;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::sync::Arc;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    TermLogger::init(
        config.level_filter(),
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let context = Arc::new(Context::new(config));
    let _rocket = api_server::rocket(context).launch().await?;
    Ok(())
}
