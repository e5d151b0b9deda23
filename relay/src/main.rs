mod lobby;
mod server;

use env_logger::Env;
use log::error;

use horde_shared::DEFAULT_PORT;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    if let Err(err) = server::run(port).await {
        error!("Relay server failed: {}", err);
        std::process::exit(1);
    }
}
