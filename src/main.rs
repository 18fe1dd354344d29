use tokio::net::TcpListener;

use sofa_games::config::Config;
use sofa_games::startup::create_web_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    std_logger::Config::logfmt().init();

    let config = match Config::get() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Unable to load the Config. Error: '{error}'.");
            std::process::exit(1);
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address).await?;

    create_web_server(config, listener).await
}
