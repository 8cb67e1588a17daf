use clap::arg;
use clap::command;
use clap::Parser;
use chatkit_session::server;
use chatkit_session::utils::config_loader;
use chatkit_session::utils::logging;
use anyhow::Result;
use chatkit_session::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config; built-in defaults are used when omitted
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(args.config.as_deref()).await?;

    // -------------------------------
    // 2. Logging
    // -------------------------------

    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 3. Vendor credential + ChatKit client
    //
    // fails fast when the api key env var is missing
    // -------------------------------

    let state = server::server::build_state(&service_config).await?;

    // -------------------------------
    // 4. Start http server
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config.settings, state).await?;

    Ok(())
}
