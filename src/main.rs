use std::io;

use anyhow::Context;

use greenwallet::{shell, AppConfig, AppState};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "greenwallet=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }

    let config = AppConfig::from_env().context("load configuration")?;
    tracing::info!(
        data_file = %config.data_file.display(),
        password_scheme = %config.password_scheme,
        load_policy = %config.load_policy,
        "starting"
    );

    let mut state = AppState::init(config).context("open wallet store")?;
    shell::run(&mut state, io::stdin().lock(), io::stdout().lock())
}
