//! `buildstamp` 바이너리 진입점.

use buildstamp::interface::cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = Cli::parse_action();

    if let Err(err) = buildstamp::run(action).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
