use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod library;
mod player;
mod registry;
mod runtime;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the bridge protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    runtime::run()
}
