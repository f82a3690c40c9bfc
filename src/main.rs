mod application;
mod cli;
mod data;
mod domain;
mod http;
mod infra;
mod ml;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()?).init();

    let cli = Cli::parse();
    cli.run()
}

/// RUST_LOG plus our defaults: crate logs and one line per HTTP request.
fn log_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("crop_advisor=info".parse()?)
        .add_directive("tower_http=info".parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_logs_requests() {
        let filter = log_filter().unwrap().to_string();
        assert!(filter.contains("crop_advisor=info"), "got: {filter}");
        assert!(filter.contains("tower_http=info"), "got: {filter}");
    }
}
