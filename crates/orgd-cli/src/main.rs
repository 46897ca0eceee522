//! `orgd` binary entry point

use orgd_cli::{build_cli, run, LOG_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let stdout = std::io::stdout();
    let ok = run(&matches, &mut stdout.lock())?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
