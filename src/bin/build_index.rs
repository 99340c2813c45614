//! School Index Build CLI
//!
//! Compiles `index/root_index.yaml` and every `resources/<folder>/adapters.yaml`
//! into `school_index.pb`. Run from the catalogue root. Arguments are ignored.

use school_index::{BuildConfig, IndexBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Build failed! Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    IndexBuilder::new(BuildConfig::default()).run()?;
    Ok(())
}
