use std::path::PathBuf;

use gs_dispatch::DispatchRequest;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let request = DispatchRequest::read(path.as_deref(), std::io::stdin())?;
    let strategy = request.dispatch()?;
    println!("{}", serde_json::to_string_pretty(&strategy)?);
    Ok(())
}
