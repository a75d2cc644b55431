//! Server command implementation

use std::path::Path;

use anyhow::Result;
use outflow_core::LoadOptions;
use outflow_server::{parse_origins, ServerConfig};

pub async fn cmd_serve(
    host: &str,
    port: u16,
    statement: &Path,
    delimiter: u8,
    allowed_origins: &str,
) -> Result<()> {
    let allowed_origins = parse_origins(allowed_origins);

    println!("🚀 Starting Outflow web server...");
    println!("   Statement: {}", statement.display());
    println!("   Listening: http://{}:{}", host, port);
    if !allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = ServerConfig {
        statement_path: statement.to_path_buf(),
        load_options: LoadOptions { delimiter },
        allowed_origins,
    };

    outflow_server::serve(config, host, port).await?;

    Ok(())
}
