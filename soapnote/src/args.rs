use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Clinical note service
#[derive(Debug, Parser)]
#[command(name = "soapnote", about = "Turn recorded clinical encounters into SOAP notes")]
pub struct Args {
    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "SOAPNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "SOAPNOTE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Credential for the transcription and completion services
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log filter in `RUST_LOG` syntax
    #[arg(long, default_value = "info", env = "SOAPNOTE_LOG")]
    pub log: String,
}
