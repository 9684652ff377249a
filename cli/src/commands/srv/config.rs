//! # PulseBot Data Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Command-line arguments for `pulsebot srv` and the effective server settings
//! derived from them. Provider credentials, prompts and history come from the
//! regular PulseBot configuration (`core::config`), not from here.
//!
//! ```bash
//! pulsebot srv                          # 127.0.0.1:8700
//! pulsebot srv --host 0.0.0.0 -p 9000 --no-cors
//! ```
//!
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 8700;

/// # Server Command Arguments (`SrvArgs`)
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn from_args(args: &SrvArgs) -> Self {
        Self {
            port: args.port,
            host: args.host,
            enable_cors: !args.no_cors,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            enable_cors: true,
        }
    }
}
