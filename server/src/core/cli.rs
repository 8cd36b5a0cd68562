use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_LOG_QUERIES, ENV_PORT};

#[derive(Parser)]
#[command(name = "belaymatch")]
#[command(version, about = "Climbing partner matching API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Log every SQL statement at debug level
    #[arg(long, global = true, env = ENV_LOG_QUERIES)]
    pub log_queries: Option<bool>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub log_queries: Option<bool>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        log_queries: cli.log_queries,
    };
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "belaymatch",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--log-queries",
            "true",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.log_queries, Some(true));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_start_subcommand() {
        let cli = Cli::try_parse_from(["belaymatch", "start", "--debug"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Start)));
        assert!(cli.debug);
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["belaymatch", "--port", "notaport"]).is_err());
    }
}
