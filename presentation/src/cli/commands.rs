//! CLI command definitions

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mcpmap_domain::TransportKind;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Server selection flags were missing or contradictory.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFlagsError {
    #[error("cannot specify both --sse and --http flags")]
    Both,

    #[error("must specify either --sse=<url> or --http=<url>")]
    Missing,
}

/// CLI arguments for mcpmap
#[derive(Parser, Debug)]
#[command(name = "mcpmap")]
#[command(author, version, about = "A command-line tool for interacting with MCP servers")]
#[command(long_about = r#"
mcpmap is a command-line tool for interacting with Model Context Protocol (MCP)
servers. It supports both SSE (Server-Sent Events) and Streamable HTTP transports.

Parameters passed to `exec` are converted to the types declared in the tool's
input schema before the tool is called.

Configuration files are loaded from (in priority order):
1. MCPMAP_* environment variables (e.g. MCPMAP_CACHE__ENABLED=false)
2. --config <path>     Explicit config file
3. ./mcpmap.toml       Project-level config (or ./.mcpmap.toml)
4. <config dir>/mcpmap/config.toml   Global config

Example:
  mcpmap --http=https://example.com/mcp list tools
  mcpmap --sse=http://localhost:8080/sse exec search -p query=rust -p limit=5
  mcpmap cache info
"#)]
pub struct Cli {
    /// Use SSE transport with the specified server URL
    #[arg(long, global = true, value_name = "URL")]
    pub sse: Option<String>,

    /// Use Streamable HTTP transport with the specified server URL
    #[arg(long, global = true, value_name = "URL")]
    pub http: Option<String>,

    /// HTTP proxy URL (e.g. http://proxy.example.com:8080)
    #[arg(long, global = true, value_name = "URL")]
    pub proxy: Option<String>,

    /// Bearer token for authentication
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Client name to send in the MCP initialize request [default: mcpmap]
    #[arg(short = 'n', long = "name", global = true, value_name = "CLIENT")]
    pub client_name: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List available resources, tools, or prompts from the MCP server
    ///
    /// If no type is given, all three are listed.
    List {
        /// tools, resources or prompts
        #[arg(value_name = "TYPE")]
        kind: Option<String>,
    },

    /// Execute a tool on the MCP server
    Exec {
        /// Name of the tool to call
        tool: String,

        /// Tool parameter in format name=value (can be repeated)
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Manage the mcpmap cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Generate a shell completion script
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print dynamic completion candidates
    #[command(hide = true)]
    Complete {
        #[command(subcommand)]
        target: CompleteTarget,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CacheAction {
    /// Remove all cached server metadata
    Clear,
    /// Show cache statistics
    Info,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CompleteTarget {
    /// Tool names
    Tools {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// `name=` stubs for a tool's parameters
    Params {
        tool: String,
        #[arg(default_value = "")]
        prefix: String,
    },
}

impl Cli {
    /// The selected transport and server URL.
    pub fn server(&self) -> Result<(TransportKind, &str), ServerFlagsError> {
        match (&self.sse, &self.http) {
            (Some(_), Some(_)) => Err(ServerFlagsError::Both),
            (Some(url), None) => Ok((TransportKind::Sse, url.as_str())),
            (None, Some(url)) => Ok((TransportKind::StreamableHttp, url.as_str())),
            (None, None) => Err(ServerFlagsError::Missing),
        }
    }
}

/// Write the static completion script for `shell`.
pub fn write_completion_script(shell: Shell, out: &mut dyn Write) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mcpmap").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["list", "tools", "--http=https://example.com/mcp", "--json", "-vv"]);

        assert_eq!(
            cli.command,
            Some(Command::List {
                kind: Some("tools".to_string())
            })
        );
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.server(),
            Ok((TransportKind::StreamableHttp, "https://example.com/mcp"))
        );
    }

    #[test]
    fn test_exec_collects_repeated_params() {
        let cli = parse(&[
            "--sse",
            "http://localhost:8080/sse",
            "exec",
            "search",
            "-p",
            "query=rust",
            "--param",
            "limit=5",
        ]);
        assert_eq!(cli.server().map(|(kind, _)| kind), Ok(TransportKind::Sse));

        match cli.command {
            Some(Command::Exec { tool, params }) => {
                assert_eq!(tool, "search");
                assert_eq!(params, vec!["query=rust", "limit=5"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_server_flags_validation() {
        let both = parse(&["--sse=a", "--http=b", "list"]);
        assert_eq!(both.server(), Err(ServerFlagsError::Both));
        assert_eq!(
            ServerFlagsError::Both.to_string(),
            "cannot specify both --sse and --http flags"
        );

        let neither = parse(&["list"]);
        assert_eq!(neither.server(), Err(ServerFlagsError::Missing));
    }

    #[test]
    fn test_cache_commands_parse_without_server() {
        let cli = parse(&["cache", "info"]);
        assert_eq!(
            cli.command,
            Some(Command::Cache {
                action: CacheAction::Info
            })
        );
        assert_eq!(cli.server(), Err(ServerFlagsError::Missing));
    }

    #[test]
    fn test_hidden_complete_defaults_to_empty_prefix() {
        let cli = parse(&["--http=u", "complete", "params", "search"]);
        assert_eq!(
            cli.command,
            Some(Command::Complete {
                target: CompleteTarget::Params {
                    tool: "search".to_string(),
                    prefix: String::new(),
                }
            })
        );
    }

    #[test]
    fn test_client_name_short_flag() {
        let cli = parse(&["-n", "my-client", "cache", "clear"]);
        assert_eq!(cli.client_name.as_deref(), Some("my-client"));
    }

    #[test]
    fn test_completion_script_mentions_binary() {
        let mut out = Vec::new();
        write_completion_script(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("mcpmap"));
    }
}
