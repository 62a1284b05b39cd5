//! CLI entrypoint for mcpmap
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use mcpmap_application::{
    CompleteUseCase, ExecToolInput, ExecToolUseCase, ExecutionParams, LoadMetadataUseCase,
    ManageCacheUseCase, McpGateway, MetadataCache, MetadataSource, NoMetadataCache,
};
use mcpmap_domain::{ConnectionConfig, MetadataKind, OutputFormat, TransportKind};
use mcpmap_infrastructure::{
    CacheDirectory, ConfigLoader, FileConfig, FileMetadataCache, RmcpGateway, init_logging,
    resolve_cache_dir,
};
use mcpmap_presentation::{
    CacheAction, Cli, Command, CompleteTarget, ConsoleFormatter, OutputConfig,
    write_completion_script,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;

    // Keeps the file appender flushing until exit
    let _log_guard =
        init_logging(cli.verbose, config.logging.file.as_deref()).context("Failed to open log file")?;

    info!("Starting mcpmap");

    let output = OutputConfig::new(config.output.format, config.output.color).with_json_flag(cli.json);
    output.apply_color();

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let cache_dir = resolve_cache_dir(config.cache.dir.as_deref());
    debug!("Cache directory: {}", cache_dir.display());

    match command {
        Command::Cache { action } => run_cache(action, &cache_dir, output.format),
        Command::Completion { shell } => {
            write_completion_script(shell, &mut std::io::stdout());
            Ok(())
        }
        Command::List { kind } => {
            let kind: MetadataKind = kind.as_deref().unwrap_or_default().parse()?;
            let runtime = ServerRuntime::new(&cli, &config, cache_dir)?;
            run_list(&runtime, kind, output.format).await
        }
        Command::Exec { tool, params } => {
            let runtime = ServerRuntime::new(&cli, &config, cache_dir)?;
            run_exec(&runtime, tool, params).await
        }
        Command::Complete { target } => {
            // Completion never fails loudly
            match ServerRuntime::new(&cli, &config, cache_dir) {
                Ok(runtime) => run_complete(&runtime, target).await,
                Err(e) => debug!("Completion skipped: {}", e),
            }
            Ok(())
        }
    }
}

/// Everything a server-facing command needs.
struct ServerRuntime {
    connection: ConnectionConfig,
    params: ExecutionParams,
    gateway: Arc<dyn McpGateway>,
    cache: Arc<dyn MetadataCache>,
}

impl ServerRuntime {
    fn new(cli: &Cli, config: &FileConfig, cache_dir: PathBuf) -> Result<Self> {
        let (transport, url) = cli.server()?;
        let connection = build_connection(cli, config, transport, url);
        let params = config.timeouts.to_execution_params();

        // === Dependency Injection ===
        let gateway: Arc<dyn McpGateway> = Arc::new(RmcpGateway::new(params.connect_timeout));
        let cache: Arc<dyn MetadataCache> = if config.cache.enabled {
            Arc::new(FileMetadataCache::new(cache_dir))
        } else {
            Arc::new(NoMetadataCache)
        };

        Ok(Self {
            connection,
            params,
            gateway,
            cache,
        })
    }
}

/// Command-line flags take precedence over configured values.
fn build_connection(
    cli: &Cli,
    config: &FileConfig,
    transport: TransportKind,
    url: &str,
) -> ConnectionConfig {
    let client_name = cli
        .client_name
        .clone()
        .unwrap_or_else(|| config.connection.client_name.clone());
    let mut connection = ConnectionConfig::new(url, transport).with_client_name(client_name);

    if let Some(proxy) = cli.proxy.clone().or_else(|| config.connection.proxy.clone()) {
        connection = connection.with_proxy(proxy);
    }
    if let Some(token) = cli.token.clone().or_else(|| config.connection.token.clone()) {
        connection = connection.with_token(token);
    }

    connection
}

async fn run_list(runtime: &ServerRuntime, kind: MetadataKind, format: OutputFormat) -> Result<()> {
    let use_case = LoadMetadataUseCase::new(runtime.gateway.clone(), runtime.cache.clone());
    let loaded = use_case.execute(&runtime.connection).await?;

    if loaded.source == MetadataSource::Cache {
        eprintln!(
            "{}",
            ConsoleFormatter::format_warning("Using cached data (server unavailable)")
        );
    }

    print!("{}", ConsoleFormatter::format_list(&loaded.data, kind, format));
    Ok(())
}

async fn run_exec(runtime: &ServerRuntime, tool: String, args: Vec<String>) -> Result<()> {
    let use_case = ExecToolUseCase::new(runtime.gateway.clone(), runtime.cache.clone())
        .with_params(runtime.params);

    let output = use_case
        .execute(ExecToolInput::new(runtime.connection.clone(), tool, args))
        .await?;

    for warning in &output.warnings {
        eprintln!("{}", ConsoleFormatter::format_warning(warning));
    }
    if output.schema_source == Some(MetadataSource::Cache) {
        info!("Parameters converted with the cached tool schema");
    }

    println!("{}", ConsoleFormatter::format_tool_result(&output.result));
    Ok(())
}

async fn run_complete(runtime: &ServerRuntime, target: CompleteTarget) {
    let use_case = CompleteUseCase::new(runtime.gateway.clone(), runtime.cache.clone())
        .with_params(runtime.params);

    let candidates = match target {
        CompleteTarget::Tools { prefix } => use_case.tools(&runtime.connection, &prefix).await,
        CompleteTarget::Params { tool, prefix } => {
            use_case.params(&runtime.connection, &tool, &prefix).await
        }
    };

    print!("{}", ConsoleFormatter::format_candidates(&candidates));
}

fn run_cache(action: CacheAction, cache_dir: &Path, format: OutputFormat) -> Result<()> {
    let use_case = ManageCacheUseCase::new(Arc::new(CacheDirectory::new(cache_dir)));

    match action {
        CacheAction::Clear => {
            let removed = use_case.clear().context("Failed to clear cache")?;
            println!("{}", ConsoleFormatter::format_cache_cleared(removed, format));
        }
        CacheAction::Info => {
            let info = use_case.info().context("Failed to get cache info")?;
            print!("{}", ConsoleFormatter::format_cache_info(&info, format));
        }
    }

    Ok(())
}
