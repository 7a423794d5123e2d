use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use travlogs::config::TravConfig;
use travlogs::query::{Direction, NameFilter};
use travlogs::report::{self, GraphStats, OutputFormat};
use travlogs::session::load_build_graph;

/// Query source/target reachability over a build log
#[derive(Parser, Debug)]
#[command(name = "travlogs", version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Build output directory holding build_log.json
    #[arg(long, global = true, env = "TRAVLOGS_BUILD_DIR", default_value = ".")]
    build_dir: PathBuf,

    /// Always rebuild the graph; never read or write graph.cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Record rules to include (repeatable); defaults to cc, cxx, link, solink, alink
    #[arg(long = "rule", global = true)]
    rules: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find leaf sources that feed the given targets
    Sources(QueryArgs),
    /// Find final targets built from the given sources
    Targets(QueryArgs),
    /// Print node and edge counts
    Stats {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Node names to start from, as written in the build log
    #[arg(required = true)]
    names: Vec<String>,

    /// List every dependency chain instead of just the endpoints
    #[arg(long)]
    paths: bool,

    /// Glob of node names to treat as absent (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_query(config: &TravConfig, args: &QueryArgs, direction: Direction) -> Result<String> {
    let filter = NameFilter::exclude(&args.exclude).context("invalid --exclude pattern")?;
    let graph = load_build_graph(config)
        .with_context(|| format!("loading build graph from {}", config.build_dir().display()))?;
    let accept = |name: &str| filter.accepts(name);
    if args.paths {
        let paths = graph.find_paths(&args.names, direction, accept)?;
        report::render_paths(&paths, args.format)
    } else {
        let ends = graph.find_ends(&args.names, direction, accept)?;
        report::render_names(&ends, args.format)
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = TravConfig::new(cli.build_dir)
        .with_cache(!cli.no_cache)
        .with_rules(cli.rules);

    match cli.command {
        Command::Sources(ref args) => run_query(&config, args, Direction::Dependencies),
        Command::Targets(ref args) => run_query(&config, args, Direction::Dependents),
        Command::Stats { format } => {
            let graph = load_build_graph(&config)?;
            report::render_stats(&GraphStats::of(&graph), format)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(out) => {
            if !out.is_empty() {
                println!("{out}");
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            process::exit(1);
        }
    }
}
