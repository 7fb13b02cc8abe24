use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use inspect_core::config::{Config, CONFIG_FILE};
use inspect_core::{FuncFilter, InspectPipeline, Registry};
use inspect_go::GoAnalyzer;
use inspect_report::{json, text};

#[derive(Parser)]
#[command(name = "inspect")]
#[command(about = "Extract functions, imports and interfaces from Go packages")]
#[command(version)]
struct Cli {
    /// Log extraction progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a single Go source file
    File {
        /// Path to the .go file
        path: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Which functions to list: exported, unexported or all (defaults to the config)
        #[arg(long)]
        funcs: Option<FuncFilter>,
    },
    /// Collect every package under a directory and print it as JSON
    Packages {
        /// Root directory of the Go source tree
        path: PathBuf,
        #[command(flatten)]
        walk: WalkArgs,
        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the interfaces declared in every package under a directory
    Interfaces {
        /// Root directory of the Go source tree
        path: PathBuf,
        #[command(flatten)]
        walk: WalkArgs,
    },
    /// Create a default .inspect.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct WalkArgs {
    /// Config file path (defaults to .inspect.toml in the directory or an ancestor)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Which functions to keep: exported, unexported or all
    #[arg(long)]
    funcs: Option<FuncFilter>,
    /// Also parse _test.go files
    #[arg(long)]
    include_tests: bool,
    /// Subtree of the root to skip
    #[arg(long, conflicts_with = "no_reserved_dir")]
    reserved_dir: Option<String>,
    /// Walk every directory, including the reserved subtree
    #[arg(long)]
    no_reserved_dir: bool,
    /// Keep packages listed in `omit_packages`
    #[arg(long)]
    include_main: bool,
    /// Report whatever was collected before a failure instead of exiting with an error
    #[arg(long)]
    allow_partial: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::File { path, json, funcs } => cmd_file(&path, json, funcs),
        Commands::Packages {
            path,
            walk,
            compact,
            output,
        } => cmd_packages(&path, &walk, compact, output.as_deref()),
        Commands::Interfaces { path, walk } => cmd_interfaces(&path, &walk),
        Commands::Init { force } => cmd_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

fn init_tracing(verbose: bool) {
    let directive = if verbose { "inspect=debug" } else { "inspect=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("valid tracing directive")),
        )
        .with_target(false)
        .init();
}

fn cmd_file(path: &Path, as_json: bool, funcs: Option<FuncFilter>) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut config = Config::load_or_default(dir);
    if let Some(funcs) = funcs {
        config.extract.funcs = funcs;
    }
    let pipeline = build_pipeline(&config)?;

    let record = pipeline.inspect_file(path)?;
    if as_json {
        println!("{}", json::format_file(&record, false));
    } else {
        print!("{}", text::format_file(&record));
    }
    Ok(())
}

fn cmd_packages(path: &Path, walk: &WalkArgs, compact: bool, output: Option<&Path>) -> Result<()> {
    let registry = collect(path, walk)?;
    let rendered = json::format_registry(&registry, compact);

    match output {
        Some(out) => {
            std::fs::write(out, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            eprintln!(
                "Wrote {} package(s) to {}",
                registry.len(),
                out.display()
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn cmd_interfaces(path: &Path, walk: &WalkArgs) -> Result<()> {
    let registry = collect(path, walk)?;
    print!("{}", text::format_interfaces(&registry));
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let target = PathBuf::from(CONFIG_FILE);
    if target.exists() && !force {
        anyhow::bail!("{CONFIG_FILE} already exists. Use --force to overwrite.");
    }
    std::fs::write(&target, Config::default_toml())?;
    println!("Created {CONFIG_FILE} with default configuration.");
    Ok(())
}

fn load_config(project_path: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(project_path)),
    }
}

/// Apply command-line overrides on top of the loaded config.
fn resolve_config(path: &Path, walk: &WalkArgs) -> Result<Config> {
    let mut config = load_config(path, walk.config.as_deref())?;
    if let Some(funcs) = walk.funcs {
        config.extract.funcs = funcs;
    }
    if walk.include_tests {
        config.walk.ignore_tests = false;
    }
    if let Some(dir) = &walk.reserved_dir {
        config.walk.reserved_dir = dir.clone();
    }
    if walk.no_reserved_dir {
        config.walk.reserved_dir.clear();
    }
    if walk.include_main {
        config.output.omit_packages.clear();
    }
    Ok(config)
}

fn build_pipeline(config: &Config) -> Result<InspectPipeline> {
    let analyzer = GoAnalyzer::new().context("failed to initialize Go analyzer")?;
    let pipeline = InspectPipeline::new(Box::new(analyzer), config)?;
    Ok(pipeline)
}

fn collect(path: &Path, walk: &WalkArgs) -> Result<Registry> {
    let config = resolve_config(path, walk)?;
    let pipeline = build_pipeline(&config)?;

    let mut registry = match pipeline.collect(path) {
        Ok(registry) => registry,
        Err(failure) => {
            let (partial, source) = failure.into_parts();
            if !walk.allow_partial {
                return Err(source).with_context(|| {
                    format!(
                        "failed to collect packages under {} ({} package(s) collected; rerun with --allow-partial to keep them)",
                        path.display(),
                        partial.len()
                    )
                });
            }
            tracing::warn!(
                "{source:#}; reporting {} package(s) collected before the failure",
                partial.len()
            );
            partial
        }
    };

    for name in &config.output.omit_packages {
        registry.remove(name);
    }
    Ok(registry)
}
