use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use winebridge::config::{default_config_path, load_cfg};
use winebridge::{Context, Discovery, Distribution, Prefix, Program, UPath, WinebridgeConfig};

#[derive(Clone, Debug, Parser)]
#[command(name = "winebridge", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
struct Cli {
    /// Wine or Proton distribution root
    #[arg(long, global = true)]
    dist: Option<PathBuf>,
    /// Wine prefix root
    #[arg(long, global = true)]
    prefix: Option<PathBuf>,
    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
enum Commands {
    #[command(about = "Show the selected distribution and prefix")]
    Info,
    #[command(about = "Print the exported environment")]
    Env {
        #[arg(long)]
        json: bool,
    },
    #[command(name = "winpath", about = "Translate a POSIX path to a Windows path")]
    WinPath { path: PathBuf },
    #[command(name = "unixpath", about = "Translate a Windows path to a POSIX path")]
    UnixPath { path: String },
    #[command(about = "Print the command line for a guest program")]
    Cmd {
        exe: PathBuf,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    #[command(about = "Run a guest program and wait for it")]
    Run {
        exe: PathBuf,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<WinebridgeConfig> {
    let Some(path) = cli.config.clone().or_else(default_config_path) else {
        return Ok(WinebridgeConfig::default());
    };
    debug!("config: {}", path.display());
    load_cfg(&path).with_context(|| format!("loading {}", path.display()))
}

fn open_context(cli: &Cli, cfg: &WinebridgeConfig) -> Result<Context> {
    let discovery = Discovery::default();

    let dist = match cli.dist.as_ref().or(cfg.dist.as_ref()) {
        Some(root) => Arc::new(
            Distribution::new(root).with_context(|| format!("opening {}", root.display()))?,
        ),
        None => discovery
            .default_distribution()
            .context("no wine distribution found; pass --dist")?,
    };
    let prefix = match cli.prefix.as_ref().or(cfg.prefix.as_ref()) {
        Some(root) => {
            Arc::new(Prefix::new(root).with_context(|| format!("opening {}", root.display()))?)
        }
        None => discovery
            .default_prefix()
            .context("no wine prefix found; pass --prefix")?,
    };

    let mut ctx = Context::new(dist, prefix)?;
    cfg.apply(&mut ctx)?;
    Ok(ctx)
}

fn print_info(ctx: &Context) {
    let dist = ctx.dist();
    let prefix = ctx.prefix();
    println!("distribution: {}", dist.root().display());
    println!("  winedist:   {}", dist.winedist().display());
    println!("  proton:     {}", dist.is_proton());
    if let Some(info) = dist.proton_info()
        && let Some(version) = &info.version
    {
        println!("  version:    {}", version);
    }
    println!("prefix:       {}", prefix.root().display());
    println!("  pfx:        {}", prefix.pfx().display());
    println!("  arch:       {}", prefix.arch().unwrap_or("unknown"));
    if let Some(version) = prefix.win_version() {
        println!(
            "  windows:    {} ({})",
            version.product_name.as_deref().unwrap_or("?"),
            version.current_version.as_deref().unwrap_or("?")
        );
    }
    for (dll, mode) in prefix.dll_overrides() {
        println!("  override:   {}={}", dll, mode);
    }
    for (drive, target) in ctx.drive_mapping().drives() {
        println!("  {} -> {}", drive, target.display());
    }
}

fn program(exe: &Path, args: &[String], cfg: &WinebridgeConfig) -> Result<Program> {
    Ok(Program::new(exe)?
        .args(args.iter().map(String::as_str))
        .with_launch(cfg.launch_options()))
}

fn run(cli: Cli) -> Result<i32> {
    let cfg = load_config(&cli)?;
    let ctx = open_context(&cli, &cfg)?;

    match &cli.cmd {
        Commands::Info => print_info(&ctx),
        Commands::Env { json } => {
            let env: BTreeMap<String, String> = ctx.launch_env(&cfg.launch_options());
            let mut out = io::stdout().lock();
            if *json {
                serde_json::to_writer_pretty(&mut out, &env)?;
                writeln!(out)?;
            } else {
                for (key, value) in &env {
                    writeln!(out, "{}={}", key, value)?;
                }
            }
        }
        Commands::WinPath { path } => {
            let path = std::path::absolute(path)?;
            println!("{}", ctx.to_windows_path(&path)?);
        }
        Commands::UnixPath { path } => {
            let path = UPath::windows(path)?;
            println!("{}", ctx.to_native_path(&path)?.display());
        }
        Commands::Cmd { exe, args } => {
            println!("{}", program(exe, args, &cfg)?.shell_line(&ctx)?);
        }
        Commands::Run { exe, args } => {
            let program = program(exe, args, &cfg)?;
            let status = program
                .command(&ctx)?
                .status()
                .with_context(|| format!("spawning {}", exe.display()))?;
            return match status.code() {
                Some(code) => Ok(code),
                None => bail!("{} was killed by a signal", exe.display()),
            };
        }
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("[winebridge] Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
