use std::path::{Path, PathBuf};
use std::process::ExitCode;

use async_trait::async_trait;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use angunav_lsp::backend::AngunavBackend;
use angunav_lsp::config::{Config, SuffixConfig};
use angunav_lsp::error::Severity;
use angunav_lsp::host::EditorHost;
use angunav_lsp::navigator::{Navigator, Outcome};
use angunav_lsp::role::{Direction, Role};
use angunav_lsp::visibility::visibility_flags;

#[derive(Parser)]
#[command(name = "angunav-lsp")]
#[command(about = "Language server for jumping between component files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Target {
    Component,
    Template,
    Style,
    Next,
    Prev,
}

#[derive(Args)]
struct SuffixArgs {
    /// TOML file with a [suffixes] table
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suffix of the logic file (default: component.ts)
    #[arg(long)]
    component_suffix: Option<String>,

    /// Suffix of the template file (default: component.html)
    #[arg(long)]
    template_suffix: Option<String>,

    /// Suffix of the style file (default: component.scss)
    #[arg(long)]
    style_suffix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the LSP server (default behavior)
    Lsp,
    /// Print the related file to open, exit with code 1 if there is none
    Resolve {
        /// File currently being edited
        #[arg(short, long)]
        file: PathBuf,

        /// Role to jump to, or next/prev to cycle
        #[arg(short, long)]
        to: Target,

        #[command(flatten)]
        suffixes: SuffixArgs,
    },
    /// Print which "go to" commands apply to a file, as JSON
    Flags {
        /// File currently being edited
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        suffixes: SuffixArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Resolve { file, to, suffixes }) => run_resolve(file, to, suffixes).await,
        Some(Commands::Flags { file, suffixes }) => run_flags(file, suffixes),
        Some(Commands::Lsp) | None => {
            run_lsp().await;
            ExitCode::SUCCESS
        }
    }
}

async fn run_lsp() {
    tracing::info!("Starting angunav LSP server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(AngunavBackend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

/// Suffixes from, in increasing precedence: defaults, the TOML file, flags
fn load_suffixes(args: SuffixArgs) -> anyhow::Result<SuffixConfig> {
    let mut suffixes = match &args.config {
        Some(path) => Config::from_toml_file(path)?.suffixes,
        None => SuffixConfig::default(),
    };

    let overrides = [
        (Role::Component, args.component_suffix),
        (Role::Template, args.template_suffix),
        (Role::Style, args.style_suffix),
    ];
    for (role, suffix) in overrides {
        if let Some(suffix) = suffix {
            suffixes.set_suffix(role, suffix);
        }
    }

    Ok(suffixes)
}

/// Terminal stand-in for the editor: "opening" prints the path
struct CliHost {
    file: PathBuf,
}

#[async_trait]
impl EditorHost for CliHost {
    fn active_file(&self) -> Option<PathBuf> {
        Some(self.file.clone())
    }

    async fn open_document(&self, path: &Path) -> anyhow::Result<()> {
        println!("{}", path.display());
        Ok(())
    }

    async fn notify(&self, severity: Severity, message: &str) {
        eprintln!("{}: {}", severity.as_str(), message);
    }
}

async fn run_resolve(file: PathBuf, to: Target, args: SuffixArgs) -> ExitCode {
    let suffixes = match load_suffixes(args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let file = std::path::absolute(&file).unwrap_or(file);
    let host = CliHost { file };
    let navigator = Navigator::new(&host, &suffixes);

    let result = match to {
        Target::Component => navigator.navigate_to(Role::Component).await,
        Target::Template => navigator.navigate_to(Role::Template).await,
        Target::Style => navigator.navigate_to(Role::Style).await,
        Target::Next => navigator.navigate_cyclic(Direction::Next).await,
        Target::Prev => navigator.navigate_cyclic(Direction::Prev).await,
    };

    match result {
        Ok(Outcome::Opened(_)) => ExitCode::SUCCESS,
        Ok(Outcome::AlreadyThere(_)) => {
            println!("{}", host.file.display());
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn run_flags(file: PathBuf, args: SuffixArgs) -> ExitCode {
    let suffixes = match load_suffixes(args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let flags = visibility_flags(&file, &suffixes);
    match serde_json::to_string_pretty(&flags) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize flags: {e}");
            ExitCode::FAILURE
        }
    }
}
