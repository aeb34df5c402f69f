// mindmap: text in, mind-map JSON out

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

use mindmap_core::config::{history_path, AnalyzerConfig, RemoteConfig};
use mindmap_core::remote::{HttpCompletionClient, RemoteGenerator};
use mindmap_core::{share, HistoryStore, MindMapAnalyzer, MindNode};

#[derive(Parser)]
#[command(name = "mindmap", version, about = "Turn free text into a mind-map tree")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,

    /// Input file; stdin when omitted
    file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Lexical)]
    mode: Mode,

    /// Print the flattened node/edge graph instead of the nested tree
    #[arg(long)]
    flat: bool,

    #[arg(long)]
    pretty: bool,

    /// Record the result in the history file
    #[arg(long)]
    history: bool,

    /// Print a share link built on this base URL to stderr
    #[arg(long, value_name = "URL")]
    share_base: Option<String>,

    /// Minimum key point length in characters
    #[arg(long)]
    min_chars: Option<usize>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List or clear recorded mind maps
    History {
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Keyword-based analysis, no network
    Lexical,
    /// Indented outline, one node per line
    Outline,
    /// OpenAI-compatible completion service
    Remote,
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindmap_core=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

async fn build_tree(cli: &Cli, text: &str) -> anyhow::Result<MindNode> {
    let tree = match cli.mode {
        Mode::Lexical => {
            let mut config = AnalyzerConfig::default();
            if let Some(min_chars) = cli.min_chars {
                config.min_key_point_chars = min_chars;
            }
            config.validate()?;
            MindMapAnalyzer::with_config(&config).generate(text)?
        }
        Mode::Outline => mindmap_core::parse_outline(text)?,
        Mode::Remote => {
            let config = RemoteConfig::from_env()?;
            debug!("Remote config: {} ({})", config.api_url, config.model);
            RemoteGenerator::new(HttpCompletionClient::new(config))
                .generate(text)
                .await?
        }
    };
    Ok(tree)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn run_history(clear: bool, pretty: bool) -> anyhow::Result<()> {
    let store = HistoryStore::open(history_path())?;
    if clear {
        store.clear()?;
        return Ok(());
    }
    print_json(&store.entries()?, pretty)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Some(Commands::History { clear }) = &cli.cmd {
        return run_history(*clear, cli.pretty);
    }

    let text = read_input(cli.file.as_ref())?;
    if text.trim().is_empty() {
        bail!("no input text");
    }

    let tree = build_tree(&cli, &text).await?;
    info!("Built '{}' with {} nodes", tree.label, tree.node_count());

    if cli.history {
        HistoryStore::open(history_path())?.record(&text, &tree)?;
    }
    if let Some(base) = &cli.share_base {
        eprintln!("{}", share::share_url(base, &tree)?);
    }

    if cli.flat {
        print_json(&tree.to_graph(), cli.pretty)
    } else {
        print_json(&tree, cli.pretty)
    }
}
