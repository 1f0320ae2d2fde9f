use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use quarry::{
    config::Config,
    server::{self, AppState},
    Compiler, DocumentKind, DocumentStore,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quarry", about = "Search forum posts and comments")]
struct Cli {
    /// Config file to use instead of ~/.config/quarry/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level. RUST_LOG takes precedence when set.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the search API over HTTP.
    Serve {
        /// Listen address; defaults to `server.addr` from the config.
        #[arg(long)]
        addr: Option<String>,
        /// Posts corpus (JSON array or JSON Lines).
        #[arg(long)]
        posts: Option<PathBuf>,
        /// Comments corpus (JSON array or JSON Lines).
        #[arg(long)]
        comments: Option<PathBuf>,
    },
    /// Search a corpus file and print the matching documents.
    Search {
        /// Corpus to search; `-` reads stdin.
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long, default_value = "posts")]
        collection: DocumentKind,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Print the parsed query and its compiled operations as JSON.
    Explain {
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One pretty-printed JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
    /// `id<TAB>title` per line, falling back to the body.
    Raw,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        // Only the long-running server seeds a config file on first run.
        None => match &cli.command {
            Command::Serve { .. } => Config::load(),
            _ => Config::load_if_present(),
        }
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to built-in config");
            Config::defaults()
        }),
    };
    let compiler = Compiler::new(config.search);

    match cli.command {
        Command::Serve {
            addr,
            posts,
            comments,
        } => {
            let posts = posts.or(config.corpus.posts);
            let comments = comments.or(config.corpus.comments);
            let store = quarry_feeds::load_store(posts.as_deref(), comments.as_deref())
                .await
                .context("failed to load corpus")?;
            if store.is_empty() {
                tracing::warn!("no posts or comments loaded, every search will be empty");
            }
            let addr = addr.unwrap_or(config.server.addr);
            server::serve(&addr, AppState::new(store, compiler)).await
        }
        Command::Search {
            corpus,
            collection,
            format,
            query,
        } => {
            let docs = quarry_feeds::load(&corpus, collection)
                .await
                .with_context(|| format!("failed to load {}", corpus.display()))?;
            let mut store = DocumentStore::new();
            store.extend(docs)?;

            let ops = compiler.compile(&quarry::parse(&query));
            let hits = store.search(collection, &ops);
            tracing::info!(hits = hits.len(), "search finished");
            print_hits(&hits, format)
        }
        Command::Explain { query } => {
            let parsed = quarry::parse(&query);
            let operations = compiler.compile(&parsed);
            let explanation = server::Explanation { parsed, operations };
            println!("{}", serde_json::to_string_pretty(&explanation)?);
            Ok(())
        }
    }
}

fn print_hits(hits: &[&quarry::Document], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(hits)?),
        OutputFormat::Jsonl => {
            for doc in hits {
                println!("{}", serde_json::to_string(doc)?);
            }
        }
        OutputFormat::Raw => {
            for doc in hits {
                let label = doc
                    .title
                    .as_deref()
                    .or(doc.body.as_deref())
                    .unwrap_or_default();
                println!("{}\t{}", doc.id, label.lines().next().unwrap_or_default());
            }
        }
    }
    Ok(())
}

/// Logs go to stderr so `search` and `explain` output stays pipeable.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
