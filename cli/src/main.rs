use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use editor::ai::{self, AiClientError, HttpProxy};
use editor::consts::{LIBRARY_EXPORT_FILE_NAME, SINGLE_EXPORT_FILE_NAME};
use editor::doc::clamp_dimension;
use editor::library::{self, ImportError, ImportOutcome, LibraryError};
use editor::recolor::{color_slot_count, selection_color};
use editor::storage::JsonFileStore;
use editor::store::StoreError;
use editor::{Animation, DocError, DocStore, Library, Selection};
use tracing::{info, warn};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("read {} failed: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("write {} failed: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Doc(#[from] DocError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("AI request failed: {0}")]
    Ai(#[from] AiClientError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "lottie-cli", about = "Lottie animation editor CLI")]
struct Cli {
    #[arg(long, env = "LOTTIE_PROXY_URL", default_value = "http://127.0.0.1:3000")]
    proxy_url: String,

    #[arg(long, env = "LOTTIE_STORE", default_value = "lottie-studio.store.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the proxy server is up.
    Ping,
    /// Check that a file is an animation.
    Validate { file: PathBuf },
    /// List layers with their display names, first static color, and color count.
    Layers { file: PathBuf },
    /// Change the declared canvas size.
    Resize {
        file: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Recolor every static fill under the chosen layers.
    Recolor {
        file: PathBuf,
        #[arg(long)]
        color: String,
        #[arg(long, value_delimiter = ',', help = "Layer indices; all layers when omitted")]
        layers: Option<Vec<usize>>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate an animation from a prompt.
    Generate {
        prompt: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Apply a prompt to an existing animation.
    Edit {
        file: PathBuf,
        prompt: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Library(LibraryCommand),
}

#[derive(Args, Debug)]
struct LibraryCommand {
    #[command(subcommand)]
    command: LibrarySubcommand,
}

#[derive(Subcommand, Debug)]
enum LibrarySubcommand {
    List,
    Save {
        file: PathBuf,
        #[arg(long)]
        name: String,
    },
    Load {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
    Export {
        #[arg(long, default_value = LIBRARY_EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Import a saved-animation list (replaces the library) or a single
    /// animation (written to --out, default animation.json).
    Import {
        file: PathBuf,
        #[arg(long, default_value = SINGLE_EXPORT_FILE_NAME)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.proxy_url).await,
        Command::Validate { file } => {
            let store = open_document(&file)?;
            let doc = active(&store)?;
            println!(
                "ok: {}x{}, {} layers",
                dim(doc.width()),
                dim(doc.height()),
                doc.layer_count()
            );
            Ok(())
        }
        Command::Layers { file } => {
            let store = open_document(&file)?;
            for row in layer_rows(&store) {
                println!("{row}");
            }
            Ok(())
        }
        Command::Resize { file, width, height, out } => {
            let doc = resize_file(&file, width, height)?;
            emit(&doc, out.as_deref())
        }
        Command::Recolor { file, color, layers, out } => {
            let doc = recolor_file(&file, &color, layers)?;
            emit(&doc, out.as_deref())
        }
        Command::Generate { prompt, out } => {
            let proxy = HttpProxy::new(&cli.proxy_url);
            let mut store = DocStore::new();
            ai::generate(&mut store, &proxy, &prompt).await?;
            emit(active(&store)?, out.as_deref())
        }
        Command::Edit { file, prompt, out } => {
            let proxy = HttpProxy::new(&cli.proxy_url);
            let mut store = open_document(&file)?;
            ai::edit(&mut store, &proxy, &prompt).await?;
            emit(active(&store)?, out.as_deref())
        }
        Command::Library(library) => run_library(&cli.store, library),
    }
}

async fn run_ping(proxy_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", proxy_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

fn run_library(store_path: &Path, library: LibraryCommand) -> Result<(), CliError> {
    let mut lib = Library::new(JsonFileStore::new(store_path));
    match library.command {
        LibrarySubcommand::List => {
            for record in lib.list()? {
                println!("{}\t{}", record.id, record.name);
            }
            Ok(())
        }
        LibrarySubcommand::Save { file, name } => {
            let store = open_document(&file)?;
            let record = lib.save(&name, active(&store)?)?;
            println!("{}", record.id);
            Ok(())
        }
        LibrarySubcommand::Load { id, out } => emit(&lib.load(&id)?, out.as_deref()),
        LibrarySubcommand::Delete { id } => {
            lib.delete(&id)?;
            Ok(())
        }
        LibrarySubcommand::Export { out } => {
            let bytes = lib.export_all()?;
            write_file(&out, &bytes)?;
            info!(path = %out.display(), "library exported");
            Ok(())
        }
        LibrarySubcommand::Import { file, out } => {
            let bytes = read_file(&file)?;
            let mut docs = DocStore::new();
            match lib.import_file(&mut docs, &bytes)? {
                ImportOutcome::Library(count) => {
                    println!("imported {count} saved animations");
                    Ok(())
                }
                ImportOutcome::Document => {
                    let doc = active(&docs)?;
                    write_file(&out, &library::export_one(doc)?)?;
                    println!("imported animation to {}", out.display());
                    Ok(())
                }
            }
        }
    }
}

// =============================================================================
// DOCUMENT COMMANDS
// =============================================================================

fn resize_file(file: &Path, width: u32, height: u32) -> Result<Animation, CliError> {
    let (w, h) = (clamp_dimension(width), clamp_dimension(height));
    if (w, h) != (width, height) {
        warn!(width, height, clamped_width = w, clamped_height = h, "canvas size clamped");
    }
    let mut store = open_document(file)?;
    store.resize(w, h)?;
    Ok(active(&store)?.clone())
}

fn recolor_file(file: &Path, color: &str, layers: Option<Vec<usize>>) -> Result<Animation, CliError> {
    let mut store = open_document(file)?;
    if let Some(layers) = layers {
        store.set_selection(layers);
    }
    store.recolor_selected_hex(color)?;
    Ok(active(&store)?.clone())
}

/// `index  name  #rrggbb|-  N colors` for every layer.
fn layer_rows(store: &DocStore) -> Vec<String> {
    let Some(doc) = store.document() else {
        return Vec::new();
    };
    store
        .layer_names()
        .into_iter()
        .map(|(index, name, _)| {
            let only: Selection = [index].into_iter().collect();
            let color = selection_color(doc, &only).unwrap_or_else(|| "-".to_owned());
            let slots = color_slot_count(doc, &only);
            format!("{index}\t{name}\t{color}\t{slots} colors")
        })
        .collect()
}

fn open_document(file: &Path) -> Result<DocStore, CliError> {
    let bytes = read_file(file)?;
    let mut store = DocStore::new();
    store.load_upload(&file.to_string_lossy(), &bytes)?;
    Ok(store)
}

fn active(store: &DocStore) -> Result<&Animation, CliError> {
    store
        .document()
        .ok_or(CliError::Store(StoreError::NoDocument))
}

fn dim(value: Option<i64>) -> String {
    value.map_or_else(|| "?".to_owned(), |v| v.to_string())
}

// =============================================================================
// IO
// =============================================================================

/// Write `doc` pretty-printed to `out`, or to stdout when no path is given.
fn emit(doc: &Animation, out: Option<&Path>) -> Result<(), CliError> {
    let bytes = library::export_one(doc)?;
    match out {
        Some(path) => write_file(path, &bytes),
        None => {
            println!("{}", String::from_utf8_lossy(&bytes));
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|source| CliError::Write { path: path.to_path_buf(), source })
}
