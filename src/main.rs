use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msword::codec::has_extension_in;
use msword::{Config, Document, ExportFormat, Store, StoreExt, ZipFiles, bytes_to_doc};

#[derive(Parser)]
#[command(name = "msword")]
#[command(about = "Browse directories and archives of Word documents as key-value stores")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List document keys
    List {
        /// Directory or .zip archive
        source: PathBuf,

        /// List every file, not only Word documents
        #[arg(long)]
        all: bool,

        /// List only .docx documents, shown without their extension
        /// (ignores the configured extensions)
        #[arg(long, conflicts_with = "all")]
        strip_extension: bool,
    },

    /// Print the text of documents
    Text {
        /// Directory or .zip archive
        source: PathBuf,

        /// Keys to print; every Word document when omitted
        keys: Vec<String>,

        /// Paragraph separator (defaults to the configured one)
        #[arg(short, long)]
        separator: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },

    /// Print the style id of each paragraph of a document
    Styles {
        /// Directory or .zip archive
        source: PathBuf,

        /// Document key
        key: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level_filter(cli.verbose))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!("Effective config: {:?}", config);

    match cli.command {
        Command::List {
            source,
            all,
            strip_extension,
        } => list(&source, &config, all, strip_extension),
        Command::Text {
            source,
            keys,
            separator,
            format,
        } => {
            let separator = separator.unwrap_or_else(|| config.paragraph_separator.clone());
            text(&source, &config, &keys, &separator, format)
        }
        Command::Styles { source, key } => styles(&source, &config, &key),
        Command::Config { action } => config_command(action, &config, cli.config.as_deref()),
    }
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Open a directory or a .zip archive as a byte-valued store
fn open_source(source: &Path, config: &Config) -> Result<Box<dyn Store<Value = Vec<u8>>>> {
    if source.is_dir() {
        let files = config
            .files(source)
            .with_context(|| format!("Failed to open directory {}", source.display()))?;
        return Ok(Box::new(files));
    }

    let is_zip = source
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if source.is_file() && is_zip {
        let archive = ZipFiles::open(source)
            .with_context(|| format!("Failed to open archive {}", source.display()))?;
        return Ok(Box::new(archive));
    }

    bail!(
        "Unsupported source {}\n\
        Expected a directory or a .zip archive of Word documents.",
        source.display()
    )
}

/// Keys whose extension is one of the configured Word extensions
fn word_documents(source: &Path, config: &Config) -> Result<Box<dyn Store<Value = Vec<u8>>>> {
    let extensions = config.extensions.clone();
    let store = open_source(source, config)?;
    Ok(Box::new(store.filter_keys(move |key| has_extension_in(key, &extensions))))
}

fn list(source: &Path, config: &Config, all: bool, strip_extension: bool) -> Result<()> {
    let keys = if all {
        open_source(source, config)?.keys()?
    } else if strip_extension {
        msword::extension_less_keys(open_source(source, config)?).keys()?
    } else {
        word_documents(source, config)?.keys()?
    };

    tracing::info!("{} keys in {}", keys.len(), source.display());
    for key in keys {
        println!("{key}");
    }
    Ok(())
}

fn text(
    source: &Path,
    config: &Config,
    keys: &[String],
    separator: &str,
    format: ExportFormat,
) -> Result<()> {
    let store = word_documents(source, config)?
        .decode_values(|bytes| bytes_to_doc(bytes).map(|doc| doc.text(separator)));

    let keys = if keys.is_empty() {
        store.keys()?
    } else {
        keys.to_vec()
    };

    let mut texts = BTreeMap::new();
    for key in keys {
        let text = store
            .get(&key)
            .with_context(|| format!("Failed to read text of {key}"))?;
        texts.insert(key, text);
    }

    match format {
        ExportFormat::Text => {
            let count = texts.len();
            for (key, text) in texts {
                if count > 1 {
                    println!("==> {key} <==");
                }
                println!("{text}");
            }
        }
        ExportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&texts)?);
        }
    }
    Ok(())
}

fn styles(source: &Path, config: &Config, key: &str) -> Result<()> {
    let bytes = open_source(source, config)?
        .get(key)
        .with_context(|| format!("Failed to read {key}"))?;
    let doc = Document::from_bytes(&bytes)
        .with_context(|| format!("Failed to parse {key} as a Word document"))?;

    for (paragraph, style_id) in doc.paragraphs.iter().zip(doc.paragraph_style_ids()) {
        let preview: String = paragraph.text.chars().take(60).collect();
        println!("{style_id}\t{preview}");
    }
    Ok(())
}

fn config_command(action: ConfigAction, config: &Config, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = explicit
                .map(Path::to_path_buf)
                .or_else(Config::get_config_path)
                .context("No config directory available on this platform")?;
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigAction::Init => {
            let path = match explicit {
                Some(path) => {
                    Config::default().save_to(path)?;
                    path.to_path_buf()
                }
                None => Config::init_default()?,
            };
            tracing::info!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
