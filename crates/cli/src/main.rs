use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use whowroteit_core::config::{config_path, load_config_from, save_config_to, set_config_key, AppConfig};
use whowroteit_core::fetch::FetchBook;
use whowroteit_core::lookup::Query;
use whowroteit_core::render::NoopImageLoader;

mod cover;
mod view;

use cover::CoverLoader;
use view::TerminalView;

#[derive(Parser)]
#[command(name = "whowroteit")]
#[command(about = "Look up a book's title, author and cover")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to ~/.config/whowroteit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a book by title, author or ISBN
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Override the volumes endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Do not download the cover thumbnail
        #[arg(long)]
        no_cover: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize default config file
    Init,
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key (dot-separated path)
        key: String,
        /// Value
        value: String,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = resolve_config_path(cli.config.as_deref()).and_then(|path| match &cli.command {
        Commands::Search { query, endpoint, no_cover } => {
            run_search(&path, query, endpoint.as_deref(), *no_cover, cli.json)
        }
        Commands::Config { action } => run_config(&path, action, cli.json),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => config_path().ok_or_else(|| "Could not determine config directory".into()),
    }
}

fn run_search(
    config: &Path,
    terms: &[String],
    endpoint: Option<&str>,
    no_cover: bool,
    json: bool,
) -> CliResult {
    let query = Query::new(terms.join(" ").trim());
    if query.is_empty() {
        return Err("Query must not be empty".into());
    }

    let mut cfg = load_config_from(config);
    if let Some(url) = endpoint {
        cfg.lookup.base_url = url.to_string();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let view = Arc::new(TerminalView::new(!json));

    if no_cover {
        let lookup = FetchBook::from_config(&cfg, NoopImageLoader, runtime.handle().clone());
        runtime.block_on(lookup.start(&view, query).join());
    } else {
        let covers = CoverLoader::new(cfg.lookup.timeout_secs);
        let lookup = FetchBook::from_config(&cfg, covers.clone(), runtime.handle().clone());
        runtime.block_on(lookup.start(&view, query).join());
        covers.wait();
    }

    print_view(&view, json)
}

fn print_view(view: &TerminalView, json: bool) -> CliResult {
    let state = view.snapshot();
    let cover = view.cover().info();
    if json {
        let out = serde_json::json!({
            "title": state.title,
            "author": state.author,
            "cover_visible": state.cover_visible,
            "cover": cover,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Title:  {}", state.title);
    if !state.author.is_empty() {
        println!("Author: {}", state.author);
    }
    if state.cover_visible {
        match (&cover.url, cover.width, cover.height) {
            (Some(url), Some(w), Some(h)) => println!("Cover:  {} ({}x{})", url, w, h),
            (Some(url), _, _) => println!("Cover:  {} (not loaded)", url),
            _ => {}
        }
    }
    Ok(())
}

fn run_config(path: &Path, action: &ConfigAction, json: bool) -> CliResult {
    match action {
        ConfigAction::Init => {
            save_config_to(&AppConfig::default(), path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let cfg = load_config_from(path);
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = load_config_from(path);
            set_config_key(&mut cfg, key, value)?;
            save_config_to(&cfg, path)?;
            if !json {
                println!("Updated {}", key);
            }
        }
    }
    Ok(())
}
