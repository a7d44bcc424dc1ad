//! Command line surface
//!
//! Reads files from disk, feeds them through the same commands a graphical
//! frontend would call, and prints previews to stdout and notices to stderr.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::commands;
use crate::config::Config;
use crate::format::{classify, mime_for_path};
use crate::intake;
use crate::models::{IncomingFile, NoticeLevel};
use crate::preview::render_plain;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "docpreview", version, about = "Preview and search PDF, Word, Excel, PowerPoint and text files")]
pub struct Cli {
    /// Config file (defaults to the per-user config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload files and print the preview of one of them
    Preview(PreviewArgs),
    /// Search every given file
    Search(SearchArgs),
    /// Show how each file would be classified at intake
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Index of the file to preview
    #[arg(long, default_value_t = 0)]
    pub select: usize,

    /// Highlight or filter by this query
    #[arg(long)]
    pub search: Option<String>,

    /// Zoom steps, negative to zoom out
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub zoom: i32,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,

    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(cli: Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Preview(args) => preview(config, args),
        Command::Search(args) => search(config, args),
        Command::Classify { files } => classify_files(&config, &files),
    }
}

fn read_incoming(path: &Path) -> Result<IncomingFile, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(IncomingFile::new(name, mime_for_path(path), bytes))
}

fn upload(paths: &[PathBuf], state: &AppState) -> Result<(), String> {
    let files = paths
        .iter()
        .map(|p| read_incoming(p))
        .collect::<Result<Vec<_>, _>>()?;
    commands::upload_files(files, state)?;
    Ok(())
}

fn print_notices(state: &AppState) -> Result<(), String> {
    for notice in commands::take_notices(state)? {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{}] {}", tag, notice.message);
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

fn preview(config: Config, args: PreviewArgs) -> Result<(), String> {
    let state = AppState::new(config);
    upload(&args.files, &state)?;

    if commands::list_files(&state)?.is_empty() {
        print_notices(&state)?;
        return Err("No file was accepted".to_string());
    }

    commands::select_file(args.select, &state)?;
    for _ in 0..args.zoom.unsigned_abs() {
        if args.zoom > 0 {
            commands::zoom_in(&state)?;
        } else {
            commands::zoom_out(&state)?;
        }
    }
    if let Some(query) = args.search {
        commands::search_active(query, &state)?;
    }
    print_notices(&state)?;

    let Some(view) = commands::get_preview(&state)? else {
        return Err("Nothing to preview".to_string());
    };
    if args.json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_plain(&view));
    }
    Ok(())
}

fn search(config: Config, args: SearchArgs) -> Result<(), String> {
    let state = AppState::new(config);
    upload(&args.files, &state)?;
    print_notices(&state)?;

    let hits = commands::search_everywhere(args.query.clone(), &state)?;
    if args.json {
        println!("{}", to_json(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches found for \"{}\"", args.query);
        return Ok(());
    }
    for hit in hits {
        println!("{} ({} hits)", hit.name, hit.hit_count);
        for m in hit.matches {
            println!("  ...{}...", m.context.replace('\n', " "));
        }
    }
    Ok(())
}

fn classify_files(config: &Config, paths: &[PathBuf]) -> Result<(), String> {
    for path in paths {
        let file = read_incoming(path)?;
        let verdict = match intake::check(&file, config) {
            Ok(format) => format!("{:?}", format),
            Err(e) => format!("rejected: {}", e),
        };
        println!(
            "{}\t{}\t{:?}\t{}",
            file.name,
            file.mime,
            classify(&file.mime, &file.name),
            verdict
        );
    }
    Ok(())
}
