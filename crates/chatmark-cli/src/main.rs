mod browse;

use anyhow::{Context, Result};
use chatmark_config::Config;
use chatmark_engine::{Fragment, Message, parse_document, render_message, render_with_options};
use clap::{Parser, Subcommand};
use std::{
    io::{Read, stdin},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render assistant chat messages to safe HTML")]
#[command(
    long_about = "Renders the small markdown dialect used in assistant chat messages \
(headings, bold, italic, code, links, lists and quotes) to an HTML fragment. \
All text is escaped; links become buttons that carry only an id.\n\n\
Reads FILE, or stdin when FILE is omitted or '-'.\n\n\
Logging is controlled with RUST_LOG (default: info)."
)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of ~/.config/chatmark/config.toml
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to HTML
    Render {
        file: Option<PathBuf>,
        /// Also print "id<TAB>url<TAB>label" for each link to stderr
        #[arg(long)]
        links: bool,
    },
    /// Render a message JSON record, adding source attribution
    Message {
        file: Option<PathBuf>,
        /// Also print "id<TAB>url<TAB>label" for each link to stderr
        #[arg(long)]
        links: bool,
    },
    /// Print one JSON object per block: its kind, byte range and source lines
    Outline { file: Option<PathBuf> },
    /// Browse the rendered HTML and activate its links in a terminal UI
    Browse {
        file: Option<PathBuf>,
        /// Treat the input as a message JSON record
        #[arg(long)]
        message: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load config file")?;

    match args.command {
        Commands::Render { file, links } => {
            let input = read_input(file.as_deref())?;
            let fragment = render_with_options(&input, &config.render, |url, label| {
                log::info!("activated {label} ({url})");
            });
            print_fragment(fragment, links);
        }
        Commands::Message { file, links } => {
            let input = read_input(file.as_deref())?;
            let message = Message::from_json(&input)?;
            let fragment = render_message(&message, &config.render, &config.sources, |url, label| {
                log::info!("activated {label} ({url})");
            });
            print_fragment(fragment, links);
        }
        Commands::Outline { file } => {
            let input = read_input(file.as_deref())?;
            for block in parse_document(&input).outline(&input) {
                println!("{}", serde_json::to_string(&block)?);
            }
        }
        Commands::Browse { file, message } => {
            let input = read_input(file.as_deref())?;
            let status = Arc::new(Mutex::new(String::new()));
            let sink = Arc::clone(&status);
            let on_link = move |url: &str, label: &str| {
                if let Ok(mut status) = sink.lock() {
                    *status = format!("Opening source: {label} ({url})");
                }
            };
            let fragment = if message {
                let message = Message::from_json(&input)?;
                render_message(&message, &config.render, &config.sources, on_link)
            } else {
                render_with_options(&input, &config.render, on_link)
            };
            browse::run(fragment, status)?;
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn print_fragment(fragment: Fragment, links: bool) {
    let (html, registry) = fragment.into_parts();
    println!("{html}");
    if links {
        for entry in registry.entries() {
            eprintln!("{}\t{}\t{}", entry.id, entry.url, entry.label);
        }
    }
}
