//! MTG Arena Assistant
//!
//! Reads the MTG Arena client log and card resource files to export the card
//! collection, track set completion, list the cards a deck still needs and
//! report opened boosters, either on the command line or through a small web
//! server.

use clap::{ArgAction, Parser, Subcommand};
use mtga_assistant::deck::{deck_distance, BasicLands, DeckParser};
use mtga_assistant::expansions::SetRegistry;
use mtga_assistant::reports::{
    craft_summary, format_boosters, format_collection, format_craft_summary, format_set_completion,
    set_completion,
};
use mtga_assistant::{
    find_boosters, find_collections, open_catalog, web, AssistantError, CatalogIndex,
    CollectionSnapshot, Result,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_DATA_PATH: &str =
    r"C:\Program Files (x86)\Wizards of the Coast\MTGA\MTGA_Data\Downloads\Data";

/// MTG Arena assistant - collection, deck and booster reports from the client log
#[derive(Parser, Debug)]
#[command(name = "mtga_assistant")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the MTG Arena output log
    #[arg(long, global = true, default_value_t = default_log_path())]
    log_file: String,

    /// Path to the Downloads/Data folder inside the MTG Arena install directory
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    mtg_data: String,

    /// Language of the card names
    #[arg(long, global = true, default_value = "EN")]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the card collection found in the log
    Collection,

    /// Count the rares and mythics missing to complete a set
    Track {
        /// Expansion code
        #[arg(long, default_value = "THB")]
        set: String,
    },

    /// List the cards you still have to craft for a deck
    Deck {
        /// Deck file in MTGA export format, `-` reads standard input
        #[arg(long)]
        deck: String,

        /// Comma separated enabled sets. `STD` means all Standard sets, `ALL` every known set
        #[arg(long, default_value = "STD")]
        sets: String,
    },

    /// Print the contents of every booster opened in the log
    Boosters,

    /// Serve the booster tracking page
    Serve {
        /// Path to the landing page
        #[arg(long, default_value = "boostertracking.html")]
        landing: PathBuf,

        /// Answer uploads with JSON instead of plain text
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        json: bool,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

/// Returns the default log path: ~/AppData/LocalLow/Wizards Of The Coast/MTGA/output_log.txt
fn default_log_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("AppData")
        .join("LocalLow")
        .join("Wizards Of The Coast")
        .join("MTGA")
        .join("output_log.txt")
        .to_string_lossy()
        .to_string()
}

fn read_collections(log_file: &str) -> Result<Vec<CollectionSnapshot>> {
    log::info!("Parsing MTGA Log...");
    let file = File::open(log_file)?;
    find_collections(BufReader::new(file))
}

fn load_catalog(args: &Args) -> Result<CatalogIndex> {
    log::info!("Parsing MTG Data Files...");
    open_catalog(Path::new(&args.mtg_data), &args.lang)
}

async fn run(args: Args) -> Result<()> {
    match &args.command {
        Command::Collection => {
            let collection = read_collections(&args.log_file)?
                .into_iter()
                .next()
                .ok_or(AssistantError::NoCollection)?;
            let catalog = load_catalog(&args)?;
            print!("{}", format_collection(&collection, &catalog));
        }
        Command::Track { set } => {
            let collection = read_collections(&args.log_file)?
                .pop()
                .ok_or(AssistantError::NoCollection)?;
            let catalog = load_catalog(&args)?;
            print!("{}", format_set_completion(&set_completion(&catalog, &collection, set)));
        }
        Command::Deck { deck, sets } => {
            let collection = read_collections(&args.log_file)?
                .pop()
                .ok_or(AssistantError::NoCollection)?;
            log::info!("Collection has {} cards", collection.len());
            let catalog = load_catalog(&args)?;
            let enabled = SetRegistry::default().parse_enabled(sets)?;

            let parser = DeckParser::new(BasicLands::default())?;
            let entries = if deck == "-" {
                parser.parse(io::stdin().lock())?
            } else {
                parser.parse(BufReader::new(File::open(deck)?))?
            };

            let missing = deck_distance(&entries, &catalog, &collection, &enabled)?;
            print!("{}", format_craft_summary(&craft_summary(&missing, &catalog)));
        }
        Command::Boosters => {
            log::info!("Parsing MTGA Log...");
            let boosters = find_boosters(BufReader::new(File::open(&args.log_file)?))?;
            let catalog = load_catalog(&args)?;
            print!("{}", format_boosters(&boosters, &catalog));
        }
        Command::Serve {
            landing,
            json,
            port,
        } => {
            let landing_page = std::fs::read(landing)?;
            let catalog = Arc::new(load_catalog(&args)?);
            let router = web::create_router(catalog, landing_page.into(), *json);
            web::serve(router, *port).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
