use clap::{Parser, Subcommand};
use log::{Level, error, info, log, warn};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use cardraw::core::config::{self, CliOverrides, ResolvedConfig};
use cardraw::core::deck::Deck;
use cardraw::core::display::{capitalize, wrap_text};
use cardraw::core::draw::{IndexSource, SeededSource, ThreadRngSource, draw};
use cardraw::core::merge;
use cardraw::core::state::App;
use cardraw::tui;

/// Column width for card text printed by `cardraw draw`.
const PRINT_WIDTH: usize = 72;

#[derive(Parser)]
#[command(name = "cardraw", version, about = "Draw random cards from a JSON deck")]
struct Args {
    /// Deck file (default: cards.json, or CARDRAW_DECK)
    #[arg(short, long, global = true)]
    deck: Option<PathBuf>,

    /// Seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Where to write the log (default: cardraw.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive card table (the default)
    Play,
    /// Draw one card of a card type and print it
    Draw { card_type: String },
    /// List categories and their card types
    List,
    /// Merge SECOND into FIRST, writing to OUTPUT (default: FIRST)
    Merge {
        first: PathBuf,
        second: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cardraw: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cli = CliOverrides {
        deck_path: args.deck,
        seed: args.seed,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &cli);
    init_logging(&resolved);
    report_notices(&resolved);

    info!("Cardraw starting up with deck {}", resolved.deck_path.display());

    match args.command.unwrap_or(Command::Play) {
        Command::Play => play(&resolved),
        Command::Draw { card_type } => draw_once(&resolved, &card_type),
        Command::List => list(&resolved),
        Command::Merge {
            first,
            second,
            output,
        } => merge_decks(first, second, output),
    }
}

/// Initialize file logger - writes to the configured log file so the TUI
/// is never drawn over.
fn init_logging(resolved: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
}

/// Config diagnostics are collected before the logger exists; replay them
/// now. Warnings are echoed to stderr too.
fn report_notices(resolved: &ResolvedConfig) {
    for notice in &resolved.notices {
        log!(notice.level, "{}", notice.message);
        if notice.level <= Level::Warn {
            eprintln!("cardraw: {}", notice.message);
        }
    }
}

fn index_source(seed: Option<u64>) -> Box<dyn IndexSource> {
    match seed {
        Some(seed) => {
            info!("Using seeded draws (seed {seed})");
            Box::new(SeededSource::new(seed))
        }
        None => Box::new(ThreadRngSource),
    }
}

fn load_deck(resolved: &ResolvedConfig) -> Option<Deck> {
    match Deck::load(&resolved.deck_path) {
        Ok(deck) => {
            warn_duplicates(&deck);
            Some(deck)
        }
        Err(e) => {
            error!("Failed to load deck: {e}");
            eprintln!("cardraw: {e}");
            None
        }
    }
}

fn warn_duplicates(deck: &Deck) {
    for (card_type, categories) in deck.duplicate_card_types() {
        warn!(
            "Card type '{card_type}' appears in {}; draws use '{}'",
            categories.join(", "),
            categories[0]
        );
    }
}

fn play(resolved: &ResolvedConfig) -> ExitCode {
    let rng = index_source(resolved.seed);
    let app = match Deck::load(&resolved.deck_path) {
        Ok(deck) => {
            warn_duplicates(&deck);
            App::new(deck, rng, resolved.deck_path.clone())
        }
        Err(e) => {
            warn!("Starting with an empty deck: {e}");
            App::with_load_error(&e, rng, resolved.deck_path.clone())
        }
    };

    match tui::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("TUI error: {e}");
            eprintln!("cardraw: {e}");
            ExitCode::FAILURE
        }
    }
}

fn draw_once(resolved: &ResolvedConfig, card_type: &str) -> ExitCode {
    let Some(deck) = load_deck(resolved) else {
        return ExitCode::FAILURE;
    };
    let mut rng = index_source(resolved.seed);
    let result = draw(&deck, card_type, &mut rng);
    info!("Drew {:?}", result);
    println!("{}", wrap_text(&result.to_string(), PRINT_WIDTH));
    ExitCode::SUCCESS
}

fn list(resolved: &ResolvedConfig) -> ExitCode {
    let Some(deck) = load_deck(resolved) else {
        return ExitCode::FAILURE;
    };
    for (category, types) in deck.categories() {
        println!("{}", capitalize(category));
        for (card_type, cards) in types.card_types() {
            let noun = if cards.len() == 1 { "card" } else { "cards" };
            println!("  {card_type} ({} {noun})", cards.len());
        }
    }
    ExitCode::SUCCESS
}

fn merge_decks(first: PathBuf, second: PathBuf, output: Option<PathBuf>) -> ExitCode {
    let output = output.unwrap_or_else(|| first.clone());
    info!(
        "Merging {} + {} -> {}",
        first.display(),
        second.display(),
        output.display()
    );

    match merge::merge_files(&first, &second, &output) {
        Ok(merged) => {
            let summary = match merged.to_deck() {
                Ok(deck) => format!(
                    "{} categories, {} card types, {} cards",
                    deck.len(),
                    deck.card_type_count(),
                    deck.card_count()
                ),
                Err(_) => format!("{} categories", merged.len()),
            };
            println!("Merged into {} ({summary})", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Merge failed: {e}");
            eprintln!("cardraw: {e}");
            ExitCode::FAILURE
        }
    }
}
