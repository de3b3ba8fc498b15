//! toeic - Personal TOEIC study tracker
//!
//! Goal, tasks, scores, mistake log and flashcards in one local JSON file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod study;

#[derive(Parser)]
#[command(name = "toeic")]
#[command(about = "Personal TOEIC study tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding the state file and config
    #[arg(long, global = true, env = "TOEIC_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show goal, latest score, exam countdown and progress
    Dashboard,

    /// Show or set the target score
    Goal {
        /// New target score
        score: Option<u16>,
    },

    /// Show or set the exam date
    ExamDate {
        /// Exam date (YYYY-MM-DD)
        date: Option<String>,

        /// Remove the exam date
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },

    /// Manage daily tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Manage mock test scores
    Score {
        #[command(subcommand)]
        command: ScoreCommands,
    },

    /// Manage the mistake log
    Bug {
        #[command(subcommand)]
        command: BugCommands,
    },

    /// Manage vocabulary decks
    Deck {
        #[command(subcommand)]
        command: DeckCommands,
    },

    /// Manage cards in a deck
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },

    /// Study a deck interactively (reads actions from stdin)
    Study {
        /// Deck ID
        deck: String,

        /// Review mastered cards instead of studying new ones
        #[arg(long)]
        review: bool,
    },

    /// Run a mock test countdown
    Mock {
        /// Section to time (full, listening, reading)
        #[arg(short, long, default_value = "full")]
        section: String,
    },

    /// Replace all data with the built-in defaults
    Reset {
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Phase (database, skills, deploy)
        #[arg(short, long, default_value = "database")]
        phase: String,
    },

    /// List tasks
    List {
        /// Only show this phase
        #[arg(short, long)]
        phase: Option<String>,

        /// Hide completed tasks
        #[arg(long)]
        pending: bool,
    },

    /// Toggle task completion
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ScoreCommands {
    /// Record a test score
    Add {
        /// Test name
        #[arg(short, long)]
        name: String,

        /// Listening score
        #[arg(short, long)]
        listening: u16,

        /// Reading score
        #[arg(short, long)]
        reading: u16,

        /// Date taken (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recorded scores
    List,

    /// Delete a score
    Rm {
        /// Score ID
        id: String,
    },
}

#[derive(Subcommand)]
enum BugCommands {
    /// Log a mistake
    Add {
        /// Test the mistake was made in
        #[arg(short, long)]
        test: String,

        /// TOEIC part (1-7)
        #[arg(short, long)]
        part: u8,

        /// Question number
        #[arg(short, long)]
        question: u16,

        /// Error type (vocab, grammar, trap/trick, speed, pronunciation, other)
        #[arg(short = 'e', long, default_value = "grammar")]
        error_type: String,

        /// Why the mistake happened
        #[arg(long)]
        cause: String,

        /// How to avoid it next time
        #[arg(long)]
        fix: String,
    },

    /// List logged mistakes
    List {
        /// Only show mistakes not yet reviewed
        #[arg(long)]
        pending: bool,
    },

    /// Toggle the reviewed flag
    Toggle {
        /// Bug ID
        id: String,
    },

    /// Delete a logged mistake
    Rm {
        /// Bug ID
        id: String,
    },
}

#[derive(Subcommand)]
enum DeckCommands {
    /// Create an empty deck
    Add {
        /// Deck name
        name: String,
    },

    /// List decks
    List,

    /// Show a deck and its cards
    Show {
        /// Deck ID
        id: String,

        /// Only show cards with this status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a deck
    Rm {
        /// Deck ID
        id: String,
    },

    /// Create a deck from "term, definition, type, example" lines
    Import {
        /// Deck name
        name: String,

        /// File to read (stdin when omitted or "-")
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CardCommands {
    /// Add a card to a deck
    Add {
        /// Deck ID
        deck: String,

        /// Term
        term: String,

        /// Definition
        definition: String,

        /// Lexical type (n, v, adj, ...)
        #[arg(short = 't', long, default_value = "")]
        lexical_type: String,

        /// Example sentence
        #[arg(short, long, default_value = "")]
        example: String,

        /// Pronunciation
        #[arg(short, long)]
        pronunciation: Option<String>,
    },

    /// Set a card's status
    Status {
        /// Deck ID
        deck: String,

        /// Card ID
        card: String,

        /// New status (new, learning, mastered)
        status: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
    /// Reset to default configuration
    Reset,
    /// Set a config value
    Set {
        /// Config key (e.g. "default_goal", "display.colors")
        key: String,
        /// New value
        value: String,
    },
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = commands::Context::load(cli.data_dir, cli.json)?;

    match cli.command {
        Commands::Dashboard => commands::dashboard(&ctx),
        Commands::Goal { score } => commands::goal(&ctx, score),
        Commands::ExamDate { date, clear } => commands::exam_date(&ctx, date, clear),
        Commands::Task { command } => match command {
            TaskCommands::Add { title, phase } => commands::task_add(&ctx, &title, &phase),
            TaskCommands::List { phase, pending } => commands::task_list(&ctx, phase, pending),
            TaskCommands::Toggle { id } => commands::task_toggle(&ctx, &id),
            TaskCommands::Rm { id } => commands::task_rm(&ctx, &id),
        },
        Commands::Score { command } => match command {
            ScoreCommands::Add {
                name,
                listening,
                reading,
                date,
            } => commands::score_add(&ctx, &name, listening, reading, date),
            ScoreCommands::List => commands::score_list(&ctx),
            ScoreCommands::Rm { id } => commands::score_rm(&ctx, &id),
        },
        Commands::Bug { command } => match command {
            BugCommands::Add {
                test,
                part,
                question,
                error_type,
                cause,
                fix,
            } => commands::bug_add(&ctx, test, part, question, &error_type, cause, fix),
            BugCommands::List { pending } => commands::bug_list(&ctx, pending),
            BugCommands::Toggle { id } => commands::bug_toggle(&ctx, &id),
            BugCommands::Rm { id } => commands::bug_rm(&ctx, &id),
        },
        Commands::Deck { command } => match command {
            DeckCommands::Add { name } => commands::deck_add(&ctx, &name),
            DeckCommands::List => commands::deck_list(&ctx),
            DeckCommands::Show { id, status } => commands::deck_show(&ctx, &id, status),
            DeckCommands::Rm { id } => commands::deck_rm(&ctx, &id),
            DeckCommands::Import { name, file } => commands::deck_import(&ctx, &name, file),
        },
        Commands::Card { command } => match command {
            CardCommands::Add {
                deck,
                term,
                definition,
                lexical_type,
                example,
                pronunciation,
            } => commands::card_add(
                &ctx,
                &deck,
                toeic_core::NewCard {
                    term,
                    definition,
                    lexical_type,
                    example,
                    pronunciation,
                    ..Default::default()
                },
            ),
            CardCommands::Status { deck, card, status } => {
                commands::card_status(&ctx, &deck, &card, &status)
            }
        },
        Commands::Study { deck, review } => study::run(&ctx, &deck, review),
        Commands::Mock { section } => commands::mock(&ctx, &section),
        Commands::Reset { yes } => commands::reset(&ctx, yes),
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => commands::config_show(&ctx),
            Some(ConfigCommands::Path) => commands::config_path(&ctx),
            Some(ConfigCommands::Reset) => commands::config_reset(&ctx),
            Some(ConfigCommands::Set { key, value }) => commands::config_set(&ctx, &key, &value),
        },
    }
}
