use std::fs;
use std::io::{self, Read};

use clap::{Parser as ClapParser, Subcommand};
use tutor_lang::cli::{self, CliError, SearchOptions};
use tutor_lang::SUPPORTED_SYNTAX;

#[derive(ClapParser)]
#[command(name = "tutor")]
#[command(about = "Tutor - a Scryfall-style search language for Magic card data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a card list with a query
    Search {
        /// The search query (e.g. 'c:blue t:instant cmc<=2')
        query: String,

        /// Path to a JSON array of cards (reads from stdin if not provided)
        #[arg(short, long)]
        cards: Option<String>,

        /// Maximum results to return
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Results to skip, for pagination
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Print only the total match count
        #[arg(long)]
        count: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Parse a query and show its structure without executing it
    Check {
        /// The query to validate
        query: String,
    },

    /// List the supported query syntax
    Syntax,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            cards,
            limit,
            offset,
            count,
            pretty,
        } => run_search(query, cards, limit, offset, count, pretty),
        Commands::Check { query } => match cli::execute_check(&query) {
            Ok(parsed) => {
                println!("{}", parsed);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Syntax => {
            for line in SUPPORTED_SYNTAX {
                println!("{}", line);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_search(
    query: String,
    cards: Option<String>,
    limit: usize,
    offset: usize,
    count: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let cards_json = match cards {
        Some(path) => fs::read_to_string(path).map_err(CliError::Io)?,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = SearchOptions {
        query,
        cards_json,
        limit,
        offset,
    };

    let output = cli::execute_search(&options)?;

    if count {
        println!("{}", output.total_matches);
        return Ok(());
    }

    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(CliError::Json)?;
    println!("{}", json);
    Ok(())
}
