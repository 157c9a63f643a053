//! vocab-info: look up one word from the command line.
//!
//! Usage:
//!   vocab-info <vocab> <language>          Print the record as pretty JSON
//!   vocab-info lookup <vocab> <language>   Same, for words that collide with a command
//!   vocab-info -- <vocab> <language>       Same
//!   vocab-info schema                      Print the record JSON schema
//!
//! Exit codes: 0 ok, 1 server error, 2 invalid input, 3 unprocessable model output.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vocab_info::cache::VocabStoreConfig;
use vocab_info::generation::GenerationClient;
use vocab_info::{vocab_info_schema, Error, ErrorClass, VocabInfoService};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Schema,
    Lookup { vocab: String, language: String },
    Usage(String),
}

fn parse_args(args: &[String]) -> Command {
    let lookup = |rest: &[String]| match rest {
        [vocab, language, ..] => Command::Lookup {
            vocab: vocab.clone(),
            language: language.clone(),
        },
        [_] => Command::Usage("Missing <language> argument".to_string()),
        [] => Command::Usage("Missing <vocab> and <language> arguments".to_string()),
    };

    match args.first().map(String::as_str) {
        None => Command::Usage("Missing arguments".to_string()),
        Some("help" | "--help" | "-h") => Command::Help,
        Some("version" | "--version" | "-V") => Command::Version,
        Some("schema") => Command::Schema,
        Some("lookup" | "--") => lookup(&args[1..]),
        Some(_) => lookup(args),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocab_info=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args) {
        Command::Help => print_usage(),
        Command::Version => println!("vocab-info {}", env!("CARGO_PKG_VERSION")),
        Command::Schema => print_json(&vocab_info_schema()),
        Command::Usage(message) => {
            eprintln!("{message}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
        Command::Lookup { vocab, language } => {
            if let Err(e) = cmd_lookup(&vocab, &language).await {
                eprintln!("Error: {e}");
                std::process::exit(exit_code(&e));
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"vocab-info: cached vocabulary lookups

USAGE:
    vocab-info <VOCAB> <LANGUAGE>
    vocab-info lookup <VOCAB> <LANGUAGE>
    vocab-info -- <VOCAB> <LANGUAGE>
    vocab-info schema

ENVIRONMENT:
    VOCAB_CACHE_BACKEND         sqlite | redis | memory | none
    VOCAB_SQLITE_PATH           SQLite cache file
    VOCAB_REDIS_URL             Redis URL (requires the `redis` feature)
    VOCAB_CACHE_TIMEOUT_MS      Per-call cache timeout (default 5000)
    AZURE_OPENAI_ENDPOINT       Use Azure OpenAI (with AZURE_OPENAI_API_KEY)
    OPENAI_API_KEY              Use an OpenAI-compatible endpoint
    RUST_LOG                    Log filter (default vocab_info=info)"#
    );
}

async fn cmd_lookup(vocab: &str, language: &str) -> vocab_info::Result<()> {
    let cache = VocabStoreConfig::from_env()?.connect().await;
    let generator = GenerationClient::builder().build().await?;
    let service = VocabInfoService::new(cache, Arc::new(generator))?;

    let record = service.fetch(vocab, language).await?;
    print_json(&record);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to render JSON: {e}");
            std::process::exit(1);
        }
    }
}

fn exit_code(error: &Error) -> i32 {
    match error.class() {
        ErrorClass::InvalidRequest => 2,
        ErrorClass::UnprocessableOutput => 3,
        ErrorClass::ServerError => 1,
    }
}
