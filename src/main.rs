use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use typed_kv::{Config, Decoded, FjallStore, TypedKv, Value};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Kv(#[from] typed_kv::Error),
}

#[derive(Parser)]
#[command(name = "typed-kv")]
#[command(about = "Store and query typed values in an embedded key-value store")]
struct Cli {
    /// Store path (overrides the configuration file)
    #[arg(long, global = true, env = "TYPED_KV_PATH")]
    path: Option<PathBuf>,

    /// Configuration file (defaults to ./typed-kv.toml when present)
    #[arg(long, global = true, env = "TYPED_KV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a decoded value
    Get {
        /// Key of the value
        key: String,
    },

    /// Write the stored bytes of a value to stdout
    GetBytes {
        /// Key of the value
        key: String,
    },

    /// Set a value (text unless --number or --json is given)
    Set {
        /// Key of the value
        key: String,

        /// The value
        value: String,

        /// Store the value as a number
        #[arg(long, conflicts_with = "json")]
        number: bool,

        /// Parse the value as a JSON object or array
        #[arg(long)]
        json: bool,
    },

    /// Set a byte value read from a file or stdin
    SetBytes {
        /// Key of the value
        key: String,

        /// Read bytes from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Check whether a key exists
    Has {
        /// Key to check
        key: String,
    },

    /// Check whether all keys exist
    HasAll {
        /// Keys to check
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Check whether any key exists
    HasAny {
        /// Keys to check
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Remove a key
    Remove {
        /// Key to remove
        key: String,
    },

    /// Remove every key
    Clear,

    /// Print the number of records
    Size,

    /// Print all values in key order
    Array,

    /// Print all keys in key order
    Keys,

    /// Print all records as single-entry objects
    All,

    /// Print the value with the smallest key
    First,

    /// Print the value with the largest key
    Last,

    /// Print a random value
    Random,
}

fn init_logging() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn open(cli: &Cli) -> Result<TypedKv<FjallStore>, AppError> {
    let mut config = Config::discover(cli.config.as_deref()).map_err(typed_kv::Error::from)?;
    if let Some(path) = &cli.path {
        config.store.path = path.clone();
    }
    Ok(TypedKv::open(&config)?)
}

fn print_value(value: Option<Decoded>, what: &str) -> Result<(), AppError> {
    match value {
        Some(Decoded::Text(s)) => println!("{}", s),
        Some(other) => println!("{}", serde_json::to_string(&other)?),
        None => {
            eprintln!("{}", what);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() -> Result<(), AppError> {
    init_logging()?;

    let cli = Cli::parse();
    let kv = open(&cli)?;

    match cli.command {
        Commands::Get { key } => {
            print_value(kv.get(&key)?, &format!("Key '{}' not found", key))?;
        }
        Commands::GetBytes { key } => match kv.get_bytes(&key)? {
            Some(bytes) => io::stdout().write_all(&bytes)?,
            None => {
                eprintln!("Key '{}' not found", key);
                std::process::exit(1);
            }
        },
        Commands::Set {
            key,
            value,
            number,
            json,
        } => {
            let value = if number {
                Value::Number(
                    serde_json::from_str(&value).map_err(|_| AppError::InvalidNumber(value))?,
                )
            } else if json {
                Value::Object(serde_json::from_str(&value)?)
            } else {
                Value::Text(value)
            };
            kv.set(&key, value)?;
            println!("Set '{}'", key);
        }
        Commands::SetBytes { key, file } => {
            let bytes = match file {
                Some(f) => std::fs::read(f)?,
                None => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            kv.set_bytes(&key, bytes)?;
            println!("Set '{}'", key);
        }
        Commands::Has { key } => println!("{}", kv.has(&key)?),
        Commands::HasAll { keys } => println!("{}", kv.has_all(&keys)?),
        Commands::HasAny { keys } => println!("{}", kv.has_any(&keys)?),
        Commands::Remove { key } => {
            if kv.remove(&key)? {
                println!("Removed '{}'", key);
            } else {
                eprintln!("Key '{}' not found", key);
                std::process::exit(1);
            }
        }
        Commands::Clear => {
            kv.clear()?;
            println!("Cleared store");
        }
        Commands::Size => println!("{}", kv.size()?),
        Commands::Array => println!("{}", serde_json::to_string_pretty(&kv.array()?)?),
        Commands::Keys => {
            for key in kv.key_array()? {
                println!("{}", key);
            }
        }
        Commands::All => println!("{}", serde_json::to_string_pretty(&kv.all()?)?),
        Commands::First => print_value(kv.first()?, "Store is empty")?,
        Commands::Last => print_value(kv.last()?, "Store is empty")?,
        Commands::Random => print_value(kv.random()?, "Store is empty")?,
    }

    Ok(())
}
