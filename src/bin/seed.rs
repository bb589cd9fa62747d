use std::error::Error;

use clap::Parser;
use rusqlite::Connection;

use salesboard::{DEFAULT_SEED_URL, TransactionStore, create_app_state};

/// A utility for loading the seed data into a sales dashboard database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: String,

    /// The URL to download the transaction seed data from.
    #[arg(long, env = "SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,
}

/// Download the seed data and replace the contents of the transaction store.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Opening database at {}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    let state = create_app_state(conn, &args.seed_url, Default::default())?;

    println!("Fetching seed data from {}", args.seed_url);
    let transactions = state.seed_client.fetch().await?;

    let mut transaction_store = state.transaction_store;
    let inserted = transaction_store.replace_all(transactions)?;

    println!("Inserted {} transactions.", inserted.len());

    Ok(())
}
