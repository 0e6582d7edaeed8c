//! Price History Example
//!
//! Pulls a month of daily prices for a few symbols and prints a summary:
//! - Loads the API token from the environment (`WTD_API_TOKEN`, `.env` works)
//! - Mixes free-text and chrono dates in one query
//! - Reads the result both as a mapping and as a numeric table
//!
//! Run with `RUST_LOG=wtd_client=debug cargo run --example history`.

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;
use wtd_client::{Config, Error, HistoryData, HistoryQuery, ParameterSet, Sort, WtdClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Initialize logging
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let config = Config::from_env().map_err(|e| {
    eprintln!("Failed to load configuration: {}", e);
    eprintln!("Set WTD_API_TOKEN in your environment or .env file");
    e
  })?;
  let client = WtdClient::new(config)?;

  let end = NaiveDate::from_ymd_opt(2020, 2, 1).ok_or("bad end date")?;

  for symbol in ["AAPL", "MSFT", "TSLA"] {
    let query = HistoryQuery::new(symbol).date_from("January 2nd, 2020").date_to(end).sort(Sort::Oldest);

    match client.history().query_table(query).await {
      Ok(table) => {
        let closes: Vec<_> = table.column("close").unwrap_or_default().into_iter().flatten().collect();
        println!(
          "{:<6} {} days {:?} .. {:?}  first close {:?}  last close {:?}",
          symbol,
          table.len(),
          table.first_date(),
          table.last_date(),
          closes.first(),
          closes.last()
        );
      }
      Err(Error::ApiKey(msg)) => {
        eprintln!("API token rejected: {}", msg);
        return Ok(());
      }
      Err(e) => eprintln!("{:<6} failed: {}", symbol, e),
    }
  }

  // Same data as a plain mapping, picked by name
  let params = ParameterSet::new().with("date_from", "2020-01-27").with("date_to", end);
  if let HistoryData::Mapping(history) = client.history().history_as("AAPL", &params, "dict").await? {
    for (day, fields) in &history.history {
      println!("{} {}: {:?}", history.name, day, fields.get("close"));
    }
  }

  Ok(())
}
