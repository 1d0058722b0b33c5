use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Management CLI for the multi-tenant site server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, env = "API_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sites
    List,
    /// Show a site's configuration
    Get { site_id: String },
    /// Create a site from a config.json file
    Create { domain: String, config: PathBuf },
    /// Merge a JSON file into a site's configuration
    Update { domain: String, config: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::List => {
            client.get(format!("{}/site/list", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Get { site_id } => {
            client.get(format!("{}/site/config/{}", cli.url, site_id))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Create { domain, config } => {
            let config = read_json(&config)?;
            client.post(format!("{}/site/create", cli.url))
                .headers(headers)
                .json(&json!({ "domain": domain, "config": config }))
                .send()
                .await?
        }
        Commands::Update { domain, config } => {
            let config = read_json(&config)?;
            client.put(format!("{}/site/update", cli.url))
                .headers(headers)
                .json(&json!({ "domain": domain, "config": config }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn read_json(path: &PathBuf) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: site API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
