use std::collections::BTreeMap;

use clap::Parser;
use futures_util::{stream, StreamExt};
use serde::Serialize;

/// Sends a batch of GET requests and tallies the status codes, e.g. to watch
/// the failure rate of /failsometimes change as mesh retry rules are applied.
#[derive(Parser)]
#[command(name = "mesh-cli")]
#[command(about = "Traffic generator for the mesh demo services", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5050/failsometimes")]
    url: String,

    /// Total number of requests.
    #[arg(short = 'n', long, default_value_t = 100)]
    requests: usize,

    /// Requests in flight at once.
    #[arg(short, long, default_value_t = 10)]
    concurrency: usize,

    /// Print the tally as JSON.
    #[arg(long)]
    json: bool,

    /// Print every response body.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default, Serialize)]
struct Tally {
    url: String,
    requests: usize,
    statuses: BTreeMap<u16, usize>,
    errors: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()?;

    let outcomes: Vec<Result<(u16, String), reqwest::Error>> = stream::iter(0..cli.requests)
        .map(|_| {
            let client = client.clone();
            let url = cli.url.clone();
            async move {
                let res = client.get(&url).send().await?;
                let status = res.status().as_u16();
                Ok::<_, reqwest::Error>((status, res.text().await?))
            }
        })
        .buffer_unordered(cli.concurrency.max(1))
        .collect()
        .await;

    let mut tally = Tally {
        url: cli.url.clone(),
        requests: cli.requests,
        ..Tally::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok((status, body)) => {
                *tally.statuses.entry(status).or_default() += 1;
                if cli.verbose {
                    println!("{} {}", status, body.trim_end());
                }
            }
            Err(e) => {
                tally.errors += 1;
                if cli.verbose {
                    eprintln!("error: {}", e);
                }
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        print_tally(&tally);
    }
    Ok(())
}

fn print_tally(tally: &Tally) {
    println!("{} requests to {}", tally.requests, tally.url);
    for (status, count) in &tally.statuses {
        let share = *count as f64 * 100.0 / tally.requests.max(1) as f64;
        println!("  {:>3}  {:>6}  {:>5.1}%", status, count, share);
    }
    if tally.errors > 0 {
        println!("  err  {:>6}", tally.errors);
    }
}
