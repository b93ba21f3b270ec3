//! kvqueue CLI - inspect and drive queues stored in Redis (or in memory)

mod logging;
mod settings;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use kvqueue_core::domain::{PeekRange, QueueName};
use kvqueue_core::port::Driver;
use kvqueue_core::StoreDriver;
use serde_json::json;
use settings::Settings;
use std::path::PathBuf;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing::debug;

#[derive(Parser)]
#[command(name = "kvqueue")]
#[command(about = "Queues on a Redis-like list/set store", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (default: ./kvqueue.toml if present)
    #[arg(long, env = "KVQUEUE_CONFIG")]
    config: Option<PathBuf>,

    /// Store URL, overrides settings (redis://host:port/db or memory://)
    #[arg(long)]
    store_url: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count messages waiting in a queue
    Count {
        /// Queue name
        queue: String,
    },

    /// List registered queues
    List,

    /// Show messages without removing them
    Peek {
        /// Queue name
        queue: String,

        /// Index of the first message
        #[arg(short, long, default_value = "0")]
        offset: usize,

        /// Number of messages (default from settings)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Register a queue
    Create {
        /// Queue name
        queue: String,
    },

    /// Delete a queue and its messages
    Remove {
        /// Queue name
        queue: String,
    },

    /// Append a message to a queue
    Push {
        /// Queue name
        queue: String,

        /// Message payload
        message: String,
    },

    /// Remove and print the head of a queue, waiting for one if needed
    Pop {
        /// Seconds to wait, 0 waits forever (default from settings)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Queue name
        queue: String,
    },

    /// Show store information
    Info,
}

#[derive(Tabled)]
struct QueueRow {
    queue: String,
    messages: u64,
}

#[derive(Tabled)]
struct MessageRow {
    index: usize,
    message: String,
}

#[derive(Tabled)]
struct InfoRow {
    key: String,
    value: String,
}

fn queue_name(name: String) -> Result<QueueName> {
    QueueName::new(name).context("Invalid queue name")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(url) = cli.store_url {
        settings.store_url = url;
    }

    logging::init(settings.log_format)?;
    debug!(store_url = %settings.store_url, "Settings loaded");

    let driver = StoreDriver::new(store::connect(&settings.store_url).await?);

    match cli.command {
        Commands::Count { queue } => {
            let queue = queue_name(queue)?;
            let count = driver.count_messages(&queue).await?;

            if cli.json {
                println!("{}", json!({ "queue": queue.as_str(), "messages": count }));
            } else {
                println!("{}", count);
            }
        }

        Commands::List => {
            let mut queues = driver.list_queues().await?;
            queues.sort();

            if cli.json {
                let names: Vec<&str> = queues.iter().map(QueueName::as_str).collect();
                println!("{}", json!(names));
            } else if queues.is_empty() {
                println!("{}", "No queues registered".yellow());
            } else {
                let mut rows = Vec::with_capacity(queues.len());
                for queue in &queues {
                    rows.push(QueueRow {
                        queue: queue.to_string(),
                        messages: driver.count_messages(queue).await?,
                    });
                }
                println!("{}", Table::new(rows));
            }
        }

        Commands::Peek {
            queue,
            offset,
            limit,
        } => {
            let queue = queue_name(queue)?;
            let range = PeekRange::new(offset, limit.unwrap_or(settings.peek_limit))?;
            let messages = driver.peek_queue(&queue, range).await?;

            if cli.json {
                println!("{}", json!(messages));
            } else if messages.is_empty() {
                println!("{}", format!("No messages in {} at offset {}", queue, offset).yellow());
            } else {
                let rows: Vec<MessageRow> = messages
                    .into_iter()
                    .enumerate()
                    .map(|(i, message)| MessageRow {
                        index: offset + i,
                        message,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }

        Commands::Create { queue } => {
            let queue = queue_name(queue)?;
            driver.create_queue(&queue).await?;
            println!("{}", format!("✓ Queue {} created", queue).green().bold());
        }

        Commands::Remove { queue } => {
            let queue = queue_name(queue)?;
            driver.remove_queue(&queue).await?;
            println!("{}", format!("✓ Queue {} removed", queue).green().bold());
        }

        Commands::Push { queue, message } => {
            let queue = queue_name(queue)?;
            driver.push_message(&queue, &message).await?;
            println!("{}", format!("✓ Message pushed to {}", queue).green().bold());
        }

        Commands::Pop { timeout, queue } => {
            let queue = queue_name(queue)?;
            let timeout = Duration::from_secs(timeout.unwrap_or(settings.pop_timeout_secs));

            match driver.pop_message(&queue, timeout).await? {
                Some(popped) => {
                    if cli.json {
                        println!(
                            "{}",
                            json!({ "queue": popped.queue.as_str(), "message": popped.message })
                        );
                    } else {
                        println!("{}", popped.message);
                    }
                }
                None => {
                    if cli.json {
                        println!("null");
                    } else {
                        eprintln!("{}", "No message (timed out)".yellow());
                    }
                }
            }
        }

        Commands::Info => {
            let info = driver.info().await?;

            if cli.json {
                println!("{}", json!(info));
            } else {
                let rows: Vec<InfoRow> = info
                    .into_iter()
                    .map(|(key, value)| InfoRow { key, value })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
    }

    Ok(())
}
