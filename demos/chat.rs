//! Minimal chat client.
//!
//! Usage: `cargo run --example chat -- <developer-id> <application-name>`
//! then type lines to send them as `chat` events. Set `RUST_LOG=stalync=debug`
//! to see transport logs.

use stalync::event::{CONNECTED, DISCONNECTED, ERROR};
use stalync::EventClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(developer_id), Some(application)) = (args.next(), args.next()) else {
        eprintln!("usage: chat <developer-id> <application-name>");
        std::process::exit(2);
    };

    let client = EventClient::new(developer_id, application);
    client.on_event(CONNECTED, |_, _| println!("* connected"))?;
    client.on_event(DISCONNECTED, |_, _| println!("* disconnected"))?;
    client.on_event(ERROR, |_, _| println!("* connection error"))?;
    client.on_event("chat", |_, msg| {
        println!("> {}", msg.unwrap_or_default());
    })?;
    client.on_message(|msg| println!("[all] {}", msg.unwrap_or_default()));

    println!("Connecting to {}...", client.connection_url());
    client.connect().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line == "/quit" {
            break;
        }
        client.emit_event("chat", line).await?;
    }

    client.disconnect().await?;
    Ok(())
}
