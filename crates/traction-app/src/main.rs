//! Traction application binary - composition root.
//!
//! Ties together the Traction crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Build the streaming session (aggregator + scheduler + extractor)
//! 3. Pump line-oriented chunks from stdin or a file into the session
//! 4. On stream end (EOF or Ctrl-C), run the final extraction pass
//! 5. Print extracted items, and optionally submit them to the task sink

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use traction_core::config::TractionConfig;
use traction_core::types::StreamChunk;
use traction_session::{ChannelSource, Session};
use traction_sink::{HttpTaskSink, SubmissionQueue};

mod cli;
use cli::CliArgs;

/// Parse one input line into a stream chunk.
///
/// Lines starting with `{` are JSON chunks carrying their own metadata;
/// anything else is plain transcript text. A trailing space is appended to
/// plain lines so adjacent lines do not fuse into one word.
fn parse_chunk(line: &str) -> Option<StreamChunk> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        if let Ok(chunk) = serde_json::from_str::<StreamChunk>(trimmed) {
            return Some(chunk);
        }
        tracing::warn!(line = %trimmed, "Malformed JSON chunk; treating as plain text");
    }
    Some(StreamChunk::new(format!("{} ", trimmed)))
}

/// Read lines from `reader` and feed them to the session channel until EOF
/// or until the receiving side closes.
async fn pump_lines<R>(reader: R, tx: mpsc::Sender<StreamChunk>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(chunk) = parse_chunk(&line) {
                    if tx.send(chunk).await.is_err() {
                        // Session stopped listening
                        return;
                    }
                }
            }
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input line");
                return;
            }
        }
    }
}

async fn spawn_input_pump(
    input: Option<&Path>,
    tx: mpsc::Sender<StreamChunk>,
) -> Result<(), std::io::Error> {
    match input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            tokio::spawn(async move {
                pump_lines(BufReader::new(file), tx).await;
            });
        }
        None => {
            tokio::spawn(async move {
                pump_lines(BufReader::new(tokio::io::stdin()), tx).await;
            });
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = TractionConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Traction v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Session.
    let session = Arc::new(Session::new(&config.session, &config.extraction));
    tracing::info!(session = %session.id(), "Session ready");

    // Input pump.
    let (tx, rx) = mpsc::channel(64);
    if let Err(e) = spawn_input_pump(args.input.as_deref(), tx).await {
        tracing::error!(error = %e, "Failed to open input");
        return Err(e.into());
    }

    // Ctrl-C requests an orderly stop: drain, then the final pass.
    {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Stop requested");
                session.stop();
            }
        });
    }

    session.run(ChannelSource::new(rx)).await?;

    // Results.
    let mut items = session.take_items();
    tracing::info!(count = items.len(), "Stream complete");

    if args.show_history {
        for segment in session.history() {
            println!("{}", serde_json::to_string(&segment)?);
        }
    }

    if args.submit || config.sink.auto_submit {
        let sink = match HttpTaskSink::from_config(&config.sink) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Cannot submit");
                return Err(e.into());
            }
        };
        let label = args.resolve_source_label(&config.general.source_label);
        let queue = SubmissionQueue::new(sink, label);
        let summary = queue.submit_pending(&mut items).await;
        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            "Submission finished"
        );
    }

    for item in &items {
        println!("{}", serde_json::to_string(item)?);
    }

    Ok(())
}
