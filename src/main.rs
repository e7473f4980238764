//! packetview CLI entry point.
//!
//! Replays a JSON-lines capture dump through a viewing session in batches,
//! then prints the records the window would display. A live transport feeds
//! the session the same way, one batch per delivery.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use packetview::cli::{Args, WindowFormatter};
use packetview::session::PacketSession;
use packetview::store::MemoryStore;

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Failed to open record file: {}", path.display())
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut session = PacketSession::new(args.view_config(), MemoryStore::new());

    let mut batch = Vec::with_capacity(args.batch_size);
    for line in reader.lines() {
        let line = line.context("Failed to read record line")?;
        if line.trim().is_empty() {
            continue;
        }
        batch.push(line);
        if batch.len() == args.batch_size {
            feed(&mut session, &batch)?;
            batch.clear();
        }
    }
    if !batch.is_empty() {
        feed(&mut session, &batch)?;
    }

    let rows = session
        .visible_rows()
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to read window rows from store")?;

    let formatter = WindowFormatter::new(args.format);
    formatter.write(&rows, &mut io::stdout())?;

    if args.verbose > 0 {
        let stats = session.stats();
        eprintln!("{} records stored ({} bytes)", stats.records, stats.bytes);
        if let Some(window) = session.window() {
            eprintln!(
                "window [{}, {}], autoscroll {}",
                window.start,
                window.end,
                if session.autoscroll() { "on" } else { "off" }
            );
        }
    }

    session.close().context("Failed to clear record store")?;
    Ok(())
}

fn feed(session: &mut PacketSession<MemoryStore>, batch: &[String]) -> Result<()> {
    session
        .on_batch_arrived(batch.iter().map(String::as_str))
        .context("Failed to append record batch")?;
    Ok(())
}
