//! packetview - sliding-window viewer core for live packet captures.
//!
//! This library maintains a potentially unbounded stream of captured packet
//! records as a scrollable table without materializing the full stream for
//! display: every record is persisted into a frame-number-keyed store, and
//! a viewport controller keeps a bounded window of frame numbers that
//! slides with scroll signals and newly arrived data.
//!
//! # Example
//!
//! ```
//! use packetview::config::ViewConfig;
//! use packetview::session::PacketSession;
//! use packetview::store::MemoryStore;
//!
//! # fn main() -> Result<(), packetview::Error> {
//! let mut session = PacketSession::new(ViewConfig::default(), MemoryStore::new());
//! session.on_record_arrived(r#"{"frame":{"frame.number":"1","frame.len":"60"}}"#)?;
//!
//! for row in session.visible_rows() {
//!     let (frame, record) = row?;
//!     println!("frame {frame}: {} bytes", record.length.unwrap_or(0));
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod record;
pub mod session;
pub mod store;
pub mod viewport;

pub use error::{Error, Result};
