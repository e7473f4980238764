//! Parsed packet record representation.
//!
//! Records arrive from the transport as serialized JSON in the dissector's
//! layered form: a `frame` object with `frame.number`, `frame.time`,
//! `frame.protocols` and `frame.len`, plus an optional `ip` object with
//! `ip.src`/`ip.dst`. Numeric fields may be encoded as JSON strings or
//! numbers depending on the dissector version, so both are accepted.

use serde_json::Value;

use crate::error::RecordError;

/// A single captured packet record.
///
/// Keeps the serialized text exactly as it arrived (the store persists it
/// verbatim) alongside the handful of frame fields the table displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketRecord {
    /// Frame number (unique per record, not necessarily contiguous).
    pub frame_number: u64,

    /// Capture timestamp, as reported by the source.
    pub time: Option<String>,

    /// Protocol chain (e.g. "eth:ethertype:ip:tcp").
    pub protocols: Option<String>,

    /// Frame length in bytes.
    pub length: Option<u64>,

    /// Source IP address, if the record carries an ip layer.
    pub src: Option<String>,

    /// Destination IP address, if the record carries an ip layer.
    pub dst: Option<String>,

    raw: String,
}

impl PacketRecord {
    /// Parse a serialized record.
    ///
    /// Only `frame.number` is required; every other field is optional and
    /// absent fields stay `None`. The input text is retained unmodified.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(raw)?;
        let frame = value.get("frame").ok_or(RecordError::MissingFrame)?;

        let frame_number = match frame.get("frame.number") {
            None => return Err(RecordError::MissingFrameNumber),
            Some(v) => parse_integer(v).ok_or_else(|| RecordError::InvalidFrameNumber {
                value: v.to_string(),
            })?,
        };

        let ip = value.get("ip");

        Ok(Self {
            frame_number,
            time: string_field(frame, "frame.time"),
            protocols: string_field(frame, "frame.protocols"),
            length: frame.get("frame.len").and_then(parse_integer),
            src: ip.and_then(|ip| string_field(ip, "ip.src")),
            dst: ip.and_then(|ip| string_field(ip, "ip.dst")),
            raw: raw.to_string(),
        })
    }

    /// The original serialized text, byte-identical to the input.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Extract an integer that may be encoded as a JSON number or string.
fn parse_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
