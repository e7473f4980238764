//! Output formatting for the visible window.

use std::io::Write;

use clap::ValueEnum;

use crate::record::PacketRecord;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table (default)
    Table,
    /// JSON Lines: the stored record text, verbatim, one per row
    Json,
}

/// Formats the visible rows of a window for output.
pub struct WindowFormatter {
    format: OutputFormat,
}

impl WindowFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format the rows and write them to the given writer.
    pub fn write<W: Write>(
        &self,
        rows: &[(u64, PacketRecord)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => self.write_table(rows, writer),
            OutputFormat::Json => self.write_json(rows, writer),
        }
    }

    fn write_table<W: Write>(
        &self,
        rows: &[(u64, PacketRecord)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        use comfy_table::Table;

        let mut table = Table::new();
        table.set_header(["Frame No.", "Time", "Source", "Dest", "Protocol", "Length"]);

        for (frame, record) in rows {
            table.add_row([
                frame.to_string(),
                record.time.clone().unwrap_or_default(),
                record.src.clone().unwrap_or_else(|| "unknown".to_string()),
                record.dst.clone().unwrap_or_else(|| "unknown".to_string()),
                record.protocols.clone().unwrap_or_default(),
                record.length.map(|l| l.to_string()).unwrap_or_default(),
            ]);
        }

        writeln!(writer, "{table}")
    }

    fn write_json<W: Write>(
        &self,
        rows: &[(u64, PacketRecord)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for (_, record) in rows {
            // Stored text is already JSON and round-trips byte-identically.
            writeln!(writer, "{}", record.raw())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: &str) -> PacketRecord {
        PacketRecord::parse(raw).unwrap()
    }

    #[test]
    fn test_table_uses_unknown_for_missing_ip() {
        let rows = vec![(3, record(r#"{"frame":{"frame.number":"3","frame.len":"60"}}"#))];
        let mut out = Vec::new();
        WindowFormatter::new(OutputFormat::Table)
            .write(&rows, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown"));
        assert!(text.contains("Frame No."));
    }

    #[test]
    fn test_json_lines_are_verbatim() {
        let raw = r#"{"frame":{"frame.number":"3","frame.len":"60"}}"#;
        let rows = vec![(3, record(raw))];
        let mut out = Vec::new();
        WindowFormatter::new(OutputFormat::Json)
            .write(&rows, &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{raw}\n"));
    }
}
