//! Print document data model
//!
//! A document is one complete print job: encoding and paper width metadata
//! plus an ordered command list. Commands arrive as `{"command": <tag>,
//! "data": <payload>}` pairs; the tag picks the variant and the payload is
//! parsed per command. An unrecognized tag deserializes to
//! [`Command::Ignored`] - it is applied as a no-op, not rejected.

use serde::Deserialize;
use serde_json::Value;

/// One print job
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Target text encoding, as a WHATWG label (e.g. "gbk", "utf-8")
    pub encoding: String,
    /// Paper width in character columns (32 for 58mm, 48 for 80mm)
    pub paper_width: usize,
    /// Commands, applied strictly in order
    #[serde(default)]
    pub commands: Vec<Command>,
}

/// One printer instruction
#[derive(Debug)]
pub enum Command {
    /// Set alignment; code "c" = center, "r" = right, anything else = left
    Align(String),
    /// Set text style and scale
    Style(StyleData),
    /// Emit a line of text at the current alignment/style
    Text(String),
    /// Feed n lines
    NewLine(u8),
    /// Emit an EAN13 barcode
    Barcode(String),
    /// Emit a QR code at default size/error correction
    QrCode(String),
    /// Emit a table (header, rule, rows, rule)
    Table(TableData),
    /// Unrecognized command tag; applied as a no-op
    Ignored,
}

/// Payload of the `style` command
#[derive(Debug, Deserialize)]
pub struct StyleData {
    /// Style code: "b" bold, "u" underline, "n" or anything else normal
    #[serde(rename = "type")]
    pub kind: String,
    /// Uniform scale factor, default 1
    pub size: Option<u8>,
}

/// Payload of the `table` command
///
/// `headers`, `colspans` and `alignments` are expected to share one length;
/// this is not validated, and mismatched lengths silently misalign output.
/// Row objects map column keys to cell text, but columns are matched by
/// *position* (document key order), not by key name.
#[derive(Debug, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub colspans: Vec<u32>,
    #[serde(default)]
    pub alignments: Vec<String>,
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, Value>>,
}

/// Wire shape of a command before the tag is interpreted
#[derive(Debug, Deserialize)]
struct RawCommand {
    command: String,
    #[serde(default)]
    data: Value,
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCommand::deserialize(deserializer)?;
        Command::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

impl Command {
    fn from_raw(raw: RawCommand) -> std::result::Result<Self, String> {
        let RawCommand { command, data } = raw;

        let parsed = match command.as_str() {
            // Absent or non-string payload behaves like an unknown code (left)
            "align" => Command::Align(data.as_str().unwrap_or_default().to_string()),
            "style" => Command::Style(
                serde_json::from_value(data).map_err(|e| format!("style: {}", e))?,
            ),
            "text" => Command::Text(string_payload(&command, data)?),
            "newLine" => Command::NewLine(feed_count(&data)),
            "barcode" => Command::Barcode(string_payload(&command, data)?),
            "qrcode" => Command::QrCode(string_payload(&command, data)?),
            "table" => Command::Table(
                serde_json::from_value(data).map_err(|e| format!("table: {}", e))?,
            ),
            _ => Command::Ignored,
        };

        Ok(parsed)
    }
}

fn string_payload(command: &str, data: Value) -> std::result::Result<String, String> {
    match data {
        Value::String(s) => Ok(s),
        other => Err(format!("{}: expected a string payload, got {}", command, other)),
    }
}

/// Feed count from the `newLine` payload; absent or non-numeric feeds one line
fn feed_count(data: &Value) -> u8 {
    data.as_u64().map(|n| n.min(u8::MAX as u64) as u8).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Command {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_document_roundtrip() {
        let doc: Document = serde_json::from_str(
            r#"{
                "encoding": "gbk",
                "paper_width": 48,
                "commands": [
                    {"command": "align", "data": "c"},
                    {"command": "text", "data": "hello"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.encoding, "gbk");
        assert_eq!(doc.paper_width, 48);
        assert_eq!(doc.commands.len(), 2);
        assert!(matches!(&doc.commands[0], Command::Align(c) if c == "c"));
        assert!(matches!(&doc.commands[1], Command::Text(t) if t == "hello"));
    }

    #[test]
    fn test_unknown_command_parses_as_ignored() {
        assert!(matches!(
            parse(r#"{"command": "foo", "data": 42}"#),
            Command::Ignored
        ));
        assert!(matches!(parse(r#"{"command": "openDrawer"}"#), Command::Ignored));
    }

    #[test]
    fn test_align_without_data_is_empty_code() {
        assert!(matches!(
            parse(r#"{"command": "align"}"#),
            Command::Align(c) if c.is_empty()
        ));
    }

    #[test]
    fn test_style_payload() {
        let cmd = parse(r#"{"command": "style", "data": {"type": "b", "size": 3}}"#);
        match cmd {
            Command::Style(style) => {
                assert_eq!(style.kind, "b");
                assert_eq!(style.size, Some(3));
            }
            other => panic!("expected style, got {:?}", other),
        }

        let cmd = parse(r#"{"command": "style", "data": {"type": "n"}}"#);
        match cmd {
            Command::Style(style) => assert_eq!(style.size, None),
            other => panic!("expected style, got {:?}", other),
        }
    }

    #[test]
    fn test_text_with_non_string_payload_fails() {
        let result: std::result::Result<Command, _> =
            serde_json::from_str(r#"{"command": "text", "data": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_line_defaults_to_one() {
        assert!(matches!(parse(r#"{"command": "newLine"}"#), Command::NewLine(1)));
        assert!(matches!(
            parse(r#"{"command": "newLine", "data": 4}"#),
            Command::NewLine(4)
        ));
    }

    #[test]
    fn test_table_row_key_order_preserved() {
        let cmd = parse(
            r#"{
                "command": "table",
                "data": {
                    "headers": ["Item", "Qty"],
                    "colspans": [3, 1],
                    "alignments": ["l", "r"],
                    "rows": [{"z_name": "Tea", "a_qty": "2"}]
                }
            }"#,
        );

        match cmd {
            Command::Table(table) => {
                // Document order, not alphabetical order
                let values: Vec<_> = table.rows[0].values().collect();
                assert_eq!(values[0], "Tea");
                assert_eq!(values[1], "2");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }
}
