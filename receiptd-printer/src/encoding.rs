//! Text encoding utilities for thermal printers
//!
//! Documents declare their target encoding by label (e.g. "gbk", "utf-8",
//! "windows-1252"). This module provides:
//! - Resolving encoding labels
//! - Measuring/truncating/padding strings by encoded byte width
//! - Converting buffered UTF-8 content to the target encoding while
//!   preserving ESC/POS command bytes

use encoding_rs::Encoding;

use crate::escpos::Alignment;

/// Resolve an encoding label to an encoding
///
/// Labels follow the WHATWG registry, so common printer spellings
/// ("GBK", "gb2312", "latin1") all resolve.
pub fn resolve(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Get the encoded byte width of a string
///
/// CJK characters are typically 2 bytes in legacy encodings, ASCII is 1 byte.
/// Monospaced thermal fonts render one column per encoded byte.
pub fn encoded_width(encoding: &'static Encoding, s: &str) -> usize {
    let (cow, _, _) = encoding.encode(s);
    cow.len()
}

/// Truncate a string to fit within an encoded byte width
pub fn truncate_width(encoding: &'static Encoding, s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let s_char = c.to_string();
        let (cow, _, _) = encoding.encode(&s_char);
        let char_len = cow.len();

        if width + char_len > max_width {
            break;
        }
        result.push(c);
        width += char_len;
    }
    result
}

/// Pad a string to a specific encoded byte width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_width(encoding: &'static Encoding, s: &str, width: usize, align: Alignment) -> String {
    let current_width = encoded_width(encoding, s);
    if current_width >= width {
        return truncate_width(encoding, s, width);
    }
    let spaces = width - current_width;
    match align {
        Alignment::Left => format!("{}{}", s, " ".repeat(spaces)),
        Alignment::Right => format!("{}{}", " ".repeat(spaces), s),
        Alignment::Center => {
            let left = spaces / 2;
            format!("{}{}{}", " ".repeat(left), s, " ".repeat(spaces - left))
        }
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to the target encoding
///
/// ASCII bytes (0x00-0x7F) are passed through exactly as is, which protects
/// ESC/POS commands from being corrupted. Only bytes >= 0x80 are treated as
/// UTF-8 sequences and re-encoded.
pub fn convert_document(encoding: &'static Encoding, bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() * 2);
    let mut run = Vec::new();

    for &b in bytes {
        if b < 128 {
            // Command byte or ASCII text
            flush_run(encoding, &mut run, &mut result);
            result.push(b);
        } else {
            // Part of a UTF-8 sequence
            run.push(b);
        }
    }

    flush_run(encoding, &mut run, &mut result);
    result
}

/// Flush a pending non-ASCII run, re-encoding it
fn flush_run(encoding: &'static Encoding, run: &mut Vec<u8>, result: &mut Vec<u8>) {
    if run.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(run);
    let (encoded, _, _) = encoding.encode(&s);
    result.extend_from_slice(&encoded);
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbk() -> &'static Encoding {
        resolve("gbk").unwrap()
    }

    #[test]
    fn test_resolve_labels() {
        assert!(resolve("GBK").is_some());
        assert!(resolve("utf-8").is_some());
        assert!(resolve(" gb2312 ").is_some());
        assert!(resolve("not-an-encoding").is_none());
    }

    #[test]
    fn test_encoded_width() {
        assert_eq!(encoded_width(gbk(), "hello"), 5);
        assert_eq!(encoded_width(gbk(), "你好"), 4); // 2 CJK chars = 4 bytes
        assert_eq!(encoded_width(gbk(), "AB中文CD"), 8);
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width(gbk(), "hello world", 5), "hello");
        assert_eq!(truncate_width(gbk(), "你好世界", 4), "你好");
        assert_eq!(truncate_width(gbk(), "AB中文", 4), "AB中");
    }

    #[test]
    fn test_pad_width() {
        assert_eq!(pad_width(gbk(), "hi", 5, Alignment::Left), "hi   ");
        assert_eq!(pad_width(gbk(), "hi", 5, Alignment::Right), "   hi");
        assert_eq!(pad_width(gbk(), "hi", 6, Alignment::Center), "  hi  ");
        assert_eq!(pad_width(gbk(), "hi", 5, Alignment::Center), " hi  ");
        assert_eq!(pad_width(gbk(), "hello world", 5, Alignment::Left), "hello");
    }

    #[test]
    fn test_convert_preserves_commands() {
        // ESC a 1 followed by Chinese text
        let mut buf = vec![0x1B, 0x61, 0x01];
        buf.extend_from_slice("中".as_bytes());
        let out = convert_document(gbk(), &buf);

        assert_eq!(&out[..3], &[0x1B, 0x61, 0x01]);
        // GBK for 中 is 0xD6 0xD0, not the 3-byte UTF-8 sequence
        assert_eq!(&out[3..], &[0xD6, 0xD0]);
    }

    #[test]
    fn test_convert_utf8_identity_for_ascii() {
        let buf = b"plain ascii\n".to_vec();
        let out = convert_document(resolve("utf-8").unwrap(), &buf);
        assert_eq!(out, buf);
    }
}
