//! Java-style `.properties` parser.
//!
//! Follows `java.util.Properties` load semantics: `=`/`:`/whitespace
//! key separators, `\`-continuation of logical lines, `#`/`!` comment
//! lines, `\t \n \r \f \\ \uXXXX` escapes (unknown escapes drop the
//! backslash). Comment blocks directly above an entry are attached to
//! it; a blank line detaches them. Duplicated keys are recorded, the
//! last occurrence wins in map form.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::bundle::{DuplicateKey, PropertiesFile, PropertyEntry};

/// Parse failure with its position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesParseError {
    pub line: usize,
    pub col: usize,
    pub message: String,
    /// Raw text of the offending line.
    pub source_line: String,
}

impl fmt::Display for PropertiesParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.message, self.line)
    }
}

impl std::error::Error for PropertiesParseError {}

/// A logical entry's line span, used for layout-preserving edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpan {
    pub key: String,
    /// First line of the entry (1-indexed, inclusive).
    pub start_line: usize,
    /// Last line of the entry (continuations included, inclusive).
    pub end_line: usize,
    /// First line of the comment block attached to the entry.
    pub comment_start: Option<usize>,
}

/// Raw logical entry before unescaping.
struct RawEntry {
    start_line: usize,
    end_line: usize,
    col: usize,
    key_raw: String,
    value_raw: String,
    comment_start: Option<usize>,
    comment: Option<String>,
}

pub fn parse_properties_file(path: &Path) -> Result<PropertiesFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read properties file: {:?}", path))?;
    let file_path = path.to_string_lossy().to_string();
    parse_properties_str(&content, &file_path)
        .map_err(|e| anyhow::anyhow!("Failed to parse {:?}: {}", path, e))
}

pub fn parse_properties_str(
    content: &str,
    file_path: &str,
) -> Result<PropertiesFile, PropertiesParseError> {
    let lines: Vec<&str> = content.lines().collect();
    let mut file = PropertiesFile::new(file_path);
    let mut first_lines: HashMap<String, usize> = HashMap::new();

    for raw in scan_logical_lines(&lines) {
        let key = unescape(&raw.key_raw).map_err(|message| PropertiesParseError {
            line: raw.start_line,
            col: raw.col,
            message,
            source_line: source_line(&lines, raw.start_line),
        })?;
        let value = unescape(&raw.value_raw).map_err(|message| PropertiesParseError {
            line: raw.start_line,
            col: raw.col,
            message,
            source_line: source_line(&lines, raw.start_line),
        })?;

        match first_lines.get(&key) {
            Some(&first_line) => file.duplicates.push(DuplicateKey {
                key: key.clone(),
                line: raw.start_line,
                col: raw.col,
                source_line: source_line(&lines, raw.start_line),
                first_line,
            }),
            None => {
                first_lines.insert(key.clone(), raw.start_line);
            }
        }

        file.entries.push(PropertyEntry {
            key,
            value,
            comment: raw.comment,
            file_path: file_path.to_string(),
            line: raw.start_line,
            col: raw.col,
        });
    }

    Ok(file)
}

/// Line spans of all entries, for the layout-preserving editor.
pub fn key_spans(content: &str) -> Result<Vec<KeySpan>, PropertiesParseError> {
    let lines: Vec<&str> = content.lines().collect();
    scan_logical_lines(&lines)
        .into_iter()
        .map(|raw| {
            let key = unescape(&raw.key_raw).map_err(|message| PropertiesParseError {
                line: raw.start_line,
                col: raw.col,
                message,
                source_line: source_line(&lines, raw.start_line),
            })?;
            Ok(KeySpan {
                key,
                start_line: raw.start_line,
                end_line: raw.end_line,
                comment_start: raw.comment_start,
            })
        })
        .collect()
}

fn source_line(lines: &[&str], line: usize) -> String {
    lines.get(line - 1).unwrap_or(&"").to_string()
}

/// Group physical lines into comments, blanks, and logical entries.
fn scan_logical_lines(lines: &[&str]) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut pending_comment: Vec<String> = Vec::new();
    let mut pending_comment_start: Option<usize> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            // A blank line detaches any comment block from the next entry.
            pending_comment.clear();
            pending_comment_start = None;
            i += 1;
            continue;
        }

        if let Some(text) = comment_text(trimmed) {
            if pending_comment.is_empty() {
                pending_comment_start = Some(i + 1);
            }
            pending_comment.push(text.to_string());
            i += 1;
            continue;
        }

        // Start of a logical entry line.
        let start_line = i + 1;
        let col = line.len() - trimmed.len() + 1;
        let mut logical = String::new();
        let mut current = trimmed;
        loop {
            if ends_with_continuation(current) {
                logical.push_str(&current[..current.len() - 1]);
                i += 1;
                match lines.get(i) {
                    Some(next) => current = next.trim_start(),
                    None => {
                        current = "";
                        break;
                    }
                }
            } else {
                break;
            }
        }
        logical.push_str(current);
        let end_line = i + 1;
        i += 1;

        let (key_raw, value_raw) = split_key_value(&logical);
        let comment = if pending_comment.is_empty() {
            None
        } else {
            Some(pending_comment.join("\n"))
        };
        entries.push(RawEntry {
            start_line,
            end_line,
            col,
            key_raw,
            value_raw,
            comment_start: pending_comment_start.take(),
            comment,
        });
        pending_comment.clear();
    }

    entries
}

/// Comment body of a line, `None` if the line is not a comment.
fn comment_text(trimmed: &str) -> Option<&str> {
    let body = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix('!'))?;
    Some(body.strip_prefix(' ').unwrap_or(body))
}

/// An odd number of trailing backslashes continues the logical line.
fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_key_value(logical: &str) -> (String, String) {
    let mut escaped = false;
    let mut key_end = logical.len();
    for (idx, c) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key_raw = logical[..key_end].to_string();
    let mut rest = logical[key_end..].trim_start();
    // At most one '=' or ':' acts as the separator; whitespace alone
    // also separates ("key value").
    if let Some(first) = rest.chars().next()
        && (first == '=' || first == ':')
    {
        rest = rest[first.len_utf8()..].trim_start();
    }
    (key_raw, rest.to_string())
}

/// Decode `.properties` escape sequences.
fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => {} // trailing backslash at end of input, dropped
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(unescape_unicode(&mut chars)?),
            // Unknown escape: the backslash is dropped, the char kept.
            // This covers \", \:, \=, \#, \! and escaped spaces.
            Some(other) => out.push(other),
        }
    }
    Ok(out)
}

/// Decode `\uXXXX`, including UTF-16 surrogate pairs.
fn unescape_unicode(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let first = hex4(chars)?;
    if (0xD800..=0xDBFF).contains(&first) {
        // High surrogate: a low surrogate escape must follow.
        if chars.next() != Some('\\') || chars.next() != Some('u') {
            return Err(format!(
                "unpaired surrogate \\u{:04X}: expected a low surrogate escape",
                first
            ));
        }
        let second = hex4(chars)?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(format!(
                "invalid surrogate pair \\u{:04X}\\u{:04X}",
                first, second
            ));
        }
        let combined = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
        return char::from_u32(combined)
            .ok_or_else(|| format!("invalid unicode escape \\u{:04X}\\u{:04X}", first, second));
    }
    if (0xDC00..=0xDFFF).contains(&first) {
        return Err(format!("unpaired surrogate \\u{:04X}", first));
    }
    char::from_u32(first).ok_or_else(|| format!("invalid unicode escape \\u{:04X}", first))
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..4 {
        let c = chars
            .next()
            .ok_or_else(|| "truncated \\uXXXX escape".to_string())?;
        let digit = c
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}' in \\uXXXX escape", c))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(content: &str) -> PropertiesFile {
        parse_properties_str(content, "Test.properties").unwrap()
    }

    #[test]
    fn test_parse_separators() {
        let file = parse("a=1\nb: 2\nc 3\nd\t4\ne =  5\n");
        let map = file.to_map();
        assert_eq!(map["a"].value, "1");
        assert_eq!(map["b"].value, "2");
        assert_eq!(map["c"].value, "3");
        assert_eq!(map["d"].value, "4");
        assert_eq!(map["e"].value, "5");
    }

    #[test]
    fn test_parse_key_without_value() {
        let file = parse("flag\n");
        assert_eq!(file.get("flag").unwrap().value, "");
    }

    #[test]
    fn test_parse_lines_and_cols() {
        let file = parse("a = 1\n\n  b = 2\n");
        assert_eq!(file.get("a").unwrap().line, 1);
        assert_eq!(file.get("a").unwrap().col, 1);
        assert_eq!(file.get("b").unwrap().line, 3);
        assert_eq!(file.get("b").unwrap().col, 3);
    }

    #[test]
    fn test_parse_german_override_record() {
        // Override record for locale "de": exactly the declared keys,
        // exact values, quotes preserved.
        let content = "key = Die Platte \"{1}\" enth\\u00E4lt {0}.\nmadeUp = Das hier gibt es nur auf Deutsch.\n";
        let file = parse(content);

        assert_eq!(file.entries.len(), 2);
        assert_eq!(
            file.get("key").unwrap().value,
            "Die Platte \"{1}\" enthält {0}."
        );
        assert_eq!(
            file.get("madeUp").unwrap().value,
            "Das hier gibt es nur auf Deutsch."
        );
    }

    #[test]
    fn test_parse_continuation() {
        let file = parse("key = first \\\n      second\n");
        assert_eq!(file.get("key").unwrap().value, "first second");
    }

    #[test]
    fn test_parse_escaped_backslash_is_not_continuation() {
        let file = parse("path = C:\\\\temp\\\\\nnext = 1\n");
        assert_eq!(file.get("path").unwrap().value, "C:\\temp\\");
        assert_eq!(file.get("next").unwrap().value, "1");
    }

    #[test]
    fn test_parse_continuation_at_eof() {
        let file = parse("key = dangling \\");
        assert_eq!(file.get("key").unwrap().value, "dangling ");
    }

    #[test]
    fn test_parse_escapes() {
        let file = parse("key = tab\\there\\nnewline\\u0041\n");
        assert_eq!(file.get("key").unwrap().value, "tab\there\nnewlineA");
    }

    #[test]
    fn test_parse_unknown_escape_drops_backslash() {
        let file = parse("key = say \\\"hi\\\" \\q\n");
        assert_eq!(file.get("key").unwrap().value, "say \"hi\" q");
    }

    #[test]
    fn test_parse_escaped_separator_in_key() {
        let file = parse("a\\=b = 1\na\\ b : 2\n");
        assert_eq!(file.get("a=b").unwrap().value, "1");
        assert_eq!(file.get("a b").unwrap().value, "2");
    }

    #[test]
    fn test_parse_surrogate_pair() {
        let file = parse("emoji = \\uD83D\\uDE00\n");
        assert_eq!(file.get("emoji").unwrap().value, "😀");
    }

    #[test]
    fn test_parse_bad_unicode_escape() {
        let err = parse_properties_str("key = bad \\u00G1\n", "Test.properties").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("hex digit"));
        assert_eq!(err.source_line, "key = bad \\u00G1");
    }

    #[test]
    fn test_parse_truncated_unicode_escape() {
        let err = parse_properties_str("key = \\u00", "Test.properties").unwrap_err();
        assert!(err.message.contains("truncated"));
    }

    #[test]
    fn test_parse_unpaired_surrogate() {
        let err = parse_properties_str("key = \\uD83D!", "Test.properties").unwrap_err();
        assert!(err.message.contains("surrogate"));
    }

    #[test]
    fn test_parse_comments() {
        let content = "# header comment\n! also a comment\nkey = value\n";
        let file = parse(content);
        assert_eq!(
            file.get("key").unwrap().comment.as_deref(),
            Some("header comment\nalso a comment")
        );
    }

    #[test]
    fn test_parse_blank_line_detaches_comment() {
        let content = "# stale comment\n\nkey = value\n";
        let file = parse(content);
        assert_eq!(file.get("key").unwrap().comment, None);
    }

    #[test]
    fn test_parse_duplicates_last_wins() {
        let file = parse("key = first\nother = x\nkey = second\n");
        assert_eq!(file.get("key").unwrap().value, "second");
        assert_eq!(file.duplicates.len(), 1);
        assert_eq!(file.duplicates[0].key, "key");
        assert_eq!(file.duplicates[0].line, 3);
        assert_eq!(file.duplicates[0].first_line, 1);
    }

    #[test]
    fn test_parse_empty_key_is_allowed() {
        // java.util.Properties loads "=value" as the empty key.
        let file = parse("=value\n");
        assert_eq!(file.get("").unwrap().value, "value");
    }

    #[test]
    fn test_parse_crlf() {
        let file = parse("a = 1\r\nb = 2\r\n");
        assert_eq!(file.get("a").unwrap().value, "1");
        assert_eq!(file.get("b").unwrap().value, "2");
    }

    #[test]
    fn test_key_spans() {
        let content = "# comment for a\na = 1\nb = first \\\n    second\n\nc = 3\n";
        let spans = key_spans(content).unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(
            spans[0],
            KeySpan {
                key: "a".to_string(),
                start_line: 2,
                end_line: 2,
                comment_start: Some(1),
            }
        );
        assert_eq!(
            spans[1],
            KeySpan {
                key: "b".to_string(),
                start_line: 3,
                end_line: 4,
                comment_start: None,
            }
        );
        assert_eq!(
            spans[2],
            KeySpan {
                key: "c".to_string(),
                start_line: 6,
                end_line: 6,
                comment_start: None,
            }
        );
    }

    #[test]
    fn test_parse_properties_file() {
        use std::io::Write;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Errors.properties");

        let mut f = fs::File::create(&file_path).unwrap();
        write!(f, "disk.full = The disk is full.\n").unwrap();

        let file = parse_properties_file(&file_path).unwrap();
        assert_eq!(file.get("disk.full").unwrap().value, "The disk is full.");
        assert!(file.path.ends_with("Errors.properties"));
    }
}
