//! Layout-preserving editor for `.properties` files.
//!
//! Used by `clean` to delete entries without reformatting anything
//! else: untouched lines are written back byte-identical. Deleting an
//! entry removes its logical lines (continuations included) and the
//! comment block attached directly above it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::parsers::properties::key_spans;

pub struct PropertiesEditor {
    file_path: PathBuf,
    /// Physical lines without the trailing '\n' (a trailing '\r' from
    /// CRLF files is kept, so unedited lines survive byte-for-byte).
    lines: Vec<String>,
    had_trailing_newline: bool,
}

impl PropertiesEditor {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let had_trailing_newline = content.ends_with('\n');
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        if had_trailing_newline {
            lines.pop(); // split leaves one empty segment after the final '\n'
        }

        Ok(Self {
            file_path: path.to_path_buf(),
            lines,
            had_trailing_newline,
        })
    }

    /// Delete every entry whose key is in `keys`, along with attached
    /// comment blocks. Returns the number of entry occurrences removed.
    pub fn delete_keys(&mut self, keys: &[&str]) -> Result<usize> {
        let content = self.lines.join("\n");
        let spans = key_spans(&content)
            .map_err(|e| anyhow!("Failed to parse {}: {}", self.file_path.display(), e))?;

        let mut remove = vec![false; self.lines.len()];
        let mut deleted = 0;

        for span in spans {
            if !keys.contains(&span.key.as_str()) {
                continue;
            }
            deleted += 1;
            let start = span.comment_start.unwrap_or(span.start_line);
            for line in start..=span.end_line {
                if let Some(flag) = remove.get_mut(line - 1) {
                    *flag = true;
                }
            }
        }

        if deleted > 0 {
            self.lines = self
                .lines
                .iter()
                .zip(&remove)
                .filter(|&(_, &removed)| !removed)
                .map(|(line, _)| line.clone())
                .collect();
        }

        Ok(deleted)
    }

    /// Write the file back, preserving the original trailing-newline state.
    pub fn save(&self) -> Result<()> {
        let mut content = self.lines.join("\n");
        if self.had_trailing_newline {
            content.push('\n');
        }
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))
    }
}
