//! Card list file parsing (plain text or Markdown)

use crate::error::{BuywizardError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

lazy_static! {
    /// First bracketed segment of a Markdown line, e.g. "- 2x [Island](...)"
    static ref MARKDOWN_CARD_RE: Regex = Regex::new(r"^.+?\[([^\]]+)\]").unwrap();
}

/// How card names are extracted from the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardListFormat {
    /// One card name per line
    PlainText,
    /// Card name is the first [bracketed] segment of each line
    Markdown,
}

impl CardListFormat {
    /// Pick the format from the file extension (".md" means Markdown)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") => CardListFormat::Markdown,
            _ => CardListFormat::PlainText,
        }
    }

    /// Extract the card name from a single non-blank line, if any
    fn parse_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self {
            CardListFormat::PlainText => Some(line.trim()),
            CardListFormat::Markdown => MARKDOWN_CARD_RE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim()),
        }
    }
}

/// Load an ordered card-name list from a file. Blank lines are ignored;
/// Markdown lines without a bracketed segment are skipped with a warning.
pub fn load_cardlist<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let format = CardListFormat::from_path(path);
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);

    let mut cards = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match format.parse_line(&line) {
            Some(name) if !name.is_empty() => cards.push(name.to_string()),
            _ => log::warn!("Skipping unparseable line in {}: {}", path.display(), line),
        }
    }

    if cards.is_empty() {
        return Err(BuywizardError::EmptyCardList(
            path.display().to_string(),
        ));
    }

    Ok(cards)
}
