//! Line commands understood by the explorer.
//!
//! Each non-empty line is one command word followed by optional arguments:
//!
//! ```text
//! filter service=Solar Installation price=under-5000
//! click 12
//! upload {"id":51,"service":"Solar Installation",...}
//! map
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use quote_common::{FilterUpdate, Quote, QuoteError, Result};

use crate::model::event::{AppEvent, View};

/// Parse one line into an event; `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    let event = match word.to_ascii_lowercase().as_str() {
        "filter" => AppEvent::FilterChanged(FilterUpdate::parse_pairs(rest)?),
        "reset-filters" => AppEvent::FilterChanged(FilterUpdate::reset()),
        "click" => {
            let id = rest
                .parse()
                .map_err(|_| QuoteError::Format(format!("click expects a quote id, got {:?}", rest)))?;
            AppEvent::MarkerClicked(id)
        }
        "close-info" => AppEvent::CloseQuoteInfo,
        "open-upload" => AppEvent::OpenUpload,
        "close-upload" => AppEvent::CloseUpload,
        "upload" => {
            let quote: Quote = serde_json::from_str(rest)?;
            AppEvent::SubmitQuote(Box::new(quote))
        }
        "upload-random" => AppEvent::SubmitGenerated,
        "open-installer" => AppEvent::OpenInstaller,
        "close-installer" => AppEvent::CloseInstaller,
        "quit" | "exit" => AppEvent::Shutdown,
        other => match other.parse::<View>() {
            Ok(view) => AppEvent::Show(view),
            Err(_) => return Err(QuoteError::UnknownCommand(word.to_string())),
        },
    };
    Ok(Some(event))
}

/// Trait providing batch parsing of command scripts.
pub trait CommandParser {
    /// Parses every command from a buffered reader.
    ///
    /// Stops at the first line that fails to read or parse.
    fn parse_script<R: BufRead>(reader: R) -> Result<Vec<AppEvent>>;
}

impl CommandParser for AppEvent {
    fn parse_script<R: BufRead>(reader: R) -> Result<Vec<Self>> {
        let mut events = Vec::new();
        for line_result in reader.lines() {
            let line = line_result.map_err(QuoteError::Io)?;
            if let Some(event) = parse_line(&line)? {
                events.push(event);
            }
        }
        Ok(events)
    }
}
