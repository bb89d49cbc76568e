//! # cldmd-notation
//!
//! **Tier 1 (Parsing)**
//!
//! Parser and serializer for the CLD notation format: one relation per line,
//! `source sign target`, whitespace-separated. `#` starts a comment to end of
//! line; blank lines are skipped.
//!
//! Parsing is all-or-nothing: the first malformed line aborts the parse so no
//! partial graph is ever built from a broken file.
//!
//! ## What belongs here
//! * Line scanning, tokenization, identifier/sign validation
//! * The canonical text serializer (round-trip support)
//!
//! ## What does NOT belong here
//! * File I/O
//! * Graph construction or analysis

#![forbid(unsafe_code)]

use cldmd_types::{Polarity, Relation};
use thiserror::Error;

/// Errors from notation parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    /// A non-empty, non-comment line that is not `source sign target`.
    #[error("malformed line {line}: `{content}` (expected `source [+-] target`)")]
    MalformedLine { line: usize, content: String },

    /// The input produced zero relations (empty or all-comment file).
    #[error("no relations found in input")]
    EmptyInput,
}

/// True for tokens matching `[A-Za-z0-9_]+`.
fn is_identifier(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_sign(token: &str) -> Option<Polarity> {
    match token {
        "+" => Some(Polarity::SameDirection),
        "-" => Some(Polarity::OppositeDirection),
        _ => None,
    }
}

/// Parse notation text into an ordered relation list.
///
/// Line numbers in errors are 1-based and refer to the raw input, before
/// comment stripping.
pub fn parse_str(text: &str) -> Result<Vec<Relation>, NotationError> {
    let mut relations = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let data = raw.split('#').next().unwrap_or("");
        if data.trim().is_empty() {
            continue;
        }

        let malformed = || NotationError::MalformedLine {
            line: idx + 1,
            content: raw.trim_end().to_string(),
        };

        let tokens: Vec<&str> = data.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(malformed());
        }
        let polarity = parse_sign(tokens[1]).ok_or_else(|| malformed())?;
        if !is_identifier(tokens[0]) || !is_identifier(tokens[2]) {
            return Err(malformed());
        }

        relations.push(Relation::new(tokens[0], polarity, tokens[2]));
    }

    if relations.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    Ok(relations)
}

/// Serialize relations back to canonical notation text, one per line.
///
/// `parse_str(&to_notation(r))` yields `r` for any well-formed relation list.
#[must_use]
pub fn to_notation(relations: &[Relation]) -> String {
    let mut out = String::new();
    for r in relations {
        out.push_str(&r.source);
        out.push(' ');
        out.push(r.polarity.sign_token());
        out.push(' ');
        out.push_str(&r.target);
        out.push('\n');
    }
    out
}
