// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rich diagnostics for rejected access-control expressions.
//!
//! Builds miette diagnostics with source spans, the accepted vocabulary,
//! and "did you mean?" suggestions using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::expression::CONJUNCTION;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common slips like `userpresence` -> `UserPresence` and
/// `Wach` -> `Watch` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// An access-control expression the validator refused.
///
/// Each variant carries enough context for miette to render the offending
/// expression with a span pointing at the problem.
#[derive(Debug, Error, Diagnostic)]
pub enum PolicyError {
    /// The expression does not match the term grammar.
    #[error("invalid access-control expression `{expression}`")]
    #[diagnostic(
        code(keywarden::policy::invalid_syntax),
        help("{}", format_syntax_help(suggestion.as_deref(), valid_terms))
    )]
    InvalidSyntax {
        /// The rejected expression, verbatim.
        expression: String,
        /// Suggested replacement for the unrecognized chunk, if any.
        suggestion: Option<String>,
        /// The accepted vocabulary, comma separated.
        valid_terms: String,
        /// Where the expression stops matching the grammar.
        #[label("invalid from here")]
        span: SourceSpan,
        /// The expression as a source for context display.
        #[source_code]
        src: NamedSource<String>,
    },

    /// A term appears more than once in the expression.
    #[error("duplicate access-control term `{term}`")]
    #[diagnostic(
        code(keywarden::policy::duplicate_term),
        help("each term may appear at most once")
    )]
    DuplicateTerm {
        /// The repeated term.
        term: String,
        /// The second occurrence of the term.
        #[label("this term already appeared")]
        span: SourceSpan,
        /// The expression as a source for context display.
        #[source_code]
        src: NamedSource<String>,
    },
}

/// Format the help message for syntax errors.
fn format_syntax_help(suggestion: Option<&str>, valid_terms: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid terms: {valid_terms}"),
        None => format!("valid terms: {valid_terms}"),
    }
}

/// Build the diagnostic for an expression the grammar rejected.
pub(crate) fn invalid_syntax(raw: &str, vocabulary: &[&str]) -> PolicyError {
    let offset = syntax_error_offset(raw, vocabulary);
    let (span_start, span_len, chunk) = unparsed_span(raw, offset);

    PolicyError::InvalidSyntax {
        expression: raw.to_string(),
        suggestion: suggest_term(chunk, vocabulary),
        valid_terms: vocabulary.join(", "),
        span: SourceSpan::new(span_start.into(), span_len),
        src: NamedSource::new("access-control", raw.to_string()),
    }
}

/// Build the diagnostic for a repeated term whose second occurrence starts
/// at `offset`.
pub(crate) fn duplicate_term(raw: &str, term: &str, offset: usize) -> PolicyError {
    PolicyError::DuplicateTerm {
        term: term.to_string(),
        span: SourceSpan::new(offset.into(), term.len()),
        src: NamedSource::new("access-control", raw.to_string()),
    }
}

/// Byte offset where `raw` stops matching the expression grammar.
///
/// Walks the string the way the grammar would, always taking the longest
/// term available at each position. This is diagnostic placement only;
/// acceptance is decided by the compiled grammar.
fn syntax_error_offset(raw: &str, vocabulary: &[&str]) -> usize {
    let mut pos = 0;
    loop {
        let Some(term_len) = longest_term_at(raw, pos, vocabulary) else {
            return pos;
        };
        pos += term_len;
        if pos == raw.len() {
            return pos;
        }

        let after_ws = pos + whitespace_len(&raw[pos..]);
        let Some(conjunction_len) = conjunction_at(raw, after_ws) else {
            return pos;
        };
        pos = after_ws + conjunction_len;
        pos += whitespace_len(&raw[pos..]);
    }
}

/// The unrecognized run of characters starting at `offset`, up to the next
/// conjunction, trimmed of surrounding whitespace. Returns the span start,
/// span length, and the chunk itself.
fn unparsed_span(raw: &str, offset: usize) -> (usize, usize, &str) {
    let rest = &raw[offset..];
    let end = CONJUNCTION.find(rest).map_or(rest.len(), |m| m.start());
    let chunk = &rest[..end];
    let lead = chunk.len() - chunk.trim_start().len();
    let trimmed = chunk.trim();
    (offset + lead, trimmed.len(), trimmed)
}

fn longest_term_at(raw: &str, pos: usize, vocabulary: &[&str]) -> Option<usize> {
    vocabulary
        .iter()
        .copied()
        .filter(|term| raw[pos..].starts_with(term))
        .map(str::len)
        .max()
}

fn conjunction_at(raw: &str, pos: usize) -> Option<usize> {
    ["And", "Or"]
        .into_iter()
        .find(|connective| raw[pos..].starts_with(connective))
        .map(str::len)
}

fn whitespace_len(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Suggest a similar term using Jaro-Winkler string similarity.
///
/// Returns the best vocabulary match above the similarity threshold, or
/// `None` if nothing is close enough.
pub fn suggest_term(unknown: &str, vocabulary: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &term in vocabulary {
        let score = strsim::jaro_winkler(unknown, term);
        if score > best_score {
            best_score = score;
            best_match = Some(term.to_string());
        }
    }

    best_match
}
