// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing and validation of access-control expressions.
//!
//! An expression is one term, or several terms joined by `And`/`Or`,
//! written as a single string such as `UserPresenceAndBiometryAnySet`.
//! Whitespace may surround a conjunction; everything else is matched
//! exactly. Nothing may precede the first term or follow the last, and no
//! term may appear twice.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use strum::VariantNames;

use crate::diagnostic::{self, PolicyError};
use crate::term::{AccessControlTerm, Conjunction};

/// Matches one conjunction together with the whitespace around it. Splitting
/// on this pattern yields the terms of a well-formed expression.
pub(crate) static CONJUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(And|Or)\s*").unwrap());

/// Builds the full-expression grammar for a vocabulary: one term, then any
/// number of conjunction-term pairs, anchored at both ends.
fn grammar(vocabulary: &[&str]) -> Regex {
    let terms = vocabulary
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"^({terms})(?:\s*(?:And|Or)\s*({terms}))*$");
    Regex::new(&pattern).expect("escaped vocabulary always forms a valid pattern")
}

/// Splits `raw` on conjunctions, keeping each term's byte offset. Purely
/// lexical; callers must have checked the grammar first.
fn split_terms(raw: &str) -> (Vec<(&str, usize)>, Vec<Conjunction>) {
    let mut terms = Vec::new();
    let mut conjunctions = Vec::new();
    let mut cursor = 0;

    for captures in CONJUNCTION.captures_iter(raw) {
        let matched = captures.get(0).expect("full match is always present");
        terms.push((&raw[cursor..matched.start()], cursor));
        conjunctions.push(
            Conjunction::from_str(&captures[1]).expect("group only matches And or Or"),
        );
        cursor = matched.end();
    }
    terms.push((&raw[cursor..], cursor));

    (terms, conjunctions)
}

/// Validates `raw` against a closed vocabulary and returns its terms in
/// order of appearance.
///
/// The vocabulary lists every accepted term spelling; terms must not
/// contain `And` or `Or` as a substring. The empty string is rejected, as
/// is any expression with an unknown term, a dangling or doubled
/// conjunction, or a term that appears twice. Grammar problems are reported
/// before duplicates.
pub fn validate_expression(raw: &str, vocabulary: &[&str]) -> Result<Vec<String>, PolicyError> {
    if !grammar(vocabulary).is_match(raw) {
        return Err(diagnostic::invalid_syntax(raw, vocabulary));
    }

    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for (term, offset) in split_terms(raw).0 {
        if !seen.insert(term) {
            return Err(diagnostic::duplicate_term(raw, term, offset));
        }
        terms.push(term.to_string());
    }
    Ok(terms)
}

/// A validated access-control expression over the standard vocabulary.
///
/// Construction goes through [`AccessControlExpression::parse`], so an
/// instance always holds at least one term and no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControlExpression {
    terms: Vec<AccessControlTerm>,
    conjunctions: Vec<Conjunction>,
}

impl AccessControlExpression {
    /// Parses and validates `raw` against [`AccessControlTerm`]'s
    /// vocabulary.
    pub fn parse(raw: &str) -> Result<Self, PolicyError> {
        validate_expression(raw, AccessControlTerm::VARIANTS)?;

        let (raw_terms, conjunctions) = split_terms(raw);
        let terms = raw_terms
            .into_iter()
            .map(|(term, _)| {
                AccessControlTerm::from_str(term).expect("term was validated against the vocabulary")
            })
            .collect();

        Ok(AccessControlExpression {
            terms,
            conjunctions,
        })
    }

    /// The terms in order of appearance.
    pub fn terms(&self) -> &[AccessControlTerm] {
        &self.terms
    }

    /// The connectives between adjacent terms; always one fewer than the
    /// number of terms.
    pub fn conjunctions(&self) -> &[Conjunction] {
        &self.conjunctions
    }
}

impl fmt::Display for AccessControlExpression {
    /// Renders the canonical spelling, without whitespace around
    /// conjunctions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms[0])?;
        for (conjunction, term) in self.conjunctions.iter().zip(&self.terms[1..]) {
            write!(f, "{conjunction}{term}")?;
        }
        Ok(())
    }
}

impl FromStr for AccessControlExpression {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessControlExpression::parse(s)
    }
}
