//! Issue selector parsing.
//!
//! Accepts either an inclusive range (`"5-8"`) or a comma-separated list
//! (`"5,9,7"`). Lists keep their literal order.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing an issue selector.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// Nothing to parse.
    #[error("issue selector is empty")]
    Empty,

    /// A part is not a number.
    #[error("'{part}' is not an issue number")]
    InvalidNumber { part: String },

    /// Issue numbers start at 1.
    #[error("issue numbers start at 1")]
    Zero,

    /// The range runs backwards.
    #[error("range {lo}-{hi} is empty")]
    EmptyRange { lo: u64, hi: u64 },
}

/// Which source issues to migrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSelector {
    /// Every number from `lo` to `hi`, inclusive, ascending.
    Range { lo: u64, hi: u64 },
    /// Explicit numbers in the order given.
    List(Vec<u64>),
}

impl IssueSelector {
    /// Parses a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] for empty input, non-numeric parts, zero, or
    /// a backwards range.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        if let Some((lo, hi)) = input.split_once('-') {
            let lo = parse_number(lo)?;
            let hi = parse_number(hi)?;
            if lo > hi {
                return Err(SelectorError::EmptyRange { lo, hi });
            }
            return Ok(Self::Range { lo, hi });
        }

        input
            .split(',')
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }

    /// Resolves the selector into the issue numbers to visit, in order.
    #[must_use]
    pub fn numbers(&self) -> Vec<u64> {
        match self {
            Self::Range { lo, hi } => (*lo..=*hi).collect(),
            Self::List(numbers) => numbers.clone(),
        }
    }
}

fn parse_number(part: &str) -> Result<u64, SelectorError> {
    let part = part.trim();
    let number = part.parse::<u64>().map_err(|_| SelectorError::InvalidNumber {
        part: part.to_string(),
    })?;
    if number == 0 {
        return Err(SelectorError::Zero);
    }
    Ok(number)
}

impl FromStr for IssueSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IssueSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { lo, hi } => write!(f, "{lo}-{hi}"),
            Self::List(numbers) => {
                let parts: Vec<String> = numbers.iter().map(u64::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}
