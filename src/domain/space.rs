//! Parameter space selection and resolution.
//!
//! The optimizer searches one or more parameter spaces per run; each selected
//! space owns one text column in the results table. The set is closed, so a
//! selection can never produce a column the schema does not know about.

use crate::domain::error::HypermanagerError;
use std::collections::HashSet;

/// A tunable parameter family the optimizer can search over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Buy,
    Sell,
    Roi,
    Stoploss,
    Trailing,
}

/// Every space, in the order their columns appear in the results table.
pub const CANONICAL_ORDER: [Space; 5] = [
    Space::Buy,
    Space::Sell,
    Space::Roi,
    Space::Stoploss,
    Space::Trailing,
];

impl Space {
    /// The selection token, also used as column name and as key into the
    /// per-epoch parameter details.
    pub fn token(&self) -> &'static str {
        match self {
            Space::Buy => "buy",
            Space::Sell => "sell",
            Space::Roi => "roi",
            Space::Stoploss => "stoploss",
            Space::Trailing => "trailing",
        }
    }

    pub fn from_token(token: &str) -> Option<Space> {
        CANONICAL_ORDER.into_iter().find(|s| s.token() == token)
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Expand a raw token selection into the ordered space list.
///
/// `"all"` anywhere in the input selects every space and `"default"` selects
/// everything except trailing, both ignoring the remaining tokens. Otherwise
/// tokens are taken in the given order and must each name a known space,
/// at most once.
pub fn resolve_spaces(tokens: &[String]) -> Result<Vec<Space>, HypermanagerError> {
    if tokens.iter().any(|t| t == "all") {
        return Ok(CANONICAL_ORDER.to_vec());
    }
    if tokens.iter().any(|t| t == "default") {
        return Ok(CANONICAL_ORDER[..4].to_vec());
    }

    let mut seen = HashSet::new();
    let mut spaces = Vec::with_capacity(tokens.len());
    for token in tokens {
        let space = Space::from_token(token)
            .ok_or_else(|| HypermanagerError::UnknownSpace(token.clone()))?;
        if !seen.insert(space) {
            return Err(HypermanagerError::DuplicateSpace(token.clone()));
        }
        spaces.push(space);
    }
    Ok(spaces)
}
