//! Compiled resource-name grammar.
//!
//! Patterns are compiled once and shared; they are checked in precedence
//! order (set marker, numeric bracket, hierarchical dots, simple token) so
//! every name maps to at most one kind.

use super::types::{ResourceAddress, ResourceKind};
use crate::error::{RelockError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Marker prefix of transactional resources.
const TRANSACTIONAL_MARKER: &str = "_S_";

/// Marker prefix of set resources.
const SET_MARKER: &str = "_e_";

static SET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^_e_([A-Za-z0-9]+(?:\.[A-Za-z0-9]+)*)$").unwrap()
});

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+\[([0-9]+)\]$").unwrap()
});

static HIERARCHICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)+$").unwrap()
});

static SIMPLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Parse a resource name into a typed address.
pub(super) fn parse(name: &str) -> Result<ResourceAddress> {
    if name.is_empty() {
        return Err(RelockError::NullObject("resource name".to_string()));
    }

    let transactional = name.starts_with(TRANSACTIONAL_MARKER);

    // Set names carry the `_e_` marker; checked before the dotted rule so
    // `_e_red.green` is a set, not a hierarchy.
    if name.starts_with(SET_MARKER) {
        if SET_RE.is_match(name) {
            return Ok(ResourceAddress::new(
                name,
                ResourceKind::Set,
                Vec::new(),
                None,
                transactional,
            ));
        }
        return Err(RelockError::InvalidResourceName(name.to_string()));
    }

    if let Some(captures) = NUMERIC_RE.captures(name) {
        let capacity: u32 = captures[1].parse().map_err(|_| {
            // Only possible when the bracketed value overflows u32.
            RelockError::InvalidResourceName(name.to_string())
        })?;
        return Ok(ResourceAddress::new(
            name,
            ResourceKind::Numeric,
            Vec::new(),
            Some(capacity),
            transactional,
        ));
    }

    if HIERARCHICAL_RE.is_match(name) {
        let segments = name.split('.').map(str::to_string).collect();
        return Ok(ResourceAddress::new(
            name,
            ResourceKind::Hierarchical,
            segments,
            None,
            transactional,
        ));
    }

    if SIMPLE_RE.is_match(name) {
        return Ok(ResourceAddress::new(
            name,
            ResourceKind::Simple,
            Vec::new(),
            None,
            transactional,
        ));
    }

    Err(RelockError::InvalidResourceName(name.to_string()))
}
