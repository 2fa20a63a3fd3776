//! Resource kind and address definitions.

use super::grammar;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Kind of resource, derived from the name grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A single non-numeric resource.
    Simple,
    /// A dotted path of segments; locking a segment implies its descendants.
    Hierarchical,
    /// A pool of N interchangeable units; a lock requests a quantity.
    Numeric,
    /// A named collection; the daemon grants one specific element.
    Set,
}

impl ResourceKind {
    /// Get the wire/display name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Simple => "simple",
            ResourceKind::Hierarchical => "hierarchical",
            ResourceKind::Numeric => "numeric",
            ResourceKind::Set => "set",
        }
    }
}

/// A parsed resource name.
///
/// Recomputed from the raw name on demand; the handle never stores one
/// between calls, so a name change is always re-validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    name: String,
    kind: ResourceKind,
    /// Ordered path components; only populated for Hierarchical.
    segments: Vec<String>,
    /// Declared pool capacity; only populated for Numeric.
    capacity: Option<u32>,
    transactional: bool,
}

impl ResourceAddress {
    /// Parse a resource name into a typed address.
    ///
    /// Returns `RelockError::InvalidResourceName` when the name does not
    /// match any resource grammar. Parsing is total: every string maps to
    /// exactly one kind or is rejected.
    pub fn parse(name: &str) -> Result<Self> {
        grammar::parse(name)
    }

    pub(super) fn new(
        name: &str,
        kind: ResourceKind,
        segments: Vec<String>,
        capacity: Option<u32>,
        transactional: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            segments,
            capacity,
            transactional,
        }
    }

    /// The raw resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resource kind encoded by the name.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Ordered path segments; empty unless the resource is Hierarchical.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The declared pool capacity; `None` unless the resource is Numeric.
    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    /// Whether the resource supports rollback on unlock.
    pub fn is_transactional(&self) -> bool {
        self.transactional
    }
}

impl std::fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.as_str())
    }
}
