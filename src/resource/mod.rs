//! Resource address model for relock.
//!
//! A resource is addressed purely by its name string: the grammar encodes the
//! resource *type* (simple, hierarchical, numeric with a declared capacity,
//! set with a daemon-chosen element) and whether the resource is
//! transactional. This module parses names into a typed [`ResourceAddress`]
//! and exposes the DLM lock-mode compatibility matrix mirrored client-side
//! for fast local validation; the daemon remains the arbiter.
//!
//! # Name Grammar
//!
//! Matched longest-first, in this order:
//!
//! 1. **Set**: `_e_` marker followed by `.`-separated elements, like
//!    `_e_red.green.blue`
//! 2. **Numeric**: a base token with a bracketed capacity, like
//!    `printers[5]`, `_S_seq[1]`, `_s_seq[1]`
//! 3. **Hierarchical**: two or more `.`-separated segments, like
//!    `red.blue.green`
//! 4. **Simple**: a single bare token, like `red` or `_RESOURCE`
//!
//! Names starting with the `_S_` marker are transactional and support
//! rollback on unlock; the lowercase `_s_` spelling of the same shape is the
//! non-transactional variant. Every string maps to exactly one kind or is
//! rejected as invalid: the grammar is total.

mod grammar;
mod lock_mode;
mod types;


// Re-export public API
pub use lock_mode::LockMode;
pub use types::{ResourceAddress, ResourceKind};
