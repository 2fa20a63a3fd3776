//! DLM lock modes and their compatibility matrix.

use crate::error::{RelockError, Result};
use serde::{Deserialize, Serialize};

/// Lock mode requested for a resource, with DLM semantics.
///
/// The daemon arbitrates grants using the compatibility matrix below; the
/// client mirrors it so illegal combinations can be reported without a
/// network round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockMode {
    /// Null lock: interest in the resource without constraining anyone.
    #[serde(rename = "NL")]
    Null,
    /// Concurrent read.
    #[serde(rename = "CR")]
    ConcurrentRead,
    /// Concurrent write.
    #[serde(rename = "CW")]
    ConcurrentWrite,
    /// Protected read (shared).
    #[serde(rename = "PR")]
    ProtectedRead,
    /// Protected write (update).
    #[serde(rename = "PW")]
    ProtectedWrite,
    /// Exclusive.
    #[serde(rename = "EX")]
    #[default]
    Exclusive,
}

/// All modes, indexed by their wire value.
const MODES: [LockMode; 6] = [
    LockMode::Null,
    LockMode::ConcurrentRead,
    LockMode::ConcurrentWrite,
    LockMode::ProtectedRead,
    LockMode::ProtectedWrite,
    LockMode::Exclusive,
];

/// The DLM compatibility matrix, indexed [held][requested].
///
/// NL is compatible with everything; CR with all but EX; CW with NL/CR/CW;
/// PR with NL/CR/PR; PW with NL/CR; EX with NL only. The matrix is symmetric.
const COMPATIBLE: [[bool; 6]; 6] = [
    // held \ requested: NL     CR     CW     PR     PW     EX
    /* NL */ [true, true, true, true, true, true],
    /* CR */ [true, true, true, true, true, false],
    /* CW */ [true, true, true, false, false, false],
    /* PR */ [true, true, false, true, false, false],
    /* PW */ [true, true, false, false, false, false],
    /* EX */ [true, false, false, false, false, false],
];

impl LockMode {
    /// Whether a lock in `self` mode can coexist with a lock in `other` mode.
    pub fn compatible_with(self, other: LockMode) -> bool {
        COMPATIBLE[self as usize][other as usize]
    }

    /// The two-letter DLM name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Null => "NL",
            LockMode::ConcurrentRead => "CR",
            LockMode::ConcurrentWrite => "CW",
            LockMode::ProtectedRead => "PR",
            LockMode::ProtectedWrite => "PW",
            LockMode::Exclusive => "EX",
        }
    }

    /// The numeric wire value of this mode.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for LockMode {
    type Error = RelockError;

    /// Convert a numeric wire value into a mode, rejecting out-of-range
    /// values before any dispatch.
    fn try_from(value: i32) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| MODES.get(index).copied())
            .ok_or_else(|| RelockError::OutOfRange(format!("lock mode value {}", value)))
    }
}

impl std::fmt::Display for LockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
