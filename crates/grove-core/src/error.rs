//! Error types shared across the grove workspace.
//!
//! Two families live here: [`PoolError`] for violations of the pool
//! acquire/release protocol, and [`ConfigError`] for configuration that
//! is rejected at construction time instead of being clamped.

use std::error::Error;
use std::fmt;

use crate::id::PoolId;

// ── PoolError ──────────────────────────────────────────────────────

/// Misuse of the pool protocol.
///
/// These are programmer errors. They are reported loudly rather than
/// ignored, because ignoring them lets one instance end up in the reuse
/// queue twice and be handed to two owners at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The handle was issued by a different pool.
    ForeignHandle {
        /// The pool the handle belongs to.
        handle_pool: PoolId,
        /// The pool it was presented to.
        pool: PoolId,
    },
    /// The handle's generation no longer matches its slot: the instance
    /// was released (and possibly reacquired) since the handle was issued.
    /// Releasing the same handle twice reports this, because release
    /// advances the generation.
    StaleHandle {
        /// Slot index encoded in the handle.
        index: u32,
        /// Generation encoded in the handle.
        handle_generation: u32,
        /// Current generation of the slot.
        current_generation: u32,
    },
    /// The handle's generation matches but the instance is inactive.
    ///
    /// Only reachable once a slot's generation counter has wrapped around
    /// to a value an old handle still carries.
    AlreadyInactive {
        /// Slot index of the instance.
        index: u32,
    },
    /// The handle points past the end of the pool.
    UnknownSlot {
        /// Slot index encoded in the handle.
        index: u32,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignHandle { handle_pool, pool } => {
                write!(f, "handle from pool {handle_pool} presented to pool {pool}")
            }
            Self::StaleHandle {
                index,
                handle_generation,
                current_generation,
            } => write!(
                f,
                "stale handle for slot {index}: generation {handle_generation}, current {current_generation}"
            ),
            Self::AlreadyInactive { index } => {
                write!(f, "slot {index} is already inactive")
            }
            Self::UnknownSlot { index } => write!(f, "unknown pool slot {index}"),
        }
    }
}

impl Error for PoolError {}

// ── ConfigError ────────────────────────────────────────────────────

/// Configuration rejected at construction time.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A duration that must be strictly positive was zero.
    NonPositiveDuration {
        /// Name of the offending setting.
        name: &'static str,
    },
    /// An inclusive range whose minimum exceeds its maximum.
    InvertedRange {
        /// Name of the offending setting.
        name: &'static str,
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
    /// A range whose minimum is zero where at least one is required.
    EmptyRange {
        /// Name of the offending setting.
        name: &'static str,
    },
    /// A numeric setting that is NaN or infinite.
    NonFinite {
        /// Name of the offending setting.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDuration { name } => {
                write!(f, "{name} must be a positive duration")
            }
            Self::InvertedRange { name, min, max } => {
                write!(f, "{name}: minimum {min} exceeds maximum {max}")
            }
            Self::EmptyRange { name } => write!(f, "{name}: minimum must be at least 1"),
            Self::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
