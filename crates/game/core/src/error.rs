//! Common error infrastructure for battle-core.
//!
//! Only contract violations surface as `Err`. Player-supplied input is never
//! an error: invalid paths, targets and items are corrected by the engine and
//! reported as events instead.
//!
//! # Design Principles
//!
//! - **Loud invariants**: re-applying the leader bonus, rotation desync or
//!   spending more energy than held must never be silently absorbed
//! - **Rich Context**: errors carry round and actor for diagnostics
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::state::{MemberRef, Side};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative input.
    Recoverable,

    /// Validation error - malformed data, should not retry without changes.
    ///
    /// Examples: unknown attribute identifier, unknown category name
    Validation,

    /// Internal error - an engine invariant was broken.
    ///
    /// Examples: leader bonus applied twice, rotation lists out of sync
    Internal,

    /// Fatal error - the battle cannot continue.
    ///
    /// Examples: round ceiling exceeded
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an engine bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Round in which the error occurred (0 before the first round).
    pub round: u32,

    /// Combatant involved in the failure (if applicable).
    pub actor: Option<MemberRef>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(round: u32) -> Self {
        Self {
            round,
            actor: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: MemberRef) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all battle-core errors.
pub trait BattleFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Engine contract violations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("team already holds {capacity} members")]
    TeamFull { capacity: usize },

    #[error("{side} team has no members")]
    EmptyTeam { side: Side },

    #[error("leader bonus was already applied to this team")]
    LeaderBonusReapplied,

    #[error(
        "rotation out of sync: {active} active + {reserve} reserve does not cover {members} members"
    )]
    RotationMismatch {
        active: usize,
        reserve: usize,
        members: usize,
        context: ErrorContext,
    },

    #[error("cannot spend {need} energy while holding {have}")]
    EnergyUnderflow {
        have: u8,
        need: u8,
        context: ErrorContext,
    },

    #[error("member index {index} out of range for team of {len}")]
    MemberOutOfRange { index: usize, len: usize },

    #[error("battle did not finish within {limit} rounds")]
    RoundLimitExceeded { limit: u32 },
}

impl InvariantError {
    /// Attaches a context to variants that carry one.
    #[must_use]
    pub fn with_context(mut self, ctx: ErrorContext) -> Self {
        match &mut self {
            Self::RotationMismatch { context, .. } | Self::EnergyUnderflow { context, .. } => {
                *context = ctx;
            }
            _ => {}
        }
        self
    }
}

impl BattleFault for InvariantError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TeamFull { .. } | Self::EmptyTeam { .. } => ErrorSeverity::Validation,
            Self::RoundLimitExceeded { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::RotationMismatch { context, .. } | Self::EnergyUnderflow { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TeamFull { .. } => "TEAM_FULL",
            Self::EmptyTeam { .. } => "TEAM_EMPTY",
            Self::LeaderBonusReapplied => "LEADER_BONUS_REAPPLIED",
            Self::RotationMismatch { .. } => "ROTATION_MISMATCH",
            Self::EnergyUnderflow { .. } => "ENERGY_UNDERFLOW",
            Self::MemberOutOfRange { .. } => "MEMBER_OUT_OF_RANGE",
            Self::RoundLimitExceeded { .. } => "ROUND_LIMIT_EXCEEDED",
        }
    }
}

/// Unknown attribute identifier in roster data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute `{0}` (expected STR, AGL, TEQ, INT, PHY or RAINBOW)")]
pub struct ParseAttributeError(pub String);

impl BattleFault for ParseAttributeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ATTRIBUTE_UNKNOWN"
    }
}

/// Unknown category or link-skill name in roster data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCategoryError {
    #[error("unknown category `{0}`")]
    Category(String),

    #[error("unknown link skill `{0}`")]
    LinkSkill(String),
}

impl BattleFault for ParseCategoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Category(_) => "CATEGORY_UNKNOWN",
            Self::LinkSkill(_) => "LINK_SKILL_UNKNOWN",
        }
    }
}
