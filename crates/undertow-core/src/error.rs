//! Error types for the simulation core.
//!
//! Every fallible operation returns [`Result`]. Nothing in the core recovers
//! from a failure internally: errors go back to the immediate caller (launch
//! handling or session setup), which decides whether to skip, log, or abort.
//!
//! Arithmetic is never a source of errors. The bearing computation is defined
//! for every finite input, including coincident positions.

use thiserror::Error;

use crate::control::KeyCode;
use crate::entity::{EntityId, Identity};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors surfaced by the simulation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Target selection found no vessel other than the requester.
    #[error("no target available for vessel {requester}: no other vessel in the session")]
    NoTargetAvailable {
        /// Vessel that asked for a target
        requester: EntityId,
    },

    /// A vessel or session was constructed from degenerate parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// An entity id did not resolve to an entity of the expected kind.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
}

/// Reasons a configuration is rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A helm binding must name exactly one key per command.
    #[error("helm binding needs exactly 5 keys, got {0}")]
    WrongKeyCount(usize),

    /// The same key is bound to two commands.
    #[error("key {0} is bound to more than one helm command")]
    DuplicateKey(KeyCode),

    /// Friction must lie strictly between 0 and 1.
    #[error("friction coefficient {0} is outside (0, 1)")]
    FrictionOutOfRange(f32),

    /// Two vessels in one session share an identity token.
    #[error("identity {0} is used by more than one vessel")]
    DuplicateIdentity(Identity),

    /// A tuning parameter was NaN or infinite.
    #[error("parameter `{0}` must be finite")]
    NonFiniteParameter(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_target_message_names_requester() {
        let err = SimError::NoTargetAvailable {
            requester: EntityId::new(3),
        };
        assert_eq!(
            err.to_string(),
            "no target available for vessel 3: no other vessel in the session"
        );
    }

    #[test]
    fn config_error_converts_into_sim_error() {
        let err: SimError = ConfigError::WrongKeyCount(4).into();
        assert_eq!(err, SimError::InvalidConfiguration(ConfigError::WrongKeyCount(4)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: helm binding needs exactly 5 keys, got 4"
        );
    }

    #[test]
    fn duplicate_key_message() {
        let err = ConfigError::DuplicateKey(KeyCode::new(97));
        assert_eq!(err.to_string(), "key 97 is bound to more than one helm command");
    }
}
