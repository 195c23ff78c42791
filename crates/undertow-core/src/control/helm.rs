//! Helm commands and key bindings for player vessels.
//!
//! Each tick a vessel receives a [`HelmCommand`] set. Commands are not
//! exclusive: every flag that is set applies, always in the order
//! turn-left, turn-right, accelerate, decelerate, fire.

use std::collections::BTreeSet;
use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::kinematics::{KinematicBody, TurnDirection};

bitflags! {
    /// The five helm commands a vessel can receive in one tick.
    ///
    /// # Example
    ///
    /// ```
    /// use undertow_core::control::HelmCommand;
    ///
    /// let command = HelmCommand::TURN_LEFT | HelmCommand::ACCELERATE;
    /// assert!(command.contains(HelmCommand::ACCELERATE));
    /// assert!(!command.contains(HelmCommand::FIRE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct HelmCommand: u8 {
        /// Turn counter-clockwise by the vessel's agility
        const TURN_LEFT = 1 << 0;
        /// Turn clockwise by the vessel's agility
        const TURN_RIGHT = 1 << 1;
        /// Add one acceleration step
        const ACCELERATE = 1 << 2;
        /// Remove one acceleration step
        const DECELERATE = 1 << 3;
        /// Request a torpedo launch
        const FIRE = 1 << 4;
    }
}

impl Default for HelmCommand {
    fn default() -> Self {
        Self::empty()
    }
}

/// Opaque key identifier supplied by the input layer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(u32);

impl KeyCode {
    /// Wraps a raw key code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw key code.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyCode({})", self.0)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps five distinct keys onto the five helm commands.
///
/// Serialised as a plain list of key codes in command order. Deserialising a
/// list that is not exactly five distinct keys fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeyCode>", into = "Vec<KeyCode>")]
pub struct HelmBinding {
    keys: [KeyCode; 5],
}

impl HelmBinding {
    /// Command order shared by key lists and per-tick application.
    pub const ORDER: [HelmCommand; 5] = [
        HelmCommand::TURN_LEFT,
        HelmCommand::TURN_RIGHT,
        HelmCommand::ACCELERATE,
        HelmCommand::DECELERATE,
        HelmCommand::FIRE,
    ];

    /// Creates a binding from one key per command.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if any key is repeated.
    pub fn new(
        turn_left: KeyCode,
        turn_right: KeyCode,
        accelerate: KeyCode,
        decelerate: KeyCode,
        fire: KeyCode,
    ) -> Result<Self> {
        Ok(Self::from_keys(&[turn_left, turn_right, accelerate, decelerate, fire])?)
    }

    /// Creates a binding from a key list in [`ORDER`](Self::ORDER).
    ///
    /// # Errors
    ///
    /// Fails unless the list holds exactly five distinct keys.
    pub fn from_keys(keys: &[KeyCode]) -> std::result::Result<Self, ConfigError> {
        let keys: [KeyCode; 5] = keys
            .try_into()
            .map_err(|_| ConfigError::WrongKeyCount(keys.len()))?;
        let mut seen = BTreeSet::new();
        for key in keys {
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateKey(key));
            }
        }
        Ok(Self { keys })
    }

    /// Builds a binding the caller already knows to be distinct.
    pub(crate) const fn from_distinct(keys: [KeyCode; 5]) -> Self {
        Self { keys }
    }

    /// Keys in [`ORDER`](Self::ORDER).
    #[must_use]
    pub const fn keys(&self) -> &[KeyCode; 5] {
        &self.keys
    }

    /// Key bound to a single command, if `command` is exactly one flag.
    #[must_use]
    pub fn key_for(&self, command: HelmCommand) -> Option<KeyCode> {
        Self::ORDER
            .iter()
            .position(|c| *c == command)
            .map(|idx| self.keys[idx])
    }

    /// Translates the pressed keys into this vessel's command set.
    #[must_use]
    pub fn resolve(&self, pressed: &BTreeSet<KeyCode>) -> HelmCommand {
        Self::ORDER
            .iter()
            .zip(self.keys.iter())
            .filter(|(_, key)| pressed.contains(key))
            .fold(HelmCommand::empty(), |acc, (command, _)| acc | *command)
    }
}

impl TryFrom<Vec<KeyCode>> for HelmBinding {
    type Error = ConfigError;

    fn try_from(keys: Vec<KeyCode>) -> std::result::Result<Self, Self::Error> {
        Self::from_keys(&keys)
    }
}

impl From<HelmBinding> for Vec<KeyCode> {
    fn from(binding: HelmBinding) -> Self {
        binding.keys.to_vec()
    }
}

/// Applies the movement part of a command set to a body.
///
/// Turn-left, turn-right, accelerate and decelerate are applied in that
/// order. Friction and the positional advance are not part of this step.
/// Returns `true` when the set also requests a launch, which the caller
/// handles next.
pub fn apply_helm(body: &mut KinematicBody, command: HelmCommand) -> bool {
    if command.contains(HelmCommand::TURN_LEFT) {
        body.turn(TurnDirection::Left);
    }
    if command.contains(HelmCommand::TURN_RIGHT) {
        body.turn(TurnDirection::Right);
    }
    if command.contains(HelmCommand::ACCELERATE) {
        body.accelerate();
    }
    if command.contains(HelmCommand::DECELERATE) {
        body.decelerate();
    }
    command.contains(HelmCommand::FIRE)
}
