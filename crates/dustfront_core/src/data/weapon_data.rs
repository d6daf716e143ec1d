//! Weapon (fire source) descriptor data.

use serde::{Deserialize, Serialize};

use crate::fire_source::{ProjectileKind, ProjectileScale};
use crate::math::{fixed_serde, Fixed, Vec2Fixed};

/// When a fire source participates in combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PresencePolicy {
    /// Fires in both modes.
    #[default]
    Always,
    /// Fires only while the combatant is in siege mode.
    SiegeMode,
    /// Fires only while the combatant is out of siege mode.
    NotSiegeMode,
}

impl PresencePolicy {
    /// Whether the source participates in siege mode.
    #[must_use]
    pub const fn in_siege_mode(self) -> bool {
        matches!(self, PresencePolicy::Always | PresencePolicy::SiegeMode)
    }

    /// Whether the source participates out of siege mode.
    #[must_use]
    pub const fn out_of_siege_mode(self) -> bool {
        matches!(self, PresencePolicy::Always | PresencePolicy::NotSiegeMode)
    }

    /// Reconstruct the policy from the runtime flag pair.
    #[must_use]
    pub const fn from_flags(in_siege: bool, out_of_siege: bool) -> Self {
        match (in_siege, out_of_siege) {
            (true, false) => PresencePolicy::SiegeMode,
            (false, true) => PresencePolicy::NotSiegeMode,
            _ => PresencePolicy::Always,
        }
    }
}

/// Data-driven fire source definition.
///
/// Defines all properties of a weapon's launch points that can be loaded
/// from descriptor files. Used to instantiate independent
/// `FireSource` state per combatant.
///
/// # Example RON
///
/// ```ron
/// FireSourceData(
///     id: "tank_cannon",
///     kind: Shell,
///     scale: Medium,
///     gun_count: 1,
///     projectile_speed: 42949672960,  // Fixed-point for 10.0
///     fire_points: [
///         (x: 0, y: 6442450944),  // north, 1.5 up
///         // ... one entry per direction, ring order
///     ],
///     presence: Always,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireSourceData {
    /// Unique string identifier for this weapon type.
    pub id: String,

    /// Projectile kind launched by this source.
    pub kind: ProjectileKind,

    /// Scale class of the projectile.
    pub scale: ProjectileScale,

    /// Number of barrels rendered for this source.
    pub gun_count: u32,

    /// Projectile travel speed in world units per second (fixed-point).
    #[serde(with = "fixed_serde")]
    pub projectile_speed: Fixed,

    /// Launch offsets from the owner anchor, indexed by direction ring
    /// order (north first).
    pub fire_points: [Vec2Fixed; 8],

    /// Which combat modes this source participates in.
    #[serde(default)]
    pub presence: PresencePolicy,
}

impl FireSourceData {
    /// Validate the descriptor's numeric invariants.
    ///
    /// Returns human-readable messages; an empty vec means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.is_empty() {
            errors.push("id must not be empty".to_string());
        }
        if self.gun_count == 0 {
            errors.push("gun_count must be at least 1".to_string());
        }
        if self.projectile_speed <= Fixed::ZERO {
            errors.push("projectile_speed must be positive".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_flags() {
        assert!(PresencePolicy::Always.in_siege_mode());
        assert!(PresencePolicy::Always.out_of_siege_mode());
        assert!(PresencePolicy::SiegeMode.in_siege_mode());
        assert!(!PresencePolicy::SiegeMode.out_of_siege_mode());
        assert!(!PresencePolicy::NotSiegeMode.in_siege_mode());
        assert!(PresencePolicy::NotSiegeMode.out_of_siege_mode());
    }

    #[test]
    fn test_presence_flag_roundtrip() {
        for policy in [
            PresencePolicy::Always,
            PresencePolicy::SiegeMode,
            PresencePolicy::NotSiegeMode,
        ] {
            assert_eq!(
                PresencePolicy::from_flags(policy.in_siege_mode(), policy.out_of_siege_mode()),
                policy
            );
        }
    }

    #[test]
    fn test_validation_catches_bad_numbers() {
        let data = FireSourceData {
            id: String::new(),
            kind: ProjectileKind::Bullet,
            scale: ProjectileScale::Small,
            gun_count: 0,
            projectile_speed: Fixed::ZERO,
            fire_points: [Vec2Fixed::ZERO; 8],
            presence: PresencePolicy::Always,
        };
        assert_eq!(data.validate().len(), 3);
    }
}
