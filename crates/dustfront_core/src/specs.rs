//! Numeric combat stat holders.
//!
//! These are value objects populated from descriptor files. Each carries
//! an optional siege-mode variant; accessors take the active mode and
//! fall back to the normal values when no variant is configured.

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, Fixed};

/// Smallest speed any spec will report.
///
/// Speeds are used as divisors (flight time, rotation step period), so a
/// configured zero must never reach the arithmetic.
pub const MIN_SPEED: Fixed = Fixed::unwrapped_from_str("0.0001");

/// Clamp a configured speed to the strictly positive minimum.
#[must_use]
pub fn clamp_speed(speed: Fixed) -> Fixed {
    if speed < MIN_SPEED {
        MIN_SPEED
    } else {
        speed
    }
}

/// Offensive stats of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffensiveSpecs {
    /// Base damage per shot.
    pub attack: u32,
    /// Attack range in world units.
    #[serde(with = "fixed_serde")]
    pub attack_range: Fixed,
    /// Siege-mode overrides, if this combatant has a siege mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siege: Option<SiegeOffensiveSpecs>,
}

/// Siege-mode variant of [`OffensiveSpecs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiegeOffensiveSpecs {
    /// Damage per shot in siege mode.
    pub attack: u32,
    /// Attack range in siege mode.
    #[serde(with = "fixed_serde")]
    pub attack_range: Fixed,
}

impl OffensiveSpecs {
    /// Damage per shot for the active mode.
    #[must_use]
    pub fn attack(&self, siege_mode: bool) -> u32 {
        match (siege_mode, self.siege) {
            (true, Some(siege)) => siege.attack,
            _ => self.attack,
        }
    }

    /// Attack range for the active mode.
    #[must_use]
    pub fn attack_range(&self, siege_mode: bool) -> Fixed {
        match (siege_mode, self.siege) {
            (true, Some(siege)) => siege.attack_range,
            _ => self.attack_range,
        }
    }
}

/// Defensive stats of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensiveSpecs {
    /// Flat damage reduction.
    pub defence: u32,
    /// Movement speed in world units per second.
    #[serde(with = "fixed_serde")]
    pub speed: Fixed,
    /// Sight range in world units.
    #[serde(with = "fixed_serde")]
    pub sight_range: Fixed,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Siege-mode overrides, if this combatant has a siege mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siege: Option<SiegeDefensiveSpecs>,
}

/// Siege-mode variant of [`DefensiveSpecs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiegeDefensiveSpecs {
    /// Damage reduction in siege mode.
    pub defence: u32,
    /// Movement speed in siege mode (usually zero in the descriptor;
    /// the accessor still clamps it positive).
    #[serde(with = "fixed_serde")]
    pub speed: Fixed,
    /// Sight range in siege mode.
    #[serde(with = "fixed_serde")]
    pub sight_range: Fixed,
}

impl DefensiveSpecs {
    /// Damage reduction for the active mode.
    #[must_use]
    pub fn defence(&self, siege_mode: bool) -> u32 {
        match (siege_mode, self.siege) {
            (true, Some(siege)) => siege.defence,
            _ => self.defence,
        }
    }

    /// Movement speed for the active mode, clamped strictly positive.
    #[must_use]
    pub fn speed(&self, siege_mode: bool) -> Fixed {
        let raw = match (siege_mode, self.siege) {
            (true, Some(siege)) => siege.speed,
            _ => self.speed,
        };
        clamp_speed(raw)
    }

    /// Sight range for the active mode.
    #[must_use]
    pub fn sight_range(&self, siege_mode: bool) -> Fixed {
        match (siege_mode, self.siege) {
            (true, Some(siege)) => siege.sight_range,
            _ => self.sight_range,
        }
    }
}

/// Shot scheduling parameters for one combat mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringData {
    /// Shots per volley. Always at least 1.
    pub shot_count: u32,
    /// Minimum seconds between shots within a volley.
    #[serde(with = "fixed_serde")]
    pub shot_interval: Fixed,
    /// Minimum seconds between the last shot of one volley and the first
    /// shot of the next.
    #[serde(with = "fixed_serde")]
    pub reload_speed: Fixed,
}

impl FiringData {
    /// Create firing data, clamping the shot count to at least 1.
    #[must_use]
    pub fn new(shot_count: u32, shot_interval: Fixed, reload_speed: Fixed) -> Self {
        Self {
            shot_count: shot_count.max(1),
            shot_interval,
            reload_speed,
        }
    }

    /// Threshold the shot timer must reach before a shot is attempted.
    #[must_use]
    pub fn shot_gate(&self) -> Fixed {
        self.shot_interval.min(self.reload_speed)
    }

    /// Validation messages for loaded descriptor data.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.shot_count == 0 {
            errors.push("shot_count must be at least 1".to_string());
        }
        if self.shot_interval < Fixed::ZERO {
            errors.push("shot_interval must not be negative".to_string());
        }
        if self.reload_speed < Fixed::ZERO {
            errors.push("reload_speed must not be negative".to_string());
        }
        errors
    }
}

/// Shot scheduling for both combat modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringProfile {
    /// Scheduling outside siege mode.
    pub normal: FiringData,
    /// Scheduling in siege mode; `None` falls back to `normal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siege: Option<FiringData>,
}

impl FiringProfile {
    /// Profile with the same scheduling in both modes.
    #[must_use]
    pub const fn uniform(data: FiringData) -> Self {
        Self {
            normal: data,
            siege: None,
        }
    }

    /// Scheduling for the active mode.
    #[must_use]
    pub fn for_mode(&self, siege_mode: bool) -> &FiringData {
        match (siege_mode, &self.siege) {
            (true, Some(siege)) => siege,
            _ => &self.normal,
        }
    }
}

/// Source of the damage value applied when a projectile lands.
///
/// Consulted at impact time rather than at launch, so damage upgrades
/// picked up while a projectile is in flight still count.
pub trait DamageValueProvider {
    /// Current damage per shot of the shooter.
    fn current_damage(&self) -> u32;
}

/// Fixed damage value, mainly useful in tests and tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticDamage(pub u32);

impl DamageValueProvider for StaticDamage {
    fn current_damage(&self) -> u32 {
        self.0
    }
}
