//! Rotating gun descriptor data.

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, Fixed, Vec2Fixed};

/// Data-driven rotating gun definition.
///
/// Covers the render-facing fields (atlas, per-direction textures,
/// dimensions) alongside the simulation fields (rotation speed, recoil,
/// per-direction pivot offsets). The renderer consumes the former; the
/// combat engine only computes with the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GunData {
    /// Unique string identifier for this gun type.
    pub id: String,

    /// Texture atlas the gun's sprites live in.
    pub atlas: String,

    /// Sprite name per facing direction, ring order (north first).
    pub textures: [String; 8],

    /// Sprite width in world units.
    #[serde(with = "fixed_serde")]
    pub width: Fixed,

    /// Sprite height in world units.
    #[serde(with = "fixed_serde")]
    pub height: Fixed,

    /// Recoil displacement applied when a shot fires.
    #[serde(with = "fixed_serde")]
    pub recoil: Fixed,

    /// Recoil decay in world units per second.
    #[serde(with = "fixed_serde")]
    pub recoil_resistance: Fixed,

    /// Rotation speed in facing steps per second.
    #[serde(with = "fixed_serde")]
    pub rotation_speed: Fixed,

    /// Pivot offset from the owner center per facing direction, ring
    /// order (north first).
    pub rotation_offsets: [Vec2Fixed; 8],
}

impl GunData {
    /// Validate the descriptor's numeric invariants.
    ///
    /// Returns human-readable messages; an empty vec means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.is_empty() {
            errors.push("id must not be empty".to_string());
        }
        if self.rotation_speed <= Fixed::ZERO {
            errors.push("rotation_speed must be positive".to_string());
        }
        if self.recoil < Fixed::ZERO {
            errors.push("recoil must not be negative".to_string());
        }
        if self.recoil_resistance < Fixed::ZERO {
            errors.push("recoil_resistance must not be negative".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gun() -> GunData {
        GunData {
            id: "turret".to_string(),
            atlas: "guns".to_string(),
            textures: std::array::from_fn(|i| format!("turret_{i}")),
            width: Fixed::from_num(2),
            height: Fixed::from_num(2),
            recoil: Fixed::from_num(0.5),
            recoil_resistance: Fixed::from_num(2),
            rotation_speed: Fixed::from_num(4),
            rotation_offsets: [Vec2Fixed::ZERO; 8],
        }
    }

    #[test]
    fn test_valid_gun_passes() {
        assert!(test_gun().validate().is_empty());
    }

    #[test]
    fn test_zero_rotation_speed_rejected() {
        let mut gun = test_gun();
        gun.rotation_speed = Fixed::ZERO;
        assert_eq!(gun.validate().len(), 1);
    }
}
