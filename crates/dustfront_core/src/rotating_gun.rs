//! A gun that rotates through the eight facing directions.
//!
//! The gun owns a facing direction, a rotation stepper and a
//! [`FiringLogic`]. Within one tick the rotation is advanced before the
//! firing gate is evaluated, so a shot fired this tick always uses the
//! direction after this tick's rotation step.

use serde::{Deserialize, Serialize};

use crate::data::GunData;
use crate::direction::Direction;
use crate::error::Result;
use crate::events::{CombatEvent, CombatantId};
use crate::fire_source::FireSource;
use crate::firing_logic::FiringLogic;
use crate::math::{fixed_serde, Fixed, Vec2Fixed};
use crate::specs::{clamp_speed, DamageValueProvider, FiringProfile};

/// Rotating weapon mount with its own firing logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatingGun {
    /// Current facing direction.
    facing: Direction,
    /// Commanded direction; `None` means not rotating.
    target_facing: Option<Direction>,
    /// Rotation speed in facing steps per second.
    #[serde(with = "fixed_serde")]
    rotation_speed: Fixed,
    /// Seconds since the last rotation step.
    #[serde(with = "fixed_serde")]
    step_elapsed: Fixed,
    /// Pivot offset from the owner center per facing direction.
    rotation_offsets: [Vec2Fixed; 8],
    /// Recoil displacement applied when a shot fires.
    #[serde(with = "fixed_serde")]
    recoil: Fixed,
    /// Recoil decay in world units per second.
    #[serde(with = "fixed_serde")]
    recoil_resistance: Fixed,
    /// Current recoil displacement, decaying toward zero.
    #[serde(with = "fixed_serde")]
    recoil_offset: Fixed,
    /// Texture atlas the gun renders from.
    atlas: String,
    /// Sprite name per facing direction.
    textures: [String; 8],
    /// Sprite width in world units.
    #[serde(with = "fixed_serde")]
    width: Fixed,
    /// Sprite height in world units.
    #[serde(with = "fixed_serde")]
    height: Fixed,
    /// Shot state machine driving this gun's fire sources.
    firing: FiringLogic,
}

impl RotatingGun {
    /// Build fresh runtime state from a descriptor.
    #[must_use]
    pub fn from_data(data: &GunData, profile: FiringProfile) -> Self {
        Self {
            facing: Direction::North,
            target_facing: None,
            rotation_speed: clamp_speed(data.rotation_speed),
            step_elapsed: Fixed::ZERO,
            rotation_offsets: data.rotation_offsets,
            recoil: data.recoil,
            recoil_resistance: data.recoil_resistance,
            recoil_offset: Fixed::ZERO,
            atlas: data.atlas.clone(),
            textures: data.textures.clone(),
            width: data.width,
            height: data.height,
            firing: FiringLogic::new(profile),
        }
    }

    /// Reproduce the descriptor this gun was built from.
    #[must_use]
    pub fn to_data(&self, id: &str) -> GunData {
        GunData {
            id: id.to_string(),
            atlas: self.atlas.clone(),
            textures: self.textures.clone(),
            width: self.width,
            height: self.height,
            recoil: self.recoil,
            recoil_resistance: self.recoil_resistance,
            rotation_speed: self.rotation_speed,
            rotation_offsets: self.rotation_offsets,
        }
    }

    /// Register a fire source on this gun's firing logic.
    pub fn add_source(&mut self, name: impl Into<String>, source: FireSource) -> Result<()> {
        self.firing.add_source(name, source)
    }

    /// The gun's firing logic.
    #[must_use]
    pub const fn firing(&self) -> &FiringLogic {
        &self.firing
    }

    /// The gun's firing logic, mutably.
    pub fn firing_mut(&mut self) -> &mut FiringLogic {
        &mut self.firing
    }

    /// Current facing direction.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether a rotation order is still in progress.
    #[must_use]
    pub const fn is_rotating(&self) -> bool {
        self.target_facing.is_some()
    }

    /// Force the facing direction without rotating.
    ///
    /// Used when instantiating a combatant with a non-default facing.
    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
        self.target_facing = None;
    }

    /// Order the gun to rotate to `target` along the shorter arc.
    ///
    /// Re-ordering the current target is a no-op. Re-targeting while a
    /// rotation is in progress restarts the step timer; ordering from
    /// rest keeps it, so a gun that just completed a rotation (timer
    /// left satisfied) takes the first step of its next order without
    /// waiting out another period.
    pub fn rotate_to(&mut self, target: Direction) {
        if self.target_facing == Some(target) {
            return;
        }
        if target == self.facing {
            self.target_facing = None;
            return;
        }
        if self.target_facing.is_some() {
            self.step_elapsed = Fixed::ZERO;
        }
        self.target_facing = Some(target);
    }

    /// Seconds each rotation step takes.
    #[must_use]
    pub fn step_period(&self) -> Fixed {
        Fixed::from_num(1) / self.rotation_speed
    }

    /// Forward an aim point to the firing logic.
    ///
    /// Aiming does not drive rotation; that is commanded separately via
    /// [`RotatingGun::rotate_to`].
    pub fn aim_at(&mut self, target: Vec2Fixed) {
        self.firing.set_target(target);
    }

    /// World anchor the gun pivots and fires from.
    ///
    /// Owner center plus the pivot offset for the current facing.
    #[must_use]
    pub fn anchor(&self, owner_center: Vec2Fixed) -> Vec2Fixed {
        owner_center + self.rotation_offsets[self.facing.index() as usize]
    }

    /// Render state for the current tick.
    ///
    /// The anchor is pulled back against the facing by the current recoil
    /// displacement.
    #[must_use]
    pub fn render_state(&self, owner_center: Vec2Fixed) -> GunRenderState<'_> {
        let kick = self.facing.grid_offset();
        let anchor = self.anchor(owner_center);
        GunRenderState {
            position: Vec2Fixed::new(
                anchor.x - kick.x * self.recoil_offset,
                anchor.y - kick.y * self.recoil_offset,
            ),
            texture: &self.textures[self.facing.index() as usize],
            atlas: &self.atlas,
            width: self.width,
            height: self.height,
        }
    }

    /// Whether this gun can be torn down.
    #[must_use]
    pub fn can_be_removed(&self) -> bool {
        self.firing.can_be_removed()
    }

    /// Advance rotation, recoil and firing by `delta` seconds.
    ///
    /// Returns whether a shot was dispatched this tick.
    pub fn update(
        &mut self,
        toggling_siege_mode: bool,
        siege_mode: bool,
        delta: Fixed,
        owner_center: Vec2Fixed,
        shooter: CombatantId,
        provider: &dyn DamageValueProvider,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        self.advance_rotation(delta);
        self.decay_recoil(delta);

        let anchor = self.anchor(owner_center);
        let fired = self.firing.update(
            toggling_siege_mode,
            siege_mode,
            Some(self.facing),
            delta,
            anchor,
            shooter,
            provider,
            events,
        );
        if fired {
            self.recoil_offset = self.recoil;
        }
        fired
    }

    /// Step the facing one direction toward the target, at most once per
    /// step period.
    fn advance_rotation(&mut self, delta: Fixed) {
        let Some(target) = self.target_facing else {
            return;
        };

        self.step_elapsed += delta;
        if self.step_elapsed < self.step_period() {
            return;
        }

        self.facing = self.facing.step_toward(target);
        if self.facing == target {
            self.target_facing = None;
            // Leave the step timer satisfied so a follow-up order can
            // take its first step without waiting out a stale period.
            self.step_elapsed = self.step_period();
        } else {
            self.step_elapsed = Fixed::ZERO;
        }
    }

    fn decay_recoil(&mut self, delta: Fixed) {
        if self.recoil_offset > Fixed::ZERO {
            self.recoil_offset =
                (self.recoil_offset - self.recoil_resistance * delta).max(Fixed::ZERO);
        }
    }
}

/// Everything a renderer needs to draw a gun this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GunRenderState<'a> {
    /// World position to draw at, recoil included.
    pub position: Vec2Fixed,
    /// Sprite name for the current facing.
    pub texture: &'a str,
    /// Texture atlas the sprite lives in.
    pub atlas: &'a str,
    /// Sprite width in world units.
    pub width: Fixed,
    /// Sprite height in world units.
    pub height: Fixed,
}
