//! Per-direction projectile launch points.
//!
//! A fire source belongs to exactly one firing logic (and through it to
//! one gun or combatant). It holds one launch offset per facing
//! direction, dispatches timed projectile flights and reports their
//! completion as [`CombatEvent::ProjectileImpact`] events.

use serde::{Deserialize, Serialize};

use crate::data::FireSourceData;
use crate::direction::Direction;
use crate::events::{CombatEvent, CombatantId};
use crate::math::{fixed_serde, Fixed, Vec2Fixed};
use crate::specs::{clamp_speed, DamageValueProvider};

/// What a fire source launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectileKind {
    /// Straight-shot small arms fire. Not explosive.
    #[default]
    Bullet,
    /// Self-propelled explosive.
    Missile,
    /// Ballistic explosive.
    Shell,
}

impl ProjectileKind {
    /// Whether impacts of this kind splash into neighboring blocks.
    #[must_use]
    pub const fn is_explosive(self) -> bool {
        matches!(self, ProjectileKind::Missile | ProjectileKind::Shell)
    }
}

/// Visual and crater scale class of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectileScale {
    /// Small-arms scale.
    #[default]
    Small,
    /// Vehicle-weapon scale.
    Medium,
    /// Siege-weapon scale.
    Heavy,
}

/// A projectile on its way to a target point.
///
/// Flight is pure timing; the impact position is fixed at dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ProjectileFlight {
    /// Where the projectile lands.
    target: Vec2Fixed,
    /// Total flight duration.
    #[serde(with = "fixed_serde")]
    flight_time: Fixed,
    /// Time in flight so far.
    #[serde(with = "fixed_serde")]
    elapsed: Fixed,
}

/// A set of per-direction launch points with in-flight projectiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireSource {
    /// Launch offset from the owner anchor, indexed by direction.
    fire_points: [Vec2Fixed; 8],
    kind: ProjectileKind,
    scale: ProjectileScale,
    gun_count: u32,
    #[serde(with = "fixed_serde")]
    projectile_speed: Fixed,
    present_in_siege_mode: bool,
    present_out_of_siege_mode: bool,
    enabled: bool,
    in_flight: Vec<ProjectileFlight>,
}

impl FireSource {
    /// Build fresh runtime state from a descriptor.
    ///
    /// Every call produces independent state; combatants sharing one
    /// descriptor never share in-flight projectiles.
    #[must_use]
    pub fn from_data(data: &FireSourceData) -> Self {
        Self {
            fire_points: data.fire_points,
            kind: data.kind,
            scale: data.scale,
            gun_count: data.gun_count,
            projectile_speed: clamp_speed(data.projectile_speed),
            present_in_siege_mode: data.presence.in_siege_mode(),
            present_out_of_siege_mode: data.presence.out_of_siege_mode(),
            enabled: true,
            in_flight: Vec::new(),
        }
    }

    /// Reproduce the descriptor this source was built from.
    #[must_use]
    pub fn to_data(&self, id: &str) -> FireSourceData {
        FireSourceData {
            id: id.to_string(),
            kind: self.kind,
            scale: self.scale,
            gun_count: self.gun_count,
            projectile_speed: self.projectile_speed,
            fire_points: self.fire_points,
            presence: crate::data::PresencePolicy::from_flags(
                self.present_in_siege_mode,
                self.present_out_of_siege_mode,
            ),
        }
    }

    /// Launch offset for a facing direction.
    #[must_use]
    pub fn fire_point(&self, direction: Direction) -> Vec2Fixed {
        self.fire_points[direction.index() as usize]
    }

    /// Projectile kind this source launches.
    #[must_use]
    pub const fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Scale class of this source's projectiles.
    #[must_use]
    pub const fn scale(&self) -> ProjectileScale {
        self.scale
    }

    /// Number of barrels rendered for this source.
    #[must_use]
    pub const fn gun_count(&self) -> u32 {
        self.gun_count
    }

    /// Whether this source participates in the given mode.
    #[must_use]
    pub const fn present_for(&self, siege_mode: bool) -> bool {
        if siege_mode {
            self.present_in_siege_mode
        } else {
            self.present_out_of_siege_mode
        }
    }

    /// Whether this source is currently allowed to fire.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable this source.
    ///
    /// A disabled source still consumes its round-robin turn.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of projectiles currently in flight.
    #[must_use]
    pub fn projectiles_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether this source can be torn down.
    ///
    /// True only once every dispatched projectile has landed, so a dead
    /// combatant's shots still resolve before its combat state is freed.
    #[must_use]
    pub fn can_be_removed(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Dispatch a projectile toward `target`.
    ///
    /// The launch position is the owner anchor plus the fire point for
    /// `direction`; flight time is the launch-to-target distance over the
    /// projectile speed. Returns the launch position.
    pub fn fire(&mut self, direction: Direction, anchor: Vec2Fixed, target: Vec2Fixed) -> Vec2Fixed {
        let launch = anchor + self.fire_point(direction);
        let flight_time = launch.distance(target) / self.projectile_speed;
        self.in_flight.push(ProjectileFlight {
            target,
            flight_time,
            elapsed: Fixed::ZERO,
        });
        launch
    }

    /// Advance all in-flight projectiles by `delta` seconds.
    ///
    /// Completed flights are removed and reported as
    /// [`CombatEvent::ProjectileImpact`], with damage sampled from
    /// `provider` at this moment.
    pub fn advance(
        &mut self,
        delta: Fixed,
        shooter: CombatantId,
        provider: &dyn DamageValueProvider,
        events: &mut Vec<CombatEvent>,
    ) {
        let mut index = 0;
        while index < self.in_flight.len() {
            self.in_flight[index].elapsed += delta;
            if self.in_flight[index].elapsed >= self.in_flight[index].flight_time {
                let flight = self.in_flight.remove(index);
                events.push(CombatEvent::ProjectileImpact {
                    target: flight.target,
                    damage: provider.current_damage(),
                    explosive: self.kind.is_explosive(),
                    scale: self.scale,
                    shooter,
                });
            } else {
                index += 1;
            }
        }
    }
}
