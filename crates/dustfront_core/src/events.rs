//! Combat events generated during a simulation tick.
//!
//! The engine never calls back into game code. Everything the outside
//! world needs to react to (sound, animation, scoring) is pushed into a
//! `Vec<CombatEvent>` threaded through the per-tick update chain and
//! drained by the caller after the tick. Delivery is synchronous and in
//! emission order; there are no other ordering guarantees.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::fire_source::ProjectileScale;
use crate::math::Vec2Fixed;

/// Identifier of a combatant (unit or building) participating in combat.
pub type CombatantId = u64;

/// Identifier of a damageable object occupying map blocks.
pub type ObjectId = u64;

/// Events generated by the combat engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A volley shot was dispatched from a fire source.
    VolleyFired {
        /// Combatant that fired.
        shooter: CombatantId,
        /// Name of the fire source that dispatched the shot.
        source: String,
        /// Facing direction at dispatch time.
        direction: Direction,
        /// World position the projectile launched from.
        launch: Vec2Fixed,
        /// World position the projectile is headed for.
        target: Vec2Fixed,
        /// Shots still enqueued in the current volley after this one.
        remaining: u32,
    },

    /// A projectile finished its flight and reached its target point.
    ///
    /// Damage is sampled at impact time, not at launch, so upgrades
    /// applied while the projectile was in flight are reflected here.
    ProjectileImpact {
        /// World position of the impact.
        target: Vec2Fixed,
        /// Damage to apply at the impact point.
        damage: u32,
        /// Whether neighboring blocks take splash damage.
        explosive: bool,
        /// Scale class of the projectile (selects crater pool).
        scale: ProjectileScale,
        /// Combatant the shot is attributed to.
        shooter: CombatantId,
    },

    /// An object's hit points reached zero during impact resolution.
    ObjectDestroyed {
        /// The destroyed object.
        object: ObjectId,
        /// Center of the object, where the destruction animation plays.
        center: Vec2Fixed,
        /// Configured destruction animation, if the object has one.
        /// Objects without one are destroyed without an animation.
        animation: Option<String>,
    },

    /// A combatant's aim target was removed.
    TargetRemoved {
        /// Combatant that lost its target.
        shooter: CombatantId,
    },
}
