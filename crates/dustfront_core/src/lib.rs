//! # Dustfront Core
//!
//! Deterministic directional combat core for the Dustfront RTS.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness
//! - No floating-point math (uses fixed-point)
//!
//! The combat engine is tick-driven and single-threaded: every mutation
//! happens synchronously inside a per-frame update call chain
//! (combatant → [`mount::CombatMount`] → [`rotating_gun::RotatingGun`] →
//! [`firing_logic::FiringLogic`] → [`fire_source::FireSource`] →
//! projectile timers). All waiting is expressed as accumulated elapsed
//! time compared against thresholds once per tick.
//!
//! ## Crate Structure
//!
//! - [`direction`] - 8-way facing ring and the shortest-arc stepper
//! - [`specs`] - numeric combat stat holders, normal and siege variants
//! - [`firing_logic`] - reload/shot-interval/volley state machine
//! - [`fire_source`] - per-direction launch points and flight timing
//! - [`rotating_gun`] - rotation state machine plus firing logic
//! - [`mount`] - the combat surface a combatant owns and drives
//! - [`impact`] - impact resolution: damage, splash, destruction, craters
//! - [`events`] - tick events delivered synchronously to the caller
//! - [`data`] - descriptor value objects (no IO)
//! - [`math`] - fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod data;
pub mod direction;
pub mod error;
pub mod events;
pub mod fire_source;
pub mod firing_logic;
pub mod impact;
pub mod math;
pub mod mount;
pub mod rotating_gun;
pub mod specs;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::data::{FireSourceData, GunData, PresencePolicy};
    pub use crate::direction::Direction;
    pub use crate::error::{CombatError, Result};
    pub use crate::events::{CombatEvent, CombatantId, ObjectId};
    pub use crate::fire_source::{FireSource, ProjectileKind, ProjectileScale};
    pub use crate::firing_logic::FiringLogic;
    pub use crate::impact::{BattleMap, BlockPos, CraterDecal, ImpactResolver};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::mount::{AimTarget, CombatMount};
    pub use crate::rotating_gun::RotatingGun;
    pub use crate::specs::{
        DamageValueProvider, DefensiveSpecs, FiringData, FiringProfile, OffensiveSpecs,
    };
}
