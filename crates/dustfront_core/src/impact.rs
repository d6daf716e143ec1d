//! Impact resolution: direct damage, splash, destruction, craters.
//!
//! Converts projectile impact notifications into map mutations. The map
//! itself stays behind the narrow [`BattleMap`] contract so the combat
//! engine never owns world state; it only reads occupancy and writes
//! damage and decals through it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::events::{CombatEvent, CombatantId, ObjectId};
use crate::fire_source::ProjectileScale;
use crate::math::{fixed_serde, Fixed, Vec2Fixed};

/// Side length of one map block in world units.
pub const BLOCK_SIZE: u32 = 32;

/// Fraction of direct damage applied to splash neighbors.
///
/// Explosive impacts deal a quarter of their damage to each occupied
/// neighboring block.
pub const SPLASH_DIVISOR: u32 = 4;

/// Crater texture variants in the shared heavy/medium pool.
pub const LARGE_CRATER_VARIANTS: u32 = 4;

/// Crater texture variants in the small pool.
pub const SMALL_CRATER_VARIANTS: u32 = 4;

/// Map block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// Block column.
    pub x: i32,
    /// Block row.
    pub y: i32,
}

impl BlockPos {
    /// Create block coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Block containing a world position.
    #[must_use]
    pub fn from_world(position: Vec2Fixed) -> Self {
        let size = Fixed::from_num(BLOCK_SIZE);
        Self {
            x: (position.x / size).floor().to_num::<i32>(),
            y: (position.y / size).floor().to_num::<i32>(),
        }
    }

    /// Neighboring block one step in `direction`.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Self {
        let offset = direction.grid_offset();
        Self {
            x: self.x + offset.x.to_num::<i32>(),
            y: self.y + offset.y.to_num::<i32>(),
        }
    }
}

/// Which crater texture pool a decal draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraterPool {
    /// Shared pool for heavy and medium impacts.
    Large,
    /// Pool for small-arms impacts.
    Small,
}

impl CraterPool {
    /// Pool for a projectile scale class.
    #[must_use]
    pub const fn for_scale(scale: ProjectileScale) -> Self {
        match scale {
            ProjectileScale::Heavy | ProjectileScale::Medium => CraterPool::Large,
            ProjectileScale::Small => CraterPool::Small,
        }
    }

    /// Number of texture variants in this pool.
    #[must_use]
    pub const fn variants(self) -> u32 {
        match self {
            CraterPool::Large => LARGE_CRATER_VARIANTS,
            CraterPool::Small => SMALL_CRATER_VARIANTS,
        }
    }
}

/// A crater decal placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraterDecal {
    /// Exact world position of the impact; the sub-block offset within
    /// the impacted block is preserved.
    pub position: Vec2Fixed,
    /// Texture pool the decal draws from.
    pub pool: CraterPool,
    /// Variant index within the pool.
    pub texture_index: u32,
    /// Visual scale factor. Large-pool craters vary in [0.75, 1.25);
    /// small-pool craters always render at 1.
    #[serde(with = "fixed_serde")]
    pub visual_scale: Fixed,
}

/// World-state contract the impact resolver operates through.
///
/// Implemented by the map/world systems; the resolver holds no owning
/// reference to any of it.
pub trait BattleMap {
    /// Object occupying a block, if any. Multi-block objects report
    /// themselves from every block they cover.
    fn occupant_at(&self, block: BlockPos) -> Option<ObjectId>;

    /// Apply damage to an object and return its remaining hit points.
    fn apply_damage(&mut self, object: ObjectId, amount: u32) -> u32;

    /// Center of an object in world coordinates.
    fn object_center(&self, object: ObjectId) -> Vec2Fixed;

    /// Configured destruction animation of an object, if it has one.
    fn destruction_animation(&self, object: ObjectId) -> Option<String>;

    /// Place a crater decal.
    fn place_crater(&mut self, crater: CraterDecal);
}

/// Simple deterministic RNG for crater variant selection.
struct CraterRng {
    state: u64,
}

impl CraterRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(0x5DEE_CE66D).wrapping_add(11);
        self.state
    }

    fn next_index(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        (self.next() % u64::from(bound)) as u32
    }

    fn next_fraction(&mut self) -> Fixed {
        Fixed::from_num(self.next() % 10000) / Fixed::from_num(10000)
    }
}

/// Resolves projectile impacts into damage, destruction and craters.
///
/// Stateless apart from the crater RNG; construct once per simulation
/// and seed it explicitly when reproducibility matters.
pub struct ImpactResolver {
    rng: CraterRng,
}

impl ImpactResolver {
    /// Resolver with a fixed default seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Resolver with an explicit crater RNG seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: CraterRng::new(seed),
        }
    }

    /// Resolve one impact against the map.
    ///
    /// Direct damage goes to the impacted block's occupant. Explosive
    /// impacts additionally deal a quarter damage to each of the eight
    /// neighboring blocks' occupants - the primary occupant is excluded
    /// and no object is damaged twice - and leave a crater decal. Any
    /// object whose hit points reach zero here is reported as
    /// [`CombatEvent::ObjectDestroyed`].
    pub fn resolve(
        &mut self,
        map: &mut dyn BattleMap,
        target: Vec2Fixed,
        damage: u32,
        explosive: bool,
        scale: ProjectileScale,
        shooter: CombatantId,
        events: &mut Vec<CombatEvent>,
    ) {
        let block = BlockPos::from_world(target);
        let mut processed: HashSet<ObjectId> = HashSet::new();
        let mut destroyed: Vec<ObjectId> = Vec::new();

        if let Some(object) = map.occupant_at(block) {
            processed.insert(object);
            if map.apply_damage(object, damage) == 0 {
                destroyed.push(object);
            }
        }

        if explosive {
            let splash = damage / SPLASH_DIVISOR;
            for direction in Direction::ALL {
                let Some(object) = map.occupant_at(block.neighbor(direction)) else {
                    continue;
                };
                // Skips the primary occupant and multi-block objects
                // already hit through another cell.
                if !processed.insert(object) {
                    continue;
                }
                if map.apply_damage(object, splash) == 0 {
                    destroyed.push(object);
                }
            }
        }

        for object in destroyed {
            tracing::debug!(object, shooter, "object destroyed by impact");
            events.push(CombatEvent::ObjectDestroyed {
                object,
                center: map.object_center(object),
                animation: map.destruction_animation(object),
            });
        }

        if explosive {
            map.place_crater(self.pick_crater(target, scale));
        }
    }

    /// Resolve a [`CombatEvent::ProjectileImpact`], ignoring other events.
    ///
    /// Returns whether the event was an impact.
    pub fn resolve_event(
        &mut self,
        map: &mut dyn BattleMap,
        event: &CombatEvent,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        match event {
            CombatEvent::ProjectileImpact {
                target,
                damage,
                explosive,
                scale,
                shooter,
            } => {
                self.resolve(map, *target, *damage, *explosive, *scale, *shooter, events);
                true
            }
            _ => false,
        }
    }

    fn pick_crater(&mut self, position: Vec2Fixed, scale: ProjectileScale) -> CraterDecal {
        let pool = CraterPool::for_scale(scale);
        let texture_index = self.rng.next_index(pool.variants());
        let visual_scale = match pool {
            CraterPool::Large => {
                Fixed::from_num(0.75) + self.rng.next_fraction() / Fixed::from_num(2)
            }
            CraterPool::Small => Fixed::from_num(1),
        };
        CraterDecal {
            position,
            pool,
            texture_index,
            visual_scale,
        }
    }
}

impl Default for ImpactResolver {
    fn default() -> Self {
        Self::new()
    }
}
