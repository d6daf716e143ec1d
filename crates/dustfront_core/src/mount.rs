//! Combatant-facing combat surface.
//!
//! A combat mount is the single combat object a unit or building owns.
//! It holds any number of named rotating guns, an optional directly
//! attached firing logic (for hull-fixed weapons), the shared aim target
//! and the siege-mode toggle state. The owning combatant drives it once
//! per tick; the mount fans the update out in a fixed order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{CombatError, Result};
use crate::events::{CombatEvent, CombatantId, ObjectId};
use crate::firing_logic::FiringLogic;
use crate::math::{option_fixed_serde, Fixed, Vec2Fixed};
use crate::rotating_gun::RotatingGun;
use crate::specs::DamageValueProvider;

/// What a combatant is aiming at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimTarget {
    /// A point on the ground.
    Ground(Vec2Fixed),
    /// Another object, with its position at aim time.
    Object {
        /// The targeted object.
        id: ObjectId,
        /// Where it was when the aim order was given; refreshed by
        /// re-aiming while the target moves.
        position: Vec2Fixed,
    },
}

impl AimTarget {
    /// World position this target resolves to.
    #[must_use]
    pub const fn position(&self) -> Vec2Fixed {
        match self {
            AimTarget::Ground(position) => *position,
            AimTarget::Object { position, .. } => *position,
        }
    }
}

/// A rotating gun with the name its descriptor registered it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NamedGun {
    name: String,
    gun: RotatingGun,
}

/// The combat state a combatant exclusively owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatMount {
    /// Combatant shots from this mount are attributed to.
    owner: CombatantId,
    /// Guns in registration order.
    guns: Vec<NamedGun>,
    /// Gun name to list-index lookup.
    name_index: HashMap<String, usize>,
    /// Hull-fixed firing logic, if the combatant has one.
    direct: Option<FiringLogic>,
    /// Facing used by the hull-fixed logic. `None` cancels its volleys
    /// at the firing gate.
    facing: Option<Direction>,
    /// Shared aim target.
    target: Option<AimTarget>,
    /// Active combat mode.
    siege_mode: bool,
    /// Seconds left on an in-progress mode toggle.
    #[serde(default, with = "option_fixed_serde", skip_serializing_if = "Option::is_none")]
    toggle_remaining: Option<Fixed>,
    /// Mode that becomes active when the toggle completes.
    pending_siege_mode: bool,
}

impl CombatMount {
    /// Empty mount for a combatant.
    #[must_use]
    pub fn new(owner: CombatantId) -> Self {
        Self {
            owner,
            guns: Vec::new(),
            name_index: HashMap::new(),
            direct: None,
            facing: None,
            target: None,
            siege_mode: false,
            toggle_remaining: None,
            pending_siege_mode: false,
        }
    }

    /// Combatant this mount belongs to.
    #[must_use]
    pub const fn owner(&self) -> CombatantId {
        self.owner
    }

    /// Register a gun under a unique name. Registration order is update
    /// order.
    pub fn add_gun(&mut self, name: impl Into<String>, gun: RotatingGun) -> Result<()> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(CombatError::DuplicateGun(name));
        }
        self.name_index.insert(name.clone(), self.guns.len());
        self.guns.push(NamedGun { name, gun });
        Ok(())
    }

    /// Look up a gun by name.
    pub fn gun(&self, name: &str) -> Result<&RotatingGun> {
        self.name_index
            .get(name)
            .map(|&i| &self.guns[i].gun)
            .ok_or_else(|| CombatError::UnknownGun(name.to_string()))
    }

    /// Look up a gun mutably by name.
    pub fn gun_mut(&mut self, name: &str) -> Result<&mut RotatingGun> {
        match self.name_index.get(name) {
            Some(&i) => Ok(&mut self.guns[i].gun),
            None => Err(CombatError::UnknownGun(name.to_string())),
        }
    }

    /// Iterate guns with their names, in update order.
    pub fn guns(&self) -> impl Iterator<Item = (&str, &RotatingGun)> {
        self.guns.iter().map(|n| (n.name.as_str(), &n.gun))
    }

    /// Attach a hull-fixed firing logic.
    pub fn set_direct_logic(&mut self, logic: FiringLogic) {
        self.direct = Some(logic);
    }

    /// The hull-fixed firing logic, if any.
    #[must_use]
    pub const fn direct_logic(&self) -> Option<&FiringLogic> {
        self.direct.as_ref()
    }

    /// The hull-fixed firing logic mutably, if any.
    pub fn direct_logic_mut(&mut self) -> Option<&mut FiringLogic> {
        self.direct.as_mut()
    }

    /// Set the facing used by the hull-fixed logic.
    pub fn set_facing(&mut self, facing: Option<Direction>) {
        self.facing = facing;
    }

    /// Aim every firing logic at a ground point.
    pub fn aim_at(&mut self, x: Fixed, y: Fixed) {
        self.set_target(AimTarget::Ground(Vec2Fixed::new(x, y)));
    }

    /// Aim every firing logic at another object.
    pub fn aim_at_object(&mut self, id: ObjectId, position: Vec2Fixed) {
        self.set_target(AimTarget::Object { id, position });
    }

    fn set_target(&mut self, target: AimTarget) {
        let position = target.position();
        self.target = Some(target);
        for named in &mut self.guns {
            named.gun.aim_at(position);
        }
        if let Some(direct) = &mut self.direct {
            direct.set_target(position);
        }
    }

    /// Whether an aim target is set.
    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the current target is a ground point rather than an object.
    #[must_use]
    pub fn aimed_at_ground(&self) -> bool {
        matches!(self.target, Some(AimTarget::Ground(_)))
    }

    /// Current aim target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<AimTarget> {
        self.target
    }

    /// Drop the aim target.
    ///
    /// Pending volleys stay enqueued but cannot fire until a new target
    /// is set. Emits [`CombatEvent::TargetRemoved`] if a target was set.
    pub fn remove_target(&mut self, events: &mut Vec<CombatEvent>) {
        if self.target.take().is_none() {
            return;
        }
        for named in &mut self.guns {
            named.gun.firing_mut().clear_target();
        }
        if let Some(direct) = &mut self.direct {
            direct.clear_target();
        }
        events.push(CombatEvent::TargetRemoved {
            shooter: self.owner,
        });
    }

    /// Enqueue a volley on every firing logic, for the active mode.
    pub fn enqueue_shots(&mut self) {
        let siege = self.siege_mode;
        for named in &mut self.guns {
            named.gun.firing_mut().enqueue_shots(siege);
        }
        if let Some(direct) = &mut self.direct {
            direct.enqueue_shots(siege);
        }
    }

    /// Drop pending volleys on every firing logic.
    ///
    /// Cooperative: applied on each logic's next evaluated tick.
    pub fn remove_enqueued_shots(&mut self) {
        for named in &mut self.guns {
            named.gun.firing_mut().remove_enqueued_shots();
        }
        if let Some(direct) = &mut self.direct {
            direct.remove_enqueued_shots();
        }
    }

    /// Active combat mode.
    #[must_use]
    pub const fn siege_mode(&self) -> bool {
        self.siege_mode
    }

    /// Whether a mode toggle is in progress. No shots fire while it is.
    #[must_use]
    pub const fn is_toggling_siege_mode(&self) -> bool {
        self.toggle_remaining.is_some()
    }

    /// Start switching to the other combat mode.
    ///
    /// Ignored while a toggle is already in progress. The mode flips once
    /// `duration` seconds have elapsed.
    pub fn begin_siege_toggle(&mut self, duration: Fixed) {
        if self.toggle_remaining.is_some() {
            return;
        }
        self.pending_siege_mode = !self.siege_mode;
        self.toggle_remaining = Some(duration.max(Fixed::ZERO));
    }

    /// Whether the whole mount can be torn down.
    ///
    /// True only once every dispatched projectile has landed.
    #[must_use]
    pub fn can_be_removed(&self) -> bool {
        self.guns.iter().all(|n| n.gun.can_be_removed())
            && self.direct.as_ref().map_or(true, FiringLogic::can_be_removed)
    }

    /// Advance the whole mount by `delta` seconds.
    ///
    /// Guns update in registration order, then the hull-fixed logic; a
    /// gun's rotation always advances before its firing gate. Returns
    /// whether any shot was dispatched this tick.
    pub fn update(
        &mut self,
        delta: Fixed,
        owner_center: Vec2Fixed,
        provider: &dyn DamageValueProvider,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        // A toggle completing this tick still blocks this tick's shots.
        let toggling = self.toggle_remaining.is_some();
        if let Some(remaining) = self.toggle_remaining {
            let left = remaining - delta;
            if left <= Fixed::ZERO {
                self.toggle_remaining = None;
                self.siege_mode = self.pending_siege_mode;
                tracing::debug!(owner = self.owner, siege_mode = self.siege_mode, "siege toggle complete");
            } else {
                self.toggle_remaining = Some(left);
            }
        }

        let mut fired = false;
        for named in &mut self.guns {
            fired |= named.gun.update(
                toggling,
                self.siege_mode,
                delta,
                owner_center,
                self.owner,
                provider,
                events,
            );
        }
        if let Some(direct) = &mut self.direct {
            fired |= direct.update(
                toggling,
                self.siege_mode,
                self.facing,
                delta,
                owner_center,
                self.owner,
                provider,
                events,
            );
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FireSourceData, GunData, PresencePolicy};
    use crate::fire_source::{FireSource, ProjectileKind, ProjectileScale};
    use crate::specs::{FiringData, FiringProfile, StaticDamage};

    fn simple_source(id: &str) -> FireSource {
        FireSource::from_data(&FireSourceData {
            id: id.to_string(),
            kind: ProjectileKind::Bullet,
            scale: ProjectileScale::Small,
            gun_count: 1,
            projectile_speed: Fixed::from_num(100),
            fire_points: [Vec2Fixed::ZERO; 8],
            presence: PresencePolicy::Always,
        })
    }

    fn simple_gun() -> RotatingGun {
        let profile = FiringProfile::uniform(FiringData::new(
            1,
            Fixed::from_num(0.25),
            Fixed::from_num(0.25),
        ));
        let mut gun = RotatingGun::from_data(
            &GunData {
                id: "turret".to_string(),
                atlas: "guns".to_string(),
                textures: std::array::from_fn(|i| format!("turret_{i}")),
                width: Fixed::from_num(2),
                height: Fixed::from_num(2),
                recoil: Fixed::ZERO,
                recoil_resistance: Fixed::from_num(1),
                rotation_speed: Fixed::from_num(4),
                rotation_offsets: [Vec2Fixed::ZERO; 8],
            },
            profile,
        );
        gun.add_source("main", simple_source("main")).unwrap();
        gun
    }

    fn ticked(mount: &mut CombatMount, ticks: u32) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            mount.update(
                Fixed::from_num(0.25),
                Vec2Fixed::ZERO,
                &StaticDamage(10),
                &mut events,
            );
        }
        events
    }

    #[test]
    fn test_aim_and_ground_flag() {
        let mut mount = CombatMount::new(3);
        mount.add_gun("turret", simple_gun()).unwrap();

        assert!(!mount.has_target());
        mount.aim_at(Fixed::from_num(8), Fixed::from_num(8));
        assert!(mount.has_target());
        assert!(mount.aimed_at_ground());

        mount.aim_at_object(42, Vec2Fixed::new(Fixed::from_num(3), Fixed::ZERO));
        assert!(!mount.aimed_at_ground());
    }

    #[test]
    fn test_remove_target_emits_event_once() {
        let mut mount = CombatMount::new(3);
        mount.add_gun("turret", simple_gun()).unwrap();
        mount.aim_at(Fixed::from_num(8), Fixed::from_num(8));

        let mut events = Vec::new();
        mount.remove_target(&mut events);
        mount.remove_target(&mut events);
        assert_eq!(
            events,
            vec![CombatEvent::TargetRemoved { shooter: 3 }]
        );
        assert!(!mount.gun("turret").unwrap().firing().has_target());
    }

    #[test]
    fn test_mount_fires_through_guns() {
        let mut mount = CombatMount::new(3);
        mount.add_gun("turret", simple_gun()).unwrap();
        mount.aim_at(Fixed::from_num(8), Fixed::ZERO);
        mount.enqueue_shots();

        let events = ticked(&mut mount, 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::VolleyFired { shooter: 3, .. })));
    }

    #[test]
    fn test_siege_toggle_blocks_then_switches() {
        let mut mount = CombatMount::new(3);
        mount.add_gun("turret", simple_gun()).unwrap();
        mount.aim_at(Fixed::from_num(8), Fixed::ZERO);
        mount.enqueue_shots();

        mount.begin_siege_toggle(Fixed::from_num(0.5));
        assert!(mount.is_toggling_siege_mode());

        // Two ticks of 0.25s: blocked both ticks, mode flips on the second.
        let events = ticked(&mut mount, 2);
        assert!(events.is_empty());
        assert!(!mount.is_toggling_siege_mode());
        assert!(mount.siege_mode());

        // With the toggle done, the pending volley proceeds.
        let events = ticked(&mut mount, 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::VolleyFired { .. })));
    }

    #[test]
    fn test_direct_logic_uses_mount_facing() {
        let profile = FiringProfile::uniform(FiringData::new(
            2,
            Fixed::from_num(0.25),
            Fixed::from_num(0.25),
        ));
        let mut logic = FiringLogic::new(profile);
        logic.add_source("hull", simple_source("hull")).unwrap();

        let mut mount = CombatMount::new(5);
        mount.set_direct_logic(logic);
        mount.aim_at(Fixed::from_num(8), Fixed::ZERO);
        mount.enqueue_shots();

        // No facing: the volley is cancelled at the gate.
        let events = ticked(&mut mount, 2);
        assert!(events.is_empty());
        assert_eq!(mount.direct_logic().unwrap().enqueued_shots(), 0);

        // With a facing set, a fresh volley fires.
        mount.set_facing(Some(Direction::East));
        mount.enqueue_shots();
        let events = ticked(&mut mount, 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::VolleyFired { .. })));
    }

    #[test]
    fn test_duplicate_gun_rejected() {
        let mut mount = CombatMount::new(1);
        mount.add_gun("turret", simple_gun()).unwrap();
        assert!(matches!(
            mount.add_gun("turret", simple_gun()),
            Err(CombatError::DuplicateGun(_))
        ));
    }

    #[test]
    fn test_can_be_removed_waits_for_flights() {
        let mut mount = CombatMount::new(1);
        let mut gun = simple_gun();
        // Slow projectile so the flight outlives the volley.
        gun.firing_mut()
            .source_mut("main")
            .unwrap()
            .set_enabled(true);
        mount.add_gun("turret", gun).unwrap();
        mount.aim_at(Fixed::from_num(200), Fixed::ZERO);
        mount.enqueue_shots();

        ticked(&mut mount, 2);
        assert!(!mount.can_be_removed());

        // Flight time is 200/100 = 2s; run it out.
        ticked(&mut mount, 10);
        assert!(mount.can_be_removed());
    }
}
