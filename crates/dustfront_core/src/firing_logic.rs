//! Reload/shot-interval/volley state machine.
//!
//! A firing logic owns an ordered, name-keyed collection of fire sources
//! and dispatches enqueued volleys one shot at a time, cycling the
//! sources round-robin. All waiting is expressed as accumulated elapsed
//! time compared against thresholds once per tick; nothing suspends.
//!
//! # Timing model
//!
//! Within one volley, shots are spaced at least `shot_interval` apart.
//! The reload timer is never reset mid-volley: it resets when the final
//! shot of a volley fires, so `reload_speed` behaves as a cooldown
//! between volleys rather than a per-shot cost. A shot is attempted once
//! the shot timer reaches the smaller of the two thresholds and fires
//! only if the reload timer has also reached `reload_speed`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{CombatError, Result};
use crate::events::{CombatEvent, CombatantId};
use crate::fire_source::FireSource;
use crate::math::{fixed_serde, Fixed, Vec2Fixed};
use crate::specs::{DamageValueProvider, FiringProfile};

/// A fire source with the name its descriptor registered it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NamedSource {
    name: String,
    source: FireSource,
}

/// Volley state machine over an ordered list of fire sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringLogic {
    /// Sources in registration order. The round-robin cursor indexes into
    /// this list; iteration order is never inferred from the name map.
    sources: Vec<NamedSource>,
    /// Name to list-index lookup.
    name_index: HashMap<String, usize>,
    /// Round-robin cursor into `sources`.
    cursor: usize,
    /// Shots left in the current volley.
    enqueued: u32,
    /// Seconds since the last dispatched shot.
    #[serde(with = "fixed_serde")]
    since_last_shot: Fixed,
    /// Seconds since the last volley completed.
    #[serde(with = "fixed_serde")]
    since_reload: Fixed,
    /// Whether `enqueue_shots` has ever been called.
    primed: bool,
    /// Volley cancellation requested, applied on the next evaluated tick.
    clear_requested: bool,
    /// Current aim point, if any.
    target: Option<Vec2Fixed>,
    /// Shot scheduling per mode.
    profile: FiringProfile,
}

impl FiringLogic {
    /// Create an empty firing logic with the given scheduling profile.
    #[must_use]
    pub fn new(profile: FiringProfile) -> Self {
        Self {
            sources: Vec::new(),
            name_index: HashMap::new(),
            cursor: 0,
            enqueued: 0,
            since_last_shot: Fixed::ZERO,
            since_reload: Fixed::ZERO,
            primed: false,
            clear_requested: false,
            target: None,
            profile,
        }
    }

    /// Scheduling profile this logic runs on.
    #[must_use]
    pub const fn profile(&self) -> &FiringProfile {
        &self.profile
    }

    /// Register a fire source under a unique name.
    ///
    /// Registration order is the round-robin order.
    pub fn add_source(&mut self, name: impl Into<String>, source: FireSource) -> Result<()> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(CombatError::DuplicateFireSource(name));
        }
        self.name_index.insert(name.clone(), self.sources.len());
        self.sources.push(NamedSource { name, source });
        Ok(())
    }

    /// Look up a fire source by name.
    pub fn source(&self, name: &str) -> Result<&FireSource> {
        self.name_index
            .get(name)
            .map(|&i| &self.sources[i].source)
            .ok_or_else(|| CombatError::UnknownFireSource(name.to_string()))
    }

    /// Look up a fire source mutably by name.
    pub fn source_mut(&mut self, name: &str) -> Result<&mut FireSource> {
        match self.name_index.get(name) {
            Some(&i) => Ok(&mut self.sources[i].source),
            None => Err(CombatError::UnknownFireSource(name.to_string())),
        }
    }

    /// Iterate sources with their names, in round-robin order.
    pub fn sources(&self) -> impl Iterator<Item = (&str, &FireSource)> {
        self.sources.iter().map(|n| (n.name.as_str(), &n.source))
    }

    /// Number of registered fire sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Set the aim point.
    pub fn set_target(&mut self, target: Vec2Fixed) {
        self.target = Some(target);
    }

    /// Current aim point, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Vec2Fixed> {
        self.target
    }

    /// Whether an aim point is set.
    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Clear the aim point.
    ///
    /// Pending volley shots stay enqueued; they simply cannot fire until
    /// a target is set again.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Shots left in the current volley.
    #[must_use]
    pub const fn enqueued_shots(&self) -> u32 {
        self.enqueued
    }

    /// Start a new volley for the active mode.
    ///
    /// No-op while a volley is still pending: a new volley can only start
    /// once the previous one has fully fired. The first call ever made on
    /// an instance primes both timers to zero so the first shot is gated
    /// by the reload threshold rather than the shot interval.
    pub fn enqueue_shots(&mut self, siege_mode: bool) {
        if self.enqueued != 0 {
            return;
        }
        if !self.primed {
            self.primed = true;
            self.since_last_shot = Fixed::ZERO;
            self.since_reload = Fixed::ZERO;
        }
        self.enqueued = self.profile.for_mode(siege_mode).shot_count;
    }

    /// Drop the current volley.
    ///
    /// Cooperative: takes effect on the next evaluated tick, never
    /// mid-frame.
    pub fn remove_enqueued_shots(&mut self) {
        self.clear_requested = true;
    }

    /// Whether this logic can be torn down.
    ///
    /// True only once every source's dispatched projectiles have landed.
    #[must_use]
    pub fn can_be_removed(&self) -> bool {
        self.sources.iter().all(|n| n.source.can_be_removed())
    }

    /// Advance the state machine by `delta` seconds.
    ///
    /// Always advances every owned source's projectile flights,
    /// regardless of target state. A shot is attempted only when a target
    /// is set, no mode toggle is in progress and a volley is pending.
    /// `facing` of `None` at that point cancels the entire volley
    /// silently - defined behavior, not an error.
    ///
    /// Returns whether a shot was dispatched this tick.
    pub fn update(
        &mut self,
        toggling_siege_mode: bool,
        siege_mode: bool,
        facing: Option<Direction>,
        delta: Fixed,
        anchor: Vec2Fixed,
        shooter: CombatantId,
        provider: &dyn DamageValueProvider,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        for named in &mut self.sources {
            named.source.advance(delta, shooter, provider, events);
        }

        // The clocks run whether or not a shot is attempted; firing resets
        // them below.
        self.since_last_shot += delta;
        self.since_reload += delta;

        if self.clear_requested {
            self.clear_requested = false;
            self.enqueued = 0;
        }

        let mut fired = false;
        if !toggling_siege_mode && self.enqueued > 0 {
            if let Some(target) = self.target {
                match facing {
                    None => {
                        // Whole volley cancelled: no projectile, no damage.
                        tracing::debug!(shooter, "volley cancelled, no facing direction");
                        self.enqueued = 0;
                        self.since_last_shot = Fixed::ZERO;
                    }
                    Some(direction) => {
                        fired = self.try_fire(siege_mode, direction, anchor, target, shooter, events);
                    }
                }
            }
        }
        fired
    }

    /// Evaluate the firing gates and dispatch at most one shot.
    fn try_fire(
        &mut self,
        siege_mode: bool,
        direction: Direction,
        anchor: Vec2Fixed,
        target: Vec2Fixed,
        shooter: CombatantId,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let data = *self.profile.for_mode(siege_mode);
        if self.since_last_shot < data.shot_gate() || self.since_reload < data.reload_speed {
            return false;
        }
        if self.sources.is_empty() {
            return false;
        }

        // The cursor advances on every attempt; a disabled or absent
        // source consumes its turn without firing. Changing this would
        // shift the shot distribution and with it game balance.
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.sources.len();

        let named = &mut self.sources[index];
        if !named.source.is_enabled() || !named.source.present_for(siege_mode) {
            tracing::debug!(source = %named.name, "fire source skipped, turn consumed");
            return false;
        }

        let launch = named.source.fire(direction, anchor, target);
        self.enqueued -= 1;
        self.since_last_shot = Fixed::ZERO;
        if self.enqueued == 0 {
            // Volley complete; reload cooldown starts now.
            self.since_reload = Fixed::ZERO;
        }

        events.push(CombatEvent::VolleyFired {
            shooter,
            source: named.name.clone(),
            direction,
            launch,
            target,
            remaining: self.enqueued,
        });
        true
    }
}
