// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Damage-dealing abilities and the acquisition book that owns them.
//!
//! Each ability is a self-contained dealer: it advances its own
//! sub-projectiles or effects every tick and answers hit queries against a
//! target's bounds, choosing its own overlap shape and its own
//! one-application-per-target discipline. How much a hit hurts is not the
//! ability's call; it asks the damage source and passes the answer
//! through.

mod bolt;
mod glaive;
mod nova;

pub use self::bolt::Bolt;
pub use self::glaive::Glaive;
pub use self::nova::Nova;

use crate::player::DamageSource;
use crate::rng::GameRng;
use gravewake_core::math::{Rect, Vec2};
use gravewake_core::platform::DrawSurface;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The ability roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Homing projectile fired at the nearest enemy.
    Bolt,
    /// Pulsing damage ellipse centered on the player.
    Nova,
    /// Blades orbiting the player.
    Glaive,
}

impl AbilityKind {
    /// Every kind, in roster order.
    pub const ALL: [AbilityKind; 3] = [AbilityKind::Bolt, AbilityKind::Nova, AbilityKind::Glaive];

    /// Display name for menus and the HUD.
    pub fn display_name(self) -> &'static str {
        match self {
            AbilityKind::Bolt => "Bolt",
            AbilityKind::Nova => "Nova",
            AbilityKind::Glaive => "Glaive",
        }
    }

    /// Builds a fresh level-1 instance of this ability.
    pub fn instantiate(self) -> Box<dyn Ability> {
        match self {
            AbilityKind::Bolt => Box::new(Bolt::new()),
            AbilityKind::Nova => Box::new(Nova::new()),
            AbilityKind::Glaive => Box::new(Glaive::new()),
        }
    }
}

/// Per-tick context handed to every owned ability before combat runs.
#[derive(Debug, Clone, Copy)]
pub struct AbilityTick {
    /// The player's position this tick.
    pub origin: Vec2,
    /// Position of the nearest live enemy, if any.
    pub nearest_enemy: Option<Vec2>,
    /// Scaled delta time in seconds.
    pub dt: f32,
}

/// A resolved hit: how hard, and whether the source rolled a critical.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Damage to apply.
    pub amount: f32,
    /// Whether the hit was critical.
    pub critical: bool,
}

/// A damage-dealing capability acquired and leveled by the player.
pub trait Ability: Send {
    /// Which roster entry this is.
    fn kind(&self) -> AbilityKind;

    /// Current level, starting at 1.
    fn level(&self) -> u32;

    /// Raises the level by one. Re-acquiring an owned ability routes
    /// here instead of duplicating the record.
    fn level_up(&mut self);

    /// Advances the ability's own projectiles and timers.
    fn update(&mut self, tick: &AbilityTick);

    /// Resolves this dealer against one target's bounds.
    ///
    /// `target_slot` identifies the target across calls within a tick so
    /// dealers can enforce their own at-most-once discipline. Returns the
    /// hit to apply, or `None` if nothing connected.
    fn strike(
        &mut self,
        target_slot: usize,
        target: &Rect,
        source: &mut dyn DamageSource,
    ) -> Option<Hit>;

    /// Renders the ability's effects.
    fn draw(&self, surface: &mut dyn DrawSurface);
}

/// One acquisition record.
pub struct OwnedAbility {
    /// The live dealer.
    pub ability: Box<dyn Ability>,
    /// Monotonic acquisition counter; iteration order follows it.
    pub acquisition_order: u32,
}

/// The abilities the player has acquired, iterated in acquisition order.
#[derive(Default)]
pub struct AbilityBook {
    entries: HashMap<AbilityKind, OwnedAbility>,
    next_order: u32,
}

impl AbilityBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `kind`: a new acquisition at the back of the order, or a
    /// level on the existing record.
    pub fn grant(&mut self, kind: AbilityKind) {
        match self.entries.get_mut(&kind) {
            Some(owned) => {
                owned.ability.level_up();
                log::info!(
                    "{} leveled up to {}.",
                    kind.display_name(),
                    owned.ability.level()
                );
            }
            None => {
                self.entries.insert(
                    kind,
                    OwnedAbility {
                        ability: kind.instantiate(),
                        acquisition_order: self.next_order,
                    },
                );
                self.next_order += 1;
                log::info!("Acquired {}.", kind.display_name());
            }
        }
    }

    /// Returns `true` if `kind` has been acquired.
    pub fn contains(&self, kind: AbilityKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Number of acquired abilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been acquired.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in acquisition order.
    pub fn ordered(&self) -> Vec<&OwnedAbility> {
        let mut list: Vec<&OwnedAbility> = self.entries.values().collect();
        list.sort_by_key(|owned| owned.acquisition_order);
        list
    }

    /// Mutable variant of [`ordered`](AbilityBook::ordered).
    pub fn ordered_mut(&mut self) -> Vec<&mut OwnedAbility> {
        let mut list: Vec<&mut OwnedAbility> = self.entries.values_mut().collect();
        list.sort_by_key(|owned| owned.acquisition_order);
        list
    }

    /// Draws `count` ability offers for a level-up choice. Owned kinds
    /// may appear; picking one levels it instead.
    pub fn offer_choices(&self, rng: &mut GameRng, count: usize) -> Vec<AbilityKind> {
        let mut roster = AbilityKind::ALL.to_vec();
        rng.shuffle(&mut roster);
        roster.truncate(count.min(roster.len()));
        roster
    }
}
