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

use super::{Ability, AbilityKind, AbilityTick, Hit};
use crate::player::DamageSource;
use gravewake_core::math::{Rect, Rgba, Vec2, TAU};
use gravewake_core::platform::DrawSurface;
use std::collections::HashMap;

const ORBIT_RADIUS: f32 = 42.0;
const ORBIT_SPEED: f32 = 3.0;
const BLADE_SIZE: f32 = 10.0;
const BASE_POWER: f32 = 12.0;
const POWER_PER_LEVEL: f32 = 4.0;

/// Seconds a struck target is immune to this dealer.
///
/// Orbiting blades overlap a chasing enemy for many consecutive frames;
/// the per-target cooldown turns that contact into a steady damage rate
/// instead of one application per frame.
const TARGET_COOLDOWN: f32 = 0.4;

/// Blades orbiting the player.
pub struct Glaive {
    level: u32,
    angle: f32,
    origin: Vec2,
    /// Remaining immunity per target slot. Slot indices are stable for
    /// the life of a target; a recycled slot re-enters with whatever
    /// cooldown remains, which at these durations is not worth tracking.
    recent: HashMap<usize, f32>,
}

impl Glaive {
    /// Creates a level-1 glaive with one blade.
    pub fn new() -> Self {
        Self {
            level: 1,
            angle: 0.0,
            origin: Vec2::ZERO,
            recent: HashMap::new(),
        }
    }

    /// Number of orbiting blades at the current level.
    pub fn blade_count(&self) -> u32 {
        1 + self.level
    }

    fn power(&self) -> f32 {
        BASE_POWER + POWER_PER_LEVEL * (self.level - 1) as f32
    }

    fn blade_bounds(&self, blade: u32) -> Rect {
        let offset = self.angle + TAU * blade as f32 / self.blade_count() as f32;
        let center = self.origin + Vec2::new(offset.cos(), offset.sin()) * ORBIT_RADIUS;
        Rect::from_center_size(center, Vec2::splat(BLADE_SIZE))
    }
}

impl Default for Glaive {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Glaive {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Glaive
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn level_up(&mut self) {
        self.level += 1;
    }

    fn update(&mut self, tick: &AbilityTick) {
        self.origin = tick.origin;
        self.angle = (self.angle + ORBIT_SPEED * tick.dt) % TAU;

        self.recent.retain(|_, remaining| {
            *remaining -= tick.dt;
            *remaining > 0.0
        });
    }

    fn strike(
        &mut self,
        target_slot: usize,
        target: &Rect,
        source: &mut dyn DamageSource,
    ) -> Option<Hit> {
        if self.recent.contains_key(&target_slot) {
            return None;
        }

        let connected = (0..self.blade_count()).any(|blade| self.blade_bounds(blade).overlaps(target));
        if !connected {
            return None;
        }

        self.recent.insert(target_slot, TARGET_COOLDOWN);
        let (amount, critical) = source.calculate_damage(self.power());
        Some(Hit { amount, critical })
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        for blade in 0..self.blade_count() {
            surface.fill_rect(self.blade_bounds(blade), Rgba::rgb(0.8, 0.8, 0.9));
        }
    }
}
