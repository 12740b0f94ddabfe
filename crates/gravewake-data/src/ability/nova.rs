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
use gravewake_core::math::{ellipse_contains, Rect, Rgba, Vec2};
use gravewake_core::platform::DrawSurface;

const PULSE_INTERVAL: f32 = 1.2;
const BASE_RADII: Vec2 = Vec2 { x: 64.0, y: 44.0 };
const RADII_GROWTH_PER_LEVEL: f32 = 0.15;
const BASE_POWER: f32 = 7.0;
const POWER_PER_LEVEL: f32 = 2.0;

/// A damage ellipse that pulses around the player.
///
/// On the tick a pulse fires, every enemy whose center lies inside the
/// normalized ellipse takes one application; between pulses `strike`
/// answers nothing. That makes the pulse flag itself the one-per-target
/// discipline, with no per-target bookkeeping.
pub struct Nova {
    level: u32,
    pulse_timer: f32,
    pulsing: bool,
    origin: Vec2,
}

impl Nova {
    /// Creates a level-1 nova with the pulse timer at zero.
    pub fn new() -> Self {
        Self {
            level: 1,
            pulse_timer: 0.0,
            pulsing: false,
            origin: Vec2::ZERO,
        }
    }

    /// Half-axes of the ellipse at the current level.
    pub fn radii(&self) -> Vec2 {
        BASE_RADII * (1.0 + RADII_GROWTH_PER_LEVEL * (self.level - 1) as f32)
    }

    fn power(&self) -> f32 {
        BASE_POWER + POWER_PER_LEVEL * (self.level - 1) as f32
    }

    #[cfg(test)]
    pub(crate) fn is_pulsing(&self) -> bool {
        self.pulsing
    }
}

impl Default for Nova {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Nova {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Nova
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn level_up(&mut self) {
        self.level += 1;
    }

    fn update(&mut self, tick: &AbilityTick) {
        self.origin = tick.origin;
        self.pulse_timer += tick.dt;
        // The flag holds for the remainder of this tick; combat runs
        // after ability updates within the same frame.
        self.pulsing = self.pulse_timer >= PULSE_INTERVAL;
        if self.pulsing {
            self.pulse_timer = 0.0;
        }
    }

    fn strike(
        &mut self,
        _target_slot: usize,
        target: &Rect,
        source: &mut dyn DamageSource,
    ) -> Option<Hit> {
        if !self.pulsing {
            return None;
        }
        if !ellipse_contains(self.origin, self.radii(), target.center()) {
            return None;
        }
        let (amount, critical) = source.calculate_damage(self.power());
        Some(Hit { amount, critical })
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        let radii = self.radii();
        let shade = if self.pulsing { 0.5 } else { 0.15 };
        surface.fill_rect(
            Rect::from_center_size(self.origin, radii * 2.0),
            Rgba::rgb(0.4, 0.2, 0.8).with_alpha(shade),
        );
    }
}
