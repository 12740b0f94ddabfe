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
use crate::pool::{Pool, Poolable};
use gravewake_core::math::{Rect, Rgba, Vec2};
use gravewake_core::platform::DrawSurface;

const FIRE_INTERVAL: f32 = 0.9;
const MIN_FIRE_INTERVAL: f32 = 0.25;
const SHOT_SPEED: f32 = 300.0;
const SHOT_SIZE: f32 = 6.0;
const SHOT_LIFETIME: f32 = 1.5;
const SHOT_CAP: usize = 32;
const BASE_POWER: f32 = 10.0;
const POWER_PER_LEVEL: f32 = 3.0;

#[derive(Debug, Default)]
struct BoltShot {
    position: Vec2,
    velocity: Vec2,
    ttl: f32,
    active: bool,
}

impl Poolable for BoltShot {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl BoltShot {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(SHOT_SIZE))
    }
}

/// A stream of projectiles fired at the nearest enemy.
///
/// Shots live in their own recycle pool; a shot is consumed by the first
/// target it connects with, which is what bounds this dealer to one
/// damage application per shot.
pub struct Bolt {
    level: u32,
    cooldown: f32,
    shots: Pool<BoltShot>,
}

impl Bolt {
    /// Creates a level-1 bolt with an empty magazine.
    pub fn new() -> Self {
        Self {
            level: 1,
            cooldown: 0.0,
            shots: Pool::new(SHOT_CAP),
        }
    }

    fn fire_interval(&self) -> f32 {
        (FIRE_INTERVAL - 0.1 * (self.level - 1) as f32).max(MIN_FIRE_INTERVAL)
    }

    fn power(&self) -> f32 {
        BASE_POWER + POWER_PER_LEVEL * (self.level - 1) as f32
    }

    #[cfg(test)]
    pub(crate) fn live_shots(&self) -> usize {
        self.shots.active_len()
    }
}

impl Default for Bolt {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Bolt {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Bolt
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn level_up(&mut self) {
        self.level += 1;
    }

    fn update(&mut self, tick: &AbilityTick) {
        let mut expired = Vec::new();
        for (index, shot) in self.shots.iter_active_mut() {
            shot.position += shot.velocity * tick.dt;
            shot.ttl -= tick.dt;
            if shot.ttl <= 0.0 {
                expired.push(index);
            }
        }
        for index in expired {
            self.shots.recycle(index);
        }

        self.cooldown -= tick.dt;
        if self.cooldown > 0.0 {
            return;
        }

        // Hold fire with no target on screen; the cooldown stays spent so
        // the next target gets an immediate shot.
        let Some(target) = tick.nearest_enemy else {
            return;
        };
        let direction = (target - tick.origin).normalize();
        if direction == Vec2::ZERO {
            return;
        }

        self.shots.spawn(|shot| {
            shot.position = tick.origin;
            shot.velocity = direction * SHOT_SPEED;
            shot.ttl = SHOT_LIFETIME;
        });
        self.cooldown = self.fire_interval();
    }

    fn strike(
        &mut self,
        _target_slot: usize,
        target: &Rect,
        source: &mut dyn DamageSource,
    ) -> Option<Hit> {
        let hit_shot = self
            .shots
            .iter_active()
            .find(|(_, shot)| shot.bounds().overlaps(target))
            .map(|(index, _)| index)?;

        self.shots.recycle(hit_shot);
        let (amount, critical) = source.calculate_damage(self.power());
        Some(Hit { amount, critical })
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        for (_, shot) in self.shots.iter_active() {
            surface.fill_rect(shot.bounds(), Rgba::YELLOW);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatSource;

    impl DamageSource for FlatSource {
        fn calculate_damage(&mut self, base_power: f32) -> (f32, bool) {
            (base_power, false)
        }
    }

    fn tick_with_target(dt: f32) -> AbilityTick {
        AbilityTick {
            origin: Vec2::ZERO,
            nearest_enemy: Some(Vec2::new(100.0, 0.0)),
            dt,
        }
    }

    #[test]
    fn fires_on_cooldown_toward_the_nearest_enemy() {
        let mut bolt = Bolt::new();
        bolt.update(&tick_with_target(0.016));
        assert_eq!(bolt.live_shots(), 1);

        // Cooldown holds the second shot back.
        bolt.update(&tick_with_target(0.016));
        assert_eq!(bolt.live_shots(), 1);

        bolt.update(&tick_with_target(FIRE_INTERVAL));
        assert_eq!(bolt.live_shots(), 2);
    }

    #[test]
    fn holds_fire_with_no_target() {
        let mut bolt = Bolt::new();
        bolt.update(&AbilityTick {
            origin: Vec2::ZERO,
            nearest_enemy: None,
            dt: 5.0,
        });
        assert_eq!(bolt.live_shots(), 0);
    }

    #[test]
    fn shots_expire() {
        let mut bolt = Bolt::new();
        bolt.update(&tick_with_target(0.016));
        assert_eq!(bolt.live_shots(), 1);

        bolt.update(&tick_with_target(SHOT_LIFETIME + 0.1));
        // The old shot expired; the cooldown also elapsed so a new one
        // flew. Expiry and firing balance out to exactly one live shot.
        assert_eq!(bolt.live_shots(), 1);
    }

    #[test]
    fn a_shot_is_consumed_by_its_hit() {
        let mut bolt = Bolt::new();
        bolt.update(&tick_with_target(0.016));

        // Shot spawned at the origin; park the target on top of it.
        let target = Rect::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        let hit = bolt.strike(0, &target, &mut FlatSource).unwrap();
        assert_eq!(hit.amount, BASE_POWER);
        assert!(!hit.critical);
        assert_eq!(bolt.live_shots(), 0);

        // Nothing left to connect with.
        assert!(bolt.strike(0, &target, &mut FlatSource).is_none());
    }

    #[test]
    fn missing_target_is_not_struck() {
        let mut bolt = Bolt::new();
        bolt.update(&tick_with_target(0.016));

        let far = Rect::from_center_size(Vec2::new(500.0, 500.0), Vec2::splat(10.0));
        assert!(bolt.strike(0, &far, &mut FlatSource).is_none());
        assert_eq!(bolt.live_shots(), 1);
    }

    #[test]
    fn leveling_raises_power_and_rate() {
        let mut bolt = Bolt::new();
        let slow = bolt.fire_interval();
        let weak = bolt.power();
        bolt.level_up();
        assert!(bolt.fire_interval() < slow);
        assert!(bolt.power() > weak);
    }
}
