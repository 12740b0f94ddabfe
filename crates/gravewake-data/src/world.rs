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

//! The shared simulation world every gameplay plugin operates on.
//!
//! Plugins receive the world type-erased through the tick context and
//! downcast internally; nothing in here is plugin-specific. All mutation
//! happens on the simulation thread.

use crate::ability::AbilityBook;
use crate::config::{CharacterSpec, GameConfig};
use crate::enemy::{DamageNumber, EnemyPool};
use crate::pickup::PickupPool;
use crate::player::Player;
use crate::rng::GameRng;
use gravewake_core::math::{Rect, Vec2};

/// Gems that can lie around at once. Deaths beyond this lose their drop.
const PICKUP_CAP: usize = 128;

/// A camera that trails the player.
#[derive(Debug, Default)]
pub struct Camera {
    /// World-space center of the view.
    pub focus: Vec2,
}

impl Camera {
    /// Moves the focus a fraction of the way toward `target`. Runs after
    /// combat so the view reflects this tick's outcome.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        let rate = (8.0 * dt).min(1.0);
        self.focus = self.focus.lerp(target, rate);
    }
}

/// Counters the HUD reports at the end of a run.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Enemies killed this run.
    pub kills: u32,
    /// Seconds survived, in scaled simulation time.
    pub elapsed: f32,
}

/// Everything one run simulates over.
pub struct World {
    /// The tuning tables the run was started with.
    pub config: GameConfig,
    /// The player character.
    pub player: Player,
    /// Live enemies and their recycle pool.
    pub enemies: EnemyPool,
    /// Experience gems and their recycle pool.
    pub pickups: PickupPool,
    /// Acquired abilities in acquisition order.
    pub abilities: AbilityBook,
    /// Floating damage annotations for the renderer.
    pub damage_numbers: Vec<DamageNumber>,
    /// The trailing camera.
    pub camera: Camera,
    /// Playable area, centered on the origin.
    pub bounds: Rect,
    /// The run's master RNG. Subsystems fork their own streams from it.
    pub rng: GameRng,
    /// Run counters.
    pub stats: RunStats,
}

impl World {
    /// Builds the world for a fresh run with the chosen character.
    pub fn new(config: GameConfig, character: &CharacterSpec, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let player = Player::from_spec(character, rng.fork());
        let bounds = Rect::from_center_size(
            Vec2::ZERO,
            Vec2::new(config.world.width, config.world.height),
        );
        let max_alive = config.spawning.max_alive;

        Self {
            config,
            player,
            enemies: EnemyPool::new(max_alive),
            pickups: PickupPool::new(PICKUP_CAP),
            abilities: AbilityBook::new(),
            damage_numbers: Vec::new(),
            camera: Camera::default(),
            bounds,
            rng,
            stats: RunStats::default(),
        }
    }

    /// Position of the live enemy nearest to `point`, if any.
    pub fn nearest_enemy_to(&self, point: Vec2) -> Option<Vec2> {
        self.enemies
            .iter_active()
            .map(|(_, enemy)| enemy.position)
            .min_by(|a, b| {
                a.distance_squared(point)
                    .total_cmp(&b.distance_squared(point))
            })
    }

    /// Ages floating damage numbers and drops the expired ones.
    pub fn decay_damage_numbers(&mut self, dt: f32) {
        for number in &mut self.damage_numbers {
            number.ttl -= dt;
        }
        self.damage_numbers.retain(|number| number.ttl > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::DAMAGE_NUMBER_SECONDS;

    fn world() -> World {
        let config = GameConfig::default();
        let character = config.characters[0].clone();
        World::new(config, &character, 42)
    }

    #[test]
    fn nearest_enemy_picks_the_closest() {
        let mut w = world();
        let spec = w.config.enemy.clone();
        w.enemies.spawn(&spec, Vec2::new(100.0, 0.0)).unwrap();
        w.enemies.spawn(&spec, Vec2::new(10.0, 0.0)).unwrap();
        w.enemies.spawn(&spec, Vec2::new(-50.0, 0.0)).unwrap();

        assert_eq!(
            w.nearest_enemy_to(Vec2::ZERO),
            Some(Vec2::new(10.0, 0.0))
        );
    }

    #[test]
    fn nearest_enemy_ignores_recycled_slots() {
        let mut w = world();
        let spec = w.config.enemy.clone();
        let close = w.enemies.spawn(&spec, Vec2::new(5.0, 0.0)).unwrap();
        w.enemies.spawn(&spec, Vec2::new(80.0, 0.0)).unwrap();

        w.enemies.recycle(close);
        assert_eq!(
            w.nearest_enemy_to(Vec2::ZERO),
            Some(Vec2::new(80.0, 0.0))
        );
    }

    #[test]
    fn no_enemies_means_no_nearest() {
        let w = world();
        assert!(w.nearest_enemy_to(Vec2::ZERO).is_none());
    }

    #[test]
    fn damage_numbers_expire() {
        let mut w = world();
        let spec = w.config.enemy.clone();
        let index = w.enemies.spawn(&spec, Vec2::ZERO).unwrap();

        let mut numbers = std::mem::take(&mut w.damage_numbers);
        w.enemies.apply_damage(index, 5.0, false, &mut numbers);
        w.damage_numbers = numbers;
        assert_eq!(w.damage_numbers.len(), 1);

        w.decay_damage_numbers(DAMAGE_NUMBER_SECONDS / 2.0);
        assert_eq!(w.damage_numbers.len(), 1);
        w.decay_damage_numbers(DAMAGE_NUMBER_SECONDS);
        assert!(w.damage_numbers.is_empty());
    }

    #[test]
    fn camera_trails_toward_the_target() {
        let mut w = world();
        w.camera.follow(Vec2::new(100.0, 0.0), 0.05);
        assert!(w.camera.focus.x > 0.0);
        assert!(w.camera.focus.x < 100.0);
    }
}
