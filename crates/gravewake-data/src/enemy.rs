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

//! Enemy entities, their recycle pool, steering and damage bookkeeping.

use crate::config::EnemySpec;
use crate::pool::{Pool, Poolable};
use gravewake_core::collide::Collidable;
use gravewake_core::math::{Rect, Vec2};

/// Seconds a freshly hit enemy renders with the damage flash.
pub const DAMAGE_FLASH_SECONDS: f32 = 0.1;

/// Seconds a floating damage number stays alive.
pub const DAMAGE_NUMBER_SECONDS: f32 = 0.5;

/// A horde enemy.
///
/// Bounds and stats are only meaningful while `active`; a recycled enemy
/// keeps its last values in the slot until the next spawn stamps new ones.
#[derive(Debug, Default)]
pub struct Enemy {
    /// Center position in world space.
    pub position: Vec2,
    /// Side length of the square bounds.
    pub size: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Contact damage dealt to the player.
    pub power: f32,
    /// Current hit points. Never negative.
    pub health: f32,
    /// Hit points on spawn.
    pub max_health: f32,
    /// Experience dropped on death.
    pub experience: u32,
    /// Counts down after a hit; the renderer flashes while positive.
    pub flash_timer: f32,
    active: bool,
}

impl Enemy {
    /// Restamps this slot from the template at `position`, restoring full
    /// health.
    pub fn reset_from(&mut self, spec: &EnemySpec, position: Vec2) {
        self.position = position;
        self.size = spec.size;
        self.speed = spec.speed;
        self.power = spec.power;
        self.health = spec.max_health;
        self.max_health = spec.max_health;
        self.experience = spec.experience;
        self.flash_timer = 0.0;
    }
}

impl Poolable for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Collidable for Enemy {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// A transient floating damage annotation for the external renderer.
///
/// The simulation only records these; drawing and styling beyond the
/// critical flag is the renderer's business.
#[derive(Debug, Clone)]
pub struct DamageNumber {
    /// Where the hit landed.
    pub position: Vec2,
    /// Damage dealt.
    pub value: f32,
    /// Whether the hit was a critical. Keys the display color.
    pub critical: bool,
    /// Remaining lifetime in seconds.
    pub ttl: f32,
}

/// The set of live enemies plus the recycle pool behind them.
#[derive(Debug)]
pub struct EnemyPool {
    pool: Pool<Enemy>,
}

impl EnemyPool {
    /// Creates a pool capped at `max_alive` live enemies.
    pub fn new(max_alive: usize) -> Self {
        Self {
            pool: Pool::new(max_alive),
        }
    }

    /// Spawns an enemy stamped from `spec` at `position`, reusing a
    /// recycled slot when one exists. Returns `None` at the population
    /// cap.
    pub fn spawn(&mut self, spec: &EnemySpec, position: Vec2) -> Option<usize> {
        self.pool.spawn(|enemy| enemy.reset_from(spec, position))
    }

    /// Deactivates the enemy and queues its slot for reuse.
    pub fn recycle(&mut self, index: usize) {
        self.pool.recycle(index);
    }

    /// Applies `amount` damage to the enemy in `index`.
    ///
    /// Health is clamped at a floor of zero and a floating damage number
    /// is recorded in `numbers`. Whether zero health means death is the
    /// caller's decision; nothing is deactivated here.
    pub fn apply_damage(
        &mut self,
        index: usize,
        amount: f32,
        critical: bool,
        numbers: &mut Vec<DamageNumber>,
    ) {
        if let Some(enemy) = self.pool.get_mut(index) {
            enemy.health = (enemy.health - amount).max(0.0);
            numbers.push(DamageNumber {
                position: enemy.position,
                value: amount,
                critical,
                ttl: DAMAGE_NUMBER_SECONDS,
            });
        }
    }

    /// Advances the enemy in `index` one step toward `target`.
    ///
    /// If the straight-line step would overlap another live enemy, the two
    /// perpendicular deflections are tried in order of resulting distance
    /// to the target; if both are blocked the enemy holds position this
    /// tick. Deliberately not a physics solve, just enough to keep the
    /// horde from stacking into one square.
    pub fn advance_toward(&mut self, index: usize, target: Vec2, dt: f32) {
        let (position, size, step) = match self.pool.get(index) {
            Some(enemy) => {
                let direction = (target - enemy.position).normalize();
                (enemy.position, enemy.size, direction * enemy.speed * dt)
            }
            None => return,
        };

        if step == Vec2::ZERO {
            return;
        }

        let mut deflections = [step.perp(), -step.perp()];
        deflections.sort_by(|a, b| {
            let da = (position + *a).distance_squared(target);
            let db = (position + *b).distance_squared(target);
            da.total_cmp(&db)
        });

        for candidate in [step, deflections[0], deflections[1]] {
            let proposed = position + candidate;
            let bounds = Rect::from_center_size(proposed, Vec2::splat(size));
            if !self.overlaps_other(index, &bounds) {
                if let Some(enemy) = self.pool.get_mut(index) {
                    enemy.position = proposed;
                }
                return;
            }
        }
    }

    /// Ticks down flash timers. Damage numbers decay separately since the
    /// world owns that list.
    pub fn decay_timers(&mut self, dt: f32) {
        for (_, enemy) in self.pool.iter_active_mut() {
            if enemy.flash_timer > 0.0 {
                enemy.flash_timer = (enemy.flash_timer - dt).max(0.0);
            }
        }
    }

    /// Returns `true` if `bounds` overlaps any live enemy other than
    /// `index`.
    pub fn overlaps_other(&self, index: usize, bounds: &Rect) -> bool {
        self.pool
            .iter_active()
            .any(|(other, enemy)| other != index && enemy.bounds().overlaps(bounds))
    }

    /// Number of live enemies.
    pub fn active_len(&self) -> usize {
        self.pool.active_len()
    }

    /// Number of slots ever allocated.
    pub fn allocated(&self) -> usize {
        self.pool.allocated()
    }

    /// The live enemy in `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Enemy> {
        self.pool.get(index)
    }

    /// Mutable variant of [`get`](EnemyPool::get).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.pool.get_mut(index)
    }

    /// Iterates over `(index, enemy)` for every live enemy.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.pool.iter_active()
    }

    /// Mutable variant of [`iter_active`](EnemyPool::iter_active).
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Enemy)> {
        self.pool.iter_active_mut()
    }

    /// Indices of every live enemy, in slot order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.pool.active_indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec() -> EnemySpec {
        EnemySpec {
            max_health: 30.0,
            speed: 10.0,
            power: 8.0,
            size: 4.0,
            experience: 5,
        }
    }

    #[test]
    fn spawn_stamps_template_values() {
        let mut pool = EnemyPool::new(8);
        let index = pool.spawn(&spec(), Vec2::new(3.0, 4.0)).unwrap();
        let enemy = pool.get(index).unwrap();

        assert_eq!(enemy.position, Vec2::new(3.0, 4.0));
        assert_eq!(enemy.health, 30.0);
        assert_eq!(enemy.experience, 5);
    }

    #[test]
    fn recycled_enemy_respawns_at_full_health() {
        let mut pool = EnemyPool::new(8);
        let mut numbers = Vec::new();

        let index = pool.spawn(&spec(), Vec2::ZERO).unwrap();
        pool.apply_damage(index, 30.0, false, &mut numbers);
        assert_eq!(pool.get(index).unwrap().health, 0.0);
        pool.recycle(index);

        let reused = pool.spawn(&spec(), Vec2::new(50.0, 0.0)).unwrap();
        assert_eq!(reused, index);
        let enemy = pool.get(reused).unwrap();
        assert_eq!(enemy.health, 30.0);
        assert_eq!(enemy.position, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn damage_clamps_at_zero_and_logs_a_number() {
        let mut pool = EnemyPool::new(8);
        let mut numbers = Vec::new();
        let index = pool.spawn(&spec(), Vec2::ZERO).unwrap();

        pool.apply_damage(index, 99.0, true, &mut numbers);

        let enemy = pool.get(index).unwrap();
        assert_eq!(enemy.health, 0.0);
        assert_eq!(numbers.len(), 1);
        assert!(numbers[0].critical);
        assert_relative_eq!(numbers[0].value, 99.0);
        assert!(numbers[0].ttl > 0.0);
    }

    #[test]
    fn unobstructed_step_moves_straight_at_target() {
        let mut pool = EnemyPool::new(8);
        let index = pool.spawn(&spec(), Vec2::ZERO).unwrap();

        pool.advance_toward(index, Vec2::new(100.0, 0.0), 0.5);

        let enemy = pool.get(index).unwrap();
        assert_relative_eq!(enemy.position.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(enemy.position.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn blocked_step_deflects_sideways() {
        let mut pool = EnemyPool::new(8);
        let mover = pool.spawn(&spec(), Vec2::ZERO).unwrap();
        // Parked directly on the straight-line path.
        pool.spawn(&spec(), Vec2::new(5.0, 0.0)).unwrap();

        pool.advance_toward(mover, Vec2::new(100.0, 0.0), 0.5);

        let enemy = pool.get(mover).unwrap();
        // Did not advance along x into the blocker; moved on y instead.
        assert_relative_eq!(enemy.position.x, 0.0, epsilon = 1e-4);
        assert!(enemy.position.y.abs() > 0.0);
    }

    #[test]
    fn fully_blocked_enemy_holds_position() {
        let mut pool = EnemyPool::new(8);
        let mover = pool.spawn(&spec(), Vec2::ZERO).unwrap();
        // Surround the straight path and both perpendicular deflections.
        pool.spawn(&spec(), Vec2::new(5.0, 0.0)).unwrap();
        pool.spawn(&spec(), Vec2::new(0.0, 5.0)).unwrap();
        pool.spawn(&spec(), Vec2::new(0.0, -5.0)).unwrap();

        pool.advance_toward(mover, Vec2::new(100.0, 0.0), 0.5);
        assert_eq!(pool.get(mover).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn flash_timer_decays_to_zero() {
        let mut pool = EnemyPool::new(8);
        let index = pool.spawn(&spec(), Vec2::ZERO).unwrap();
        pool.get_mut(index).unwrap().flash_timer = DAMAGE_FLASH_SECONDS;

        pool.decay_timers(DAMAGE_FLASH_SECONDS * 2.0);
        assert_eq!(pool.get(index).unwrap().flash_timer, 0.0);
    }
}
