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

//! The player character and the damage-source contract it owns.

use crate::config::{CharacterSpec, ProgressionSpec};
use crate::rng::GameRng;
use gravewake_core::collide::Collidable;
use gravewake_core::math::{Rect, Vec2};

/// Seconds of invulnerability between contact-damage applications.
///
/// Policy: a monotonic timer counts up every tick; contact damage is
/// allowed only once the timer reaches this threshold, and taking damage
/// resets it to zero.
pub const HURT_COOLDOWN_SECONDS: f32 = 0.5;

/// Seconds the player renders with the damage flash after a hit.
pub const PLAYER_FLASH_SECONDS: f32 = 0.3;

/// Spread of the damage variance roll around the base amount.
const DAMAGE_VARIANCE: f32 = 0.1;

/// The capability combat consumes to turn an ability's base power into a
/// concrete damage amount.
///
/// Critical-hit and variance policy belongs to the damage source (the
/// player), not to the combat engine; dealers call this and pass the
/// result through untouched.
pub trait DamageSource {
    /// Returns `(amount, is_critical)` for a hit with the given base
    /// power.
    fn calculate_damage(&mut self, base_power: f32) -> (f32, bool);
}

/// The player character for one run.
#[derive(Debug)]
pub struct Player {
    /// Class display name.
    pub name: String,
    /// Center position in world space.
    pub position: Vec2,
    /// Side length of the square bounds.
    pub size: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damage multiplier applied to ability base power.
    pub power: f32,
    /// Current hit points. Never negative.
    pub health: f32,
    /// Hit points at full health.
    pub max_health: f32,
    /// Probability of a critical hit.
    pub crit_chance: f32,
    /// Damage multiplier on a critical hit.
    pub crit_multiplier: f32,
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Counts up; contact damage is gated on this reaching
    /// [`HURT_COOLDOWN_SECONDS`].
    pub hurt_timer: f32,
    /// Counts down after a hit; the renderer flashes while positive.
    pub flash_timer: f32,
    rng: GameRng,
}

impl Player {
    /// Creates a player from a class template, drawing damage variance
    /// from its own forked RNG stream.
    pub fn from_spec(spec: &CharacterSpec, rng: GameRng) -> Self {
        Self {
            name: spec.name.clone(),
            position: Vec2::ZERO,
            size: spec.size,
            speed: spec.speed,
            power: spec.power,
            health: spec.max_health,
            max_health: spec.max_health,
            crit_chance: spec.crit_chance,
            crit_multiplier: spec.crit_multiplier,
            level: 1,
            experience: 0,
            hurt_timer: HURT_COOLDOWN_SECONDS,
            flash_timer: 0.0,
            rng,
        }
    }

    /// Advances the hurt and flash timers.
    pub fn decay_timers(&mut self, dt: f32) {
        self.hurt_timer += dt;
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
    }

    /// Returns `true` if the hurt cooldown has elapsed.
    pub fn can_be_hurt(&self) -> bool {
        self.hurt_timer >= HURT_COOLDOWN_SECONDS
    }

    /// Applies contact damage if the cooldown allows it, clamping health
    /// at zero. Returns `true` if damage was applied.
    pub fn take_contact_damage(&mut self, amount: f32) -> bool {
        if !self.can_be_hurt() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.hurt_timer = 0.0;
        self.flash_timer = PLAYER_FLASH_SECONDS;
        true
    }

    /// Returns `true` once health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Banks experience; returns `true` when a level threshold was
    /// crossed. Surplus experience carries into the new level.
    pub fn gain_experience(&mut self, amount: u32, curve: &ProgressionSpec) -> bool {
        self.experience += amount;
        let requirement = curve.requirement(self.level);
        if self.experience >= requirement {
            self.experience -= requirement;
            self.level += 1;
            log::info!("Player reached level {}.", self.level);
            true
        } else {
            false
        }
    }
}

impl Collidable for Player {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }

    fn is_active(&self) -> bool {
        !self.is_dead()
    }
}

impl DamageSource for Player {
    fn calculate_damage(&mut self, base_power: f32) -> (f32, bool) {
        let variance = self
            .rng
            .gen_range(1.0 - DAMAGE_VARIANCE..1.0 + DAMAGE_VARIANCE);
        let mut amount = base_power * self.power * variance;
        let critical = self.rng.roll(self.crit_chance);
        if critical {
            amount *= self.crit_multiplier;
        }
        (amount, critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn player() -> Player {
        let config = GameConfig::default();
        Player::from_spec(&config.characters[0], GameRng::new(42))
    }

    #[test]
    fn contact_damage_respects_the_cooldown() {
        let mut p = player();
        assert!(p.take_contact_damage(10.0));
        // Immediately afterwards the cooldown gate is closed.
        assert!(!p.take_contact_damage(10.0));
        assert_eq!(p.health, p.max_health - 10.0);

        p.decay_timers(HURT_COOLDOWN_SECONDS);
        assert!(p.take_contact_damage(10.0));
        assert_eq!(p.health, p.max_health - 20.0);
    }

    #[test]
    fn health_clamps_at_zero() {
        let mut p = player();
        assert!(p.take_contact_damage(p.max_health * 10.0));
        assert_eq!(p.health, 0.0);
        assert!(p.is_dead());
    }

    #[test]
    fn damage_variance_stays_in_band() {
        let mut p = player();
        p.crit_chance = 0.0;
        for _ in 0..200 {
            let (amount, critical) = p.calculate_damage(10.0);
            assert!(!critical);
            assert!((9.0..=11.0).contains(&amount), "amount {amount} off band");
        }
    }

    #[test]
    fn guaranteed_crit_multiplies_damage() {
        let mut p = player();
        p.crit_chance = 1.0;
        p.crit_multiplier = 2.0;
        let (amount, critical) = p.calculate_damage(10.0);
        assert!(critical);
        assert!(amount >= 18.0, "crit amount {amount} below floor");
    }

    #[test]
    fn leveling_carries_surplus_experience() {
        let config = GameConfig::default();
        let mut p = player();

        // Requirement for level 1 -> 2 is 20 under the default curve.
        assert!(!p.gain_experience(15, &config.progression));
        assert!(p.gain_experience(10, &config.progression));
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 5);
    }
}
