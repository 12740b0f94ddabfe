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

//! Enemy lifecycle: cadenced spawning at the view's edge, steering toward
//! the player, contact damage, and recycling of strays.

use crate::{sim_world, sim_world_ref};
use gravewake_core::collide::Collidable;
use gravewake_core::math::Rgba;
use gravewake_core::platform::SpriteHandle;
use gravewake_core::plugin::{DrawContext, InitContext, Plugin, TickContext};
use gravewake_data::spawn::{edge_position, Spawner};
use gravewake_data::GameEvent;
use std::any::Any;

/// Drives the enemy pool each tick.
#[derive(Debug, Default)]
pub struct EnemyPlugin {
    spawner: Spawner,
    sprite: Option<SpriteHandle>,
}

impl EnemyPlugin {
    /// Creates the plugin with an empty spawn timer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin<GameEvent> for EnemyPlugin {
    fn id(&self) -> &str {
        "enemies"
    }

    fn init(&mut self, ctx: &mut InitContext<'_, GameEvent>) -> anyhow::Result<()> {
        self.sprite = Some(ctx.assets.sprite("sprites/ghoul.png")?);
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        let world = sim_world(ctx.world)?;

        world.enemies.decay_timers(ctx.dt);
        world.decay_damage_numbers(ctx.dt);

        // Cadence fires the attempt; the pool's population cap decides
        // whether anything actually spawns.
        if self.spawner.tick(ctx.dt, world.config.spawning.interval) {
            let position = edge_position(
                &mut world.rng,
                world.player.position,
                &world.config.spawning,
                &world.bounds,
            );
            if world.enemies.spawn(&world.config.enemy, position).is_none() {
                log::trace!("Spawn refused at population cap.");
            }
        }

        let target = world.player.position;
        for index in world.enemies.active_indices() {
            world.enemies.advance_toward(index, target, ctx.dt);
        }

        // Contact damage and stray cleanup in one scan.
        let player_bounds = world.player.bounds();
        let mut touching_power: Option<f32> = None;
        let mut strays = Vec::new();
        for (index, enemy) in world.enemies.iter_active() {
            if enemy.position.distance(target) > world.config.spawning.despawn_distance {
                strays.push(index);
                continue;
            }
            if enemy.bounds().overlaps(&player_bounds) {
                touching_power = Some(touching_power.unwrap_or(0.0).max(enemy.power));
            }
        }
        for index in strays {
            world.enemies.recycle(index);
        }
        if let Some(power) = touching_power {
            world.player.take_contact_damage(power);
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(world) = sim_world_ref(ctx.world) else {
            return;
        };
        for (_, enemy) in world.enemies.iter_active() {
            if let Some(sprite) = self.sprite {
                ctx.surface.sprite(sprite, enemy.position);
            }
            if enemy.flash_timer > 0.0 {
                ctx.surface
                    .fill_rect(enemy.bounds(), Rgba::WHITE.with_alpha(0.6));
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravewake_core::event::EventBus;
    use gravewake_core::math::Vec2;
    use gravewake_core::platform::NullInput;
    use gravewake_data::config::GameConfig;
    use gravewake_data::World;

    fn world() -> World {
        let config = GameConfig::default();
        let character = config.characters[0].clone();
        World::new(config, &character, 99)
    }

    fn run_tick(plugin: &mut EnemyPlugin, world: &mut World, dt: f32) {
        let bus = EventBus::new();
        let input = NullInput;
        let mut ctx = TickContext {
            dt,
            events: bus.publisher(),
            input: &input,
            world,
        };
        plugin.update(&mut ctx).unwrap();
    }

    #[test]
    fn spawns_on_cadence_until_the_cap() {
        let mut plugin = EnemyPlugin::new();
        let mut world = world();
        world.config.spawning.max_alive = 3;
        let interval = world.config.spawning.interval;

        for _ in 0..10 {
            run_tick(&mut plugin, &mut world, interval);
        }

        assert_eq!(world.enemies.active_len(), 3);
        // The arena never grew past the cap either.
        assert!(world.enemies.allocated() <= 3);
    }

    #[test]
    fn enemies_walk_toward_the_player() {
        let mut plugin = EnemyPlugin::new();
        let mut world = world();
        let spec = world.config.enemy.clone();
        let index = world.enemies.spawn(&spec, Vec2::new(200.0, 0.0)).unwrap();

        run_tick(&mut plugin, &mut world, 0.1);

        let enemy = world.enemies.get(index).unwrap();
        assert!(enemy.position.x < 200.0);
    }

    #[test]
    fn touching_enemy_hurts_the_player_through_the_cooldown_gate() {
        let mut plugin = EnemyPlugin::new();
        let mut world = world();
        let spec = world.config.enemy.clone();
        world.enemies.spawn(&spec, world.player.position).unwrap();
        let full = world.player.max_health;

        run_tick(&mut plugin, &mut world, 0.016);
        assert_eq!(world.player.health, full - spec.power);

        // Immediately touching again does nothing; the hurt cooldown is
        // still running.
        run_tick(&mut plugin, &mut world, 0.016);
        assert_eq!(world.player.health, full - spec.power);
    }

    #[test]
    fn stray_enemies_are_recycled() {
        let mut plugin = EnemyPlugin::new();
        let mut world = world();
        let spec = world.config.enemy.clone();
        let far = world.config.spawning.despawn_distance + 100.0;
        world.enemies.spawn(&spec, Vec2::new(far, 0.0)).unwrap();

        run_tick(&mut plugin, &mut world, 0.016);
        assert_eq!(world.enemies.active_len(), 0);
    }
}
