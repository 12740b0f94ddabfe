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

//! Combat resolution: every dealer against every live target, once per
//! tick.
//!
//! The pass matches each acquired ability against each live enemy and
//! lets the dealer decide whether it connected; hit policy (overlap
//! shape, once-per-target discipline) is the dealer's, damage policy
//! (variance, criticals) is the player's. Targets that reach zero health
//! stay in place for the rest of the pass so every pending hit this tick
//! resolves against them, then the kill list is retired in one sweep.

use crate::sim_world;
use gravewake_core::collide::Collidable;
use gravewake_core::plugin::{Plugin, TickContext};
use gravewake_data::enemy::DAMAGE_FLASH_SECONDS;
use gravewake_data::GameEvent;
use std::any::Any;

/// Runs the dealer-versus-target pass after movement has settled.
#[derive(Debug, Default)]
pub struct CombatPlugin;

impl CombatPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin<GameEvent> for CombatPlugin {
    fn id(&self) -> &str {
        "combat"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        let world = sim_world(ctx.world)?;
        let gravewake_data::world::World {
            player,
            enemies,
            abilities,
            damage_numbers,
            stats,
            ..
        } = world;

        let mut killed: Vec<usize> = Vec::new();

        for owned in abilities.ordered_mut() {
            for index in enemies.active_indices() {
                let Some(enemy) = enemies.get(index) else {
                    continue;
                };
                let bounds = enemy.bounds();
                let was_alive = enemy.health > 0.0;

                let Some(hit) = owned.ability.strike(index, &bounds, &mut *player) else {
                    continue;
                };

                enemies.apply_damage(index, hit.amount, hit.critical, damage_numbers);
                if let Some(enemy) = enemies.get_mut(index) {
                    enemy.flash_timer = DAMAGE_FLASH_SECONDS;
                }

                // Only the hit that crossed zero registers the kill;
                // later dealers may keep striking the body this tick
                // without doubling the death path.
                if was_alive && enemies.get(index).is_some_and(|e| e.health <= 0.0) {
                    killed.push(index);
                }
            }
        }

        for index in killed {
            let Some(enemy) = enemies.get(index) else {
                continue;
            };
            let position = enemy.position;
            let experience = enemy.experience;

            enemies.recycle(index);
            stats.kills += 1;
            log::debug!("Enemy down at {position:?}; total kills {}.", stats.kills);
            ctx.events.publish(GameEvent::EnemyKilled {
                position,
                experience,
            });
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
