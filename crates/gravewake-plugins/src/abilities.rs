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

//! Advances every acquired ability's projectiles and timers.
//!
//! Runs before the player and well before combat, so by the time the
//! combat pass queries hits, every dealer's effects are where this tick
//! says they are.

use crate::{sim_world, sim_world_ref};
use gravewake_core::plugin::{DrawContext, Plugin, TickContext};
use gravewake_data::ability::AbilityTick;
use gravewake_data::GameEvent;
use std::any::Any;

/// Drives [`AbilityBook`](gravewake_data::ability::AbilityBook) updates in
/// acquisition order.
#[derive(Debug, Default)]
pub struct AbilityPlugin;

impl AbilityPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin<GameEvent> for AbilityPlugin {
    fn id(&self) -> &str {
        "abilities"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        let world = sim_world(ctx.world)?;
        let tick = AbilityTick {
            origin: world.player.position,
            nearest_enemy: world.nearest_enemy_to(world.player.position),
            dt: ctx.dt,
        };

        for owned in world.abilities.ordered_mut() {
            owned.ability.update(&tick);
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(world) = sim_world_ref(ctx.world) else {
            return;
        };
        for owned in world.abilities.ordered() {
            owned.ability.draw(ctx.surface);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
