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

//! Gem magnetism, collection, and the level-up transition.

use crate::{sim_world, sim_world_ref};
use gravewake_core::collide::Collidable;
use gravewake_core::platform::SpriteHandle;
use gravewake_core::plugin::{DrawContext, InitContext, Plugin, TickContext};
use gravewake_data::GameEvent;
use std::any::Any;

/// Collects experience gems into the player and announces level-ups.
#[derive(Debug, Default)]
pub struct PickupPlugin {
    sprite: Option<SpriteHandle>,
}

impl PickupPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin<GameEvent> for PickupPlugin {
    fn id(&self) -> &str {
        "pickups"
    }

    fn init(&mut self, ctx: &mut InitContext<'_, GameEvent>) -> anyhow::Result<()> {
        self.sprite = Some(ctx.assets.sprite("sprites/gem.png")?);
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        let world = sim_world(ctx.world)?;

        let bounds = world.player.bounds();
        let collected = world.pickups.attract_and_collect(&bounds, ctx.dt);
        if collected == 0 {
            return Ok(());
        }

        if world
            .player
            .gain_experience(collected, &world.config.progression)
        {
            ctx.events.publish(GameEvent::ChoosingAbility);
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(world) = sim_world_ref(ctx.world) else {
            return;
        };
        let Some(sprite) = self.sprite else {
            return;
        };
        for (_, gem) in world.pickups.iter_active() {
            ctx.surface.sprite(sprite, gem.position);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
