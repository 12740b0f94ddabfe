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

//! Run statistics and floating damage numbers, drawn last.

use crate::{sim_world, sim_world_ref};
use gravewake_core::math::{Rgba, Vec2};
use gravewake_core::plugin::{DrawContext, Plugin, TickContext};
use gravewake_data::GameEvent;
use std::any::Any;

/// Draws the stat readout and this tick's damage numbers.
#[derive(Debug, Default)]
pub struct HudPlugin;

impl HudPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin<GameEvent> for HudPlugin {
    fn id(&self) -> &str {
        "hud"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        // Stats accumulate elsewhere; the HUD only needs the world to be
        // present, which doubles as a wiring check in debug runs.
        sim_world(ctx.world)?;
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(world) = sim_world_ref(ctx.world) else {
            return;
        };

        let player = &world.player;
        let readout = format!(
            "{}  hp {:.0}/{:.0}  lv {}  xp {}  kills {}  {:.0}s",
            player.name,
            player.health,
            player.max_health,
            player.level,
            player.experience,
            world.stats.kills,
            world.stats.elapsed,
        );
        ctx.surface.text(&readout, Vec2::new(8.0, 8.0), Rgba::WHITE);

        for number in &world.damage_numbers {
            let color = if number.critical {
                Rgba::YELLOW
            } else {
                Rgba::WHITE
            };
            // Drift upward as the number ages.
            let offset = Vec2::new(0.0, -12.0 * (1.0 - number.ttl));
            ctx.surface.text(
                &format!("{:.0}", number.value),
                number.position + offset,
                color,
            );
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
