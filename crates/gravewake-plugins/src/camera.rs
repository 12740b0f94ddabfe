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

//! Keeps the camera trailing the player.
//!
//! Scheduled after combat so the view reflects the tick's final
//! positions, deaths included.

use crate::sim_world;
use gravewake_core::plugin::{Plugin, TickContext};
use gravewake_data::GameEvent;
use std::any::Any;

/// Eases the camera focus toward the player every tick.
#[derive(Debug, Default)]
pub struct CameraPlugin;

impl CameraPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin<GameEvent> for CameraPlugin {
    fn id(&self) -> &str {
        "camera"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        let world = sim_world(ctx.world)?;
        let target = world.player.position;
        world.camera.follow(target, ctx.dt);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
