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

//! # Gravewake Plugins
//!
//! The gameplay subsystems the orchestrator registers with a
//! [`PluginManager`](gravewake_core::PluginManager): abilities, player,
//! enemy lifecycle, combat resolution, pickups, camera and HUD for the
//! Playing state, plus the menu, character-select and ability-choice
//! screens.
//!
//! Playing-state plugins share state exclusively through the
//! [`World`](gravewake_data::World) carried by the tick context; screen
//! plugins keep their cursor state to themselves and talk to the rest of
//! the game only by publishing events.

pub mod abilities;
pub mod camera;
pub mod combat;
pub mod enemies;
pub mod hud;
pub mod pickups;
pub mod player;
pub mod screens;

pub use abilities::AbilityPlugin;
pub use camera::CameraPlugin;
pub use combat::CombatPlugin;
pub use enemies::EnemyPlugin;
pub use hud::HudPlugin;
pub use pickups::PickupPlugin;
pub use player::PlayerPlugin;
pub use screens::{AbilityChoicePlugin, CharacterSelectPlugin, MenuPlugin};

use anyhow::Context;
use gravewake_data::World;
use std::any::Any;

/// Downcasts the tick context's type-erased world to the simulation
/// [`World`].
///
/// Playing-state plugins are only ever scheduled with a simulation world,
/// so a mismatch is a wiring bug and surfaces as a tick-aborting error.
pub(crate) fn sim_world(world: &mut dyn Any) -> anyhow::Result<&mut World> {
    world
        .downcast_mut::<World>()
        .context("tick context does not carry the simulation world")
}

/// Read-only variant of [`sim_world`] for draw paths, which have no error
/// channel; callers skip drawing when the world is absent.
pub(crate) fn sim_world_ref(world: &dyn Any) -> Option<&World> {
    world.downcast_ref::<World>()
}
