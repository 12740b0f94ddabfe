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

//! The plugin capability contract and the priority-ordered registry that
//! drives the per-tick update/draw cycle.

mod manager;

pub use self::manager::PluginManager;

use crate::event::{Event, EventBus, Publisher};
use crate::platform::{AssetCatalog, DrawSurface, InputSource};
use std::any::Any;

/// Context handed to every plugin once, before the first tick.
pub struct InitContext<'a, E: Event> {
    /// The host's asset loader. Lookup failures here are fatal.
    pub assets: &'a dyn AssetCatalog,
    /// The kernel's event bus, for subscriptions and publisher handles.
    pub events: &'a EventBus<E>,
}

/// Context handed to every plugin on every update tick.
///
/// All plugins within one tick observe the same `dt`; the kernel samples
/// the wall clock exactly once per frame.
pub struct TickContext<'a, E: Event> {
    /// Seconds elapsed since the previous tick, already time-scaled.
    pub dt: f32,
    /// Publish-only handle to the kernel's event bus.
    pub events: Publisher<E>,
    /// The host's input poller.
    pub input: &'a dyn InputSource,
    /// The shared simulation state, type-erased so this crate stays
    /// decoupled from the concrete world defined above it. Plugins
    /// downcast internally.
    pub world: &'a mut dyn Any,
}

/// Context handed to every plugin on every draw tick.
pub struct DrawContext<'a> {
    /// The surface to render into.
    pub surface: &'a mut dyn DrawSurface,
    /// Read-only view of the shared simulation state, type-erased.
    pub world: &'a dyn Any,
}

/// An independently updatable and drawable gameplay subsystem.
///
/// Plugins are constructed once, initialized with [`init`](Plugin::init),
/// then receive [`update`](Plugin::update) and [`draw`](Plugin::draw) once
/// per tick for the life of their owning [`PluginManager`]. They are never
/// torn down individually; a state transition clears and rebuilds the whole
/// manager.
pub trait Plugin<E: Event>: Send {
    /// Returns the unique identifier this plugin registers under.
    fn id(&self) -> &str;

    /// One-time setup. Asset lookups belong here so that a missing asset
    /// aborts startup instead of surfacing mid-run.
    fn init(&mut self, _ctx: &mut InitContext<'_, E>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Advances the plugin's slice of the simulation by `ctx.dt` seconds.
    ///
    /// An error here abandons the remainder of the tick: plugin state is
    /// interdependent within a frame, so a broken subsystem must not let
    /// the frame continue in an inconsistent state.
    fn update(&mut self, ctx: &mut TickContext<'_, E>) -> anyhow::Result<()>;

    /// Renders the plugin's slice of the world. Infallible at this layer.
    fn draw(&self, _ctx: &mut DrawContext<'_>) {}

    /// Allows downcasting to concrete plugin types.
    fn as_any(&self) -> &dyn Any;

    /// Allows mutable downcasting to concrete plugin types.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
