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

//! The root scheduler: one clock, one event bus, one tick entry point.

use crate::event::{Event, EventBus};
use crate::platform::{DrawSurface, InputSource};
use crate::plugin::{DrawContext, PluginManager, TickContext};
use std::any::Any;
use std::time::Instant;

/// The simulation clock.
///
/// Wall-clock time is sampled in exactly one place per frame so that every
/// plugin observes the same delta within a tick. The raw delta is scaled by
/// a mutable `time_scale` multiplier; setting the scale to `0.0` freezes
/// simulation time without stopping the tick loop.
#[derive(Debug)]
pub struct Clock {
    last_tick: Option<Instant>,
    delta_time: f32,
    time_scale: f32,
}

impl Clock {
    /// Creates a clock that has not yet ticked.
    pub fn new() -> Self {
        Self {
            last_tick: None,
            delta_time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Samples the wall clock and returns the scaled delta since the
    /// previous tick. The first tick returns `0.0`.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = match self.last_tick {
            Some(last) => (now - last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.delta_time = raw * self.time_scale;
        self.delta_time
    }

    /// Advances the clock by a caller-supplied raw delta instead of
    /// sampling the wall clock. Fixed-step drivers and headless harnesses
    /// use this; the scale multiplier still applies.
    pub fn force(&mut self, raw_dt: f32) -> f32 {
        self.last_tick = Some(Instant::now());
        self.delta_time = raw_dt * self.time_scale;
        self.delta_time
    }

    /// The scaled delta of the most recent tick, in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// The current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Sets the time-scale multiplier applied to subsequent ticks.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// The root scheduler.
///
/// Owns the process-wide [`Clock`] and the single shared [`EventBus`], and
/// drives whichever [`PluginManager`] the orchestrator hands it each frame.
/// One instance lives for the life of the game.
pub struct Kernel<E: Event> {
    clock: Clock,
    bus: EventBus<E>,
}

impl<E: Event> Kernel<E> {
    /// Creates a kernel with a fresh clock and bus.
    pub fn new() -> Self {
        Self {
            clock: Clock::new(),
            bus: EventBus::new(),
        }
    }

    /// The single per-frame update entry point.
    ///
    /// Samples the clock once, drains pending events (handlers run here,
    /// on this thread), then updates every plugin of `manager` in priority
    /// order. A plugin failure aborts the remainder of the tick.
    pub fn update(
        &mut self,
        manager: &mut PluginManager<E>,
        world: &mut dyn Any,
        input: &dyn InputSource,
    ) -> anyhow::Result<()> {
        let dt = self.clock.tick();
        self.run_tick(dt, manager, world, input)
    }

    /// Fixed-step variant of [`update`](Kernel::update): advances the
    /// simulation by `raw_dt` seconds (before time scaling) instead of
    /// sampling the wall clock.
    pub fn update_fixed(
        &mut self,
        raw_dt: f32,
        manager: &mut PluginManager<E>,
        world: &mut dyn Any,
        input: &dyn InputSource,
    ) -> anyhow::Result<()> {
        let dt = self.clock.force(raw_dt);
        self.run_tick(dt, manager, world, input)
    }

    fn run_tick(
        &mut self,
        dt: f32,
        manager: &mut PluginManager<E>,
        world: &mut dyn Any,
        input: &dyn InputSource,
    ) -> anyhow::Result<()> {
        self.bus.dispatch_pending();
        let mut ctx = TickContext {
            dt,
            events: self.bus.publisher(),
            input,
            world,
        };
        manager.update_all(&mut ctx)
    }

    /// The per-frame draw entry point, mirroring the update order.
    pub fn draw(
        &self,
        manager: &PluginManager<E>,
        world: &dyn Any,
        surface: &mut dyn DrawSurface,
    ) {
        let mut ctx = DrawContext { surface, world };
        manager.draw_all(&mut ctx);
    }

    /// The shared event bus.
    pub fn bus(&self) -> &EventBus<E> {
        &self.bus
    }

    /// The simulation clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable access to the clock, e.g. to change the time scale.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

impl<E: Event> Default for Kernel<E> {
    fn default() -> Self {
        Self::new()
    }
}
