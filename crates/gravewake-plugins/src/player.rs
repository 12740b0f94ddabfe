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

//! Player movement, timers, and the death transition.

use crate::{sim_world, sim_world_ref};
use gravewake_core::collide::Collidable;
use gravewake_core::math::{Rgba, Vec2};
use gravewake_core::platform::{Control, SpriteHandle};
use gravewake_core::plugin::{DrawContext, InitContext, Plugin, TickContext};
use gravewake_data::GameEvent;
use std::any::Any;

/// Moves the player from polled input, advances its timers and reports
/// death exactly once.
#[derive(Debug, Default)]
pub struct PlayerPlugin {
    sprite: Option<SpriteHandle>,
    reported_death: bool,
}

impl PlayerPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin<GameEvent> for PlayerPlugin {
    fn id(&self) -> &str {
        "player"
    }

    fn init(&mut self, ctx: &mut InitContext<'_, GameEvent>) -> anyhow::Result<()> {
        self.sprite = Some(ctx.assets.sprite("sprites/player.png")?);
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        let world = sim_world(ctx.world)?;
        world.stats.elapsed += ctx.dt;

        let mut direction = Vec2::ZERO;
        if ctx.input.is_active(Control::Up) {
            direction.y -= 1.0;
        }
        if ctx.input.is_active(Control::Down) {
            direction.y += 1.0;
        }
        if ctx.input.is_active(Control::Left) {
            direction.x -= 1.0;
        }
        if ctx.input.is_active(Control::Right) {
            direction.x += 1.0;
        }

        let player = &mut world.player;
        if direction != Vec2::ZERO {
            let step = direction.normalize() * player.speed * ctx.dt;
            player.position = world.bounds.clamp_point(player.position + step);
        }
        player.decay_timers(ctx.dt);

        if player.is_dead() && !self.reported_death {
            self.reported_death = true;
            log::info!("Player died after {:.1}s.", world.stats.elapsed);
            ctx.events.publish(GameEvent::GameOver);
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(world) = sim_world_ref(ctx.world) else {
            return;
        };
        if let Some(sprite) = self.sprite {
            ctx.surface.sprite(sprite, world.player.position);
        }
        if world.player.flash_timer > 0.0 {
            ctx.surface
                .fill_rect(world.player.bounds(), Rgba::RED.with_alpha(0.5));
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
    use gravewake_core::platform::InputSource;
    use gravewake_data::config::GameConfig;
    use gravewake_data::World;

    struct HoldRight;

    impl InputSource for HoldRight {
        fn is_active(&self, control: Control) -> bool {
            control == Control::Right
        }
    }

    fn world() -> World {
        let config = GameConfig::default();
        let character = config.characters[0].clone();
        World::new(config, &character, 7)
    }

    #[test]
    fn held_direction_moves_the_player() {
        let mut plugin = PlayerPlugin::new();
        let mut world = world();
        let bus = EventBus::new();
        let input = HoldRight;

        let mut ctx = TickContext {
            dt: 0.1,
            events: bus.publisher(),
            input: &input,
            world: &mut world,
        };
        plugin.update(&mut ctx).unwrap();

        let expected = world.player.speed * 0.1;
        assert!((world.player.position.x - expected).abs() < 1e-4);
        assert_eq!(world.player.position.y, 0.0);
    }

    #[test]
    fn movement_stops_at_the_world_edge() {
        let mut plugin = PlayerPlugin::new();
        let mut world = world();
        world.player.position = Vec2::new(world.bounds.max.x - 1.0, 0.0);
        let bus = EventBus::new();
        let input = HoldRight;

        for _ in 0..10 {
            let mut ctx = TickContext {
                dt: 0.5,
                events: bus.publisher(),
                input: &input,
                world: &mut world,
            };
            plugin.update(&mut ctx).unwrap();
        }
        assert!(world.player.position.x <= world.bounds.max.x);
    }

    #[test]
    fn death_is_reported_once() {
        let mut plugin = PlayerPlugin::new();
        let mut world = world();
        world.player.health = 0.0;
        let bus = EventBus::new();
        let input = HoldRight;

        for _ in 0..3 {
            let mut ctx = TickContext {
                dt: 0.016,
                events: bus.publisher(),
                input: &input,
                world: &mut world,
            };
            plugin.update(&mut ctx).unwrap();
        }

        let mut game_overs = 0;
        bus.subscribe(gravewake_data::GameEventKind::GameOver, move |_| {});
        // Count by draining manually: each pending event invokes the one
        // handler above exactly once.
        game_overs += bus.dispatch_pending();
        assert_eq!(game_overs, 1);
    }
}
