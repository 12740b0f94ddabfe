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

//! Screen plugins for the non-Playing states.
//!
//! Each screen keeps its cursor to itself and talks to the orchestrator
//! only by publishing events; the orchestrator swaps managers in
//! response. Input is polled level-style, so the screens do their own
//! rising-edge detection.

use gravewake_core::math::{Rgba, Vec2};
use gravewake_core::platform::{Control, InputSource};
use gravewake_core::plugin::{DrawContext, Plugin, TickContext};
use gravewake_data::ability::AbilityKind;
use gravewake_data::config::CharacterSpec;
use gravewake_data::GameEvent;
use std::any::Any;

/// Rising-edge detector over a polled control.
#[derive(Debug, Default)]
struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    /// Returns `true` only on the tick the control goes down.
    fn fired(&mut self, down: bool) -> bool {
        let fired = down && !self.held;
        self.held = down;
        fired
    }
}

/// The title screen. Confirm opens character select.
#[derive(Debug, Default)]
pub struct MenuPlugin {
    confirm: EdgeTrigger,
}

impl MenuPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin<GameEvent> for MenuPlugin {
    fn id(&self) -> &str {
        "menu"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        if self.confirm.fired(ctx.input.is_active(Control::Confirm)) {
            ctx.events.publish(GameEvent::OpenCharacterSelect);
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        ctx.surface.clear(Rgba::BLACK);
        ctx.surface
            .text("GRAVEWAKE", Vec2::new(220.0, 120.0), Rgba::WHITE);
        ctx.surface.text(
            "press confirm",
            Vec2::new(232.0, 180.0),
            Rgba::WHITE.with_alpha(0.7),
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Character selection. Left/right move the cursor, confirm starts the
/// run with the highlighted class.
pub struct CharacterSelectPlugin {
    characters: Vec<CharacterSpec>,
    cursor: usize,
    left: EdgeTrigger,
    right: EdgeTrigger,
    confirm: EdgeTrigger,
}

impl CharacterSelectPlugin {
    /// Creates the screen over the configured class list.
    pub fn new(characters: Vec<CharacterSpec>) -> Self {
        Self {
            characters,
            cursor: 0,
            left: EdgeTrigger::default(),
            right: EdgeTrigger::default(),
            confirm: EdgeTrigger::default(),
        }
    }

    /// The currently highlighted class.
    pub fn selected(&self) -> Option<&CharacterSpec> {
        self.characters.get(self.cursor)
    }

    fn poll(&mut self, input: &dyn InputSource) -> (bool, bool, bool) {
        (
            self.left.fired(input.is_active(Control::Left)),
            self.right.fired(input.is_active(Control::Right)),
            self.confirm.fired(input.is_active(Control::Confirm)),
        )
    }
}

impl Plugin<GameEvent> for CharacterSelectPlugin {
    fn id(&self) -> &str {
        "character_select"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        if self.characters.is_empty() {
            anyhow::bail!("no character classes configured");
        }

        let (left, right, confirm) = self.poll(ctx.input);
        if left {
            self.cursor = (self.cursor + self.characters.len() - 1) % self.characters.len();
        }
        if right {
            self.cursor = (self.cursor + 1) % self.characters.len();
        }
        if confirm {
            let chosen = self.characters[self.cursor].clone();
            log::info!("Starting run as {}.", chosen.name);
            ctx.events.publish(GameEvent::StartGame(chosen));
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        ctx.surface.clear(Rgba::BLACK);
        for (index, character) in self.characters.iter().enumerate() {
            let marker = if index == self.cursor { "> " } else { "  " };
            ctx.surface.text(
                &format!("{marker}{}", character.name),
                Vec2::new(200.0, 120.0 + 24.0 * index as f32),
                Rgba::WHITE,
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

/// The level-up screen over a fixed set of offers. Confirm grants the
/// highlighted one, which resolves the pause.
pub struct AbilityChoicePlugin {
    offers: Vec<AbilityKind>,
    cursor: usize,
    left: EdgeTrigger,
    right: EdgeTrigger,
    confirm: EdgeTrigger,
}

impl AbilityChoicePlugin {
    /// Creates the screen over the offers rolled for this level-up.
    pub fn new(offers: Vec<AbilityKind>) -> Self {
        Self {
            offers,
            cursor: 0,
            left: EdgeTrigger::default(),
            right: EdgeTrigger::default(),
            confirm: EdgeTrigger::default(),
        }
    }
}

impl Plugin<GameEvent> for AbilityChoicePlugin {
    fn id(&self) -> &str {
        "ability_choice"
    }

    fn update(&mut self, ctx: &mut TickContext<'_, GameEvent>) -> anyhow::Result<()> {
        if self.offers.is_empty() {
            anyhow::bail!("ability choice screen opened with no offers");
        }

        if self.left.fired(ctx.input.is_active(Control::Left)) {
            self.cursor = (self.cursor + self.offers.len() - 1) % self.offers.len();
        }
        if self.right.fired(ctx.input.is_active(Control::Right)) {
            self.cursor = (self.cursor + 1) % self.offers.len();
        }
        if self.confirm.fired(ctx.input.is_active(Control::Confirm)) {
            ctx.events.publish(GameEvent::NewAbility(self.offers[self.cursor]));
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        for (index, kind) in self.offers.iter().enumerate() {
            let marker = if index == self.cursor { "> " } else { "  " };
            ctx.surface.text(
                &format!("{marker}{}", kind.display_name()),
                Vec2::new(200.0, 140.0 + 24.0 * index as f32),
                Rgba::YELLOW,
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
