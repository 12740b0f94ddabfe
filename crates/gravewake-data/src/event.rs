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

//! The concrete event set carried by the kernel's bus.

use crate::ability::AbilityKind;
use crate::config::CharacterSpec;
use gravewake_core::event::Event;
use gravewake_core::math::Vec2;

/// Every message exchanged between gameplay subsystems.
///
/// Payload shape is part of the per-variant contract: `StartGame` carries
/// the selected character template, `NewAbility` the ability to grant, and
/// so on.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Leave the title menu for the character select screen.
    OpenCharacterSelect,
    /// Begin a run with the given character. Published by the character
    /// select screen.
    StartGame(CharacterSpec),
    /// Grant an ability (or a level of one already owned) and return to
    /// the Playing state.
    NewAbility(AbilityKind),
    /// The player leveled up; pause the run and present ability choices.
    ChoosingAbility,
    /// The player died; return to the menu.
    GameOver,
    /// An enemy was killed this tick. Subscribers drop the reward.
    EnemyKilled {
        /// Where the enemy died.
        position: Vec2,
        /// Experience carried by the dropped pickup.
        experience: u32,
    },
}

/// Field-less mirror of [`GameEvent`] used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    /// See [`GameEvent::OpenCharacterSelect`].
    OpenCharacterSelect,
    /// See [`GameEvent::StartGame`].
    StartGame,
    /// See [`GameEvent::NewAbility`].
    NewAbility,
    /// See [`GameEvent::ChoosingAbility`].
    ChoosingAbility,
    /// See [`GameEvent::GameOver`].
    GameOver,
    /// See [`GameEvent::EnemyKilled`].
    EnemyKilled,
}

impl Event for GameEvent {
    type Kind = GameEventKind;

    fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::OpenCharacterSelect => GameEventKind::OpenCharacterSelect,
            GameEvent::StartGame(_) => GameEventKind::StartGame,
            GameEvent::NewAbility(_) => GameEventKind::NewAbility,
            GameEvent::ChoosingAbility => GameEventKind::ChoosingAbility,
            GameEvent::GameOver => GameEventKind::GameOver,
            GameEvent::EnemyKilled { .. } => GameEventKind::EnemyKilled,
        }
    }
}
