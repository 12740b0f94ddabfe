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

//! Stat templates and tuning constants, loaded as data.
//!
//! Balancing numbers are content, not code: the runtime deserializes a
//! [`GameConfig`] at startup and a load failure is a fatal packaging
//! error. The `Default` values below are representative and are what the
//! test suite runs against.

use crate::ability::AbilityKind;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A selectable character class template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSpec {
    /// Display name of the class.
    pub name: String,
    /// Hit points at the start of a run.
    pub max_health: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damage multiplier applied to every ability's base power.
    pub power: f32,
    /// Probability of a critical hit, `0.0..=1.0`.
    pub crit_chance: f32,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f32,
    /// Side length of the square bounds.
    pub size: f32,
    /// The ability granted when a run starts.
    pub starting_ability: AbilityKind,
}

/// The stat template every spawned enemy is stamped from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpec {
    /// Hit points on spawn (and after recycling).
    pub max_health: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Contact damage dealt to the player.
    pub power: f32,
    /// Side length of the square bounds.
    pub size: f32,
    /// Experience dropped on death.
    pub experience: u32,
}

/// Spawn cadence and population policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Seconds between spawn attempts.
    pub interval: f32,
    /// Population cap: spawn attempts are refused at or above this count.
    pub max_alive: usize,
    /// Half-extent of the view rectangle around the anchor; spawns land
    /// just outside it.
    pub view_half_width: f32,
    /// See `view_half_width`.
    pub view_half_height: f32,
    /// How far beyond the view edge entities enter from.
    pub margin: f32,
    /// Entities farther than this from the anchor are recycled.
    pub despawn_distance: f32,
}

/// Experience thresholds for leveling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionSpec {
    /// Experience required to reach level 2.
    pub base_experience: u32,
    /// Additional experience required per level beyond the first.
    pub growth: u32,
}

impl ProgressionSpec {
    /// Experience needed to advance from `level` to `level + 1`.
    pub fn requirement(&self, level: u32) -> u32 {
        self.base_experience + self.growth * level.saturating_sub(1)
    }
}

/// World extents, centered on the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpec {
    /// Full width of the playable area.
    pub width: f32,
    /// Full height of the playable area.
    pub height: f32,
}

/// Root of the data-driven tuning tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Selectable character classes, in menu order.
    pub characters: Vec<CharacterSpec>,
    /// The enemy template.
    pub enemy: EnemySpec,
    /// Spawn policy.
    pub spawning: SpawnSpec,
    /// Level curve.
    pub progression: ProgressionSpec,
    /// Playable area.
    pub world: WorldSpec,
}

impl GameConfig {
    /// Parses a config from its JSON representation.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse game config")
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            characters: vec![
                CharacterSpec {
                    name: "Warden".to_owned(),
                    max_health: 120.0,
                    speed: 85.0,
                    power: 1.0,
                    crit_chance: 0.10,
                    crit_multiplier: 2.0,
                    size: 14.0,
                    starting_ability: AbilityKind::Bolt,
                },
                CharacterSpec {
                    name: "Revenant".to_owned(),
                    max_health: 90.0,
                    speed: 110.0,
                    power: 1.2,
                    crit_chance: 0.20,
                    crit_multiplier: 2.5,
                    size: 14.0,
                    starting_ability: AbilityKind::Glaive,
                },
            ],
            enemy: EnemySpec {
                max_health: 30.0,
                speed: 40.0,
                power: 8.0,
                size: 12.0,
                experience: 5,
            },
            spawning: SpawnSpec {
                interval: 0.8,
                max_alive: 64,
                view_half_width: 320.0,
                view_half_height: 180.0,
                margin: 24.0,
                despawn_distance: 900.0,
            },
            progression: ProgressionSpec {
                base_experience: 20,
                growth: 15,
            },
            world: WorldSpec {
                width: 2400.0,
                height: 2400.0,
            },
        }
    }
}
