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

//! # Gravewake Data
//!
//! Simulation state for the survivors-like core: entities and their
//! recycle pools, the player, the ability book, stat templates, the
//! deterministic RNG, and the shared [`World`](world::World) every
//! gameplay plugin operates on.

#![warn(missing_docs)]

pub mod ability;
pub mod config;
pub mod enemy;
pub mod event;
pub mod pickup;
pub mod player;
pub mod pool;
pub mod rng;
pub mod spawn;
pub mod world;

pub use config::GameConfig;
pub use event::{GameEvent, GameEventKind};
pub use rng::GameRng;
pub use world::World;
