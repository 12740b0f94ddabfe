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

//! # Gravewake Game
//!
//! The state orchestrator: owns the kernel, the simulation world and the
//! active plugin manager, listens on the event bus for high-level
//! transitions, and swaps plugin sets as the game moves between its
//! states.

#![warn(missing_docs)]

pub mod orchestrator;

pub use orchestrator::{Game, Stage};
