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

//! # Gravewake Core
//!
//! Foundational crate containing traits, core types, and interface
//! contracts that define the game's architecture: the plugin capability
//! and its priority-ordered manager, the event bus, the root kernel, the
//! 2D math primitives, and the capability seams to the external renderer,
//! asset loader and input poller.

#![warn(missing_docs)]

pub mod collide;
pub mod event;
pub mod kernel;
pub mod math;
pub mod platform;
pub mod plugin;

pub use collide::Collidable;
pub use event::{Event, EventBus, Publisher};
pub use kernel::{Clock, Kernel};
pub use plugin::{DrawContext, InitContext, Plugin, PluginManager, TickContext};
