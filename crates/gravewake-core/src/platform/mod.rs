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

//! Capability contracts for the external collaborators the core talks to.
//!
//! Rendering, asset decoding and input polling are not this engine's
//! business: the core supplies world-space draw calls, logical asset paths
//! and control queries through the traits below, and whatever host embeds
//! the game provides the implementations. Null implementations are included
//! for headless runs and tests.

use crate::math::{Rect, Rgba, Vec2};
use std::sync::atomic::{AtomicU32, Ordering};

/// An opaque handle to a sprite resolved by the host's asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(
    /// Host-defined identifier; the core only carries it.
    pub u32,
);

/// Resolves logical asset paths to sprite handles.
///
/// Lookup failures during plugin init are fatal startup errors: a missing
/// sprite means a packaging defect, not a runtime condition, so callers
/// propagate the error out of init rather than recovering.
pub trait AssetCatalog {
    /// Resolves `path` to a sprite handle.
    fn sprite(&self, path: &str) -> anyhow::Result<SpriteHandle>;
}

/// An [`AssetCatalog`] that hands out sequential handles for every path.
///
/// Used by headless runs and tests, where no art exists to load.
#[derive(Debug, Default)]
pub struct NullCatalog {
    next: AtomicU32,
}

impl AssetCatalog for NullCatalog {
    fn sprite(&self, path: &str) -> anyhow::Result<SpriteHandle> {
        let handle = SpriteHandle(self.next.fetch_add(1, Ordering::Relaxed));
        log::debug!("NullCatalog resolved `{path}` to {handle:?}.");
        Ok(handle)
    }
}

/// A logical control the simulation can poll.
///
/// Mapping physical keys, buttons or axes onto these controls is the
/// host's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Move or navigate up.
    Up,
    /// Move or navigate down.
    Down,
    /// Move or navigate left.
    Left,
    /// Move or navigate right.
    Right,
    /// Accept, select or fire.
    Confirm,
    /// Back out of a menu.
    Cancel,
}

/// Polls the current state of a logical control.
///
/// Plugins poll once per update; the core neither buffers nor queues input
/// events.
pub trait InputSource {
    /// Returns `true` while `control` is held active.
    fn is_active(&self, control: Control) -> bool;
}

/// An [`InputSource`] with nothing ever pressed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInput;

impl InputSource for NullInput {
    fn is_active(&self, _control: Control) -> bool {
        false
    }
}

/// The draw-capable collaborator each plugin renders through.
///
/// The core supplies world-space coordinates and leaves rasterization
/// entirely to the implementation. Drawing has no error channel at this
/// layer.
pub trait DrawSurface {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draws a sprite centered at `position`.
    fn sprite(&mut self, sprite: SpriteHandle, position: Vec2);

    /// Draws a text string anchored at `position`.
    fn text(&mut self, text: &str, position: Vec2, color: Rgba);
}

/// A [`DrawSurface`] that only counts calls.
///
/// Useful for asserting that draw paths run without standing up a real
/// renderer.
#[derive(Debug, Default)]
pub struct NullSurface {
    /// Number of `fill_rect` calls received.
    pub rects: usize,
    /// Number of `sprite` calls received.
    pub sprites: usize,
    /// Number of `text` calls received.
    pub texts: usize,
}

impl DrawSurface for NullSurface {
    fn clear(&mut self, _color: Rgba) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {
        self.rects += 1;
    }

    fn sprite(&mut self, _sprite: SpriteHandle, _position: Vec2) {
        self.sprites += 1;
    }

    fn text(&mut self, _text: &str, _position: Vec2, _color: Rgba) {
        self.texts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_catalog_hands_out_distinct_handles() {
        let catalog = NullCatalog::default();
        let a = catalog.sprite("sprites/ghoul.png").unwrap();
        let b = catalog.sprite("sprites/gem.png").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn null_input_is_silent() {
        assert!(!NullInput.is_active(Control::Confirm));
    }

    #[test]
    fn null_surface_counts_calls() {
        let mut surface = NullSurface::default();
        surface.sprite(SpriteHandle(0), Vec2::ZERO);
        surface.text("hp", Vec2::ZERO, Rgba::WHITE);
        assert_eq!(surface.sprites, 1);
        assert_eq!(surface.texts, 1);
    }
}
