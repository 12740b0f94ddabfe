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

//! The capability any entity exposes to participate in overlap testing.

use crate::math::Rect;

/// A capability for entities that occupy space in the world.
///
/// An entity's bounds are only meaningful while it is active; consumers
/// must check [`is_active`](Collidable::is_active) before using the bounds
/// for gameplay decisions. Inactive entities are either awaiting recycling
/// or parked in a pool slot.
pub trait Collidable {
    /// Returns the entity's current axis-aligned bounds.
    fn bounds(&self) -> Rect;

    /// Returns `true` while the entity participates in update, draw and
    /// collision.
    fn is_active(&self) -> bool;
}

/// Returns `true` if both collidables are active and their bounds overlap.
#[inline]
pub fn active_overlap(a: &dyn Collidable, b: &dyn Collidable) -> bool {
    a.is_active() && b.is_active() && a.bounds().overlaps(&b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    struct Dot {
        bounds: Rect,
        active: bool,
    }

    impl Collidable for Dot {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[test]
    fn inactive_entities_never_overlap() {
        let bounds = Rect::from_center_size(Vec2::ZERO, Vec2::splat(2.0));
        let a = Dot {
            bounds,
            active: true,
        };
        let b = Dot {
            bounds,
            active: false,
        };

        assert!(!active_overlap(&a, &b));

        let b = Dot {
            bounds,
            active: true,
        };
        assert!(active_overlap(&a, &b));
    }
}
