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

//! Experience pickups dropped by dying enemies.

use crate::pool::{Pool, Poolable};
use gravewake_core::collide::Collidable;
use gravewake_core::math::{Rect, Vec2};

/// Side length of a gem's square bounds.
const GEM_SIZE: f32 = 6.0;

/// World units per second a magnetized gem flies at.
const MAGNET_SPEED: f32 = 240.0;

/// Distance at which a gem starts homing on the collector.
const MAGNET_RADIUS: f32 = 48.0;

/// An experience gem lying in the world.
#[derive(Debug, Default)]
pub struct Pickup {
    /// Center position in world space.
    pub position: Vec2,
    /// Experience granted on collection.
    pub experience: u32,
    active: bool,
}

impl Poolable for Pickup {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Collidable for Pickup {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(GEM_SIZE))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// The set of live gems plus the recycle pool behind them.
#[derive(Debug)]
pub struct PickupPool {
    pool: Pool<Pickup>,
}

impl PickupPool {
    /// Creates a pool capped at `max_alive` live gems.
    pub fn new(max_alive: usize) -> Self {
        Self {
            pool: Pool::new(max_alive),
        }
    }

    /// Drops a gem at `position`. At the cap the drop is silently lost,
    /// which beats unbounded growth during a screen-filling massacre.
    pub fn drop_gem(&mut self, position: Vec2, experience: u32) -> Option<usize> {
        let index = self.pool.spawn(|gem| {
            gem.position = position;
            gem.experience = experience;
        });
        if index.is_none() {
            log::debug!("Pickup cap reached; dropping reward on the floor.");
        }
        index
    }

    /// Magnetizes nearby gems toward `collector` and collects overlapping
    /// ones. Returns the total experience collected this tick.
    pub fn attract_and_collect(&mut self, collector: &Rect, dt: f32) -> u32 {
        let target = collector.center();
        let mut collected = 0;
        let mut taken = Vec::new();

        for (index, gem) in self.pool.iter_active_mut() {
            let distance = gem.position.distance(target);
            if distance <= MAGNET_RADIUS {
                let step = (target - gem.position).normalize() * MAGNET_SPEED * dt;
                gem.position += step;
            }
            if Collidable::bounds(gem).overlaps(collector) {
                collected += gem.experience;
                taken.push(index);
            }
        }

        for index in taken {
            self.pool.recycle(index);
        }
        collected
    }

    /// Number of live gems.
    pub fn active_len(&self) -> usize {
        self.pool.active_len()
    }

    /// Iterates over `(index, gem)` for every live gem.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Pickup)> {
        self.pool.iter_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_gem_is_collected_once() {
        let mut pool = PickupPool::new(8);
        pool.drop_gem(Vec2::ZERO, 5).unwrap();

        let collector = Rect::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        assert_eq!(pool.attract_and_collect(&collector, 0.016), 5);
        assert_eq!(pool.active_len(), 0);
        // Nothing left for the next tick.
        assert_eq!(pool.attract_and_collect(&collector, 0.016), 0);
    }

    #[test]
    fn distant_gem_stays_put() {
        let mut pool = PickupPool::new(8);
        let index = pool.drop_gem(Vec2::new(500.0, 0.0), 5).unwrap();

        let collector = Rect::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        assert_eq!(pool.attract_and_collect(&collector, 0.016), 0);

        let gem = pool.pool.get(index).unwrap();
        assert_eq!(gem.position, Vec2::new(500.0, 0.0));
    }

    #[test]
    fn gem_inside_magnet_radius_homes_in() {
        let mut pool = PickupPool::new(8);
        let index = pool.drop_gem(Vec2::new(40.0, 0.0), 5).unwrap();

        let collector = Rect::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        pool.attract_and_collect(&collector, 0.05);

        let gem = pool.pool.get(index).unwrap();
        assert!(gem.position.x < 40.0, "gem did not move toward collector");
    }

    #[test]
    fn drops_beyond_cap_are_lost() {
        let mut pool = PickupPool::new(2);
        assert!(pool.drop_gem(Vec2::ZERO, 1).is_some());
        assert!(pool.drop_gem(Vec2::ZERO, 1).is_some());
        assert!(pool.drop_gem(Vec2::ZERO, 1).is_none());
    }
}
