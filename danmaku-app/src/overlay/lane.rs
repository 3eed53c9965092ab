//! Lane allocation: fixed horizontal tracks so banners never overlap.

use std::collections::BTreeSet;

/// Index of one lane, `0` being the topmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneId(pub usize);

impl LaneId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Occupancy-tracked pool of lanes.
///
/// `acquire` hands out the lowest free index. `release` is idempotent so a
/// duplicate completion can never free a lane someone else now holds twice.
#[derive(Debug, Clone)]
pub struct LaneAllocator {
    capacity: usize,
    free: BTreeSet<usize>,
}

impl LaneAllocator {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free: (0..capacity).collect(),
        }
    }

    pub fn acquire(&mut self) -> Option<LaneId> {
        self.free.pop_first().map(LaneId)
    }

    /// Return a lane to the pool. Returns `false` if it was not occupied.
    pub fn release(&mut self, lane: LaneId) -> bool {
        if lane.0 >= self.capacity {
            tracing::warn!(lane = lane.0, capacity = self.capacity, "Release of unknown lane");
            return false;
        }
        self.free.insert(lane.0)
    }

    pub fn release_all(&mut self) {
        self.free = (0..self.capacity).collect();
    }

    pub fn is_occupied(&self, lane: LaneId) -> bool {
        lane.0 < self.capacity && !self.free.contains(&lane.0)
    }

    pub fn occupied_count(&self) -> usize {
        self.capacity - self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Vertical placement of lanes in the top half of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneGeometry {
    pub lane_height: u32,
    pub top_margin: u32,
}

impl LaneGeometry {
    pub fn new(screen_height: u32, lane_count: usize, top_margin: u32) -> Self {
        let lanes = lane_count.max(1) as u32;
        Self {
            lane_height: (screen_height / 2) / lanes,
            top_margin,
        }
    }

    pub fn offset(&self, lane: LaneId) -> u32 {
        lane.0 as u32 * self.lane_height + self.top_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquires_lowest_free_lane() {
        let mut lanes = LaneAllocator::new(4);
        assert_eq!(lanes.acquire(), Some(LaneId(0)));
        assert_eq!(lanes.acquire(), Some(LaneId(1)));
        assert!(lanes.release(LaneId(0)));
        assert_eq!(lanes.acquire(), Some(LaneId(0)));
        assert_eq!(lanes.acquire(), Some(LaneId(2)));
    }

    #[test]
    fn exhausted_pool_returns_none() {
        let mut lanes = LaneAllocator::new(4);
        let got: Vec<_> = (0..4).filter_map(|_| lanes.acquire()).collect();
        assert_eq!(got, vec![LaneId(0), LaneId(1), LaneId(2), LaneId(3)]);
        assert_eq!(lanes.acquire(), None);
        assert_eq!(lanes.occupied_count(), 4);
    }

    #[test]
    fn release_is_idempotent() {
        let mut lanes = LaneAllocator::new(2);
        let a = lanes.acquire().unwrap();
        let b = lanes.acquire().unwrap();
        assert!(lanes.release(a));
        assert!(!lanes.release(a));
        assert_eq!(lanes.occupied_count(), 1);
        assert!(lanes.is_occupied(b));

        // The freed lane is handed out exactly once.
        assert_eq!(lanes.acquire(), Some(a));
        assert_eq!(lanes.acquire(), None);
    }

    #[test]
    fn out_of_range_release_is_ignored() {
        let mut lanes = LaneAllocator::new(2);
        assert!(!lanes.release(LaneId(7)));
        assert_eq!(lanes.occupied_count(), 0);
        assert!(!lanes.is_occupied(LaneId(7)));
    }

    #[test]
    fn release_all_frees_everything() {
        let mut lanes = LaneAllocator::new(3);
        while lanes.acquire().is_some() {}
        lanes.release_all();
        assert_eq!(lanes.occupied_count(), 0);
        assert_eq!(lanes.acquire(), Some(LaneId(0)));
    }

    #[test]
    fn geometry_divides_top_half() {
        let geo = LaneGeometry::new(2340, 4, 20);
        assert_eq!(geo.lane_height, 292);
        assert_eq!(geo.offset(LaneId(0)), 20);
        assert_eq!(geo.offset(LaneId(3)), 3 * 292 + 20);
        assert!(geo.offset(LaneId(3)) < 2340 / 2);
    }
}
