//! Bounded movement trail for display.

use std::collections::VecDeque;

use nav_core::GeoPoint;

/// The most recent `capacity` traveler positions, oldest first.  A position
/// equal to the newest one is not stored twice.
#[derive(Clone, Debug)]
pub struct Trail {
    points:   VecDeque<GeoPoint>,
    capacity: usize,
}

impl Trail {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, point: GeoPoint) {
        if self.points.back() == Some(&point) {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<GeoPoint> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn to_vec(&self) -> Vec<GeoPoint> {
        self.points.iter().copied().collect()
    }
}
