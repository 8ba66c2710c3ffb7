//! Immutable, spatially indexed obstacle snapshot.
//!
//! An `ObstacleSet` is never edited in place.  Every update method returns a
//! new set, and sessions swap the whole value behind an `Arc`, so a reader
//! iterating an older snapshot never observes a partial change.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over `[lat, lon]` narrows proximity queries to a
//! bounding box around the query point.  The box is sized from the largest
//! radius in the set; exact haversine checks follow.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use nav_core::{GeoPoint, ObstacleId, geo::m_to_deg};

use crate::obstacle::Obstacle;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// `[lat, lon]` point plus the obstacle's index in `ObstacleSet::obstacles`.
#[derive(Clone, Debug)]
struct ObstacleEntry {
    point: [f64; 2],
    idx:   usize,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    /// Squared Euclidean distance in lat/lon space.  Only used for ranking.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── ObstacleSet ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ObstacleSet {
    obstacles:    Vec<Obstacle>,
    index:        RTree<ObstacleEntry>,
    max_radius_m: f64,
    next_id:      ObstacleId,
}

impl std::fmt::Debug for ObstacleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObstacleSet")
            .field("obstacles", &self.obstacles)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::from_obstacles(Vec::new())
    }
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from already-validated obstacles, keeping their ids.
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        let entries = obstacles
            .iter()
            .enumerate()
            .map(|(idx, o)| ObstacleEntry { point: [o.position().lat, o.position().lon], idx })
            .collect();
        let max_radius_m = obstacles.iter().map(|o| o.radius_m()).fold(0.0, f64::max);
        let next_id = obstacles
            .iter()
            .map(|o| o.id().next())
            .max()
            .unwrap_or(ObstacleId(0));

        Self { obstacles, index: RTree::bulk_load(entries), max_radius_m, next_id }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id() == id)
    }

    /// The id the next added obstacle will receive.
    #[inline]
    pub fn next_id(&self) -> ObstacleId {
        self.next_id
    }

    // ── Whole-value updates ───────────────────────────────────────────────

    /// A new set with `obstacle` appended under a fresh id.
    pub fn with_added(&self, obstacle: Obstacle) -> Self {
        let mut obstacles = self.obstacles.clone();
        obstacles.push(obstacle.with_id(self.next_id));
        Self::from_obstacles(obstacles)
    }

    /// A new set without the obstacle `id`.  Unknown ids yield an identical set.
    pub fn without(&self, id: ObstacleId) -> Self {
        let obstacles: Vec<_> = self.obstacles.iter().copied().filter(|o| o.id() != id).collect();
        let mut set = Self::from_obstacles(obstacles);
        set.next_id = set.next_id.max(self.next_id);
        set
    }

    /// Merge one candidate using the same-location rule.
    ///
    /// If an existing obstacle lies within `merge_m` of the candidate, the one
    /// that is permanent or detected wins; on a tie the existing one stays.
    /// The winner keeps the existing id.  Otherwise the candidate is added.
    pub fn merge_candidate(&self, candidate: Obstacle, merge_m: f64) -> Self {
        let existing = self
            .obstacles
            .iter()
            .position(|o| o.position().distance_m(candidate.position()) <= merge_m);

        match existing {
            None => self.with_added(candidate),
            Some(i) => {
                let old = self.obstacles[i];
                let old_wins = old.is_permanent() || old.is_detected();
                let new_wins = candidate.is_permanent() || candidate.is_detected();
                if old_wins || !new_wins {
                    return self.clone();
                }
                log::debug!("obstacle {} superseded by confirmed marker at {}", old.id(), candidate.position());
                let mut obstacles = self.obstacles.clone();
                obstacles[i] = candidate.with_id(old.id());
                let mut set = Self::from_obstacles(obstacles);
                set.next_id = set.next_id.max(self.next_id);
                set
            }
        }
    }

    /// Merge a batch of candidates in order.
    pub fn merge_detections<I>(&self, candidates: I, merge_m: f64) -> Self
    where
        I: IntoIterator<Item = Obstacle>,
    {
        candidates
            .into_iter()
            .fold(self.clone(), |set, c| set.merge_candidate(c, merge_m))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// `true` if `point` is within `radius + margin_m` of any obstacle.
    pub fn is_near(&self, point: GeoPoint, margin_m: f64) -> bool {
        self.first_near(point, margin_m).is_some()
    }

    /// The lowest-id obstacle whose reach contains `point`.
    pub fn first_near(&self, point: GeoPoint, margin_m: f64) -> Option<&Obstacle> {
        if self.obstacles.is_empty() || !point.is_valid() {
            return None;
        }

        // Degree padding for the widest reach.  Longitude degrees shrink
        // with latitude, so widen that axis by 1 / cos(lat).
        let reach = self.max_radius_m + margin_m.max(0.0);
        let pad_lat = m_to_deg(reach) * 1.01 + 1e-9;
        let cos_lat = point.lat.to_radians().cos().abs().max(1e-6);
        let pad_lon = pad_lat / cos_lat;

        let bbox = AABB::from_corners(
            [point.lat - pad_lat, point.lon - pad_lon],
            [point.lat + pad_lat, point.lon + pad_lon],
        );

        self.index
            .locate_in_envelope(&bbox)
            .map(|e| &self.obstacles[e.idx])
            .filter(|o| o.is_within_reach(point, margin_m))
            .min_by_key(|o| o.id())
    }

    /// Obstacle whose centre is nearest to `point`.
    pub fn nearest(&self, point: GeoPoint) -> Option<&Obstacle> {
        self.index
            .nearest_neighbor(&[point.lat, point.lon])
            .map(|e| &self.obstacles[e.idx])
    }
}
