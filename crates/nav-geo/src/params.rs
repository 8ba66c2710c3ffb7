//! Algorithm thresholds for simplification, deduplication, and node extraction.
//!
//! The defaults are empirical values tuned for a single campus; they are kept
//! as configuration rather than derived.

/// Thresholds for [`simplify`](crate::simplify::simplify).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplifyParams {
    /// A point whose turn angle is at most this is a candidate for removal, degrees.
    pub max_turn_deg:      f64,
    /// Keep a point if dropping it shortens its local detour by more than
    /// this ratio of the direct chord.
    pub max_detour_ratio:  f64,
    /// If fewer than this fraction of points survive, fall back to subsampling.
    pub collapse_ratio:    f64,
    /// Paths with more points than this are eligible for the subsampling fallback.
    pub subsample_min_len: usize,
    /// Approximate number of points the subsampling fallback keeps.
    pub subsample_target:  usize,
    /// Points closer than this to the previous kept point are dropped, degrees.
    pub duplicate_deg:     f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            max_turn_deg:      30.0,
            max_detour_ratio:  1.2,
            collapse_ratio:    0.2,
            subsample_min_len: 10,
            subsample_target:  10,
            duplicate_deg:     0.00002,
        }
    }
}

/// Thresholds for route deduplication.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DedupParams {
    /// Evenly spaced samples compared between two paths.
    pub samples:              usize,
    /// Two samples match when closer than this, degrees (≈ 20 m).
    pub match_deg:            f64,
    /// Paths whose start or end points differ by more than this are unrelated, degrees.
    pub endpoint_deg:         f64,
    /// Distance difference under which `near_similarity` applies, metres.
    pub near_distance_m:      f64,
    pub near_similarity:      f64,
    /// Similarity above which two routes are duplicates regardless of distance.
    pub high_similarity:      f64,
    /// Final uniqueness pass: distance window, metres.
    pub final_distance_m:     f64,
    /// Final uniqueness pass: ETA window, minutes.
    pub final_eta_min:        f64,
    pub final_similarity:     f64,
}

impl Default for DedupParams {
    fn default() -> Self {
        Self {
            samples:          8,
            match_deg:        0.0002,
            endpoint_deg:     0.0002,
            near_distance_m:  10.0,
            near_similarity:  0.4,
            high_similarity:  0.7,
            final_distance_m: 5.0,
            final_eta_min:    0.5,
            final_similarity: 0.6,
        }
    }
}

/// Thresholds for direction-change and intersection nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeParams {
    /// A turn sharper than this emits a direction-change node, degrees.
    pub turn_deg:            f64,
    /// Emit a node anyway once this many points passed since the last one.
    pub cadence_points:      usize,
    /// Interpolated samples per segment when searching for intersections.
    pub samples_per_segment: usize,
    /// Samples closer than this form an intersection, degrees (≈ 5 m).
    pub intersection_deg:    f64,
    /// Intersection nodes farther than this from the primary path are dropped, metres.
    pub attach_m:            f64,
}

impl Default for NodeParams {
    fn default() -> Self {
        Self {
            turn_deg:            20.0,
            cadence_points:      10,
            samples_per_segment: 11,
            intersection_deg:    0.00005,
            attach_m:            11.1,
        }
    }
}
