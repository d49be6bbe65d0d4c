//! Geographic bounds and randomization helpers
//!
//! The single home for coordinate generation and clamping, shared by the
//! position simulator and the `fleet-data` CLI so the concession geometry
//! is defined in exactly one place.

use rand::Rng;

/// Rectangular bounding box over the mining concession.
///
/// Clamping is a hard min/max per axis: a point pushed past an edge lands
/// exactly on the edge, it is not reflected back inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Concession rectangle around the Muruntau open pit (Navoi region).
pub const CONCESSION_BOUNDS: GeoBounds = GeoBounds {
    min_lat: 41.44,
    max_lat: 41.52,
    min_lng: 64.52,
    max_lng: 64.66,
};

impl Default for GeoBounds {
    fn default() -> Self {
        CONCESSION_BOUNDS
    }
}

impl GeoBounds {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lng
            && longitude <= self.max_lng
    }

    pub fn clamp_lat(&self, latitude: f64) -> f64 {
        latitude.clamp(self.min_lat, self.max_lat)
    }

    pub fn clamp_lng(&self, longitude: f64) -> f64 {
        longitude.clamp(self.min_lng, self.max_lng)
    }

    pub fn clamp(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        (self.clamp_lat(latitude), self.clamp_lng(longitude))
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Uniform random point inside the box.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        (
            rng.gen_range(self.min_lat..=self.max_lat),
            rng.gen_range(self.min_lng..=self.max_lng),
        )
    }
}

/// Perturb `value` by a uniform delta in `[-max_delta, +max_delta]`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, value: f64, max_delta: f64) -> f64 {
    value + rng.gen_range(-max_delta..=max_delta)
}

/// Normalize a heading in degrees into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn contains_accepts_edges() {
        let b = CONCESSION_BOUNDS;
        assert!(b.contains(b.min_lat, b.min_lng));
        assert!(b.contains(b.max_lat, b.max_lng));
        assert!(!b.contains(b.max_lat + 0.001, b.min_lng));
        assert!(!b.contains(b.min_lat, b.min_lng - 0.001));
    }

    #[test]
    fn clamp_pins_to_edge_not_beyond() {
        let b = CONCESSION_BOUNDS;
        let (lat, lng) = b.clamp(b.max_lat + 0.3, b.min_lng - 0.3);
        assert_eq!(lat, b.max_lat);
        assert_eq!(lng, b.min_lng);
    }

    #[test]
    fn clamp_is_idempotent() {
        let b = CONCESSION_BOUNDS;
        let first = b.clamp(90.0, -180.0);
        let second = b.clamp(first.0, first.1);
        assert_eq!(first, second);
    }

    #[test]
    fn clamp_leaves_interior_points_alone() {
        let b = CONCESSION_BOUNDS;
        let (lat, lng) = b.center();
        assert_eq!(b.clamp(lat, lng), (lat, lng));
    }

    #[test]
    fn random_point_stays_inside() {
        let b = CONCESSION_BOUNDS;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (lat, lng) = b.random_point(&mut rng);
            assert!(b.contains(lat, lng));
        }
    }

    #[test]
    fn jitter_stays_within_delta() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = jitter(&mut rng, 10.0, 0.5);
            assert!((9.5..=10.5).contains(&v));
        }
    }

    #[test]
    fn heading_normalizes_into_range() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(365.0), 5.0);
        assert_eq!(normalize_heading(-15.0), 345.0);
        assert_eq!(normalize_heading(720.5), 0.5);
        for deg in [-400.0, -1.0, 359.9, 400.0, 7200.0] {
            let h = normalize_heading(deg);
            assert!((0.0..360.0).contains(&h), "heading {h} out of range");
        }
    }
}
