use crate::core::models::mesh::{Mesh, MeshVertex};
use nalgebra::Point3;

/// Nearest-point index over a fixed point set, restricted to a search reach.
///
/// Points are kept sorted by z. A query first selects the z-band
/// `[z - reach, z + reach]` with two binary searches, then narrows it to the
/// points with `|y - ypos| <= reach` (a [`BandRow`], reusable along a whole grid
/// row), and finally scans the row for the closest point in Euclidean distance.
/// Only points with `d² <= reach²` are ever reported.
#[derive(Debug, Clone)]
pub struct BandIndex {
    sorted: Vec<Point3<f64>>,
    reach: f64,
}

impl BandIndex {
    pub fn new(points: impl IntoIterator<Item = Point3<f64>>, reach: f64) -> Self {
        let mut sorted: Vec<Point3<f64>> = points.into_iter().collect();
        sorted.sort_by(|a, b| a.z.total_cmp(&b.z));
        Self { sorted, reach }
    }

    /// Indexes the vertex positions of `mesh`. The mesh itself is only read.
    pub fn from_mesh<V: MeshVertex>(mesh: &Mesh<V>, reach: f64) -> Self {
        Self::new(mesh.positions(), reach)
    }

    pub fn reach(&self) -> f64 {
        self.reach
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Returns the points whose z lies within `reach` of `zpos` (inclusive).
    pub fn z_band(&self, zpos: f64) -> &[Point3<f64>] {
        let lo = self.sorted.partition_point(|p| p.z < zpos - self.reach);
        let hi = self.sorted.partition_point(|p| p.z <= zpos + self.reach);
        &self.sorted[lo..hi.max(lo)]
    }

    /// Creates an empty row buffer for this index.
    pub fn row(&self) -> BandRow {
        BandRow {
            candidates: Vec::new(),
            reach: self.reach,
        }
    }

    /// Minimum squared distance from `xyz` to an indexed point within reach.
    pub fn nearest_squared(&self, xyz: &Point3<f64>) -> Option<f64> {
        let mut row = self.row();
        row.refill(self.z_band(xyz.z), xyz.y);
        row.nearest_squared(xyz)
    }
}

/// Candidates of a z-band that also lie within reach of one y value.
#[derive(Debug, Clone)]
pub struct BandRow {
    candidates: Vec<Point3<f64>>,
    reach: f64,
}

impl BandRow {
    /// Replaces the candidates with the points of `band` within reach of `ypos`.
    pub fn refill(&mut self, band: &[Point3<f64>], ypos: f64) {
        self.candidates.clear();
        self.candidates.extend(
            band.iter()
                .filter(|p| (p.y - ypos).abs() <= self.reach)
                .copied(),
        );
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn nearest_squared(&self, xyz: &Point3<f64>) -> Option<f64> {
        let reach_sq = self.reach * self.reach;
        self.candidates
            .iter()
            .map(|p| (p - xyz).norm_squared())
            .filter(|&d2| d2 <= reach_sq)
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::mesh::PositionVertex;
    use proptest::prelude::*;

    fn brute_force(points: &[Point3<f64>], xyz: &Point3<f64>, reach: f64) -> Option<f64> {
        points
            .iter()
            .map(|p| (p - xyz).norm_squared())
            .filter(|&d2| d2 <= reach * reach)
            .min_by(f64::total_cmp)
    }

    fn line_of_points() -> Vec<Point3<f64>> {
        (0..10)
            .map(|i| Point3::new(0.0, 0.0, i as f64))
            .rev()
            .collect()
    }

    #[test]
    fn points_are_sorted_by_z() {
        let index = BandIndex::new(line_of_points(), 1.0);
        let band = index.z_band(4.5);
        assert!(band.windows(2).all(|w| w[0].z <= w[1].z));
    }

    #[test]
    fn z_band_is_inclusive_at_both_ends() {
        let index = BandIndex::new(line_of_points(), 2.0);
        let zs: Vec<f64> = index.z_band(5.0).iter().map(|p| p.z).collect();
        assert_eq!(zs, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn z_band_is_empty_outside_the_point_range() {
        let index = BandIndex::new(line_of_points(), 1.0);
        assert!(index.z_band(-5.0).is_empty());
        assert!(index.z_band(20.0).is_empty());
    }

    #[test]
    fn row_filters_by_y_within_reach() {
        let points = vec![
            Point3::new(0.0, -1.5, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(0.0, 1.01, 0.0),
        ];
        let index = BandIndex::new(points, 1.0);
        let mut row = index.row();
        row.refill(index.z_band(0.0), 0.0);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn nearest_squared_reports_none_when_nothing_is_within_reach() {
        let index = BandIndex::new(vec![Point3::new(0.9, 0.9, 0.0)], 1.0);
        // Inside the y and z bands but 1.27 away in Euclidean distance.
        assert_eq!(index.nearest_squared(&Point3::origin()), None);
    }

    #[test]
    fn nearest_squared_counts_points_exactly_at_reach() {
        let index = BandIndex::new(vec![Point3::new(2.0, 0.0, 0.0)], 2.0);
        assert_eq!(index.nearest_squared(&Point3::origin()), Some(4.0));
    }

    #[test]
    fn nearest_squared_picks_the_closest_candidate() {
        let points = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(0.0, 0.0, -0.75),
        ];
        let index = BandIndex::new(points, 2.0);
        assert_eq!(index.nearest_squared(&Point3::origin()), Some(0.25));
    }

    #[test]
    fn empty_index_never_finds_anything() {
        let index = BandIndex::new(Vec::new(), 10.0);
        assert!(index.is_empty());
        assert_eq!(index.nearest_squared(&Point3::origin()), None);
    }

    #[test]
    fn from_mesh_indexes_every_vertex_without_touching_the_mesh() {
        let mut mesh = Mesh::new();
        for i in 0..4 {
            mesh.push_vertex(PositionVertex::new(Point3::new(0.0, 0.0, 3.0 - i as f64)));
        }
        let before = mesh.clone();
        let index = BandIndex::from_mesh(&mesh, 0.5);
        assert_eq!(index.len(), 4);
        assert_eq!(mesh, before);
    }

    fn point_strategy() -> impl Strategy<Value = Point3<f64>> {
        (-5.0..5.0f64, -5.0..5.0f64, -5.0..5.0f64).prop_map(|(x, y, z)| Point3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn matches_brute_force_oracle(
            points in prop::collection::vec(point_strategy(), 0..60),
            query in point_strategy(),
            reach in 0.1..4.0f64,
        ) {
            let index = BandIndex::new(points.clone(), reach);
            prop_assert_eq!(index.nearest_squared(&query), brute_force(&points, &query, reach));
        }

        #[test]
        fn shared_row_matches_brute_force_along_x(
            points in prop::collection::vec(point_strategy(), 0..60),
            y in -5.0..5.0f64,
            z in -5.0..5.0f64,
            reach in 0.1..4.0f64,
        ) {
            let index = BandIndex::new(points.clone(), reach);
            let mut row = index.row();
            row.refill(index.z_band(z), y);
            for i in 0..20 {
                let query = Point3::new(-5.0 + 0.5 * i as f64, y, z);
                prop_assert_eq!(row.nearest_squared(&query), brute_force(&points, &query, reach));
            }
        }
    }
}
