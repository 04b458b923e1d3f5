use super::atom::Atom;
use nalgebra::{Point3, Vector3};

/// An axis-aligned lattice of sample points with uniform spacing.
///
/// The grid spans `dims[i] + 1` sample points along each axis, so a grid with
/// dimensions `(xdim, ydim, zdim)` covers `xdim * ydim * zdim` cells. Grid
/// coordinates may be fractional; they map to world space as
/// `min + coords * spacing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelGrid {
    min: Point3<f64>,
    spacing: f64,
    dims: [usize; 3],
}

impl VoxelGrid {
    pub fn new(min: Point3<f64>, spacing: f64, dims: [usize; 3]) -> Self {
        Self { min, spacing, dims }
    }

    /// Builds the smallest grid that encloses every atom sphere, expanded by
    /// `padding` on every side.
    ///
    /// Returns `None` for an empty atom set, where no bounding box exists.
    pub fn enclosing(atoms: &[Atom], padding: f64, spacing: f64) -> Option<Self> {
        let first = atoms.first()?;
        let mut lo = first.position;
        let mut hi = first.position;
        for atom in atoms {
            let r = Vector3::repeat(atom.radius);
            lo = lo.inf(&(atom.position - r));
            hi = hi.sup(&(atom.position + r));
        }

        let pad = Vector3::repeat(padding);
        let min = lo - pad;
        let max = hi + pad;
        let extent = max - min;
        let recip = 1.0 / spacing;
        let dims = [
            (extent.x * recip + 1.0) as usize,
            (extent.y * recip + 1.0) as usize,
            (extent.z * recip + 1.0) as usize,
        ];

        Some(Self { min, spacing, dims })
    }

    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Returns the number of cells along each axis.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Returns the number of sample points along each axis (`dims + 1`).
    pub fn points_per_axis(&self) -> [usize; 3] {
        [self.dims[0] + 1, self.dims[1] + 1, self.dims[2] + 1]
    }

    /// Returns the number of samples in one z-slice.
    pub fn slice_len(&self) -> usize {
        let [nx, ny, _] = self.points_per_axis();
        nx * ny
    }

    /// Returns the total number of samples, or `None` on overflow.
    pub fn num_points(&self) -> Option<usize> {
        let [nx, ny, nz] = self.points_per_axis();
        nx.checked_mul(ny)?.checked_mul(nz)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        ((z * (self.dims[1] + 1)) + y) * (self.dims[0] + 1) + x
    }

    /// World position of an integer sample point.
    #[inline]
    pub fn world(&self, x: usize, y: usize, z: usize) -> Point3<f64> {
        Point3::new(
            x as f64 * self.spacing + self.min.x,
            y as f64 * self.spacing + self.min.y,
            z as f64 * self.spacing + self.min.z,
        )
    }

    /// World position of a (possibly fractional) grid coordinate.
    #[inline]
    pub fn to_world(&self, coords: &Point3<f64>) -> Point3<f64> {
        self.min + coords.coords * self.spacing
    }

    #[inline]
    pub fn axis_position(&self, axis: usize, i: usize) -> f64 {
        i as f64 * self.spacing + self.min[axis]
    }
}

/// A dense array of scalar samples over a [`VoxelGrid`].
///
/// Samples are stored x-fastest, then y, then z, matching [`VoxelGrid::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    grid: VoxelGrid,
    values: Vec<f64>,
}

impl ScalarField {
    /// Wraps precomputed samples.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` does not match the number of grid points.
    pub fn from_values(grid: VoxelGrid, values: Vec<f64>) -> Self {
        assert_eq!(
            Some(values.len()),
            grid.num_points(),
            "Sample count does not match grid dimensions {:?}",
            grid.dims()
        );
        Self { grid, values }
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn value(&self, x: usize, y: usize, z: usize) -> f64 {
        self.values[self.grid.index(x, y, z)]
    }

    /// Trilinearly interpolates the field at a fractional grid coordinate.
    ///
    /// Coordinates outside the grid are clamped to its boundary.
    pub fn interpolate(&self, coords: &Point3<f64>) -> f64 {
        let dims = self.grid.dims();
        let mut base = [0usize; 3];
        let mut frac = [0.0f64; 3];
        for axis in 0..3 {
            let c = coords[axis].clamp(0.0, dims[axis] as f64);
            let i = (c.floor() as usize).min(dims[axis].saturating_sub(1));
            base[axis] = i;
            frac[axis] = c - i as f64;
        }

        let [x0, y0, z0] = base;
        let x1 = (x0 + 1).min(dims[0]);
        let y1 = (y0 + 1).min(dims[1]);
        let z1 = (z0 + 1).min(dims[2]);
        let [fx, fy, fz] = frac;

        let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;
        let c00 = lerp(self.value(x0, y0, z0), self.value(x1, y0, z0), fx);
        let c10 = lerp(self.value(x0, y1, z0), self.value(x1, y1, z0), fx);
        let c01 = lerp(self.value(x0, y0, z1), self.value(x1, y0, z1), fx);
        let c11 = lerp(self.value(x0, y1, z1), self.value(x1, y1, z1), fx);
        lerp(lerp(c00, c10, fy), lerp(c01, c11, fy), fz)
    }

    /// Central-difference gradient of the interpolated field, in grid units.
    pub fn gradient(&self, coords: &Point3<f64>) -> Vector3<f64> {
        const H: f64 = 0.5;
        let mut gradient = Vector3::zeros();
        for axis in 0..3 {
            let mut ahead = *coords;
            let mut behind = *coords;
            ahead[axis] += H;
            behind[axis] -= H;
            gradient[axis] = (self.interpolate(&ahead) - self.interpolate(&behind)) / (2.0 * H);
        }
        gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_field() -> ScalarField {
        let grid = VoxelGrid::new(Point3::origin(), 1.0, [2, 2, 2]);
        let mut values = vec![0.0; grid.num_points().unwrap()];
        for z in 0..=2 {
            for y in 0..=2 {
                for x in 0..=2 {
                    values[grid.index(x, y, z)] = x as f64 + 10.0 * z as f64;
                }
            }
        }
        ScalarField::from_values(grid, values)
    }

    #[test]
    fn index_is_x_fastest_then_y_then_z() {
        let grid = VoxelGrid::new(Point3::origin(), 1.0, [3, 4, 5]);
        assert_eq!(grid.index(0, 0, 0), 0);
        assert_eq!(grid.index(1, 0, 0), 1);
        assert_eq!(grid.index(0, 1, 0), 4);
        assert_eq!(grid.index(0, 0, 1), 20);
        assert_eq!(grid.index(3, 4, 5), grid.num_points().unwrap() - 1);
    }

    #[test]
    fn world_maps_grid_coordinates_with_spacing() {
        let grid = VoxelGrid::new(Point3::new(-1.0, 2.0, 0.5), 0.25, [8, 8, 8]);
        assert_eq!(grid.world(4, 0, 2), Point3::new(0.0, 2.0, 1.0));
        assert_eq!(grid.to_world(&Point3::new(4.0, 0.0, 2.0)), grid.world(4, 0, 2));
        assert_eq!(grid.axis_position(2, 2), 1.0);
    }

    #[test]
    fn enclosing_grid_contains_every_inflated_sphere() {
        let atoms = [
            Atom::new(Point3::new(0.0, 0.0, 0.0), 1.0),
            Atom::new(Point3::new(3.0, 0.0, 0.0), 1.5),
        ];
        let probe = 1.4;
        let grid = VoxelGrid::enclosing(&atoms, probe + 1.5, 0.5).unwrap();
        let [nx, ny, nz] = grid.dims();
        let max = grid.world(nx, ny, nz);
        for atom in &atoms {
            let r = atom.inflated_radius(probe);
            for axis in 0..3 {
                assert!(atom.position[axis] - r >= grid.min()[axis]);
                assert!(atom.position[axis] + r <= max[axis] + grid.spacing());
            }
        }
    }

    #[test]
    fn enclosing_grid_has_expected_dimensions() {
        let atoms = [
            Atom::new(Point3::new(0.0, 0.0, 0.0), 1.0),
            Atom::new(Point3::new(3.0, 0.0, 0.0), 1.5),
        ];
        let grid = VoxelGrid::enclosing(&atoms, 1.4 + 1.5, 0.5).unwrap();
        // x: [-1.0, 4.5] padded by 2.9 -> extent 11.3; y,z: [-1.5, 1.5] -> extent 8.8
        assert_eq!(grid.dims(), [23, 18, 18]);
        assert!((grid.min() - Point3::new(-3.9, -4.4, -4.4)).norm() < 1e-12);
    }

    #[test]
    fn enclosing_returns_none_for_empty_atoms() {
        assert!(VoxelGrid::enclosing(&[], 1.0, 0.5).is_none());
    }

    #[test]
    fn interpolate_matches_samples_at_grid_points() {
        let field = ramp_field();
        assert_eq!(field.interpolate(&Point3::new(1.0, 1.0, 1.0)), 11.0);
        assert_eq!(field.interpolate(&Point3::new(2.0, 2.0, 2.0)), 22.0);
    }

    #[test]
    fn interpolate_is_linear_between_samples() {
        let field = ramp_field();
        let v = field.interpolate(&Point3::new(0.5, 1.3, 1.5));
        assert!((v - 15.5).abs() < 1e-12);
    }

    #[test]
    fn interpolate_clamps_outside_the_grid() {
        let field = ramp_field();
        assert_eq!(field.interpolate(&Point3::new(-3.0, 0.0, 0.0)), 0.0);
        assert_eq!(field.interpolate(&Point3::new(9.0, 0.0, 9.0)), 22.0);
    }

    #[test]
    fn gradient_of_linear_field_is_constant() {
        let field = ramp_field();
        let g = field.gradient(&Point3::new(1.0, 1.0, 1.0));
        assert!((g - Vector3::new(1.0, 0.0, 10.0)).norm() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "Sample count")]
    fn from_values_rejects_wrong_length() {
        let grid = VoxelGrid::new(Point3::origin(), 1.0, [2, 2, 2]);
        let _ = ScalarField::from_values(grid, vec![0.0; 5]);
    }
}
