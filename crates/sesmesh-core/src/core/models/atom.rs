use nalgebra::{Point3, Vector4};

/// Returns the neutral classification color (opaque white).
///
/// Atoms carrying exactly this color are considered unclassified and never
/// contribute to vertex color blending.
#[inline]
pub fn neutral_color() -> Vector4<f64> {
    Vector4::new(1.0, 1.0, 1.0, 1.0)
}

/// Represents an atom as consumed by the surface computation.
///
/// Only the geometric and classification data needed for meshing is kept here:
/// the atom center, its van der Waals radius and an RGBA color describing the
/// functional class of the residue the atom belongs to. Atoms are produced by an
/// external loader and are never mutated by the surface engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The 3D coordinates of the atom center in Angstroms.
    pub position: Point3<f64>,
    /// The van der Waals radius in Angstroms.
    pub radius: f64,
    /// The classification color, components in `[0, 1]`.
    pub color: Vector4<f64>,
}

impl Atom {
    /// Creates a new unclassified `Atom` (neutral color).
    ///
    /// # Arguments
    ///
    /// * `position` - The 3D coordinates of the atom center.
    /// * `radius` - The van der Waals radius of the atom.
    pub fn new(position: Point3<f64>, radius: f64) -> Self {
        Self {
            position,
            radius,
            color: neutral_color(),
        }
    }

    /// Returns a copy of this atom carrying the given classification color.
    pub fn with_color(mut self, color: Vector4<f64>) -> Self {
        self.color = color;
        self
    }

    /// Returns `true` if the atom's color differs from the neutral color.
    #[inline]
    pub fn is_classified(&self) -> bool {
        self.color != neutral_color()
    }

    /// Returns the radius of the atom inflated by a solvent probe.
    #[inline]
    pub fn inflated_radius(&self, probe_radius: f64) -> f64 {
        self.radius + probe_radius
    }
}
