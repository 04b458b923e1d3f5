use crate::core::models::atom::{Atom, neutral_color};
use nalgebra::{Point3, Vector4};

/// The geometry and color of one classified atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredAtom {
    pub position: Point3<f64>,
    pub radius: f64,
    pub color: Vector4<f64>,
}

/// Blends vertex colors from the classified atoms around them.
///
/// Every atom within `2r` of a vertex contributes its color with weight
/// `clamp(4r² - d², 0, 1)`. The sum is normalized as an RGB direction and made
/// opaque. A vertex that no atom reaches is colored opaque white.
#[derive(Debug, Clone, Default)]
pub struct ColorBlender {
    atoms: Vec<ColoredAtom>,
}

impl ColorBlender {
    /// Keeps only atoms whose color differs from the neutral color.
    pub fn from_atoms(atoms: &[Atom]) -> Self {
        let atoms = atoms
            .iter()
            .filter(|atom| atom.is_classified())
            .map(|atom| ColoredAtom {
                position: atom.position,
                radius: atom.radius,
                color: atom.color,
            })
            .collect();
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn blend(&self, p: &Point3<f64>) -> Vector4<f64> {
        let mut sum = Vector4::zeros();
        for atom in &self.atoms {
            let weight = (4.0 * atom.radius * atom.radius - (p - atom.position).norm_squared())
                .clamp(0.0, 1.0);
            if weight > 0.0 {
                sum += atom.color * weight;
            }
        }

        sum.w = 0.0;
        let norm = sum.norm();
        if norm < f64::EPSILON {
            return neutral_color();
        }
        let mut color = sum / norm;
        color.w = 1.0;
        color
    }
}
