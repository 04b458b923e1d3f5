use nalgebra::{Point3, Vector4};
use phf::{Map, phf_map};
use sesmesh::core::models::atom::{Atom, neutral_color};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Radius used for elements missing from [`VDW_RADII`].
pub const DEFAULT_RADIUS: f64 = 1.5;

/// Bondi van der Waals radii in Angstroms, keyed by upper-case element symbol.
#[rustfmt::skip]
static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H"  => 1.20, "C"  => 1.70, "N"  => 1.55, "O"  => 1.52,
    "F"  => 1.47, "P"  => 1.80, "S"  => 1.80, "CL" => 1.75,
    "BR" => 1.85, "I"  => 1.98, "SE" => 1.90, "NA" => 2.27,
    "MG" => 1.73, "K"  => 2.75, "ZN" => 1.39, "CU" => 1.40,
    "FE" => 1.94, "CA" => 2.31, "MN" => 1.97, "NI" => 1.63,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueClass {
    Acidic,
    Basic,
    Polar,
    Other,
}

#[rustfmt::skip]
static RESIDUE_CLASSES: Map<&'static str, ResidueClass> = phf_map! {
    "ASP" => ResidueClass::Acidic, "GLU" => ResidueClass::Acidic,
    "LYS" => ResidueClass::Basic,  "ARG" => ResidueClass::Basic,  "HIS" => ResidueClass::Basic,
    "SER" => ResidueClass::Polar,  "THR" => ResidueClass::Polar,  "ASN" => ResidueClass::Polar,
    "GLN" => ResidueClass::Polar,  "TYR" => ResidueClass::Polar,  "CYS" => ResidueClass::Polar,
};

impl ResidueClass {
    pub fn of(residue_name: &str) -> Self {
        RESIDUE_CLASSES
            .get(residue_name.to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or(ResidueClass::Other)
    }

    /// Classification color; unclassified residues get the neutral color.
    pub fn color(self) -> Vector4<f64> {
        match self {
            ResidueClass::Acidic => Vector4::new(1.0, 0.0, 0.0, 1.0),
            ResidueClass::Basic => Vector4::new(0.0, 0.0, 1.0, 1.0),
            ResidueClass::Polar => Vector4::new(0.0, 1.0, 0.0, 1.0),
            ResidueClass::Other => neutral_color(),
        }
    }
}

pub fn element_radius(element: &str) -> f64 {
    VDW_RADII
        .get(element.to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_RADIUS)
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Line is too short for ATOM/HETATM record (must reach column 54)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        },
    })
}

/// Falls back to the leading letter of the atom name when the element
/// columns are blank (older files).
fn element_from_name(name: &str) -> String {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_string())
        .unwrap_or_default()
}

/// One ATOM or HETATM record.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    pub name: String,
    pub residue_name: String,
    pub chain_id: char,
    pub position: Point3<f64>,
    pub element: String,
    pub is_hetero: bool,
}

impl PdbAtom {
    /// The atom as consumed by the surface engine: position, element radius
    /// and the color of its residue class.
    pub fn to_surface_atom(&self) -> Atom {
        Atom::new(self.position, element_radius(&self.element))
            .with_color(ResidueClass::of(&self.residue_name).color())
    }
}

/// The atoms of the first model of a PDB file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbStructure {
    atoms: Vec<PdbAtom>,
}

impl PdbStructure {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, PdbError> {
        let mut atoms = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {}
                "ENDMDL" => break,
                _ => continue,
            }

            if line.len() < 54 {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            let alt_loc = slice_and_trim(&line, 16, 17);
            if !(alt_loc.is_empty() || alt_loc == "A") {
                continue;
            }

            let name = slice_and_trim(&line, 12, 16);
            let x = parse_coordinate(&line, line_num, 30, 38, "31-38")?;
            let y = parse_coordinate(&line, line_num, 38, 46, "39-46")?;
            let z = parse_coordinate(&line, line_num, 46, 54, "47-54")?;
            let element = match slice_and_trim(&line, 76, 78) {
                "" => element_from_name(name),
                symbol => symbol.to_string(),
            };

            atoms.push(PdbAtom {
                name: name.to_string(),
                residue_name: slice_and_trim(&line, 17, 20).to_string(),
                chain_id: slice_and_trim(&line, 21, 22).chars().next().unwrap_or(' '),
                position: Point3::new(x, y, z),
                element,
                is_hetero: line.starts_with("HETATM"),
            });
        }

        Ok(Self { atoms })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PdbError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn atoms(&self) -> &[PdbAtom] {
        &self.atoms
    }

    /// Chain identifiers in order of first appearance.
    pub fn chains(&self) -> Vec<char> {
        let mut chains = Vec::new();
        for atom in &self.atoms {
            if !chains.contains(&atom.chain_id) {
                chains.push(atom.chain_id);
            }
        }
        chains
    }

    /// Surface atoms of the selected chains, grouped chain by chain in the
    /// order the chains are listed. Unknown chains select nothing.
    pub fn surface_atoms(&self, chains: &[char]) -> Vec<Atom> {
        chains
            .iter()
            .flat_map(|&chain| {
                self.atoms
                    .iter()
                    .filter(move |atom| atom.chain_id == chain)
                    .map(PdbAtom::to_surface_atom)
            })
            .collect()
    }
}
