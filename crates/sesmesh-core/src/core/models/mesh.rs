use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// A triangle, as three indices into the vertex list of a [`Mesh`].
pub type Face = [u32; 3];

/// Common interface for vertex types stored in a [`Mesh`].
pub trait MeshVertex {
    /// The world-space position of the vertex.
    fn position(&self) -> Point3<f64>;
}

/// A vertex carrying only a position.
///
/// Used for the solvent-accessible surface, which only serves as a spatial
/// index for the excluded field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionVertex {
    pub position: Point3<f64>,
}

impl PositionVertex {
    pub fn new(position: Point3<f64>) -> Self {
        Self { position }
    }
}

impl MeshVertex for PositionVertex {
    fn position(&self) -> Point3<f64> {
        self.position
    }
}

/// A fully attributed vertex of the solvent-excluded surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVertex {
    /// The world-space position in Angstroms.
    pub position: Point3<f64>,
    /// The unit outward normal.
    pub normal: Vector3<f64>,
    /// The texture coordinate.
    pub uv: Vector2<f64>,
    /// The blended RGBA color.
    pub color: Vector4<f64>,
}

impl MeshVertex for SurfaceVertex {
    fn position(&self) -> Point3<f64> {
        self.position
    }
}

/// An indexed triangle mesh.
///
/// Vertex and face order is the order in which the extraction algorithm
/// emitted them and is reproducible for a fixed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    vertices: Vec<V>,
    faces: Vec<Face>,
}

impl<V> Default for Mesh<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }
}

impl<V> Mesh<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: V) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    pub fn push_face(&mut self, face: Face) {
        debug_assert!(
            face.iter().all(|&i| (i as usize) < self.vertices.len()),
            "Face {:?} references a vertex that does not exist",
            face
        );
        self.faces.push(face);
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Reverses the orientation of every face.
    pub fn flip_winding(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }

    pub fn into_parts(self) -> (Vec<V>, Vec<Face>) {
        (self.vertices, self.faces)
    }
}

impl<V: MeshVertex> Mesh<V> {
    pub fn positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.vertices.iter().map(MeshVertex::position)
    }
}
