use super::tables::MC_TRIS;
use super::{EDGES, IsosurfaceExtractor, cell_corners, crossing, straddles};
use crate::core::models::grid::ScalarField;
use crate::core::models::mesh::Mesh;
use nalgebra::Point3;

const NO_VERTEX: u32 = u32::MAX;

/// Classic marching cubes with edge-interpolated vertices.
///
/// A vertex is placed on every straddling grid edge at the linear zero crossing
/// `t = a / (a - b)` and shared by all cells around that edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarchingCubes;

/// Vertex indices of the edges starting at each grid point of two z-layers.
///
/// The layer of grid z-coordinate `z` lives at `z % 2`, so cell layer `z` only
/// needs layers `z` and `z + 1` and the older one can be recycled.
struct EdgeCache {
    slots: Vec<[u32; 3]>,
    row_len: usize,
    layer_len: usize,
}

impl EdgeCache {
    fn new(points_x: usize, points_y: usize) -> Self {
        let layer_len = points_x * points_y;
        Self {
            slots: vec![[NO_VERTEX; 3]; 2 * layer_len],
            row_len: points_x,
            layer_len,
        }
    }

    #[inline]
    fn slot(&mut self, x: usize, y: usize, z: usize) -> &mut [u32; 3] {
        let i = (z % 2) * self.layer_len + y * self.row_len + x;
        &mut self.slots[i]
    }

    fn clear_layer(&mut self, z: usize) {
        let start = (z % 2) * self.layer_len;
        self.slots[start..start + self.layer_len].fill([NO_VERTEX; 3]);
    }
}

impl IsosurfaceExtractor for MarchingCubes {
    fn extract<V, G>(&self, field: &ScalarField, mut generator: G) -> Mesh<V>
    where
        G: FnMut(Point3<f64>) -> V,
    {
        let mut mesh = Mesh::new();
        let [nx, ny, nz] = field.grid().dims();
        if nx == 0 || ny == 0 || nz == 0 {
            return mesh;
        }

        let mut cache = EdgeCache::new(nx + 1, ny + 1);
        let mut edge_vertices = [NO_VERTEX; 12];

        for z in 0..nz {
            if z > 0 {
                cache.clear_layer(z + 1);
            }
            for y in 0..ny {
                for x in 0..nx {
                    let (values, config) = cell_corners(field, x, y, z);
                    if config == 0 || config == 255 {
                        continue;
                    }

                    for (edge, &(a, b, axis)) in EDGES.iter().enumerate() {
                        edge_vertices[edge] = NO_VERTEX;
                        if !straddles(values[a], values[b]) {
                            continue;
                        }
                        let [dx, dy, dz] = super::CORNERS[a];
                        let (ex, ey, ez) = (x + dx, y + dy, z + dz);
                        let slot = cache.slot(ex, ey, ez);
                        if slot[axis] == NO_VERTEX {
                            let mut coords = Point3::new(ex as f64, ey as f64, ez as f64);
                            coords[axis] += crossing(values[a], values[b]);
                            slot[axis] = mesh.push_vertex(generator(coords));
                        }
                        edge_vertices[edge] = slot[axis];
                    }

                    let entry = MC_TRIS[config as usize];
                    let num_triangles = (entry & 0xF) as usize;
                    let mut offset = 4;
                    for _ in 0..num_triangles {
                        let mut face = [0u32; 3];
                        for corner in &mut face {
                            let edge = ((entry >> offset) & 0xF) as usize;
                            *corner = edge_vertices[edge];
                            offset += 4;
                        }
                        mesh.push_face(face);
                    }
                }
            }
        }

        mesh
    }
}
