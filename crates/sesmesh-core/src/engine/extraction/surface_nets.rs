use super::{CORNERS, EDGES, IsosurfaceExtractor, cell_corners, crossing, straddles};
use crate::core::models::grid::ScalarField;
use crate::core::models::mesh::Mesh;
use nalgebra::{Point3, Vector3};

const NO_VERTEX: u32 = u32::MAX;

/// Naive surface nets.
///
/// Every cell whose corners straddle zero gets one vertex, at the mean of the
/// zero crossings on its edges. Every straddling grid edge surrounded by four
/// cells is then closed by a quad (two triangles) connecting those cells'
/// vertices. The output has fewer, better-shaped triangles than marching cubes
/// but vertices no longer lie exactly on grid edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceNets;

impl IsosurfaceExtractor for SurfaceNets {
    fn extract<V, G>(&self, field: &ScalarField, mut generator: G) -> Mesh<V>
    where
        G: FnMut(Point3<f64>) -> V,
    {
        let mut mesh = Mesh::new();
        let dims = field.grid().dims();
        let [nx, ny, nz] = dims;
        if nx == 0 || ny == 0 || nz == 0 {
            return mesh;
        }

        let cell_index = |x: usize, y: usize, z: usize| (z * ny + y) * nx + x;
        let mut cell_vertices = vec![NO_VERTEX; nx * ny * nz];

        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let (values, config) = cell_corners(field, x, y, z);
                    if config == 0 || config == 255 {
                        continue;
                    }

                    let mut sum = Vector3::zeros();
                    let mut count = 0usize;
                    for &(a, b, axis) in &EDGES {
                        if !straddles(values[a], values[b]) {
                            continue;
                        }
                        let mut offset = Vector3::from(CORNERS[a].map(|c| c as f64));
                        offset[axis] += crossing(values[a], values[b]);
                        sum += offset;
                        count += 1;
                    }

                    let coords = Point3::new(x as f64, y as f64, z as f64) + sum / count as f64;
                    cell_vertices[cell_index(x, y, z)] = mesh.push_vertex(generator(coords));
                }
            }
        }

        for z in 0..=nz {
            for y in 0..=ny {
                for x in 0..=nx {
                    let p = [x, y, z];
                    for axis in 0..3 {
                        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
                        if p[axis] >= dims[axis]
                            || p[u] == 0
                            || p[u] >= dims[u]
                            || p[v] == 0
                            || p[v] >= dims[v]
                        {
                            continue;
                        }

                        let mut q = p;
                        q[axis] += 1;
                        let start = field.value(x, y, z);
                        let end = field.value(q[0], q[1], q[2]);
                        if !straddles(start, end) {
                            continue;
                        }

                        // Cells around the edge, counter-clockwise seen from +axis.
                        let cell = |du: usize, dv: usize| {
                            let mut c = p;
                            c[u] = c[u] + du - 1;
                            c[v] = c[v] + dv - 1;
                            cell_vertices[cell_index(c[0], c[1], c[2])]
                        };
                        let quad = [cell(0, 0), cell(1, 0), cell(1, 1), cell(0, 1)];
                        debug_assert!(quad.iter().all(|&i| i != NO_VERTEX));

                        let [a, b, c, d] = quad;
                        if start < 0.0 {
                            mesh.push_face([a, b, c]);
                            mesh.push_face([a, c, d]);
                        } else {
                            mesh.push_face([a, c, b]);
                            mesh.push_face([a, d, c]);
                        }
                    }
                }
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fields::{sampled, sphere};
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn field_without_crossings_yields_empty_mesh() {
        let outside = sampled([4, 4, 4], |_| 2.0);
        let mesh = SurfaceNets.extract(&outside, |p| p);
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_vertices(), 0);
    }

    #[test]
    fn single_straddling_cell_gets_vertex_at_mean_crossing() {
        let field = sampled([1, 1, 1], |p| if p == Point3::origin() { -1.0 } else { 1.0 });
        let mesh = SurfaceNets.extract(&field, |p| p);

        // A lone cell has no interior edge, so no quad can be closed.
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_vertices(), 1);
        let v = mesh.vertices()[0];
        let expected = Point3::new(0.5, 0.5, 0.5) / 3.0;
        assert!((v - expected).norm() < 1e-12);
    }

    #[test]
    fn plane_produces_one_quad_per_interior_edge() {
        // Crossing between x = 1 and x = 2 on a 3x3x3 cell grid.
        let field = sampled([3, 3, 3], |p| p.x - 1.5);
        let mesh = SurfaceNets.extract(&field, |p| p);

        assert_eq!(mesh.num_vertices(), 9);
        // Interior x-edges at y, z in {1, 2}.
        assert_eq!(mesh.num_faces(), 8);
        for v in mesh.vertices() {
            assert!((v.x - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn plane_faces_point_toward_the_outside() {
        let field = sampled([3, 3, 3], |p| p.x - 1.5);
        let mesh = SurfaceNets.extract(&field, |p| p);
        for face in mesh.faces() {
            let [a, b, c] = face.map(|i| mesh.vertices()[i as usize]);
            assert!((b - a).cross(&(c - a)).x > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_inside_straddling_cells_near_the_surface() {
        let center = Point3::new(6.1, 5.9, 6.05);
        let field = sphere([12, 12, 12], center, 4.0);
        let mesh = SurfaceNets.extract(&field, |p| p);

        assert!(mesh.num_faces() > 100);
        for v in mesh.vertices() {
            let cell = v.map(|c| c.floor().min(11.0) as usize);
            let (_, config) = super::super::cell_corners(&field, cell.x, cell.y, cell.z);
            assert!(config != 0 && config != 255, "vertex {v} not in a straddling cell");
            assert!(((v - center).norm() - 4.0).abs() < 1.0);
        }
    }

    #[test]
    fn closed_sphere_has_every_edge_shared_by_two_faces() {
        let field = sphere([12, 12, 12], Point3::new(6.2, 5.9, 6.1), 4.0);
        let mesh = SurfaceNets.extract(&field, |p| p);
        let mut edges = HashMap::new();
        for face in mesh.faces() {
            for i in 0..3 {
                let (a, b) = (face[i], face[(i + 1) % 3]);
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        assert!(edges.values().all(|&count| count == 2));
    }

    #[test]
    fn generator_attributes_are_carried_unchanged() {
        let field = sphere([8, 8, 8], Point3::new(4.0, 4.0, 4.0), 2.5);
        let mesh = SurfaceNets.extract(&field, |p| (p, p.x * 10.0));
        for (p, tag) in mesh.vertices() {
            assert_eq!(*tag, p.x * 10.0);
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let field = sphere([10, 9, 11], Point3::new(5.1, 4.3, 5.7), 3.3);
        let first = SurfaceNets.extract(&field, |p| p);
        let second = SurfaceNets.extract(&field, |p| p);
        assert_eq!(first, second);
    }
}
