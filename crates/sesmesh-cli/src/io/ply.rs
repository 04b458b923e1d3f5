use sesmesh::core::models::mesh::{Mesh, SurfaceVertex};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Writes the mesh as ASCII PLY with position, normal, texture coordinate
/// and 8-bit RGBA color per vertex.
pub fn write_to(mesh: &Mesh<SurfaceVertex>, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment generated by sesmesh {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, "element vertex {}", mesh.num_vertices())?;
    for property in ["x", "y", "z", "nx", "ny", "nz", "s", "t"] {
        writeln!(writer, "property float {}", property)?;
    }
    for channel in ["red", "green", "blue", "alpha"] {
        writeln!(writer, "property uchar {}", channel)?;
    }
    writeln!(writer, "element face {}", mesh.num_faces())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in mesh.vertices() {
        let [r, g, b, a] = [v.color.x, v.color.y, v.color.z, v.color.w].map(to_byte);
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {} {} {} {} {}",
            v.position.x as f32,
            v.position.y as f32,
            v.position.z as f32,
            v.normal.x as f32,
            v.normal.y as f32,
            v.normal.z as f32,
            v.uv.x as f32,
            v.uv.y as f32,
            r,
            g,
            b,
            a
        )?;
    }
    for [a, b, c] in mesh.faces() {
        writeln!(writer, "3 {} {} {}", a, b, c)?;
    }
    writer.flush()
}

pub fn write_to_path<P: AsRef<Path>>(mesh: &Mesh<SurfaceVertex>, path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(mesh, &mut writer)
}
