//! Renderer seam: the evaluation core produces geometry values, and a
//! consumer applies them to whatever graphics API the host uses.

use std::io::{self, Write};

use crate::mesh::{CurveMesh, TriangleMesh};

/// Consumer of tessellated geometry. The core never issues drawing
/// calls itself; hosts implement this against their graphics API.
pub trait Renderable {
    fn draw_curve(&mut self, mesh: &CurveMesh) -> io::Result<()>;
    fn draw_surface(&mut self, mesh: &TriangleMesh) -> io::Result<()>;
}

/// Reference consumer writing Wavefront OBJ text.
///
/// Surfaces become `v`/`vn`/`f` records (faces reference position and
/// normal with the same 1-based index); curves become `v` records with
/// `l` polyline elements.
pub struct ObjSink<W: Write> {
    writer: W,
    /// Vertices already written; OBJ indices are global to the file.
    vertex_base: u32,
}

impl<W: Write> ObjSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vertex_base: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderable for ObjSink<W> {
    fn draw_curve(&mut self, mesh: &CurveMesh) -> io::Result<()> {
        writeln!(self.writer, "# polyline: {} points", mesh.points.len())?;
        for p in &mesh.points {
            writeln!(self.writer, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        }

        write!(self.writer, "l")?;
        for i in 0..mesh.points.len() as u32 {
            write!(self.writer, " {}", self.vertex_base + i + 1)?;
        }
        writeln!(self.writer)?;

        self.vertex_base += mesh.points.len() as u32;
        Ok(())
    }

    fn draw_surface(&mut self, mesh: &TriangleMesh) -> io::Result<()> {
        writeln!(
            self.writer,
            "# surface: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        )?;
        for p in &mesh.vertices {
            writeln!(self.writer, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        }
        for n in &mesh.normals {
            writeln!(self.writer, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        }

        for tri in mesh.indices.chunks_exact(3) {
            let i0 = self.vertex_base + tri[0] + 1;
            let i1 = self.vertex_base + tri[1] + 1;
            let i2 = self.vertex_base + tri[2] + 1;
            writeln!(self.writer, "f {i0}//{i0} {i1}//{i1} {i2}//{i2}")?;
        }

        self.vertex_base += mesh.vertices.len() as u32;
        Ok(())
    }
}
