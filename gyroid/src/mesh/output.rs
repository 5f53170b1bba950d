//! Mesh output implementation
use super::Mesh;
use nalgebra::Vector3;
use std::io::{BufWriter, Write};

impl Mesh {
    /// Unit normal of a triangle, or zero if it's degenerate
    fn normal(&self, [a, b, c]: [usize; 3]) -> Vector3<f32> {
        let a = self.vertices[a];
        let ab = self.vertices[b] - a;
        let ac = self.vertices[c] - a;
        ab.cross(&ac)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Writes a binary STL to the given output
    ///
    /// Quads are split into two triangles.
    pub fn write_stl<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        // We're going to do many small writes and will typically be writing to
        // a file, so using a `BufWriter` saves excessive syscalls.
        let mut out = BufWriter::new(out);
        const HEADER: &[u8] = b"This is a binary STL file exported by gyroid";
        static_assertions::const_assert!(HEADER.len() <= 80);
        out.write_all(HEADER)?;
        out.write_all(&[0u8; 80 - HEADER.len()])?;
        out.write_all(&(self.triangle_count() as u32).to_le_bytes())?;
        for t in self.triangles() {
            for p in &self.normal(t) {
                out.write_all(&p.to_le_bytes())?;
            }
            for v in t {
                for p in &self.vertices[v] {
                    out.write_all(&p.to_le_bytes())?;
                }
            }
            out.write_all(&[0u8; std::mem::size_of::<u16>()])?; // attributes
        }
        out.flush()?;
        Ok(())
    }

    /// Writes an ASCII STL to the given output
    ///
    /// Quads are split into two triangles.
    pub fn write_stl_ascii<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        let mut out = BufWriter::new(out);
        writeln!(out, "solid gyroid")?;
        for t in self.triangles() {
            let n = self.normal(t);
            writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
            writeln!(out, "    outer loop")?;
            for v in t {
                let p = self.vertices[v];
                writeln!(out, "      vertex {:e} {:e} {:e}", p.x, p.y, p.z)?;
            }
            writeln!(out, "    endloop")?;
            writeln!(out, "  endfacet")?;
        }
        writeln!(out, "endsolid gyroid")?;
        out.flush()?;
        Ok(())
    }

    /// Writes a Wavefront OBJ to the given output
    ///
    /// Shared vertices and quads are preserved; indexes are 1-based.
    pub fn write_obj<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        let mut out = BufWriter::new(out);
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for f in &self.faces {
            write!(out, "f")?;
            for i in f.indices() {
                write!(out, " {}", i + 1)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}
