use crate::core::models::surface::BoundarySurface;
use std::fs;
use std::io;
use std::path::Path;

/// Renders `surface` as Wavefront OBJ text with 1-based face indices.
pub fn to_obj(surface: &BoundarySurface, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# {} vertices, {} faces\n",
        surface.vertex_count(),
        surface.face_count()
    ));
    out.push_str(&format!("o {name}\n"));
    for v in surface.vertices() {
        out.push_str(&format!("v {} {} {}\n", v.x, v.y, v.z));
    }
    for [a, b, c] in surface.faces() {
        out.push_str(&format!("f {} {} {}\n", a + 1, b + 1, c + 1));
    }
    out
}

pub fn write_obj_to_path(
    surface: &BoundarySurface,
    name: &str,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    fs::write(path, to_obj(surface, name))
}
