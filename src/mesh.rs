//! Triangle meshes and the object-to-world poser.
//!
//! A [`Mesh`] stores faces in object space together with a [`Transform`].
//! [`Mesh::world_faces`] produces the world-space faces the renderer
//! consumes. Normals and texture coordinates are optional per vertex; the
//! renderer synthesizes flat normals and substitutes a white texel when
//! they are absent.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::{Texture, TextureError};
use crate::transform::Transform;

#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    Texture(TextureError),
    /// The file parsed but contained no triangles.
    NoGeometry(PathBuf),
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<TextureError> for LoadError {
    fn from(e: TextureError) -> Self {
        LoadError::Texture(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "OBJ error: {}", e),
            LoadError::Texture(e) => write!(f, "texture error: {}", e),
            LoadError::NoGeometry(path) => write!(f, "{} contains no faces", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Texture(e) => Some(e),
            LoadError::NoGeometry(_) => None,
        }
    }
}

/// One corner of a face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub uv: Option<Vec2>,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = Some(uv);
        self
    }
}

/// An ordered triple of vertices. Winding decides the sign of
/// [`Face::flat_normal`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub vertices: [Vertex; 3],
}

impl Face {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.vertices.map(|v| v.position)
    }

    /// Mean of the three vertex positions.
    pub fn centroid(&self) -> Vec3 {
        let [a, b, c] = self.positions();
        (a + b + c) / 3.0
    }

    /// Unit normal from the two edge vectors: `cross(v1 - v0, v0 - v2)`.
    ///
    /// For faces wound counter-clockwise when seen from outside this points
    /// into the surface. Zero-area faces give a non-finite vector.
    pub fn flat_normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.positions();
        (v1 - v0).cross(v0 - v2).normalize()
    }
}

// Unit cube corners; the quads below are wound counter-clockwise seen from outside.
const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
];

const CUBE_QUADS: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // front (+Z)
    [5, 4, 7, 6], // back (-Z)
    [1, 5, 6, 2], // right (+X)
    [4, 0, 3, 7], // left (-X)
    [3, 2, 6, 7], // top (+Y)
    [4, 5, 1, 0], // bottom (-Y)
];

const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

#[derive(Clone, Debug)]
pub struct Mesh {
    name: String,
    faces: Vec<Face>,
    transform: Transform,
    color: Color,
    texture: Option<Texture>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            faces,
            transform: Transform::default(),
            color: Color::WHITE,
            texture: None,
        }
    }

    /// A 2x2x2 cube centred on the origin with per-face UVs and no normals.
    pub fn cube() -> Self {
        let faces = CUBE_QUADS
            .iter()
            .flat_map(|quad| {
                let corner = |i: usize| Vertex::new(CUBE_CORNERS[quad[i]]).with_uv(QUAD_UVS[i]);
                [
                    Face::new(corner(0), corner(1), corner(2)),
                    Face::new(corner(0), corner(2), corner(3)),
                ]
            })
            .collect();
        Self::new("cube", faces)
    }

    /// Load every object in an OBJ file as a separate mesh.
    ///
    /// Polygons are triangulated. Meshes without normals keep `None` normals
    /// and get flat normals at render time.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let meshes: Vec<Mesh> = models
            .into_iter()
            .map(|model| {
                let mesh = &model.mesh;
                if mesh.normals.is_empty() {
                    log::warn!(
                        "{}: object '{}' has no normals, flat normals will be used",
                        path.display(),
                        model.name
                    );
                }
                let vertex = |index: u32| {
                    let i = index as usize;
                    let p = &mesh.positions[3 * i..3 * i + 3];
                    Vertex {
                        position: Vec3::new(p[0], p[1], p[2]),
                        normal: mesh
                            .normals
                            .get(3 * i..3 * i + 3)
                            .map(|n| Vec3::new(n[0], n[1], n[2])),
                        uv: mesh
                            .texcoords
                            .get(2 * i..2 * i + 2)
                            .map(|t| Vec2::new(t[0], t[1])),
                    }
                };
                let faces = mesh
                    .indices
                    .chunks_exact(3)
                    .map(|tri| Face::new(vertex(tri[0]), vertex(tri[1]), vertex(tri[2])))
                    .collect();
                Mesh::new(model.name, faces)
            })
            .filter(|mesh| !mesh.faces.is_empty())
            .collect();

        if meshes.is_empty() {
            return Err(LoadError::NoGeometry(path.to_path_buf()));
        }

        log::info!(
            "loaded {} ({} objects, {} faces)",
            path.display(),
            meshes.len(),
            meshes.iter().map(|m| m.face_count()).sum::<usize>()
        );
        Ok(meshes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Base color multiplied with light and texture.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    /// Negate every stored normal. Useful for files whose normals point
    /// the opposite way from the renderer's culling and lighting convention.
    pub fn invert_normals(&mut self) {
        for face in &mut self.faces {
            for vertex in &mut face.vertices {
                vertex.normal = vertex.normal.map(|n| -n);
            }
        }
    }

    /// Faces transformed into world space.
    ///
    /// Positions go through the object-to-world matrix, normals through the
    /// normal matrix and are renormalized. Absent normals stay absent.
    pub fn world_faces(&self) -> impl Iterator<Item = Face> + '_ {
        let world = self.transform.to_matrix();
        let normal_matrix = self.transform.normal_matrix();

        self.faces.iter().map(move |face| Face {
            vertices: face.vertices.map(|v| Vertex {
                position: world.transform_point(v.position),
                normal: v
                    .normal
                    .map(|n| normal_matrix.transform_direction(n).normalize()),
                uv: v.uv,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn cube_has_twelve_faces_without_normals() {
        let cube = Mesh::cube();
        assert_eq!(cube.face_count(), 12);
        assert!(cube
            .faces()
            .iter()
            .all(|f| f.vertices.iter().all(|v| v.normal.is_none() && v.uv.is_some())));
    }

    #[test]
    fn cube_flat_normals_point_inward() {
        for face in Mesh::cube().faces() {
            let n = face.flat_normal();
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
            assert!(n.dot(face.centroid()) < 0.0, "normal of {:?} points outward", face);
        }
    }

    #[test]
    fn world_faces_apply_transform() {
        let face = Face::new(
            Vertex::new(Vec3::X).with_normal(Vec3::X),
            Vertex::new(Vec3::Y).with_normal(Vec3::X),
            Vertex::new(Vec3::Z),
        );
        let mut mesh = Mesh::new("tri", vec![face]);
        *mesh.transform_mut() = Transform::from_translation(Vec3::new(0.0, 0.0, 5.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
            .with_uniform_scale(2.0);

        let world: Vec<Face> = mesh.world_faces().collect();
        let [a, _, c] = world[0].vertices;

        // X scaled to 2, rotated about Y onto -Z, then moved by +5 on Z.
        assert_relative_eq!(a.position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(a.position.z, 3.0, epsilon = 1e-5);
        let n = a.normal.unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-5);
        assert_eq!(c.normal, None);
    }

    #[test]
    fn invert_normals_flips_only_present_normals() {
        let face = Face::new(
            Vertex::new(Vec3::ZERO).with_normal(Vec3::Y),
            Vertex::new(Vec3::X),
            Vertex::new(Vec3::Z),
        );
        let mut mesh = Mesh::new("tri", vec![face]);
        mesh.invert_normals();
        assert_eq!(mesh.faces()[0].vertices[0].normal, Some(-Vec3::Y));
        assert_eq!(mesh.faces()[0].vertices[1].normal, None);
    }

    fn write_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rastery-{}-{}.obj", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn obj_objects_become_separate_meshes() {
        let path = write_obj(
            "objects",
            "o quad\n\
             v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n\
             o bare\n\
             v 0 0 2\nv 1 0 2\nv 0 1 2\n\
             f 5 6 7\n",
        );
        let meshes = Mesh::load_obj(&path);
        let _ = std::fs::remove_file(&path);
        let meshes = meshes.unwrap();

        assert_eq!(meshes.len(), 2);
        let (quad, bare) = (&meshes[0], &meshes[1]);

        assert_eq!(quad.name(), "quad");
        assert_eq!(quad.face_count(), 2);
        for v in quad.faces().iter().flat_map(|f| f.vertices) {
            assert_eq!(v.normal, Some(Vec3::Z));
            assert!(v.uv.is_some());
        }
        assert_eq!(quad.faces()[0].vertices[0].uv, Some(Vec2::ZERO));

        assert_eq!(bare.name(), "bare");
        assert_eq!(bare.face_count(), 1);
        let [a, b, c] = bare.faces()[0].vertices;
        assert_eq!(a.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(b.position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(c.position, Vec3::new(0.0, 1.0, 2.0));
        assert!([a, b, c].iter().all(|v| v.normal.is_none() && v.uv.is_none()));
    }

    #[test]
    fn obj_without_faces_has_no_geometry() {
        let path = write_obj("points", "v 0 0 0\nv 1 0 0\nv 0 1 0\n");
        let result = Mesh::load_obj(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(LoadError::NoGeometry(p)) if p == path));
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        assert!(matches!(
            Mesh::load_obj("does/not/exist.obj"),
            Err(LoadError::Obj(_))
        ));
    }
}
