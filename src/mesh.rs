use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Triangle list produced by tessellating a patch, ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn new(vertices: Vec<Vertex>, indices: impl IntoIterator<Item = u32>) -> Self {
        let indices = indices.into_iter().collect::<Vec<_>>();
        debug_assert_eq!(indices.len() % 3, 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    pub fn normals(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.normal)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Appends `other`, offsetting its indices past the vertices already present.
    pub fn append(&mut self, other: &SurfaceMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounds, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.positions();
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, Vec3};
    use test_log::test;

    use super::{SurfaceMesh, Vertex};

    fn quad(offset: Vec3) -> SurfaceMesh {
        let vertex = |position: Vec3| Vertex {
            position: position + offset,
            normal: Vec3::Z,
            uv: vec2(position.x, position.y),
        };
        SurfaceMesh::new(
            vec![
                vertex(Vec3::ZERO),
                vertex(Vec3::X),
                vertex(Vec3::Y),
                vertex(Vec3::X + Vec3::Y),
            ],
            [0, 1, 2, 1, 3, 2],
        )
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        let mesh = quad(Vec3::ZERO);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 32);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn append_offsets_indices() {
        let mut mesh = quad(Vec3::ZERO);
        mesh.append(&quad(Vec3::Z));
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices()[6..], &[4, 5, 6, 5, 7, 6]);
        let [a, _, _] = mesh.triangles().nth(2).unwrap();
        assert_eq!(a.position, Vec3::Z);
    }

    #[test]
    fn bounds() {
        assert_eq!(SurfaceMesh::default().bounds(), None);
        let (min, max) = quad(Vec3::Z).bounds().unwrap();
        assert_eq!(min, Vec3::Z);
        assert_eq!(max, Vec3::ONE);
    }
}
