use crate::math::AABB;
use glam::Vec3;

/// Target extent for displayed models: after normalization the largest
/// bounding-box dimension equals this, whatever the authored scale.
pub const NORMALIZED_SIZE: f32 = 2.0;

/// Color of the placeholder cube shown when model loading fails.
pub const FALLBACK_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Triangle mesh in model space. One mesh is displayed at a time: the
/// loaded model or the fallback cube.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn aabb(&self) -> Option<AABB> {
        AABB::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
    }

    /// Translate so the bounding-box center sits at the origin and scale
    /// uniformly so the largest extent equals `target`. Degenerate
    /// meshes (empty, or collapsed to a point) are left untouched.
    pub fn normalize_to_fit(&mut self, target: f32) {
        let Some(bounds) = self.aabb() else { return };

        let max_extent = bounds.max_extent();
        if max_extent <= f32::EPSILON {
            return;
        }

        let scale = target / max_extent;
        let center = bounds.center();
        for vertex in &mut self.vertices {
            let p = (Vec3::from_array(vertex.position) - center) * scale;
            vertex.position = p.to_array();
        }
    }

    /// Axis-aligned unit cube (edge length 1) centered at the origin,
    /// with per-face normals.
    pub fn unit_cube(color: [f32; 3]) -> Mesh {
        const H: f32 = 0.5;

        // (normal, u, v) per face; corners are n*H +/- u*H +/- v*H.
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Y, Vec3::Z),
            (Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::X, Vec3::Y),
        ];

        let mut mesh = Mesh::default();
        for (n, u, v) in faces {
            let base = mesh.vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = n * H + u * (su * H) + v * (sv * H);
                mesh.vertices.push(Vertex {
                    position: corner.to_array(),
                    normal: n.to_array(),
                    color,
                });
            }
            mesh.indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

/// The placeholder shown instead of an empty scene when loading fails.
pub fn fallback_cube() -> Mesh {
    Mesh::unit_cube(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_quad_faces() {
        let cube = fallback_cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
    }

    #[test]
    fn cube_spans_the_unit_box() {
        let bounds = fallback_cube().aabb().unwrap();
        assert_eq!(bounds.min, Vec3::splat(-0.5));
        assert_eq!(bounds.max, Vec3::splat(0.5));
    }

    #[test]
    fn normalization_centers_and_scales_arbitrary_meshes() {
        // A cube that is both far from the origin and much larger than
        // the display envelope.
        let mut mesh = Mesh::unit_cube([1.0, 0.0, 0.0]);
        for vertex in &mut mesh.vertices {
            let p = Vec3::from_array(vertex.position) * 173.0 + Vec3::new(40.0, -7.0, 250.0);
            vertex.position = p.to_array();
        }

        mesh.normalize_to_fit(NORMALIZED_SIZE);

        let bounds = mesh.aabb().unwrap();
        assert!(bounds.center().length() < 1e-3);
        assert!((bounds.max_extent() - NORMALIZED_SIZE).abs() < 1e-3);
    }

    #[test]
    fn normalization_handles_non_uniform_extents() {
        let mut mesh = Mesh::unit_cube([1.0, 1.0, 1.0]);
        for vertex in &mut mesh.vertices {
            let p = Vec3::from_array(vertex.position) * Vec3::new(10.0, 4.0, 1.0);
            vertex.position = p.to_array();
        }

        mesh.normalize_to_fit(NORMALIZED_SIZE);

        let size = mesh.aabb().unwrap().size();
        assert!((size.x - 2.0).abs() < 1e-3);
        assert!((size.y - 0.8).abs() < 1e-3);
        assert!((size.z - 0.2).abs() < 1e-3);
    }

    #[test]
    fn normalization_ignores_degenerate_meshes() {
        let mut empty = Mesh::default();
        empty.normalize_to_fit(NORMALIZED_SIZE);
        assert!(empty.vertices.is_empty());

        let mut point = Mesh::default();
        point.vertices.push(Vertex {
            position: [3.0, 3.0, 3.0],
            normal: [0.0, 1.0, 0.0],
            color: [1.0, 1.0, 1.0],
        });
        point.normalize_to_fit(NORMALIZED_SIZE);
        assert_eq!(point.vertices[0].position, [3.0, 3.0, 3.0]);
    }
}
