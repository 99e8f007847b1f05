use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::mesh::{Mesh, Vertex};

/// Loads a glTF/GLB file into a single merged mesh, with node transforms
/// applied so the result is in model space.
pub fn load_gltf_file(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    log::info!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    let mut mesh = Mesh::default();

    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut mesh)?;
        }
    }

    if mesh.vertices.is_empty() {
        anyhow::bail!("No geometry found in glTF file: {:?}", path);
    }

    log::info!(
        "Loaded {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.indices.len() / 3
    );
    Ok(mesh)
}

/// Recursively processes glTF nodes, accumulating transforms.
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    mesh: &mut Mesh,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(gltf_mesh) = node.mesh() {
        process_mesh(&gltf_mesh, buffers, &global_transform, mesh)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, mesh)?;
    }

    Ok(())
}

/// Appends a glTF mesh's primitives to the merged mesh.
fn process_mesh(
    gltf_mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    mesh: &mut Mesh,
) -> Result<()> {
    // Normals need the inverse-transpose under non-uniform node scales.
    let normal_transform = transform.inverse().transpose();

    for primitive in gltf_mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if positions.is_empty() {
            continue;
        }

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| {
                    normal_transform
                        .transform_vector3(Vec3::from_array(n))
                        .normalize_or_zero()
                })
                .collect(),
            None => vec![Vec3::Y; positions.len()],
        };

        // Get material color (default to gray)
        let base_color = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();
        let color = [base_color[0], base_color[1], base_color[2]];

        let base = mesh.vertices.len() as u32;
        for (position, normal) in positions.iter().zip(&normals) {
            mesh.vertices.push(Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color,
            });
        }

        match reader.read_indices() {
            Some(indices) => mesh
                .indices
                .extend(indices.into_u32().map(|i| base + i)),
            None => mesh
                .indices
                .extend((0..positions.len() as u32).map(|i| base + i)),
        }
    }

    Ok(())
}
