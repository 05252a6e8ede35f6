//! Mesh generators for common shapes.
//!
//! These generators produce [`MeshData`] values with positions, normals,
//! texture coordinates, and indices filled in. The output is deterministic
//! for a given set of arguments. Texture coordinates are stored in the
//! 4-component form used by [`MeshData`], with `z` and `w` zero.

use std::f32::consts::PI;

use glam::{Vec3, Vec4};

use super::data::MeshData;

/// Generate a UV sphere.
///
/// Creates a sphere with the given radius, number of longitudinal segments,
/// and number of latitudinal rings, indexed as a triangle list.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut data = MeshData::new();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.positions.push(Vec3::new(x, y, z) * radius);
            data.normals.push(Vec3::new(x, y, z));
            data.uvs.push(Vec4::new(
                segment as f32 / segments as f32,
                ring as f32 / rings as f32,
                0.0,
                0.0,
            ));
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = (ring * (segments + 1) + segment) as u16;
            let next = current + segments as u16 + 1;

            data.indices
                .extend_from_slice(&[current, next, current + 1]);
            data.indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    data
}

/// Generate an axis-aligned cube centered at the origin.
///
/// Each face contributes four vertices with its own flat normal, so the cube
/// has 24 vertices and 36 indices.
///
/// # Arguments
///
/// * `half_extent` - Half the edge length along each axis
pub fn generate_cube(half_extent: f32) -> MeshData {
    let h = half_extent;

    // (normal, four corners in CCW order seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
        ),
        (
            -Vec3::Z,
            [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
        ),
        (
            -Vec3::X,
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
        ),
        (
            -Vec3::Y,
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
        ),
    ];

    let face_uvs = [
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(1.0, 1.0, 0.0, 0.0),
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 0.0),
    ];

    let mut data = MeshData::new();
    for (face, (normal, corners)) in faces.iter().enumerate() {
        let base = (face * 4) as u16;
        for (corner, uv) in corners.iter().zip(face_uvs) {
            data.positions.push(*corner);
            data.normals.push(*normal);
            data.uvs.push(uv);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    data
}

/// Generate a quad on the XY plane, centered at the origin, facing +Z.
///
/// UV coordinates go from (0,0) at bottom-left to (1,1) at top-right.
///
/// # Arguments
///
/// * `half_size` - Half the edge length along X and Y
pub fn generate_quad(half_size: f32) -> MeshData {
    let s = half_size;

    MeshData {
        positions: vec![
            Vec3::new(-s, -s, 0.0),
            Vec3::new(s, -s, 0.0),
            Vec3::new(s, s, 0.0),
            Vec3::new(-s, s, 0.0),
        ],
        normals: vec![Vec3::Z; 4],
        uvs: vec![
            Vec4::new(0.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
        ..Default::default()
    }
}
