//! Integration tests for the draw-time binding flow.
//!
//! A render pass is expected to call `Material::bind()` while the material's
//! shader is active, then `Mesh::bind()`, then issue a draw call sized by the
//! mesh binding's draw count and keyed by its topology. These tests walk that
//! sequence end to end over the public API.

use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};
use rstest::rstest;

use glint_graphics::{
    GraphicsDevice, GraphicsInstance, Material, PrimitiveTopology, ShaderDescriptor, UniformType,
    UniformValue,
};

fn create_test_device() -> Arc<GraphicsDevice> {
    let _ = env_logger::builder().is_test(true).try_init();
    let instance = GraphicsInstance::new().unwrap();
    instance.create_device().unwrap()
}

fn pbr_shader(device: &Arc<GraphicsDevice>) -> Arc<glint_graphics::Shader> {
    device
        .create_shader(
            &ShaderDescriptor::new()
                .with_uniform("color", UniformType::Vec4)
                .with_uniform("tex", UniformType::Texture)
                .with_uniform("mrTex", UniformType::Texture)
                .with_uniform("metallicRoughness", UniformType::Vec4)
                .with_label("pbr"),
        )
        .unwrap()
}

#[test]
fn draw_sequence_for_indexed_sphere() {
    let device = create_test_device();

    let mut material = Material::new(device.clone(), pbr_shader(&device));
    material.set_color(Vec4::new(0.7, 0.1, 0.1, 1.0)).unwrap();
    material
        .set_metallic_roughness(Vec2::new(1.0, 0.3))
        .unwrap();

    let mesh = device.create_mesh().with_sphere().build().unwrap();

    // Material first: the uniform snapshot covers every declared uniform.
    let uniforms = material.bind();
    assert_eq!(uniforms.uniform_count(), 4);
    assert_eq!(uniforms.shader().label(), "pbr");

    // Then the mesh: buffers, layout, and the draw size.
    let geometry = mesh.bind();
    assert!(geometry.is_indexed());
    assert_eq!(geometry.topology(), PrimitiveTopology::TriangleList);
    assert_eq!(geometry.draw_count() as usize, mesh.index_count());
    assert_eq!(geometry.primitive_count(), geometry.draw_count() / 3);
    assert_eq!(geometry.vertex_count() as usize, mesh.vertex_count());
}

#[test]
fn draw_sequence_for_unindexed_points() {
    let device = create_test_device();

    let shader = device
        .create_shader(
            &ShaderDescriptor::new()
                .with_uniform("color", UniformType::Vec4)
                .with_label("particles"),
        )
        .unwrap();
    let material = Material::new(device.clone(), shader);

    let mesh = device
        .create_mesh()
        .with_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z])
        .with_point_sizes(vec![1.0, 2.0, 3.0, 4.0])
        .with_topology(PrimitiveTopology::PointList)
        .build()
        .unwrap();

    let uniforms = material.bind();
    assert_eq!(uniforms.uniform_count(), 1);

    let geometry = mesh.bind();
    assert!(!geometry.is_indexed());
    assert!(geometry.index_buffer().is_none());
    assert_eq!(geometry.draw_count(), 4);
    assert_eq!(geometry.primitive_count(), 4);
}

#[test]
fn default_uniforms_flow_into_binding() {
    let device = create_test_device();
    let material = Material::new(device.clone(), pbr_shader(&device));

    let binding = material.bind();
    let white = device.white_texture();

    // Untouched texture uniforms push the shared default white texture.
    let textures: Vec<_> = binding
        .uniforms()
        .iter()
        .filter_map(|(_, value)| match value {
            UniformValue::Texture(t) => Some(t.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(textures.len(), 2);
    for texture in textures {
        assert!(Arc::ptr_eq(&texture, &white));
    }
}

#[test]
fn rebinding_after_update_sees_new_geometry() {
    let device = create_test_device();
    let mesh = device
        .create_mesh()
        .with_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y])
        .with_indices(vec![0, 1, 2])
        .build()
        .unwrap();

    let before = mesh.bind();
    assert_eq!(before.draw_count(), 3);

    mesh.update().with_cube().build().unwrap();

    let after = mesh.bind();
    assert_eq!(after.draw_count(), 36);
    // The vertex buffer handle survived the update.
    assert!(Arc::ptr_eq(before.vertex_buffer(), after.vertex_buffer()));
}

#[rstest]
#[case::triangles(PrimitiveTopology::TriangleList, 6, 2)]
#[case::lines(PrimitiveTopology::LineList, 6, 3)]
#[case::points(PrimitiveTopology::PointList, 6, 6)]
fn primitive_count_follows_topology(
    #[case] topology: PrimitiveTopology,
    #[case] index_count: usize,
    #[case] expected_primitives: u32,
) {
    let device = create_test_device();
    let mesh = device
        .create_mesh()
        .with_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z])
        .with_indices(vec![0, 1, 2, 2, 3, 0][..index_count].to_vec())
        .with_topology(topology)
        .build()
        .unwrap();

    assert_eq!(mesh.bind().primitive_count(), expected_primitives);
}
