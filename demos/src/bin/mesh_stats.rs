//! Walks the public API end to end: builds meshes, configures a material,
//! and prints the binding state a render pass would consume.

use glam::{Vec2, Vec3, Vec4};

use glint_core::mesh::generators;
use glint_graphics::{
    GraphicsInstance, Material, PrimitiveTopology, ShaderDescriptor, UniformType,
};

fn main() {
    env_logger::init();
    glint_graphics::init();

    let instance = GraphicsInstance::new().expect("instance creation");
    let device = instance.create_device().expect("device creation");

    let shader = device
        .create_shader(
            &ShaderDescriptor::new()
                .with_uniform("color", UniformType::Vec4)
                .with_uniform("specularity", UniformType::Vec4)
                .with_uniform("tex", UniformType::Texture)
                .with_uniform("metallicRoughness", UniformType::Vec4)
                .with_label("standard"),
        )
        .expect("shader creation");

    let mut material = Material::new(device.clone(), shader);
    material.set_name("demo material");
    material
        .set_color(Vec4::new(0.9, 0.4, 0.1, 1.0))
        .expect("color is declared");
    material
        .set_metallic_roughness(Vec2::new(0.0, 0.6))
        .expect("metallicRoughness is declared");

    let sphere = device
        .create_mesh()
        .with_sphere()
        .with_label("sphere")
        .build()
        .expect("sphere geometry is valid");

    let triangle = device
        .create_mesh()
        .with_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y])
        .with_topology(PrimitiveTopology::TriangleList)
        .with_indices(vec![0, 1, 2])
        .with_label("triangle")
        .build()
        .expect("triangle geometry is valid");

    println!("device: {}", device.name());
    println!(
        "material '{}': {} uniforms pushed per draw",
        material.name(),
        material.bind().uniform_count()
    );

    for mesh in [&sphere, &triangle] {
        let binding = mesh.bind();
        let bounds = mesh.bounds();
        println!(
            "mesh {:?}: {} vertices, {} indices, {} primitives, {} bytes on GPU, bounds {:?}..{:?}",
            mesh.label(),
            mesh.vertex_count(),
            mesh.index_count(),
            binding.primitive_count(),
            mesh.data_size(),
            bounds.min,
            bounds.max,
        );
    }

    // Update the triangle in place; the handle and its buffers survive.
    let cube_data = generators::generate_cube(0.5);
    log::info!(
        "replacing triangle geometry with a cube ({} vertices)",
        cube_data.vertex_count()
    );
    triangle
        .update()
        .with_mesh_data(cube_data)
        .build()
        .expect("cube geometry is valid");
    println!(
        "after update: mesh {:?} now draws {} indices",
        triangle.label(),
        triangle.bind().draw_count()
    );

    println!(
        "live resources: {} buffers, {} textures, {} shaders",
        device.buffer_count(),
        device.texture_count(),
        device.shader_count()
    );
}
