use pixel_webgl::consts::{
    BufferTarget, BufferUsage, Capability, ClearMask, DataType, DrawMode, ErrorCode,
};
use pixel_webgl::context::Context;
use pixel_webgl::mock::{DrawCall, MockGl};
use pixel_webgl::pipeline::{build_program, upload_buffer};
use pixel_webgl::state::Viewport;

const VERTEX_SHADER: &str = r#"
attribute vec3 coordinates;
void main(void) {
    gl_Position = vec4(coordinates, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
void main(void) {
    gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

// The smallest indexed draw there is: three vertices, one triangle,
// walked through the full setup order against the recording backend.
#[test]
fn test_red_triangle_setup_and_draw() {
    let vertices: [f32; 9] = [-0.5, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0];
    let indices: [u16; 3] = [2, 1, 0];

    let mut ctx = Context::new(MockGl::new());

    // Geometry, each buffer bound only for its own upload.
    let vbo = upload_buffer(
        &mut ctx,
        BufferTarget::Array,
        &vertices,
        BufferUsage::StaticDraw,
    );
    let ibo = upload_buffer(
        &mut ctx,
        BufferTarget::ElementArray,
        &indices,
        BufferUsage::StaticDraw,
    );

    // Shaders, program, activation.
    let program = build_program(&mut ctx, VERTEX_SHADER, FRAGMENT_SHADER).expect("link failed");
    ctx.use_program(program);

    // Re-bind what the draw will consume.
    ctx.bind_buffer(BufferTarget::Array, Some(vbo));
    ctx.bind_buffer(BufferTarget::ElementArray, Some(ibo));

    // Wire the one attribute of the linked program.
    let coords = ctx.get_attrib_location(program, "coordinates");
    assert_eq!(coords.raw(), 0);
    ctx.vertex_attrib_pointer(coords, 3, DataType::Float, false, 0, 0);
    ctx.enable_vertex_attrib_array(coords);

    // Render state, then the draw itself.
    ctx.set_clear_color(0.5, 0.5, 0.5, 0.9);
    ctx.clear(ClearMask::COLOR);
    ctx.enable(Capability::DepthTest);
    ctx.set_viewport(0, 0, 640, 480);
    ctx.draw_elements(DrawMode::Triangles, 3, DataType::UnsignedShort, 0);

    assert_eq!(ctx.get_error(), ErrorCode::NoError);
    assert_eq!(
        ctx.state().viewport,
        Some(Viewport {
            x: 0,
            y: 0,
            width: 640,
            height: 480
        })
    );

    // Scenario complete; take the backend back and audit the journal.
    let gl = ctx.into_backend();
    assert!(
        gl.violations().is_empty(),
        "protocol violations: {:?}",
        gl.violations()
    );
    assert_eq!(
        gl.draw_calls(),
        &[DrawCall {
            mode: DrawMode::Triangles,
            count: 3,
            index_type: DataType::UnsignedShort,
            offset: 0,
            array_buffer: Some(vbo),
            element_array_buffer: Some(ibo),
            program: Some(program),
        }]
    );
    assert_eq!(
        gl.buffer(vbo).data,
        bytemuck::cast_slice::<f32, u8>(&vertices)
    );
    assert_eq!(gl.buffer(ibo).data, bytemuck::cast_slice::<u16, u8>(&indices));
    assert!(gl.is_attrib_enabled(coords));
    assert!(gl.is_enabled(Capability::DepthTest));
    assert_eq!(gl.viewport_rect(), Some((0, 0, 640, 480)));
}

#[test]
fn test_attribute_pointer_is_recorded_as_issued() {
    let mut ctx = Context::new(MockGl::new());
    let program = build_program(&mut ctx, VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
    ctx.use_program(program);

    let coords = ctx.get_attrib_location(program, "coordinates");
    ctx.vertex_attrib_pointer(coords, 3, DataType::Float, false, 12, 0);

    let pointers = ctx.backend().attrib_pointers();
    assert_eq!(pointers.len(), 1);
    assert_eq!(pointers[0].location, coords);
    assert_eq!(pointers[0].size, 3);
    assert_eq!(pointers[0].data_type, DataType::Float);
    assert_eq!(pointers[0].stride, 12);
    assert!(!pointers[0].normalized);
}
