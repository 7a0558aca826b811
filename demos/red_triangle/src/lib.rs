// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Smallest complete run of the pipeline order: one canvas, two buffers,
//! one program, one indexed triangle. Open index.html after a wasm-pack
//! build to see it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
const VERTEX_SHADER: &str = r#"
attribute vec3 coordinates;
void main(void) {
    gl_Position = vec4(coordinates, 1.0);
}
"#;

#[cfg(target_arch = "wasm32")]
const FRAGMENT_SHADER: &str = r#"
void main(void) {
    gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    use log::info;
    use pixel_webgl::canvas::Canvas;
    use pixel_webgl::consts::{
        BufferTarget, BufferUsage, Capability, ClearMask, DataType, DrawMode,
    };
    use pixel_webgl::context::Context;
    use pixel_webgl::log::init_log;
    use pixel_webgl::pipeline::{build_program, upload_buffer};

    init_log(log::LevelFilter::Info, "");

    let canvas = Canvas::create_in("app", "canvas");
    let mut ctx = Context::acquire(&canvas).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let vertices: [f32; 9] = [-0.5, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0];
    let indices: [u16; 3] = [2, 1, 0];

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

    let program = build_program(&mut ctx, VERTEX_SHADER, FRAGMENT_SHADER)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    ctx.use_program(program);

    ctx.bind_buffer(BufferTarget::Array, Some(vbo));
    ctx.bind_buffer(BufferTarget::ElementArray, Some(ibo));

    let coordinates = ctx.get_attrib_location(program, "coordinates");
    ctx.vertex_attrib_pointer(coordinates, 3, DataType::Float, false, 0, 0);
    ctx.enable_vertex_attrib_array(coordinates);

    ctx.set_clear_color(0.5, 0.5, 0.5, 0.9);
    ctx.clear(ClearMask::COLOR);
    ctx.enable(Capability::DepthTest);
    ctx.set_viewport(0, 0, canvas.width() as i32, canvas.height() as i32);

    ctx.draw_elements(DrawMode::Triangles, 3, DataType::UnsignedShort, 0);
    info!("red triangle drawn on {}x{}", canvas.width(), canvas.height());
    Ok(())
}
