// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Pipeline module
//!
//! WebGL accepts its setup calls in one order only. The contract, spelled
//! out once here instead of in every caller:
//!
//! 1. create and upload the vertex buffer, then the index buffer, each
//!    bound for its upload and optionally unbound after;
//! 2. create, source and compile both shaders;
//! 3. create the program, attach both shaders, link, activate;
//! 4. re-bind the vertex and index buffers that the draw will consume;
//! 5. resolve attribute locations against the linked program, set the
//!    pointer layout, enable the arrays;
//! 6. set clear color, clear, enable capabilities, set the viewport;
//! 7. issue the draw call.
//!
//! Breaking the order is not an error the backend reports; it renders
//! garbage or nothing. The helpers below bundle the steps that always
//! travel together so callers cannot get those slices of the order wrong;
//! the mock backend flags the remaining misorderings in tests.

use crate::api::GlApi;
use crate::consts::{BufferTarget, BufferUsage, ShaderStage};
use crate::context::Context;
use crate::error::GlResult;
use crate::handle::{Buffer, Program, Shader};

/// Create a shader, attach `source` and compile it, surfacing the
/// backend's diagnostic log on failure.
pub fn compile<G: GlApi>(
    ctx: &mut Context<G>,
    stage: ShaderStage,
    source: &str,
) -> GlResult<Shader> {
    let shader = ctx.create_shader(stage);
    ctx.set_shader_source(shader, source);
    ctx.compile_shader(shader)?;
    Ok(shader)
}

/// Compile both stages, then create, attach and link a program.
///
/// The program is returned linked but not active; `use_program` is the
/// caller's step, before any location query or draw that consumes it.
pub fn build_program<G: GlApi>(
    ctx: &mut Context<G>,
    vertex_source: &str,
    fragment_source: &str,
) -> GlResult<Program> {
    let vs = compile(ctx, ShaderStage::Vertex, vertex_source)?;
    let fs = compile(ctx, ShaderStage::Fragment, fragment_source)?;

    let program = ctx.create_program();
    ctx.attach_shader(program, vs);
    ctx.attach_shader(program, fs);
    ctx.link_program(program)?;
    Ok(program)
}

/// Create a buffer, bind it to `target`, copy `data` in and unbind.
///
/// The unbind keeps later uploads from landing here by accident; the
/// caller re-binds the handle when the draw needs it.
pub fn upload_buffer<T: bytemuck::Pod, G: GlApi>(
    ctx: &mut Context<G>,
    target: BufferTarget,
    data: &[T],
    usage: BufferUsage,
) -> Buffer {
    let buffer = ctx.create_buffer(target);
    ctx.bind_buffer(target, Some(buffer));
    ctx.upload_data(target, data, usage);
    ctx.bind_buffer(target, None);
    buffer
}
