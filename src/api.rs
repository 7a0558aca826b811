// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! The backend capability: every WebGL entry point this layer issues,
//! expressed as one trait so the real browser context and the headless
//! mock are interchangeable behind [`Context`](crate::context::Context).
//!
//! Implementations execute commands; they do not police call order. The
//! ordering contract lives in [`pipeline`](crate::pipeline) and is checked
//! only by the mock backend, the same way a GPU driver would accept the
//! calls and render garbage.

use crate::consts::{
    BufferTarget, BufferUsage, Capability, ClearMask, DataType, DrawMode, ErrorCode, Parameter,
    ShaderStage,
};
use crate::handle::{AttribLocation, Buffer, Program, Shader};

/// Command surface of the host rendering backend.
///
/// All methods are synchronous command issues; none block and none report
/// failure directly. Creation methods mint opaque handles; status and log
/// queries exist so the layer above can surface compile / link failures
/// as recoverable errors.
pub trait GlApi {
    // ---------- render state ----------

    /// Store the color used by the next `clear` with the COLOR bit set.
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Clear exactly the planes named by `mask`.
    fn clear(&mut self, mask: ClearMask);

    /// Turn on a fixed-function capability.
    fn enable(&mut self, cap: Capability);

    /// Turn off a fixed-function capability.
    fn disable(&mut self, cap: Capability);

    /// Map normalized device coordinates to a pixel rectangle.
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    // ---------- buffers ----------

    /// Allocate an opaque buffer object. WebGL buffers are untyped at
    /// creation; the target is chosen at bind time.
    fn create_buffer(&mut self) -> Buffer;

    /// Make `buffer` current for `target`; `None` unbinds. Target-scoped.
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Buffer>);

    /// Copy `data` into the buffer currently bound to `target`.
    ///
    /// The byte view stays borrowed for the whole call; the backend must
    /// finish copying before it returns. With nothing bound to `target`
    /// the backend records `InvalidOperation` and stores nothing.
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    // ---------- shaders ----------

    /// Allocate a shader object for `stage`.
    fn create_shader(&mut self, stage: ShaderStage) -> Shader;

    /// Attach source text. Must happen before `compile_shader`.
    fn shader_source(&mut self, shader: Shader, source: &str);

    /// Compile previously attached source. Outcome is observable only via
    /// `shader_compile_status` / `shader_info_log`.
    fn compile_shader(&mut self, shader: Shader);

    fn shader_compile_status(&mut self, shader: Shader) -> bool;

    /// Backend diagnostic text for the last compile; empty when clean.
    fn shader_info_log(&mut self, shader: Shader) -> String;

    // ---------- programs ----------

    /// Allocate an empty program object.
    fn create_program(&mut self) -> Program;

    /// Attach a compiled-or-not shader; callable once per stage.
    fn attach_shader(&mut self, program: Program, shader: Shader);

    /// Link the attached stages. Outcome is observable only via
    /// `program_link_status` / `program_info_log`.
    fn link_program(&mut self, program: Program);

    fn program_link_status(&mut self, program: Program) -> bool;

    /// Backend diagnostic text for the last link; empty when clean.
    fn program_info_log(&mut self, program: Program) -> String;

    /// Make `program` the active one for location queries and draws.
    fn use_program(&mut self, program: Program);

    // ---------- vertex attributes ----------

    /// Resolve an attribute name against a linked program. Absent names
    /// answer the backend's sentinel (-1), passed through as-is.
    fn get_attrib_location(&mut self, program: Program, name: &str) -> AttribLocation;

    /// Describe how the buffer bound to `Array` feeds the attribute at
    /// `location`: `size` components of `data_type` per vertex, walked
    /// with `stride` / `offset` in bytes.
    fn vertex_attrib_pointer(
        &mut self,
        location: AttribLocation,
        size: i32,
        data_type: DataType,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    /// Activate the attribute slot so the pointer description takes
    /// effect; a never-enabled slot reads as constant/undefined input.
    fn enable_vertex_attrib_array(&mut self, location: AttribLocation);

    // ---------- draw ----------

    /// Submit `count` indices of `index_type` from the bound element-array
    /// buffer starting at byte `offset`, assembled as `mode` topology.
    fn draw_elements(&mut self, mode: DrawMode, count: i32, index_type: DataType, offset: i32);

    // ---------- queries ----------

    /// Return and clear the pending error code.
    fn get_error(&mut self) -> ErrorCode;

    /// Query an integer implementation limit.
    fn get_parameter(&mut self, param: Parameter) -> i32;
}
