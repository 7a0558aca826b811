// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Context module
//!
//! The context is the single command channel to the rendering backend for
//! one canvas. Every operation of the layer is a method here; it forwards
//! to a [`GlApi`] backend and mirrors each state change into a
//! [`RenderState`] shadow, so the otherwise hidden "currently bound X"
//! state of WebGL stays inspectable.
//!
//! The backend is generic. In the browser it is `WebGl` over a real
//! canvas context; in tests it is [`MockGl`](crate::mock::MockGl)
//! recording every call. The context owns no GPU resources; buffers,
//! shaders and programs belong to whoever created them and are never
//! destroyed by this layer.
//!
//! Compile and link are the two places the backend can fail in a way the
//! caller must see, so both report status instead of trusting the backend
//! silently.

use log::debug;

use crate::api::GlApi;
use crate::consts::{
    BufferTarget, BufferUsage, Capability, ClearMask, DataType, DrawMode, ErrorCode, Parameter,
    ShaderStage,
};
use crate::error::{GlError, GlResult};
use crate::handle::{AttribLocation, Buffer, Program, Shader};
use crate::state::{RenderState, Viewport};

/// Command channel to one rendering backend.
pub struct Context<G: GlApi> {
    gl: G,
    state: RenderState,
}

impl<G: GlApi> Context<G> {
    /// Wrap an already-acquired backend. Used directly by tests with a
    /// mock backend; browser code goes through `Context::acquire`.
    pub fn new(gl: G) -> Self {
        Self {
            gl,
            state: RenderState::new(),
        }
    }

    /// The issued-state shadow. Read-only; it changes only alongside the
    /// backend call that changes the real state.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Shared view of the backend, for inspection (mock recordings).
    pub fn backend(&self) -> &G {
        &self.gl
    }

    /// Give the backend back, dropping the shadow.
    pub fn into_backend(self) -> G {
        self.gl
    }

    // ---------- render state ----------

    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
        self.state.clear_color = [r, g, b, a];
    }

    pub fn clear(&mut self, mask: ClearMask) {
        self.gl.clear(mask);
    }

    pub fn enable(&mut self, cap: Capability) {
        self.gl.enable(cap);
        self.state.enable(cap);
    }

    pub fn disable(&mut self, cap: Capability) {
        self.gl.disable(cap);
        self.state.disable(cap);
    }

    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
        self.state.viewport = Some(Viewport {
            x,
            y,
            width,
            height,
        });
    }

    // ---------- buffers ----------

    /// Allocate a buffer object. `target` is advisory; WebGL buffers take
    /// a role at bind time, so nothing is bound or stored here.
    pub fn create_buffer(&mut self, target: BufferTarget) -> Buffer {
        let buffer = self.gl.create_buffer();
        debug!("buffer {:?} created for {:?}", buffer, target);
        buffer
    }

    pub fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Buffer>) {
        self.gl.bind_buffer(target, buffer);
        self.state.bind_buffer(target, buffer);
    }

    /// Copy a slice of plain-old-data values into the buffer bound to
    /// `target`. Requires a prior `bind_buffer` on the same target.
    pub fn upload_data<T: bytemuck::Pod>(
        &mut self,
        target: BufferTarget,
        data: &[T],
        usage: BufferUsage,
    ) {
        // The byte view borrows `data` until the backend call returns,
        // so the host copy always reads live memory.
        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.gl.buffer_data(target, bytes, usage);
    }

    // ---------- shaders ----------

    pub fn create_shader(&mut self, stage: ShaderStage) -> Shader {
        let shader = self.gl.create_shader(stage);
        debug!("shader {:?} created", shader);
        shader
    }

    pub fn set_shader_source(&mut self, shader: Shader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    /// Compile and check. A failed compile reports the backend's
    /// diagnostic log instead of proceeding with a broken unit.
    pub fn compile_shader(&mut self, shader: Shader) -> GlResult<()> {
        self.gl.compile_shader(shader);
        if self.gl.shader_compile_status(shader) {
            Ok(())
        } else {
            Err(GlError::CompileFailed {
                stage: shader.stage(),
                log: self.gl.shader_info_log(shader),
            })
        }
    }

    // ---------- programs ----------

    pub fn create_program(&mut self) -> Program {
        let program = self.gl.create_program();
        debug!("program {:?} created", program);
        program
    }

    pub fn attach_shader(&mut self, program: Program, shader: Shader) {
        self.gl.attach_shader(program, shader);
    }

    /// Link and check. A failed link reports the backend's diagnostic
    /// log; an unlinked program must never reach `use_program`.
    pub fn link_program(&mut self, program: Program) -> GlResult<()> {
        self.gl.link_program(program);
        if self.gl.program_link_status(program) {
            Ok(())
        } else {
            Err(GlError::LinkFailed {
                log: self.gl.program_info_log(program),
            })
        }
    }

    pub fn use_program(&mut self, program: Program) {
        self.gl.use_program(program);
        self.state.program = Some(program);
    }

    // ---------- vertex attributes ----------

    /// Resolve an attribute name in a linked program. An absent name
    /// answers the backend sentinel (-1) unreinterpreted.
    pub fn get_attrib_location(&mut self, program: Program, name: &str) -> AttribLocation {
        self.gl.get_attrib_location(program, name)
    }

    /// Describe the layout feeding `location` from the buffer currently
    /// bound to `Array`. `stride` and `offset` are bytes.
    pub fn vertex_attrib_pointer(
        &mut self,
        location: AttribLocation,
        size: i32,
        data_type: DataType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.gl
            .vertex_attrib_pointer(location, size, data_type, normalized, stride, offset);
    }

    pub fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.gl.enable_vertex_attrib_array(location);
    }

    // ---------- draw ----------

    /// Submit `count` indices of `index_type` from the bound element
    /// array buffer, starting at byte `offset`, as `mode` topology.
    pub fn draw_elements(&mut self, mode: DrawMode, count: i32, index_type: DataType, offset: i32) {
        self.gl.draw_elements(mode, count, index_type, offset);
    }

    // ---------- queries ----------

    /// Return and clear the backend's pending error code.
    pub fn get_error(&mut self) -> ErrorCode {
        self.gl.get_error()
    }

    /// Integer implementation limit, e.g. `Parameter::MaxVertexAttribs`.
    pub fn get_parameter(&mut self, param: Parameter) -> i32 {
        self.gl.get_parameter(param)
    }
}

#[cfg(wasm)]
impl Context<crate::web::WebGl> {
    /// Ask `canvas` for a WebGL context. Answers
    /// [`GlError::Unsupported`] when the host has no GPU path for it.
    pub fn acquire(canvas: &crate::canvas::Canvas) -> GlResult<Self> {
        crate::web::WebGl::from_canvas(canvas).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGl;

    fn ctx() -> Context<MockGl> {
        Context::new(MockGl::new())
    }

    #[test]
    fn test_shadow_follows_issued_calls() {
        let mut c = ctx();
        let vbo = c.create_buffer(BufferTarget::Array);
        let prog = c.create_program();

        c.set_clear_color(0.1, 0.2, 0.3, 1.0);
        c.bind_buffer(BufferTarget::Array, Some(vbo));
        c.use_program(prog);
        c.enable(Capability::DepthTest);
        c.set_viewport(0, 0, 640, 480);

        let st = c.state();
        assert_eq!(st.clear_color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(st.bound_buffer(BufferTarget::Array), Some(vbo));
        assert_eq!(st.bound_buffer(BufferTarget::ElementArray), None);
        assert_eq!(st.program, Some(prog));
        assert!(st.is_enabled(Capability::DepthTest));
        assert_eq!(
            st.viewport,
            Some(Viewport {
                x: 0,
                y: 0,
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn test_disable_reverts_enable() {
        let mut c = ctx();
        c.enable(Capability::Blend);
        c.disable(Capability::Blend);
        assert!(!c.state().is_enabled(Capability::Blend));
    }

    #[test]
    fn test_compile_failure_carries_stage_and_log() {
        let mut c = ctx();
        let sh = c.create_shader(ShaderStage::Vertex);
        c.set_shader_source(sh, "#error broken\nvoid main() {}");
        match c.compile_shader(sh) {
            Err(GlError::CompileFailed { stage, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected CompileFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_link_failure_when_a_stage_is_missing() {
        let mut c = ctx();
        let vs = c.create_shader(ShaderStage::Vertex);
        c.set_shader_source(vs, "attribute vec3 position; void main() {}");
        c.compile_shader(vs).unwrap();

        // No fragment shader attached, link must not pass silently.
        let prog = c.create_program();
        c.attach_shader(prog, vs);
        match c.link_program(prog) {
            Err(GlError::LinkFailed { log }) => assert!(!log.is_empty()),
            other => panic!("expected LinkFailed, got {:?}", other),
        }
    }
}
