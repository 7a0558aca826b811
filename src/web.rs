// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Browser backend over a real `WebGlRenderingContext`.
//!
//! Typed handles are indices into per-category tables of the JS objects
//! the host handed out, so crossing the boundary is one slice lookup.
//! Host calls that can only fail when the page itself is broken use
//! `expect`; the one recoverable failure, a canvas without a GPU path,
//! answers [`GlError::Unsupported`].

use log::info;
use wasm_bindgen::JsCast;
use web_sys::WebGlRenderingContext;

use crate::api::GlApi;
use crate::canvas::Canvas;
use crate::consts::{
    BufferTarget, BufferUsage, Capability, ClearMask, DataType, DrawMode, ErrorCode, Parameter,
    ProgramParam, ShaderParam, ShaderStage,
};
use crate::error::{GlError, GlResult};
use crate::handle::{AttribLocation, Buffer, Program, Shader};

pub struct WebGl {
    gl: WebGlRenderingContext,
    buffers: Vec<web_sys::WebGlBuffer>,
    shaders: Vec<web_sys::WebGlShader>,
    programs: Vec<web_sys::WebGlProgram>,
}

impl WebGl {
    /// Request a WebGL1 context from the canvas element.
    pub fn from_canvas(canvas: &Canvas) -> GlResult<Self> {
        let gl = canvas
            .element()
            .get_context("webgl")
            .map_err(|_| GlError::Unsupported)?
            .ok_or(GlError::Unsupported)?
            .dyn_into::<WebGlRenderingContext>()
            .map_err(|_| GlError::Unsupported)?;
        info!("webgl context acquired for canvas {}", canvas.id());
        Ok(Self {
            gl,
            buffers: vec![],
            shaders: vec![],
            programs: vec![],
        })
    }

    fn buffer_obj(&self, buffer: Buffer) -> &web_sys::WebGlBuffer {
        &self.buffers[buffer.raw() as usize]
    }

    fn shader_obj(&self, shader: Shader) -> &web_sys::WebGlShader {
        &self.shaders[shader.raw() as usize]
    }

    fn program_obj(&self, program: Program) -> &web_sys::WebGlProgram {
        &self.programs[program.raw() as usize]
    }
}

impl GlApi for WebGl {
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
    }

    fn clear(&mut self, mask: ClearMask) {
        self.gl.clear(mask.bits());
    }

    fn enable(&mut self, cap: Capability) {
        self.gl.enable(cap as u32);
    }

    fn disable(&mut self, cap: Capability) {
        self.gl.disable(cap as u32);
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }

    fn create_buffer(&mut self) -> Buffer {
        let obj = self.gl.create_buffer().expect("createBuffer");
        let id = self.buffers.len() as u32;
        self.buffers.push(obj);
        Buffer::from_raw(id)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Buffer>) {
        let obj = buffer.map(|b| self.buffer_obj(b));
        self.gl.bind_buffer(target as u32, obj);
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        // The host copies out of the borrowed view before this returns.
        self.gl
            .buffer_data_with_u8_array(target as u32, data, usage as u32);
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Shader {
        let obj = self.gl.create_shader(stage as u32).expect("createShader");
        let id = self.shaders.len() as u32;
        self.shaders.push(obj);
        Shader::from_raw(id, stage)
    }

    fn shader_source(&mut self, shader: Shader, source: &str) {
        self.gl.shader_source(self.shader_obj(shader), source);
    }

    fn compile_shader(&mut self, shader: Shader) {
        self.gl.compile_shader(self.shader_obj(shader));
    }

    fn shader_compile_status(&mut self, shader: Shader) -> bool {
        self.gl
            .get_shader_parameter(self.shader_obj(shader), ShaderParam::CompileStatus as u32)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&mut self, shader: Shader) -> String {
        self.gl
            .get_shader_info_log(self.shader_obj(shader))
            .unwrap_or_default()
    }

    fn create_program(&mut self) -> Program {
        let obj = self.gl.create_program().expect("createProgram");
        let id = self.programs.len() as u32;
        self.programs.push(obj);
        Program::from_raw(id)
    }

    fn attach_shader(&mut self, program: Program, shader: Shader) {
        self.gl
            .attach_shader(self.program_obj(program), self.shader_obj(shader));
    }

    fn link_program(&mut self, program: Program) {
        self.gl.link_program(self.program_obj(program));
    }

    fn program_link_status(&mut self, program: Program) -> bool {
        self.gl
            .get_program_parameter(self.program_obj(program), ProgramParam::LinkStatus as u32)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&mut self, program: Program) -> String {
        self.gl
            .get_program_info_log(self.program_obj(program))
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: Program) {
        self.gl.use_program(Some(self.program_obj(program)));
    }

    fn get_attrib_location(&mut self, program: Program, name: &str) -> AttribLocation {
        AttribLocation::from_raw(self.gl.get_attrib_location(self.program_obj(program), name))
    }

    fn vertex_attrib_pointer(
        &mut self,
        location: AttribLocation,
        size: i32,
        data_type: DataType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.gl.vertex_attrib_pointer_with_i32(
            location.raw() as u32,
            size,
            data_type as u32,
            normalized,
            stride,
            offset,
        );
    }

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.gl.enable_vertex_attrib_array(location.raw() as u32);
    }

    fn draw_elements(&mut self, mode: DrawMode, count: i32, index_type: DataType, offset: i32) {
        self.gl
            .draw_elements_with_i32(mode as u32, count, index_type as u32, offset);
    }

    fn get_error(&mut self) -> ErrorCode {
        ErrorCode::from_raw(self.gl.get_error())
    }

    fn get_parameter(&mut self, param: Parameter) -> i32 {
        self.gl
            .get_parameter(param as u32)
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as i32)
            .unwrap_or(0)
    }
}
