// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Recording backend for tests and headless runs.
//!
//! Keeps a store behind every handle it mints (buffer bytes, shader
//! sources, program link tables) and a journal of clears and draw calls,
//! each draw captured together with the bindings current at submit time.
//! Where the real backend silently renders garbage on misuse, the mock
//! flags a [`ProtocolViolation`] instead, so out-of-order pipeline setup
//! fails a test rather than a screenshot.
//!
//! Compile and link are simulated: a source containing `#error` fails to
//! compile, and a program links only when a compiled vertex and fragment
//! shader are both attached. Attribute locations follow the order of
//! `attribute` declarations in the vertex shader, starting at 0; a
//! program that never linked successfully answers -1 for every name.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::api::GlApi;
use crate::consts::{
    BufferTarget, BufferUsage, Capability, ClearMask, DataType, DrawMode, ErrorCode, Parameter,
    ShaderStage,
};
use crate::handle::{AttribLocation, Buffer, Program, Shader};

static ATTRIB_RE: OnceLock<Regex> = OnceLock::new();

fn attrib_re() -> &'static Regex {
    // Optional precision qualifier, then type, then name.
    ATTRIB_RE.get_or_init(|| Regex::new(r"attribute(?:\s+\w+)?\s+\w+\s+(\w+)\s*;").unwrap())
}

/// Pipeline misuse the real backend would swallow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// `buffer_data` with nothing bound to the target.
    UploadWithoutBinding { target: BufferTarget },
    /// `compile_shader` before any `shader_source`.
    CompileWithoutSource { shader: Shader },
    /// `get_attrib_location` against a program never successfully linked.
    AttribLookupBeforeLink { program: Program, name: String },
    /// `draw_elements` with no active program.
    DrawWithoutProgram,
    /// `draw_elements` with no element array buffer bound.
    DrawWithoutIndexBuffer,
}

/// Store behind one buffer handle.
#[derive(Debug, Default)]
pub struct BufferRecord {
    pub data: Vec<u8>,
    pub usage: Option<BufferUsage>,
}

/// Store behind one shader handle.
#[derive(Debug)]
pub struct ShaderRecord {
    pub stage: ShaderStage,
    pub source: Option<String>,
    pub compiled: bool,
    pub compile_ok: bool,
    pub log: String,
}

/// Store behind one program handle. `attribs` is the attribute table in
/// location order, filled at link time from the vertex shader source.
#[derive(Debug, Default)]
pub struct ProgramRecord {
    pub attached: Vec<Shader>,
    pub linked: bool,
    pub link_ok: bool,
    pub log: String,
    pub attribs: Vec<String>,
}

/// One clear, with the clear color current when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearRecord {
    pub mask: ClearMask,
    pub color: [f32; 4],
}

/// One draw call plus a snapshot of the bindings it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub mode: DrawMode,
    pub count: i32,
    pub index_type: DataType,
    pub offset: i32,
    pub array_buffer: Option<Buffer>,
    pub element_array_buffer: Option<Buffer>,
    pub program: Option<Program>,
}

/// Vertex attribute layout as described to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttribPointer {
    pub location: AttribLocation,
    pub size: i32,
    pub data_type: DataType,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

#[derive(Default)]
pub struct MockGl {
    buffers: Vec<BufferRecord>,
    shaders: Vec<ShaderRecord>,
    programs: Vec<ProgramRecord>,
    array_bound: Option<Buffer>,
    element_bound: Option<Buffer>,
    active_program: Option<Program>,
    clear_color: [f32; 4],
    viewport: Option<(i32, i32, i32, i32)>,
    enabled: HashSet<Capability>,
    enabled_attribs: HashSet<i32>,
    attrib_pointers: Vec<AttribPointer>,
    clears: Vec<ClearRecord>,
    draw_calls: Vec<DrawCall>,
    pending_error: Option<ErrorCode>,
    violations: Vec<ProtocolViolation>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------- inspection ----------

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer(&self, buffer: Buffer) -> &BufferRecord {
        &self.buffers[buffer.raw() as usize]
    }

    pub fn shader(&self, shader: Shader) -> &ShaderRecord {
        &self.shaders[shader.raw() as usize]
    }

    pub fn program(&self, program: Program) -> &ProgramRecord {
        &self.programs[program.raw() as usize]
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> Option<Buffer> {
        match target {
            BufferTarget::Array => self.array_bound,
            BufferTarget::ElementArray => self.element_bound,
        }
    }

    pub fn is_enabled(&self, cap: Capability) -> bool {
        self.enabled.contains(&cap)
    }

    pub fn viewport_rect(&self) -> Option<(i32, i32, i32, i32)> {
        self.viewport
    }

    pub fn clears(&self) -> &[ClearRecord] {
        &self.clears
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    pub fn attrib_pointers(&self) -> &[AttribPointer] {
        &self.attrib_pointers
    }

    pub fn is_attrib_enabled(&self, location: AttribLocation) -> bool {
        self.enabled_attribs.contains(&location.raw())
    }

    pub fn violations(&self) -> &[ProtocolViolation] {
        &self.violations
    }

    // ---------- internals ----------

    /// First recorded error wins until the next `get_error` drains it.
    fn record_error(&mut self, code: ErrorCode) {
        if self.pending_error.is_none() {
            self.pending_error = Some(code);
        }
    }

    fn has_compiled_stage(&self, record: &ProgramRecord, stage: ShaderStage) -> bool {
        record
            .attached
            .iter()
            .any(|s| s.stage() == stage && self.shaders[s.raw() as usize].compile_ok)
    }
}

impl GlApi for MockGl {
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.clear_color = [r, g, b, a];
    }

    fn clear(&mut self, mask: ClearMask) {
        self.clears.push(ClearRecord {
            mask,
            color: self.clear_color,
        });
    }

    fn enable(&mut self, cap: Capability) {
        self.enabled.insert(cap);
    }

    fn disable(&mut self, cap: Capability) {
        self.enabled.remove(&cap);
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.viewport = Some((x, y, width, height));
    }

    fn create_buffer(&mut self) -> Buffer {
        let id = self.buffers.len() as u32;
        self.buffers.push(BufferRecord::default());
        Buffer::from_raw(id)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Buffer>) {
        match target {
            BufferTarget::Array => self.array_bound = buffer,
            BufferTarget::ElementArray => self.element_bound = buffer,
        }
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        match self.bound_buffer(target) {
            Some(buffer) => {
                let record = &mut self.buffers[buffer.raw() as usize];
                record.data = data.to_vec();
                record.usage = Some(usage);
            }
            None => {
                self.violations
                    .push(ProtocolViolation::UploadWithoutBinding { target });
                self.record_error(ErrorCode::InvalidOperation);
            }
        }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Shader {
        let id = self.shaders.len() as u32;
        self.shaders.push(ShaderRecord {
            stage,
            source: None,
            compiled: false,
            compile_ok: false,
            log: String::new(),
        });
        Shader::from_raw(id, stage)
    }

    fn shader_source(&mut self, shader: Shader, source: &str) {
        self.shaders[shader.raw() as usize].source = Some(source.to_string());
    }

    fn compile_shader(&mut self, shader: Shader) {
        let record = &mut self.shaders[shader.raw() as usize];
        record.compiled = true;
        match &record.source {
            None => {
                record.compile_ok = false;
                record.log = "ERROR: compile called with no source attached".to_string();
                self.violations
                    .push(ProtocolViolation::CompileWithoutSource { shader });
            }
            Some(src) if src.contains("#error") => {
                record.compile_ok = false;
                record.log = "ERROR: 0:1: '#error' directive".to_string();
            }
            Some(_) => {
                record.compile_ok = true;
                record.log = String::new();
            }
        }
    }

    fn shader_compile_status(&mut self, shader: Shader) -> bool {
        self.shaders[shader.raw() as usize].compile_ok
    }

    fn shader_info_log(&mut self, shader: Shader) -> String {
        self.shaders[shader.raw() as usize].log.clone()
    }

    fn create_program(&mut self) -> Program {
        let id = self.programs.len() as u32;
        self.programs.push(ProgramRecord::default());
        Program::from_raw(id)
    }

    fn attach_shader(&mut self, program: Program, shader: Shader) {
        let record = &mut self.programs[program.raw() as usize];
        // One shader per stage, like the host API.
        if record.attached.iter().any(|s| s.stage() == shader.stage()) {
            self.record_error(ErrorCode::InvalidOperation);
            return;
        }
        record.attached.push(shader);
    }

    fn link_program(&mut self, program: Program) {
        let id = program.raw() as usize;
        let vertex_ok = self.has_compiled_stage(&self.programs[id], ShaderStage::Vertex);
        let fragment_ok = self.has_compiled_stage(&self.programs[id], ShaderStage::Fragment);

        // Attribute table comes from the vertex source, in declaration
        // order, location 0 first.
        let attribs = self.programs[id]
            .attached
            .iter()
            .find(|s| s.stage() == ShaderStage::Vertex)
            .and_then(|s| self.shaders[s.raw() as usize].source.clone())
            .map(|src| {
                attrib_re()
                    .captures_iter(&src)
                    .map(|c| c[1].to_string())
                    .collect()
            })
            .unwrap_or_default();

        let record = &mut self.programs[id];
        record.linked = true;
        record.link_ok = vertex_ok && fragment_ok;
        record.attribs = attribs;
        record.log = if record.link_ok {
            String::new()
        } else if !vertex_ok {
            "ERROR: no compiled vertex shader attached".to_string()
        } else {
            "ERROR: no compiled fragment shader attached".to_string()
        };
    }

    fn program_link_status(&mut self, program: Program) -> bool {
        self.programs[program.raw() as usize].link_ok
    }

    fn program_info_log(&mut self, program: Program) -> String {
        self.programs[program.raw() as usize].log.clone()
    }

    fn use_program(&mut self, program: Program) {
        self.active_program = Some(program);
    }

    fn get_attrib_location(&mut self, program: Program, name: &str) -> AttribLocation {
        // The host answers -1 and raises INVALID_OPERATION for any
        // program not successfully linked, failed links included.
        if !self.programs[program.raw() as usize].link_ok {
            self.violations.push(ProtocolViolation::AttribLookupBeforeLink {
                program,
                name: name.to_string(),
            });
            self.record_error(ErrorCode::InvalidOperation);
            return AttribLocation::from_raw(-1);
        }
        let index = self.programs[program.raw() as usize]
            .attribs
            .iter()
            .position(|a| a == name)
            .map(|i| i as i32)
            .unwrap_or(-1);
        AttribLocation::from_raw(index)
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
        self.attrib_pointers.push(AttribPointer {
            location,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.enabled_attribs.insert(location.raw());
    }

    fn draw_elements(&mut self, mode: DrawMode, count: i32, index_type: DataType, offset: i32) {
        if self.active_program.is_none() {
            self.violations.push(ProtocolViolation::DrawWithoutProgram);
        }
        if self.element_bound.is_none() {
            self.violations.push(ProtocolViolation::DrawWithoutIndexBuffer);
        }
        self.draw_calls.push(DrawCall {
            mode,
            count,
            index_type,
            offset,
            array_buffer: self.array_bound,
            element_array_buffer: self.element_bound,
            program: self.active_program,
        });
    }

    fn get_error(&mut self) -> ErrorCode {
        self.pending_error.take().unwrap_or(ErrorCode::NoError)
    }

    fn get_parameter(&mut self, param: Parameter) -> i32 {
        // GLES2 required minimums, the floor every conformant WebGL1
        // implementation reports at least.
        match param {
            Parameter::MaxVertexAttribs => 8,
            Parameter::MaxTextureImageUnits => 8,
            Parameter::MaxVertexTextureImageUnits => 0,
            Parameter::MaxCombinedTextureImageUnits => 8,
            Parameter::MaxVertexUniformVectors => 128,
            Parameter::MaxVaryingVectors => 8,
            Parameter::MaxFragmentUniformVectors => 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_without_binding_is_flagged() {
        let mut gl = MockGl::new();
        let b = gl.create_buffer();
        gl.buffer_data(BufferTarget::Array, &[1, 2, 3], BufferUsage::StaticDraw);

        assert_eq!(
            gl.violations(),
            &[ProtocolViolation::UploadWithoutBinding {
                target: BufferTarget::Array
            }]
        );
        assert_eq!(gl.get_error(), ErrorCode::InvalidOperation);
        assert!(gl.buffer(b).data.is_empty());
    }

    #[test]
    fn test_upload_after_unbind_is_flagged() {
        let mut gl = MockGl::new();
        let b = gl.create_buffer();
        gl.bind_buffer(BufferTarget::Array, Some(b));
        gl.bind_buffer(BufferTarget::Array, None);
        gl.buffer_data(BufferTarget::Array, &[9], BufferUsage::StaticDraw);
        assert_eq!(gl.violations().len(), 1);
    }

    #[test]
    fn test_compile_without_source_is_flagged() {
        let mut gl = MockGl::new();
        let sh = gl.create_shader(ShaderStage::Vertex);
        gl.compile_shader(sh);

        assert!(!gl.shader_compile_status(sh));
        assert!(!gl.shader_info_log(sh).is_empty());
        assert_eq!(
            gl.violations(),
            &[ProtocolViolation::CompileWithoutSource { shader: sh }]
        );
    }

    #[test]
    fn test_attrib_lookup_before_link_is_flagged() {
        let mut gl = MockGl::new();
        let p = gl.create_program();
        let loc = gl.get_attrib_location(p, "position");
        assert_eq!(loc.raw(), -1);
        assert_eq!(
            gl.violations(),
            &[ProtocolViolation::AttribLookupBeforeLink {
                program: p,
                name: "position".to_string()
            }]
        );
    }

    #[test]
    fn test_attrib_lookup_after_failed_link_answers_minus_one() {
        let mut gl = MockGl::new();
        let vs = gl.create_shader(ShaderStage::Vertex);
        gl.shader_source(vs, "attribute vec3 coordinates;\nvoid main() {}");
        gl.compile_shader(vs);

        // Vertex stage alone, so the link fails.
        let p = gl.create_program();
        gl.attach_shader(p, vs);
        gl.link_program(p);
        assert!(gl.program(p).linked);
        assert!(!gl.program_link_status(p));

        assert_eq!(gl.get_attrib_location(p, "coordinates").raw(), -1);
        assert_eq!(gl.get_error(), ErrorCode::InvalidOperation);
        assert_eq!(
            gl.violations(),
            &[ProtocolViolation::AttribLookupBeforeLink {
                program: p,
                name: "coordinates".to_string()
            }]
        );
    }

    #[test]
    fn test_attrib_locations_follow_declaration_order() {
        let mut gl = MockGl::new();
        let vs = gl.create_shader(ShaderStage::Vertex);
        gl.shader_source(
            vs,
            "attribute vec3 position;\nattribute vec4 color;\nvoid main() {}",
        );
        gl.compile_shader(vs);
        let fs = gl.create_shader(ShaderStage::Fragment);
        gl.shader_source(fs, "void main() {}");
        gl.compile_shader(fs);

        let p = gl.create_program();
        gl.attach_shader(p, vs);
        gl.attach_shader(p, fs);
        gl.link_program(p);
        assert!(gl.program_link_status(p));

        assert_eq!(gl.get_attrib_location(p, "position").raw(), 0);
        assert_eq!(gl.get_attrib_location(p, "color").raw(), 1);
        assert_eq!(gl.get_attrib_location(p, "normal").raw(), -1);
    }

    #[test]
    fn test_precision_qualified_attributes_resolve() {
        let mut gl = MockGl::new();
        let vs = gl.create_shader(ShaderStage::Vertex);
        gl.shader_source(
            vs,
            "attribute highp vec3 position;\nattribute vec2 uv;\nvoid main() {}",
        );
        gl.compile_shader(vs);
        let fs = gl.create_shader(ShaderStage::Fragment);
        gl.shader_source(fs, "void main() {}");
        gl.compile_shader(fs);

        let p = gl.create_program();
        gl.attach_shader(p, vs);
        gl.attach_shader(p, fs);
        gl.link_program(p);

        assert_eq!(gl.get_attrib_location(p, "position").raw(), 0);
        assert_eq!(gl.get_attrib_location(p, "uv").raw(), 1);
    }

    #[test]
    fn test_attach_same_stage_twice_sets_invalid_operation() {
        let mut gl = MockGl::new();
        let v1 = gl.create_shader(ShaderStage::Vertex);
        let v2 = gl.create_shader(ShaderStage::Vertex);
        let p = gl.create_program();
        gl.attach_shader(p, v1);
        gl.attach_shader(p, v2);
        assert_eq!(gl.get_error(), ErrorCode::InvalidOperation);
        assert_eq!(gl.program(p).attached, vec![v1]);
    }

    #[test]
    fn test_first_error_wins_and_read_clears() {
        let mut gl = MockGl::new();
        gl.buffer_data(BufferTarget::Array, &[0], BufferUsage::StaticDraw);
        gl.buffer_data(BufferTarget::ElementArray, &[0], BufferUsage::StaticDraw);
        assert_eq!(gl.get_error(), ErrorCode::InvalidOperation);
        assert_eq!(gl.get_error(), ErrorCode::NoError);
    }

    #[test]
    fn test_limits_report_es2_minimums() {
        let mut gl = MockGl::new();
        assert_eq!(gl.get_parameter(Parameter::MaxVertexAttribs), 8);
        assert_eq!(gl.get_parameter(Parameter::MaxVertexUniformVectors), 128);
    }
}
