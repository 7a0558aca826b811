// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Closed enumerations for every WebGL constant category this layer speaks:
//! buffer targets, usage hints, shader stages, data types, draw modes,
//! capabilities, clear-mask bits, status params, limits and error codes.
//! The numeric values are part of the wire contract with the host backend
//! and must stay bit-for-bit identical to the WebGL registry.

use bitflags::bitflags;
use num_derive::FromPrimitive;

/// Binding point for a buffer object. Binding is target-scoped: what is
/// bound to `Array` is independent of what is bound to `ElementArray`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (ARRAY_BUFFER).
    Array = 0x8892,
    /// Index data consumed by draw_elements (ELEMENT_ARRAY_BUFFER).
    ElementArray = 0x8893,
}

/// Performance hint passed along with a data upload. No effect on
/// correctness, only on where the backend may place the store.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StreamDraw = 0x88E0,
    StaticDraw = 0x88E4,
    DynamicDraw = 0x88E8,
}

/// Pipeline stage a shader object compiles for, fixed at creation.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Fragment = 0x8B30,
    Vertex = 0x8B31,
}

/// Scalar type of elements inside a buffer, used both for attribute
/// pointers and for the index width of a draw call.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Byte = 0x1400,
    UnsignedByte = 0x1401,
    Short = 0x1402,
    UnsignedShort = 0x1403,
    Int = 0x1404,
    UnsignedInt = 0x1405,
    Float = 0x1406,
}

/// Primitive topology of a draw call.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Points = 0x0000,
    Lines = 0x0001,
    LineLoop = 0x0002,
    LineStrip = 0x0003,
    Triangles = 0x0004,
    TriangleStrip = 0x0005,
    TriangleFan = 0x0006,
}

/// Fixed-function capabilities toggled with enable / disable.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CullFace = 0x0B44,
    DepthTest = 0x0B71,
    StencilTest = 0x0B90,
    Dither = 0x0BD0,
    Blend = 0x0BE2,
    ScissorTest = 0x0C11,
    PolygonOffsetFill = 0x8037,
    SampleAlphaToCoverage = 0x809E,
    SampleCoverage = 0x80A0,
}

bitflags! {
    /// Which framebuffer planes a clear call touches. OR the bits together
    /// the way the host API does.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const DEPTH   = 0x0000_0100;
        const STENCIL = 0x0000_0400;
        const COLOR   = 0x0000_4000;
    }
}

/// Queryable per-shader parameters (get_shader_parameter pnames).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderParam {
    ShaderType = 0x8B4F,
    DeleteStatus = 0x8B80,
    CompileStatus = 0x8B81,
}

/// Queryable per-program parameters (get_program_parameter pnames).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramParam {
    DeleteStatus = 0x8B80,
    LinkStatus = 0x8B82,
    ValidateStatus = 0x8B83,
    AttachedShaders = 0x8B85,
    ActiveUniforms = 0x8B86,
    ActiveAttributes = 0x8B89,
}

/// Integer implementation limits queryable from the context.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    MaxVertexAttribs = 0x8869,
    MaxTextureImageUnits = 0x8872,
    MaxVertexTextureImageUnits = 0x8B4C,
    MaxCombinedTextureImageUnits = 0x8B4D,
    MaxVertexUniformVectors = 0x8DFB,
    MaxVaryingVectors = 0x8DFC,
    MaxFragmentUniformVectors = 0x8DFD,
}

/// Codes returned by the backend error query. Reading a pending error
/// clears it; with nothing pending the query answers `NoError`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum ErrorCode {
    NoError = 0x0000,
    InvalidEnum = 0x0500,
    InvalidValue = 0x0501,
    InvalidOperation = 0x0502,
    OutOfMemory = 0x0505,
    InvalidFramebufferOperation = 0x0506,
    ContextLost = 0x9242,
}

impl ErrorCode {
    /// Map a raw backend value to a code. Values outside the WebGL error
    /// table are treated as `NoError`; the host cannot legally produce any.
    pub fn from_raw(raw: u32) -> Self {
        num_traits::FromPrimitive::from_u32(raw).unwrap_or(ErrorCode::NoError)
    }
}
