// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Opaque typed handles for backend-owned resources. A handle is identity
//! only: a backend-assigned id wrapped in a distinct type so a Shader can
//! never be passed where a Buffer belongs. This layer never destroys what
//! the handles name; their lifetime is the backend's business.

use crate::consts::ShaderStage;

/// Opaque GPU buffer object. The buffer's target and usage are *not*
/// stored here; the caller passes the target on every bind and upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Buffer(pub(crate) u32);

impl Buffer {
    /// Wrap a backend-assigned id. Only backends should mint handles.
    pub fn from_raw(id: u32) -> Self {
        Buffer(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque shader object with its stage fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shader {
    pub(crate) id: u32,
    pub(crate) stage: ShaderStage,
}

impl Shader {
    /// Wrap a backend-assigned id. Only backends should mint handles.
    pub fn from_raw(id: u32, stage: ShaderStage) -> Self {
        Shader { id, stage }
    }

    pub fn raw(&self) -> u32 {
        self.id
    }

    /// The pipeline stage this shader compiles for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// Opaque program object: a link target aggregating one shader per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Program(pub(crate) u32);

impl Program {
    /// Wrap a backend-assigned id. Only backends should mint handles.
    pub fn from_raw(id: u32) -> Self {
        Program(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Resolved slot index into one linked program's attribute table. The
/// backend's "name absent" sentinel (-1 on WebGL) passes through
/// unreinterpreted. A location goes stale when its program is relinked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribLocation(pub(crate) i32);

impl AttribLocation {
    pub fn from_raw(index: i32) -> Self {
        AttribLocation(index)
    }

    pub fn raw(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_handle_keeps_its_stage() {
        let s = Shader::from_raw(7, ShaderStage::Fragment);
        assert_eq!(s.raw(), 7);
        assert_eq!(s.stage(), ShaderStage::Fragment);
        let loc = AttribLocation::from_raw(-1);
        assert_eq!(loc.raw(), -1);
    }
}
