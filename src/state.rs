// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Client-side shadow of the WebGL state machine.
//!
//! WebGL keeps bindings, enables and the clear color as hidden mutable
//! state inside the driver. [`Context`](crate::context::Context) mirrors
//! every state-changing call it issues into a [`RenderState`] so code and
//! tests can ask "what is bound right now" without a backend round trip.
//! The shadow records what this layer issued; state changed behind its
//! back (raw JS touching the same canvas) is invisible to it.

use std::collections::HashSet;

use crate::consts::{BufferTarget, Capability};
use crate::handle::{Buffer, Program};

/// Pixel rectangle set by the last `viewport` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Mirror of the backend state this layer has issued so far.
///
/// Fields are readable through [`Context::state`](crate::context::Context::state);
/// mutation happens only alongside the backend call that changes the real
/// state, so shadow and driver cannot drift apart.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    /// RGBA stored by the last `set_clear_color`; the backend default is
    /// transparent black until then.
    pub clear_color: [f32; 4],
    /// `None` until the first explicit `viewport` call. The driver's own
    /// default (full surface) is not mirrored because it was never issued.
    pub viewport: Option<Viewport>,
    /// Buffer bound to `ARRAY_BUFFER`, if any.
    pub array_buffer: Option<Buffer>,
    /// Buffer bound to `ELEMENT_ARRAY_BUFFER`, if any.
    pub element_array_buffer: Option<Buffer>,
    /// Program made active by the last `use_program`.
    pub program: Option<Program>,
    enabled: HashSet<Capability>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current binding for `target`.
    pub fn bound_buffer(&self, target: BufferTarget) -> Option<Buffer> {
        match target {
            BufferTarget::Array => self.array_buffer,
            BufferTarget::ElementArray => self.element_array_buffer,
        }
    }

    /// Whether `cap` has been enabled and not disabled since.
    pub fn is_enabled(&self, cap: Capability) -> bool {
        self.enabled.contains(&cap)
    }

    pub(crate) fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Buffer>) {
        match target {
            BufferTarget::Array => self.array_buffer = buffer,
            BufferTarget::ElementArray => self.element_array_buffer = buffer,
        }
    }

    pub(crate) fn enable(&mut self, cap: Capability) {
        self.enabled.insert(cap);
    }

    pub(crate) fn disable(&mut self, cap: Capability) {
        self.enabled.remove(&cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_are_target_scoped() {
        let mut st = RenderState::new();
        let vbo = Buffer::from_raw(1);
        let ibo = Buffer::from_raw(2);

        st.bind_buffer(BufferTarget::Array, Some(vbo));
        st.bind_buffer(BufferTarget::ElementArray, Some(ibo));
        assert_eq!(st.bound_buffer(BufferTarget::Array), Some(vbo));
        assert_eq!(st.bound_buffer(BufferTarget::ElementArray), Some(ibo));

        // Unbinding one target leaves the other alone.
        st.bind_buffer(BufferTarget::Array, None);
        assert_eq!(st.bound_buffer(BufferTarget::Array), None);
        assert_eq!(st.bound_buffer(BufferTarget::ElementArray), Some(ibo));
    }

    #[test]
    fn test_capability_toggling() {
        let mut st = RenderState::new();
        assert!(!st.is_enabled(Capability::DepthTest));

        st.enable(Capability::DepthTest);
        st.enable(Capability::Blend);
        assert!(st.is_enabled(Capability::DepthTest));
        assert!(st.is_enabled(Capability::Blend));

        st.disable(Capability::DepthTest);
        assert!(!st.is_enabled(Capability::DepthTest));
        assert!(st.is_enabled(Capability::Blend));
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let st = RenderState::new();
        assert_eq!(st.clear_color, [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(st.viewport, None);
        assert_eq!(st.program, None);
        assert_eq!(st.bound_buffer(BufferTarget::Array), None);
    }
}
