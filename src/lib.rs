// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! PixelWebGL is a thin typed binding layer over WebGL1 for wasm frontends.
//! It wraps the raw numeric API of the browser's rendering context in a
//! small vocabulary of closed enums and opaque typed handles, so a buffer
//! id can never be passed where a shader belongs and every magic constant
//! lives in exactly one place.
//!
//! The layer is deliberately shallow. It owns no resources, runs no main
//! loop, and knows nothing about scenes or materials; it gives you a
//! [`context::Context`] bound to one canvas, typed create / bind / upload /
//! draw operations, and a client-side shadow of the state machine those
//! operations mutate. Everything above that belongs to the application;
//! everything below it belongs to the browser.
//!
//! Rendering backends are swappable behind the [`api::GlApi`] trait: the
//! browser `WebGlRenderingContext` in wasm builds, and a recording mock
//! everywhere, which turns the otherwise untestable call-order contract of
//! WebGL into ordinary unit tests.

/// rendering backend capability trait
pub mod api;

/// canvas creation and dimension bookkeeping
pub mod canvas;

/// closed enums for the WebGL constant vocabulary
pub mod consts;

/// the command channel: typed operations plus the state shadow
pub mod context;

/// error type for acquisition, compile and link failures
pub mod error;

/// opaque typed handles for buffers, shaders, programs, locations
pub mod handle;

/// log
pub mod log;

/// recording backend with protocol-violation tracking
pub mod mock;

/// the ordered pipeline-setup contract and its helpers
pub mod pipeline;

/// client-side shadow of the backend state machine
pub mod state;

/// browser backend over a real WebGL rendering context
#[cfg(wasm)]
pub mod web;
