// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Canvas module
//!
//! Obtains the drawing surface from the host. In the browser this means
//! creating a `<canvas>` element sized to a container's content box and
//! attaching it to the DOM; the recorded pixel dimensions are read back
//! from the host at creation time and never tracked afterwards (there is
//! no resize notification here).
//!
//! Off the browser a canvas is plain dimension bookkeeping, enough for
//! tests and headless callers that drive a mock backend.

#[cfg(wasm)]
use log::info;
#[cfg(wasm)]
use wasm_bindgen::JsCast;

/// A drawable pixel region provided by the host.
pub struct Canvas {
    id: String,
    width: u32,
    height: u32,
    #[cfg(wasm)]
    element: web_sys::HtmlCanvasElement,
}

impl Canvas {
    /// Create a `<canvas>` sized to the container's current content box,
    /// give it `canvas_id` and attach it to the container.
    ///
    /// Panics when the container element does not exist or the document
    /// refuses the new element; there is no recovery path for a missing
    /// host page.
    #[cfg(wasm)]
    pub fn create_in(container_id: &str, canvas_id: &str) -> Self {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");
        let container = document
            .get_element_by_id(container_id)
            .expect("container element not found");
        let element = document
            .create_element("canvas")
            .expect("create <canvas>")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("element is not a canvas");
        element.set_id(canvas_id);

        let width = container.client_width().max(0) as u32;
        let height = container.client_height().max(0) as u32;
        element.set_width(width);
        element.set_height(height);

        container
            .append_child(&element)
            .expect("attach canvas to container");
        info!(
            "canvas {} attached to {} ({}x{})",
            canvas_id, container_id, width, height
        );

        Self {
            id: canvas_id.to_string(),
            width,
            height,
            element,
        }
    }

    /// Dimension-only canvas for headless callers.
    #[cfg(native)]
    pub fn headless(id: &str, width: u32, height: u32) -> Self {
        Self {
            id: id.to_string(),
            width,
            height,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pixel width read from the host at creation time.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height read from the host at creation time.
    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(wasm)]
    pub(crate) fn element(&self) -> &web_sys::HtmlCanvasElement {
        &self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_canvas_records_dimensions() {
        let c = Canvas::headless("main", 800, 600);
        assert_eq!(c.id(), "main");
        assert_eq!(c.width(), 800);
        assert_eq!(c.height(), 600);
    }
}
