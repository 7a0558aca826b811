// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

// Cfg aliases shared by the whole crate: code says #[cfg(wasm)]
// instead of repeating the target_arch test everywhere.

fn main() {
    use cfg_aliases::cfg_aliases;

    cfg_aliases! {
        // Platform aliases
        wasm: { target_arch = "wasm32" },
        native: { not(wasm) },
    }
}
