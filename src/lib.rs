//! Waiting Room core crate.
//!
//! Renders a cosmetic full-screen "waiting room" card — simulated countdown,
//! simulated progress bar, simulated queue position — over a scrolling
//! background of danmaku banners, with a form that lets the visitor add a
//! banner of their own. Everything is client-local theater seeded from two
//! URL query parameters; nothing is persisted or sent anywhere.
//!
//! The DOM shell lives in [`room`]; every other module is pure logic and runs
//! under native `cargo test`.

use wasm_bindgen::prelude::*;

mod banner;
mod layout;
mod params;
mod progress;
mod rng;
mod room;

pub use banner::{Banner, BannerStore, MAX_BANNER_CHARS, PRESET_BANNERS, USER_PALETTE};
pub use layout::{LAYOUT_ROWS, LaidOutBanner, LayoutCache, ROW_SLOTS, layout_rows};
pub use params::{DEFAULT_QUEUE_COUNT, DEFAULT_WAIT_MINUTES, RoomParams};
pub use progress::{MINUTE_TICK_MS, PROGRESS_TICK_MS, ProgressEngine};
pub use rng::Rng;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoints
// -----------------------------------------------------------------------------

/// Mount the page into `document.body`, reading `minute` / `count` from the
/// current URL. A second call replaces the previous mount wholesale.
#[wasm_bindgen]
pub fn start_waiting_room() -> Result<(), JsValue> {
    room::mount()
}

/// Tear the page down. Dropping the view state cancels both interval timers;
/// calling this without a prior mount is a no-op.
#[wasm_bindgen]
pub fn stop_waiting_room() {
    room::unmount()
}
