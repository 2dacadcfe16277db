//! Danmaku layout: shuffle the combined banner pool into fixed rows and
//! pin down every animation parameter ahead of render.
//!
//! The layout is a pure function of (presets ∪ user banners) and the RNG
//! handed in. `LayoutCache` memoizes it on the store's version counter so a
//! re-render triggered by anything else (progress ticks, status updates)
//! reuses the rows untouched — only an appended banner reshuffles.

use crate::banner::{Banner, BannerStore};
use crate::rng::Rng;

/// Number of scrolling rows on the page.
pub const LAYOUT_ROWS: usize = 10;
/// Banners per row; anything beyond `LAYOUT_ROWS * ROW_SLOTS` in the shuffled
/// pool is dropped from the pass.
pub const ROW_SLOTS: usize = 2;

/// A banner with its render parameters fixed for one layout pass.
#[derive(Clone, Debug)]
pub struct LaidOutBanner {
    pub id: u64,
    pub text: String,
    pub color: &'static str,
    /// Negative so the marquee starts mid-flight.
    pub delay_s: f64,
    pub duration_s: f64,
    /// Offset within the row, percent.
    pub vertical_offset_pct: f64,
    /// Unique across passes: id, row, slot, pass counter, fresh randomness.
    pub key: String,
}

/// Shuffle and partition one layout pass. `pass` feeds the render keys so
/// two distinct passes never collide even over identical pools.
pub fn layout_rows(store: &BannerStore, rng: &mut Rng, pass: u64) -> Vec<Vec<LaidOutBanner>> {
    let mut pool: Vec<&Banner> = store.presets().iter().chain(store.users()).collect();
    rng.shuffle(&mut pool);

    let mut rows = Vec::with_capacity(LAYOUT_ROWS);
    for row in 0..LAYOUT_ROWS {
        let mut placed = Vec::with_capacity(ROW_SLOTS);
        for (slot, banner) in pool.iter().skip(row * ROW_SLOTS).take(ROW_SLOTS).enumerate() {
            placed.push(place(banner, row, slot, pass, rng));
        }
        rows.push(placed);
    }
    rows
}

fn place(banner: &Banner, row: usize, slot: usize, pass: u64, rng: &mut Rng) -> LaidOutBanner {
    let delay_s = -(rng.uniform() * 30.0 + slot as f64 * 8.0 + row as f64 * 2.5);
    let duration_s = 25.0 + rng.uniform() * 10.0;
    let vertical_offset_pct = slot as f64 * 50.0 + rng.uniform() * 10.0;
    let key = format!(
        "{}-{}-{}-{}-{:08x}",
        banner.id,
        row,
        slot,
        pass,
        rng.next_u32()
    );
    LaidOutBanner {
        id: banner.id,
        text: banner.text.clone(),
        color: banner.color,
        delay_s,
        duration_s,
        vertical_offset_pct,
        key,
    }
}

/// Memoized layout, keyed on the banner store's version counter.
pub struct LayoutCache {
    built_for: Option<u64>,
    pass: u64,
    rows: Vec<Vec<LaidOutBanner>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            built_for: None,
            pass: 0,
            rows: Vec::new(),
        }
    }

    /// Current rows, rebuilt only when the store version moved since the last
    /// call. The RNG is consulted only on a rebuild.
    pub fn rows(&mut self, store: &BannerStore, rng: &mut Rng) -> &[Vec<LaidOutBanner>] {
        if self.built_for != Some(store.version()) {
            self.pass += 1;
            self.rows = layout_rows(store, rng, self.pass);
            self.built_for = Some(store.version());
        }
        &self.rows
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}
