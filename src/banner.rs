//! Banner ("danmaku") data: the preset pool, the user palette, and the
//! append-only store user submissions land in.

use crate::rng::Rng;

// -----------------------------------------------------------------------------
// Named color tokens (the 400-series values of the page theme).
// -----------------------------------------------------------------------------

pub const BLUE: &str = "#60a5fa";
pub const PURPLE: &str = "#c084fc";
pub const GREEN: &str = "#4ade80";
pub const PINK: &str = "#f472b6";
pub const INDIGO: &str = "#818cf8";
pub const ORANGE: &str = "#fb923c";
pub const TEAL: &str = "#2dd4bf";
pub const RED: &str = "#f87171";
pub const YELLOW: &str = "#facc15";
pub const CYAN: &str = "#22d3ee";
pub const ROSE: &str = "#fb7185";
pub const VIOLET: &str = "#a78bfa";
pub const EMERALD: &str = "#34d399";
pub const AMBER: &str = "#fbbf24";
pub const LIME: &str = "#a3e635";
pub const SKY: &str = "#38bdf8";
pub const FUCHSIA: &str = "#e879f9";
pub const BLUE_DEEP: &str = "#3b82f6";
pub const PURPLE_DEEP: &str = "#a855f7";
pub const GREEN_DEEP: &str = "#22c55e";

/// Colors user submissions draw from, uniformly.
pub const USER_PALETTE: [&str; 9] = [BLUE, PURPLE, GREEN, PINK, INDIGO, ORANGE, TEAL, RED, YELLOW];

// -----------------------------------------------------------------------------
// Preset danmaku pool: (text, color). Ids are assigned 1..=20 by position.
// -----------------------------------------------------------------------------

pub const PRESET_BANNERS: &[(&str, &str)] = &[
    ("加油！马上就轮到了！", BLUE),
    ("等待中...希望快点进去", PURPLE),
    ("大家一起等待吧～", GREEN),
    ("网站真的很火爆呢", PINK),
    ("耐心等待，值得的！", INDIGO),
    ("来聊天打发时间吧", ORANGE),
    ("系统处理中，请稍候", TEAL),
    ("大家都在排队呢", RED),
    ("终于快到我了！", YELLOW),
    ("这个网站好受欢迎", CYAN),
    ("排队也是一种体验", ROSE),
    ("希望服务器给力点", VIOLET),
    ("等待是为了更好的体验", EMERALD),
    ("大家都很有耐心呢", AMBER),
    ("马上就能进去了吧", LIME),
    ("这个等待室设计不错", SKY),
    ("弹幕让等待变有趣了", FUCHSIA),
    ("一起加油等待！", BLUE_DEEP),
    ("服务器正在努力处理", PURPLE_DEEP),
    ("大家一起坚持！", GREEN_DEEP),
];

/// Submitted text is cut at this many characters; the input element enforces
/// the same bound with `maxlength`.
pub const MAX_BANNER_CHARS: usize = 50;

/// User banner ids start here, disjoint from the preset range.
const USER_ID_BASE: u64 = 1_000;

/// One scrolling text entry, preset or user-submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub text: String,
    pub color: &'static str,
}

/// Preset pool plus the append-only user sequence. `version` bumps on every
/// append and is the only invalidation signal the layout cache watches.
pub struct BannerStore {
    presets: Vec<Banner>,
    users: Vec<Banner>,
    next_user_id: u64,
    version: u64,
}

impl BannerStore {
    pub fn new() -> Self {
        let presets = PRESET_BANNERS
            .iter()
            .enumerate()
            .map(|(i, &(text, color))| Banner {
                id: i as u64 + 1,
                text: text.to_owned(),
                color,
            })
            .collect();
        Self {
            presets,
            users: Vec::new(),
            next_user_id: USER_ID_BASE,
            version: 0,
        }
    }

    pub fn presets(&self) -> &[Banner] {
        &self.presets
    }

    pub fn users(&self) -> &[Banner] {
        &self.users
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Validate and append a user banner. Whitespace-only input is rejected
    /// and leaves the store (and its version) untouched.
    pub fn submit(&mut self, raw: &str, rng: &mut Rng) -> Option<&Banner> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text: String = trimmed.chars().take(MAX_BANNER_CHARS).collect();
        let color = USER_PALETTE[rng.index(USER_PALETTE.len())];
        let id = self.next_user_id;
        self.next_user_id += 1;
        self.users.push(Banner { id, text, color });
        self.version += 1;
        self.users.last()
    }
}

impl Default for BannerStore {
    fn default() -> Self {
        Self::new()
    }
}
