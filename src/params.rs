//! Resolution of the page's two URL query parameters.
//!
//! `minute` seeds the simulated wait time, `count` the simulated queue
//! position. Both are optional; anything absent or unparsable falls back to
//! the defaults silently. Parsing is pure so it runs under native tests; the
//! wasm shell feeds it `window.location.search`.

pub const DEFAULT_WAIT_MINUTES: u32 = 5;
pub const DEFAULT_QUEUE_COUNT: u64 = 1247;

/// Resolved invocation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomParams {
    pub wait_minutes: u32,
    pub queue_count: u64,
    /// At least one of the two keys appeared in the query string. Drives the
    /// on-page configuration echo panel.
    pub supplied: bool,
}

impl RoomParams {
    /// Resolve from a raw query string, with or without the leading `?`.
    ///
    /// Values that parse to zero or below are clamped to 1 so the progress
    /// formula stays well-defined.
    pub fn from_query(search: &str) -> Self {
        let minute_raw = query_param(search, "minute");
        let count_raw = query_param(search, "count");
        let supplied = minute_raw.is_some() || count_raw.is_some();

        let wait_minutes = minute_raw
            .and_then(|v| v.parse::<i64>().ok())
            .map_or(DEFAULT_WAIT_MINUTES, |n| n.clamp(1, u32::MAX as i64) as u32);
        let queue_count = count_raw
            .and_then(|v| v.parse::<i64>().ok())
            .map_or(DEFAULT_QUEUE_COUNT, |n| n.max(1) as u64);

        Self {
            wait_minutes,
            queue_count,
            supplied,
        }
    }
}

impl Default for RoomParams {
    fn default() -> Self {
        Self::from_query("")
    }
}

/// First value for `key` in a `a=1&b=2` style query string, if present.
/// A bare `key` (no `=`) counts as present with an empty value.
fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    let search = search.strip_prefix('?').unwrap_or(search);
    search.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then_some(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_defaults() {
        let p = RoomParams::from_query("");
        assert_eq!(p.wait_minutes, DEFAULT_WAIT_MINUTES);
        assert_eq!(p.queue_count, DEFAULT_QUEUE_COUNT);
        assert!(!p.supplied);
    }

    #[test]
    fn both_params_parse() {
        let p = RoomParams::from_query("?minute=2&count=100");
        assert_eq!(p.wait_minutes, 2);
        assert_eq!(p.queue_count, 100);
        assert!(p.supplied);
    }

    #[test]
    fn leading_question_mark_is_optional() {
        assert_eq!(
            RoomParams::from_query("minute=9"),
            RoomParams::from_query("?minute=9")
        );
    }

    #[test]
    fn unparsable_values_fall_back_but_count_as_supplied() {
        let p = RoomParams::from_query("?minute=soon&count=many");
        assert_eq!(p.wait_minutes, DEFAULT_WAIT_MINUTES);
        assert_eq!(p.queue_count, DEFAULT_QUEUE_COUNT);
        assert!(p.supplied);
    }

    #[test]
    fn zero_and_negative_clamp_to_one() {
        let p = RoomParams::from_query("?minute=0&count=-50");
        assert_eq!(p.wait_minutes, 1);
        assert_eq!(p.queue_count, 1);
    }

    #[test]
    fn first_occurrence_wins() {
        let p = RoomParams::from_query("?minute=3&minute=8");
        assert_eq!(p.wait_minutes, 3);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let p = RoomParams::from_query("?foo=1&bar=2");
        assert!(!p.supplied);
        assert_eq!(p.wait_minutes, DEFAULT_WAIT_MINUTES);
    }

    #[test]
    fn bare_key_counts_as_supplied() {
        let p = RoomParams::from_query("?minute");
        assert!(p.supplied);
        assert_eq!(p.wait_minutes, DEFAULT_WAIT_MINUTES);
    }
}
