//! Small seedable RNG for all cosmetic randomness on the page.
//!
//! Everything random here (palette picks, shuffle order, animation
//! parameters, queue jumps) is presentation-only, so a plain xorshift64
//! generator is enough. Keeping it seedable means every caller can be
//! driven deterministically from tests; production seeds from browser
//! entropy via `getrandom`.

/// xorshift64 generator. Not crypto secure.
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from `crypto.getRandomValues` (the `js` backend of `getrandom`).
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::new(u64::from_le_bytes(buf)),
            Err(_) => Self::new(0x9e37_79b9_7f4a_7c15),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x & 0xFFFF_FFFF) as u32
    }

    /// Uniform draw in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform index in [0, len). Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.uniform() * len as f64) as usize
    }

    /// Uniform integer in [lo, hi] inclusive.
    pub fn range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo <= hi);
        lo + (self.uniform() * (hi - lo + 1) as f64) as u64
    }

    /// In-place Fisher–Yates shuffle (uniform permutation).
    pub fn shuffle<T>(&mut self, xs: &mut [T]) {
        for i in (1..xs.len()).rev() {
            let j = self.index(i + 1);
            xs.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_seed_is_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut r = Rng::new(0);
        // A zero state would yield zero forever.
        assert_ne!(r.next_u32(), 0);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut r = Rng::new(7);
        for _ in 0..1000 {
            let u = r.uniform();
            assert!((0.0..1.0).contains(&u), "uniform out of range: {u}");
        }
    }

    #[test]
    fn index_and_range_respect_bounds() {
        let mut r = Rng::new(99);
        assert_eq!(r.index(0), 0);
        for _ in 0..1000 {
            assert!(r.index(7) < 7);
            let v = r.range_u64(10, 59);
            assert!((10..=59).contains(&v), "range draw out of bounds: {v}");
        }
    }

    #[test]
    fn shuffle_preserves_elements() {
        let mut r = Rng::new(5);
        let mut xs: Vec<u32> = (0..20).collect();
        r.shuffle(&mut xs);
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
