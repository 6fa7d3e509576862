// Seedable random source for the morelike engine.
//
// The word transformer makes exactly one random decision per transformed
// word: which of the rhyme-matching substitute words donates the new
// syllable. That decision goes through the `RandomSource` trait so callers
// can inject either a real generator or a scripted one in tests.
//
// `PunRng` is xoshiro256++ (Blackman & Vigna, 2019) expanded from a single
// `u64` with SplitMix64. A fixed seed reproduces the same choices on every
// platform; `PunRng::from_entropy()` mixes wall-clock time and the process
// id for the normal, non-reproducible bot run.
//
// `ScriptedSource` replays a fixed list of indices and exists for tests in
// downstream crates that need to force a particular substitute.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Anything that can pick an index into a non-empty candidate list.
pub trait RandomSource {
    /// Return an index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Xoshiro256++ generator used by the bot's event loop.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PunRng {
    s: [u64; 4],
}

impl PunRng {
    /// Create a generator from a `u64` seed.
    ///
    /// Two generators created with the same seed produce identical output.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Create a generator seeded from the clock and process id.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let pid = u64::from(std::process::id());
        Self::new(nanos ^ pid.rotate_left(32))
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[0, bound)` by rejection sampling.
    ///
    /// Panics if `bound == 0`.
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "below: bound must be non-zero");
        if bound.is_power_of_two() {
            return self.next_u64() & (bound - 1);
        }
        // Values under the threshold would bias the low residues.
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return r % bound;
            }
        }
    }
}

impl RandomSource for PunRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.below(len as u64) as usize
    }
}

/// Replays a fixed list of indices, wrapping each into range.
///
/// An empty script always picks index 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }

    /// How many picks have been served so far.
    pub fn calls(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        let raw = if self.picks.is_empty() {
            0
        } else {
            self.picks[self.cursor % self.picks.len()]
        };
        self.cursor += 1;
        raw % len
    }
}

/// SplitMix64 step, used only to expand a seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_picks() {
        let mut a = PunRng::new(42);
        let mut b = PunRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.pick_index(7), b.pick_index(7));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PunRng::new(42);
        let mut b = PunRng::new(43);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        let mut rng = PunRng::new(999);
        for len in 1..20 {
            for _ in 0..500 {
                let v = rng.pick_index(len);
                assert!(v < len, "pick_index({len}) returned {v}");
            }
        }
    }

    #[test]
    fn pick_index_reaches_every_candidate() {
        let mut rng = PunRng::new(7);
        let mut seen = [false; 5];
        for _ in 0..1000 {
            seen[rng.pick_index(5)] = true;
        }
        assert!(seen.iter().all(|s| *s), "some index never picked: {seen:?}");
    }

    #[test]
    fn single_candidate_is_always_zero() {
        let mut rng = PunRng::from_entropy();
        for _ in 0..100 {
            assert_eq!(rng.pick_index(1), 0);
        }
    }

    #[test]
    #[should_panic(expected = "bound must be non-zero")]
    fn below_zero_panics() {
        PunRng::new(1).below(0);
    }

    #[test]
    fn state_survives_serde() {
        let mut rng = PunRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: PunRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    #[test]
    fn scripted_source_replays_and_wraps() {
        let mut src = ScriptedSource::new(vec![1, 5]);
        assert_eq!(src.pick_index(3), 1);
        // 5 wraps into a 3-element range.
        assert_eq!(src.pick_index(3), 2);
        assert_eq!(src.pick_index(4), 1);
        assert_eq!(src.calls(), 3);
    }

    #[test]
    fn empty_script_picks_first() {
        let mut src = ScriptedSource::default();
        assert_eq!(src.pick_index(10), 0);
    }
}
