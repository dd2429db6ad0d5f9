//! Seeded random stream for the simulation.
//!
//! `SimRng` is the single channel of non-determinism in the engine: it is
//! seeded exactly once per game from the caller's 32-bit seed and owned by
//! `GameState`. Wall-clock or global randomness is forbidden everywhere in
//! the core.
//!
//! Serialization captures `(seed, word_pos)` so a deserialized state
//! resumes the stream at the exact position it left off and replays
//! byte-identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u32,
    rng: ChaCha8Rng,
}

impl SimRng {
    pub fn new(seed: u32) -> SimRng {
        SimRng { seed, rng: ChaCha8Rng::seed_from_u64(seed as u64) }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform float in [lo, hi).
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f32()
    }

    /// True with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p.clamp(0.0, 1.0)
    }

    /// Uniform index in 0..len. `len` must be non-zero for a meaningful
    /// draw; 0 is returned for an empty range.
    pub fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Symmetric jitter in [-amount, amount).
    pub fn jitter(&mut self, amount: f32) -> f32 {
        self.range_f32(-amount, amount)
    }
}

impl PartialEq for SimRng {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.rng.get_word_pos() == other.rng.get_word_pos()
    }
}

/// Wire form: seed plus stream position.
#[derive(Serialize, Deserialize)]
struct SimRngState {
    seed: u32,
    word_pos: u128,
}

impl Serialize for SimRng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SimRngState { seed: self.seed, word_pos: self.rng.get_word_pos() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SimRng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let state = SimRngState::deserialize(deserializer)?;
        let mut rng = ChaCha8Rng::seed_from_u64(state.seed as u64);
        rng.set_word_pos(state.word_pos);
        Ok(SimRng { seed: state.seed, rng })
    }
}
