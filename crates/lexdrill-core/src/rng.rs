// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Order randomization for session composition.
//!
//! Every shuffle draws from an injected [`RandomSource`], so production code
//! can hand in an entropy-seeded generator while tests pin a seed.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// A source of uniformly distributed indices.
pub trait RandomSource {
    /// Draw an index uniformly from `[0, bound)`. `bound` is never zero.
    fn below(&mut self, bound: usize) -> usize;
}

/// A minimal, completely insecure PRNG to shuffle the items.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Initialize the RNG from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::from_seed(u64::from_le_bytes(buf)),
            Err(e) => {
                log::warn!("OS entropy unavailable ({e}), seeding from the system clock");
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default();
                Self::from_seed(nanos)
            }
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    pub fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }
}

impl RandomSource for TinyRng {
    fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Fisher-Yates over the slice: walk `i` from the last index down to 1 and
/// swap it with a uniformly drawn `j` in `[0, i]`. Returns the same slice.
pub fn shuffle_in_place<'a, T>(v: &'a mut [T], rng: &mut impl RandomSource) -> &'a mut [T] {
    for i in (1..v.len()).rev() {
        let j = rng.below(i + 1);
        v.swap(i, j);
    }
    v
}

/// Return a shuffled copy of `v`, leaving `v` untouched.
pub fn shuffle<T: Clone>(v: &[T], rng: &mut impl RandomSource) -> Vec<T> {
    let mut out = v.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}

/// Shuffle with a fixed seed. The same seed and input always give the same
/// output.
pub fn shuffle_seeded<T: Clone>(v: &[T], seed: u64) -> Vec<T> {
    let mut rng = TinyRng::from_seed(seed);
    shuffle(v, &mut rng)
}

/// Pick `count` distinct positions of `v` at random, in random order.
pub fn pick_random<T: Clone>(v: &[T], count: usize, rng: &mut impl RandomSource) -> Vec<T> {
    if count == 0 {
        return Vec::new();
    }
    let mut out = shuffle(v, rng);
    out.truncate(count);
    out
}
