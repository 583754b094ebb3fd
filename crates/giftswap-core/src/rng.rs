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

/// A minimal, zero-dependency, completely insecure PRNG to shuffle the draw.
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

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    // Generate random number in range [0, max).
    pub fn generate(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// In-place Fisher-Yates (Knuth) shuffle: walk from the last index down
/// to 1, swapping each element with a random earlier-or-equal one.
pub fn fisher_yates<T>(v: &mut [T], rng: &mut TinyRng) {
    for i in (1..v.len()).rev() {
        let j = rng.generate((i + 1) as u32) as usize;
        v.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sequence_is_deterministic() {
        let mut rng = TinyRng::from_seed(42);
        assert_eq!(rng.next_u32(), 2440530669);
        assert_eq!(rng.next_u32(), 968358053);
        assert_eq!(rng.next_u32(), 1773127077);
    }

    #[test]
    fn test_generate_within_bound() {
        let mut rng = TinyRng::from_seed(7);
        for _ in 0..100 {
            assert!(rng.generate(10) < 10);
        }
    }

    #[test]
    fn test_shuffle_known_order() {
        let mut v = vec!["a", "b", "c", "d", "e"];
        let mut rng = TinyRng::from_seed(42);
        fisher_yates(&mut v, &mut rng);
        assert_eq!(v, vec!["c", "d", "a", "b", "e"]);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut v: Vec<u32> = (1..=10).collect();
        let mut rng = TinyRng::from_seed(99);
        fisher_yates(&mut v, &mut rng);
        assert_eq!(v, vec![10, 4, 1, 5, 3, 6, 7, 9, 2, 8]);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_shuffle_degenerate_inputs() {
        let mut rng = TinyRng::from_seed(1);
        let mut empty: Vec<u32> = vec![];
        fisher_yates(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut single = vec![1];
        fisher_yates(&mut single, &mut rng);
        assert_eq!(single, vec![1]);
    }
}
