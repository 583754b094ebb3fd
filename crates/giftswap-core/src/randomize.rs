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

//! The draw: assign every contributed gift to a receiver such that
//! nobody receives their own gift.
//!
//! The receiver list starts as a uniformly shuffled permutation of the
//! participant names. A local repair pass then swaps away self-pairings
//! position by position, and a global verify-and-retry loop redraws the
//! whole attempt whenever a self-pairing survives the repair. The
//! repair biases the output away from a uniform derangement; that is
//! accepted behavior, not something to fix. Termination is
//! probabilistic: there is no retry cap, and in practice a handful of
//! attempts suffices.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::rng::TinyRng;
use crate::rng::fisher_yates;
use crate::types::pairing::Pairing;
use crate::types::participant::Participant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RandomizeError {
    /// A draw needs at least two participants.
    InsufficientParticipants,
}

impl Display for RandomizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RandomizeError::InsufficientParticipants => {
                write!(f, "At least 2 participants are required.")
            }
        }
    }
}

/// One giver-to-receiver mapping. Internal: the giver's identity is
/// stripped before anything leaves this module.
struct Assignment {
    giver: String,
    gift_number: String,
    receiver: String,
}

/// Draw a complete assignment for the given participants.
///
/// Returns one `Pairing` per participant. The receivers are a
/// permutation of the participant names with no participant paired to
/// themself, and the final order is shuffled independently of the draw
/// order so it leaks nothing about who gave what. The input list is
/// never mutated.
pub fn randomize(
    participants: &[Participant],
    rng: &mut TinyRng,
) -> Result<Vec<Pairing>, RandomizeError> {
    if participants.len() < 2 {
        return Err(RandomizeError::InsufficientParticipants);
    }

    // Redraw until no participant is paired with themself. The local
    // repair inside `attempt` resolves almost every collision, so this
    // loop rarely runs more than once or twice.
    let assignments = loop {
        let drawn = attempt(participants, rng);
        if drawn.iter().all(|a| a.giver != a.receiver) {
            break drawn;
        }
    };

    // Project down to the public view and re-shuffle for privacy.
    let mut pairings: Vec<Pairing> = assignments
        .into_iter()
        .map(|a| Pairing {
            receiver: a.receiver,
            gift_number: a.gift_number,
        })
        .collect();
    fisher_yates(&mut pairings, rng);
    Ok(pairings)
}

/// One draw attempt: shuffle the receiver names, then repair self-pairs
/// in place where possible.
fn attempt(participants: &[Participant], rng: &mut TinyRng) -> Vec<Assignment> {
    let mut receivers: Vec<String> = participants.iter().map(|p| p.name.clone()).collect();
    fisher_yates(&mut receivers, rng);

    for i in 0..receivers.len() {
        if receivers[i] == participants[i].name {
            // Swap with the first position that is not itself holding
            // its own name, so two self-pairs never trade places. If
            // every other position holds its own name, the collision is
            // left for the caller's retry loop.
            for j in 0..receivers.len() {
                if j != i && receivers[j] != participants[j].name {
                    receivers.swap(i, j);
                    break;
                }
            }
        }
    }

    // The assignments are read off the repaired receiver array; swaps
    // keep it a permutation of the names throughout.
    participants
        .iter()
        .zip(receivers)
        .map(|(p, receiver)| Assignment {
            giver: p.name.clone(),
            gift_number: p.gift_number.clone(),
            receiver,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn participants(n: usize) -> Vec<Participant> {
        (1..=n)
            .map(|i| Participant::new(format!("P{i}"), i.to_string()))
            .collect()
    }

    /// Map each pairing's gift number back to its giver and check that
    /// nobody receives their own gift.
    fn assert_no_self_gift(input: &[Participant], pairings: &[Pairing]) {
        let giver_of: HashMap<&str, &str> = input
            .iter()
            .map(|p| (p.gift_number.as_str(), p.name.as_str()))
            .collect();
        for pairing in pairings {
            let giver = giver_of[pairing.gift_number.as_str()];
            assert_ne!(giver, pairing.receiver, "self-gift for {giver}");
        }
    }

    /// The output receivers and gift numbers are each exactly the input
    /// sets.
    fn assert_bijection(input: &[Participant], pairings: &[Pairing]) {
        let mut receivers: Vec<&str> = pairings.iter().map(|p| p.receiver.as_str()).collect();
        let mut names: Vec<&str> = input.iter().map(|p| p.name.as_str()).collect();
        receivers.sort();
        names.sort();
        assert_eq!(receivers, names);

        let mut gifts: Vec<&str> = pairings.iter().map(|p| p.gift_number.as_str()).collect();
        let mut numbers: Vec<&str> = input.iter().map(|p| p.gift_number.as_str()).collect();
        gifts.sort();
        numbers.sort();
        assert_eq!(gifts, numbers);
    }

    #[test]
    fn test_count_preserved() {
        for n in [2, 3, 5, 10, 50] {
            let input = participants(n);
            let mut rng = TinyRng::from_seed(n as u64);
            let pairings = randomize(&input, &mut rng).unwrap();
            assert_eq!(pairings.len(), n);
        }
    }

    #[test]
    fn test_bijection_and_no_self_gift_across_seeds() {
        for seed in 1..=50 {
            for n in [2, 3, 5, 10] {
                let input = participants(n);
                let mut rng = TinyRng::from_seed(seed);
                let pairings = randomize(&input, &mut rng).unwrap();
                assert_bijection(&input, &pairings);
                assert_no_self_gift(&input, &pairings);
            }
        }
    }

    #[test]
    fn test_insufficient_participants() {
        let mut rng = TinyRng::from_seed(1);
        assert_eq!(
            randomize(&[], &mut rng).unwrap_err(),
            RandomizeError::InsufficientParticipants
        );
        let one = participants(1);
        assert_eq!(
            randomize(&one, &mut rng).unwrap_err(),
            RandomizeError::InsufficientParticipants
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = participants(10);
        let snapshot = input.clone();
        let mut rng = TinyRng::from_seed(3);
        randomize(&input, &mut rng).unwrap();
        randomize(&input, &mut rng).unwrap();
        assert_eq!(input, snapshot);
    }

    /// With two participants the only valid outcome is the full swap:
    /// each receives the other's gift.
    #[test]
    fn test_two_participants_always_swap() {
        let input = vec![
            Participant::new("Alice", "1"),
            Participant::new("Bob", "2"),
        ];
        for seed in 1..=100 {
            let mut rng = TinyRng::from_seed(seed);
            let mut pairings = randomize(&input, &mut rng).unwrap();
            pairings.sort();
            assert_eq!(
                pairings,
                vec![
                    Pairing {
                        receiver: "Alice".to_string(),
                        gift_number: "2".to_string(),
                    },
                    Pairing {
                        receiver: "Bob".to_string(),
                        gift_number: "1".to_string(),
                    },
                ]
            );
        }
    }

    #[test]
    fn test_five_participants_known_draw() {
        let input = vec![
            Participant::new("Alice", "1"),
            Participant::new("Bob", "2"),
            Participant::new("Carol", "3"),
            Participant::new("Dave", "4"),
            Participant::new("Eve", "5"),
        ];
        let mut rng = TinyRng::from_seed(42);
        let pairings = randomize(&input, &mut rng).unwrap();
        let expected: Vec<Pairing> = [
            ("Eve", "1"),
            ("Alice", "3"),
            ("Carol", "5"),
            ("Dave", "2"),
            ("Bob", "4"),
        ]
        .iter()
        .map(|(receiver, gift_number)| Pairing {
            receiver: receiver.to_string(),
            gift_number: gift_number.to_string(),
        })
        .collect();
        assert_eq!(pairings, expected);
        assert_bijection(&input, &pairings);
        assert_no_self_gift(&input, &pairings);
    }

    /// The retry loop terminates quickly even for the smallest inputs,
    /// where a shuffle is most likely to collide.
    #[test]
    fn test_retry_count_is_small_at_boundary_sizes() {
        for n in [2, 3] {
            let input = participants(n);
            for seed in 1..=200 {
                let mut rng = TinyRng::from_seed(seed);
                let mut attempts = 0;
                loop {
                    attempts += 1;
                    assert!(attempts < 1000, "runaway retry loop for n={n} seed={seed}");
                    let drawn = attempt(&input, &mut rng);
                    if drawn.iter().all(|a| a.giver != a.receiver) {
                        break;
                    }
                }
            }
        }
    }

    /// A large draw completes within a small number of attempts.
    #[test]
    fn test_fifty_participants_terminate_quickly() {
        let input = participants(50);
        for seed in [1, 7, 42, 123, 2024] {
            let mut rng = TinyRng::from_seed(seed);
            let mut attempts = 0;
            let drawn = loop {
                attempts += 1;
                assert!(attempts < 1000, "runaway retry loop for seed={seed}");
                let drawn = attempt(&input, &mut rng);
                if drawn.iter().all(|a| a.giver != a.receiver) {
                    break drawn;
                }
            };
            assert_eq!(drawn.len(), 50);
        }
    }

    /// Consecutive draws over the same input produce different results.
    #[test]
    fn test_consecutive_draws_differ() {
        let input = participants(10);
        let mut rng = TinyRng::from_seed(2024);
        let first = randomize(&input, &mut rng).unwrap();
        let second = randomize(&input, &mut rng).unwrap();
        assert_ne!(first, second);
    }
}
