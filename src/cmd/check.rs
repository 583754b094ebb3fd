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

//! Integrity check over the stored exchange: the roster must satisfy
//! its own validation rules, and a drawn result must still be
//! consistent with the roster it claims to come from.

use std::collections::HashMap;

use giftswap_core::ResultsDocument;
use giftswap_core::Roster;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::STORE_FILENAME;
use crate::store::Store;
use crate::utils::resolve_directory;

pub fn check_exchange(directory: Option<String>, gift_number_limit: u32) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = Store::open(&directory.join(STORE_FILENAME))?;

    let participants = store.load_participants()?;
    let roster = Roster::from_participants(participants, gift_number_limit)?;
    println!("Roster: {} participants, all valid.", roster.len());

    match store.load_results()? {
        None => println!("Results: none drawn."),
        Some(document) => {
            check_results(&roster, &document)?;
            println!(
                "Results: {} pairings, consistent with the roster.",
                document.data.len()
            );
        }
    }
    Ok(())
}

fn check_results(roster: &Roster, document: &ResultsDocument) -> Fallible<()> {
    let participants = roster.participants();
    if document.data.len() != participants.len() {
        return fail(format!(
            "Results have {} entries but the roster has {} participants.",
            document.data.len(),
            participants.len()
        ));
    }

    let mut receivers: Vec<&str> = document.data.iter().map(|p| p.receiver.as_str()).collect();
    let mut names: Vec<&str> = participants.iter().map(|p| p.name.as_str()).collect();
    receivers.sort();
    names.sort();
    if receivers != names {
        return fail("Result receivers do not match the roster names.");
    }

    let mut gifts: Vec<&str> = document.data.iter().map(|p| p.gift_number.as_str()).collect();
    let mut numbers: Vec<&str> = participants.iter().map(|p| p.gift_number.as_str()).collect();
    gifts.sort();
    numbers.sort();
    if gifts != numbers {
        return fail("Result gift numbers do not match the roster.");
    }

    let giver_of: HashMap<&str, &str> = participants
        .iter()
        .map(|p| (p.gift_number.as_str(), p.name.as_str()))
        .collect();
    for pairing in &document.data {
        if let Some(giver) = giver_of.get(pairing.gift_number.as_str()) {
            if *giver == pairing.receiver {
                return fail(format!(
                    "\"{}\" would receive their own gift #{}.",
                    giver, pairing.gift_number
                ));
            }
        }
    }

    if document.roster != roster.hash() {
        return fail("Results are stale: the roster changed after the draw. Randomize again.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use giftswap_core::Pairing;
    use giftswap_core::Participant;
    use giftswap_core::RosterHash;
    use giftswap_core::Timestamp;

    use super::*;

    fn roster() -> Roster {
        let participants = vec![
            Participant::new("Alice", "1"),
            Participant::new("Bob", "2"),
        ];
        Roster::from_participants(participants, 999).unwrap()
    }

    fn pairing(receiver: &str, gift_number: &str) -> Pairing {
        Pairing {
            receiver: receiver.to_string(),
            gift_number: gift_number.to_string(),
        }
    }

    fn document(data: Vec<Pairing>, roster: &Roster) -> ResultsDocument {
        ResultsDocument {
            data,
            randomized_at: Timestamp::try_from("2025-12-24T18:30:15.123".to_string()).unwrap(),
            roster: roster.hash(),
        }
    }

    #[test]
    fn test_consistent_results_pass() {
        let roster = roster();
        let document = document(vec![pairing("Bob", "1"), pairing("Alice", "2")], &roster);
        assert!(check_results(&roster, &document).is_ok());
    }

    #[test]
    fn test_count_mismatch_fails() {
        let roster = roster();
        let document = document(vec![pairing("Bob", "1")], &roster);
        assert!(check_results(&roster, &document).is_err());
    }

    #[test]
    fn test_unknown_receiver_fails() {
        let roster = roster();
        let document = document(vec![pairing("Mallory", "1"), pairing("Alice", "2")], &roster);
        assert!(check_results(&roster, &document).is_err());
    }

    #[test]
    fn test_self_gift_fails() {
        let roster = roster();
        let document = document(vec![pairing("Alice", "1"), pairing("Bob", "2")], &roster);
        assert!(check_results(&roster, &document).is_err());
    }

    #[test]
    fn test_stale_roster_fails() {
        let roster = roster();
        let mut document = document(vec![pairing("Bob", "1"), pairing("Alice", "2")], &roster);
        document.roster = RosterHash::of_roster(&[Participant::new("Someone", "9")]);
        assert!(check_results(&roster, &document).is_err());
    }
}
