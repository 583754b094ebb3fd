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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::participant::Participant;

/// Fingerprint of an ordered participant list. A result set stores the
/// fingerprint of the roster it was drawn from, so a drawn result can
/// be detected as stale after the roster is edited.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RosterHash {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl RosterHash {
    pub fn of_roster(participants: &[Participant]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for participant in participants {
            hasher.update(participant.name.as_bytes());
            hasher.update(b"\0");
            hasher.update(participant.gift_number.as_bytes());
            hasher.update(b"\n");
        }
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new("invalid roster hash in results document"))?;
        Ok(Self { inner })
    }
}

impl Display for RosterHash {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for RosterHash {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RosterHash::from_hex(&value)
    }
}

impl From<RosterHash> for String {
    fn from(hash: RosterHash) -> String {
        hash.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("Alice", "1"),
            Participant::new("Bob", "2"),
        ]
    }

    #[test]
    fn test_stable_for_identical_rosters() {
        assert_eq!(RosterHash::of_roster(&roster()), RosterHash::of_roster(&roster()));
    }

    #[test]
    fn test_sensitive_to_any_field() {
        let base = RosterHash::of_roster(&roster());
        let renamed = vec![
            Participant::new("Alice", "1"),
            Participant::new("Bobby", "2"),
        ];
        let renumbered = vec![
            Participant::new("Alice", "1"),
            Participant::new("Bob", "3"),
        ];
        assert_ne!(base, RosterHash::of_roster(&renamed));
        assert_ne!(base, RosterHash::of_roster(&renumbered));
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        let a = vec![Participant::new("ab", "c")];
        let b = vec![Participant::new("a", "bc")];
        assert_ne!(RosterHash::of_roster(&a), RosterHash::of_roster(&b));
    }

    #[test]
    fn test_hex_roundtrip() -> Fallible<()> {
        let hash = RosterHash::of_roster(&roster());
        let recovered = RosterHash::from_hex(&hash.to_hex())?;
        assert_eq!(hash, recovered);
        Ok(())
    }

    #[test]
    fn test_invalid_hex() {
        assert!(RosterHash::from_hex("not hex").is_err());
    }
}
