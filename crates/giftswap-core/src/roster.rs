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

//! The participant registry.
//!
//! The roster owns the authoritative participant list and enforces its
//! invariants on entry: non-empty fields, a numeric gift number within
//! the configured bound, case-insensitive name uniqueness, and
//! gift-number uniqueness. Everything downstream of the roster may
//! assume these hold.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::participant::Participant;
use crate::types::roster_hash::RosterHash;

/// Gift-number bound of the admin screen.
pub const DEFAULT_GIFT_NUMBER_LIMIT: u32 = 999;

/// Gift-number bound of the single-page variant.
pub const COMPACT_GIFT_NUMBER_LIMIT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterError {
    EmptyName,
    EmptyGiftNumber,
    /// The gift number did not parse as an integer in `1..=limit`.
    GiftNumberOutOfRange(u32),
    /// The name is already registered (case-insensitive).
    DuplicateName(String),
    /// The gift number is already used; carries the number and the name
    /// of the participant holding it.
    DuplicateGiftNumber(String, String),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyName => write!(f, "Participant name cannot be empty."),
            RosterError::EmptyGiftNumber => write!(f, "Gift number cannot be empty."),
            RosterError::GiftNumberOutOfRange(limit) => {
                write!(f, "Gift number must be between 1 and {limit}.")
            }
            RosterError::DuplicateName(name) => {
                write!(f, "The name \"{name}\" is already registered.")
            }
            RosterError::DuplicateGiftNumber(number, holder) => {
                write!(f, "Gift number {number} is already used by {holder}.")
            }
        }
    }
}

#[derive(Debug)]
pub struct Roster {
    participants: Vec<Participant>,
    gift_number_limit: u32,
}

impl Roster {
    pub fn new(gift_number_limit: u32) -> Self {
        Self {
            participants: Vec::new(),
            gift_number_limit,
        }
    }

    /// Rebuild a roster from a persisted participant list, re-validating
    /// every entry. Persisted state is not trusted: a list that violates
    /// the invariants is rejected rather than loaded.
    pub fn from_participants(
        participants: Vec<Participant>,
        gift_number_limit: u32,
    ) -> Result<Self, RosterError> {
        let mut roster = Self::new(gift_number_limit);
        for participant in participants {
            roster.add(&participant.name, &participant.gift_number)?;
        }
        Ok(roster)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn into_participants(self) -> Vec<Participant> {
        self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn hash(&self) -> RosterHash {
        RosterHash::of_roster(&self.participants)
    }

    /// Validate and register one participant. Both fields are trimmed;
    /// the trimmed values are what gets stored.
    pub fn add(&mut self, name: &str, gift_number: &str) -> Result<Participant, RosterError> {
        let name = name.trim();
        let gift_number = gift_number.trim();

        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if gift_number.is_empty() {
            return Err(RosterError::EmptyGiftNumber);
        }
        match gift_number.parse::<u32>() {
            Ok(n) if (1..=self.gift_number_limit).contains(&n) => {}
            _ => return Err(RosterError::GiftNumberOutOfRange(self.gift_number_limit)),
        }
        if let Some(existing) = self
            .participants
            .iter()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
        {
            return Err(RosterError::DuplicateName(existing.name.clone()));
        }
        // Gift numbers are opaque labels: uniqueness is on the trimmed
        // string, as entered.
        if let Some(existing) = self.participants.iter().find(|p| p.gift_number == gift_number) {
            return Err(RosterError::DuplicateGiftNumber(
                gift_number.to_string(),
                existing.name.clone(),
            ));
        }

        let participant = Participant::new(name, gift_number);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Remove a participant by exact name. Returns whether one was
    /// removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.name != name);
        self.participants.len() != before
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }
}
