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

//! The persisted document shapes shared by both storage backends.

use serde::Deserialize;
use serde::Serialize;

use crate::types::pairing::Pairing;
use crate::types::participant::Participant;
use crate::types::roster_hash::RosterHash;
use crate::types::timestamp::Timestamp;

/// One completed draw. Immutable once written: a new draw replaces the
/// whole document, it never edits one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub data: Vec<Pairing>,
    pub randomized_at: Timestamp,
    pub roster: RosterHash,
}

/// The single-document shape used by browser-local storage: the whole
/// exchange in one value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDocument {
    pub participants: Vec<Participant>,
    pub results: Option<ResultsDocument>,
    pub saved_at: Timestamp,
}

/// The admin backup export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub participants: Vec<Participant>,
    pub results: Option<ResultsDocument>,
    pub exported_at: Timestamp,
}
