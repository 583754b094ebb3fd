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

//! giftswap-core: Core library for the giftswap gift exchange helper.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - The participant roster and its validation rules
//! - Randomized gift assignment with the no-self-gift constraint
//! - The persisted document shapes shared by both storage backends
//! - Plain-text and JSON export formatting

pub mod error;
pub mod randomize;
pub mod rng;
pub mod roster;
pub mod share;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use randomize::{RandomizeError, randomize};
pub use roster::{DEFAULT_GIFT_NUMBER_LIMIT, Roster, RosterError};
pub use types::document::{BackupDocument, ExchangeDocument, ResultsDocument};
pub use types::pairing::Pairing;
pub use types::participant::Participant;
pub use types::roster_hash::RosterHash;
pub use types::timestamp::Timestamp;
