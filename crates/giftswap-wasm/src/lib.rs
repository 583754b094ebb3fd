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

//! WASM bindings for giftswap - runs the gift exchange entirely in the
//! browser, persisting to localStorage.

use wasm_bindgen::prelude::*;
use web_sys::console;

use giftswap_core::randomize::randomize;
use giftswap_core::rng::TinyRng;
use giftswap_core::roster::{COMPACT_GIFT_NUMBER_LIMIT, Roster};
use giftswap_core::share;
use giftswap_core::types::document::{BackupDocument, ExchangeDocument, ResultsDocument};
use giftswap_core::types::participant::Participant;
use giftswap_core::types::roster_hash::RosterHash;
use giftswap_core::types::timestamp::Timestamp;

mod storage;

use storage::Storage;

const STORAGE_KEY: &str = "giftswap_exchange";

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"giftswap WASM initialized".into());
}

/// The main application state managed from JavaScript.
#[wasm_bindgen]
pub struct GiftExchangeApp {
    /// The registered participants
    participants: Vec<Participant>,
    /// The last drawn results, if any
    results: Option<ResultsDocument>,
    /// Highest accepted gift number
    gift_number_limit: u32,
    /// Storage backend
    storage: Storage,
}

#[wasm_bindgen]
impl GiftExchangeApp {
    /// Create a new GiftExchangeApp instance.
    #[wasm_bindgen(constructor)]
    pub fn new(gift_number_limit: Option<u32>) -> Self {
        Self {
            participants: Vec::new(),
            results: None,
            gift_number_limit: gift_number_limit.unwrap_or(COMPACT_GIFT_NUMBER_LIMIT),
            storage: Storage::new(),
        }
    }

    /// Load a previously saved exchange from localStorage. Returns
    /// whether anything was loaded. Malformed stored data is cleared
    /// and treated as absent.
    #[wasm_bindgen]
    pub fn load(&mut self) -> Result<bool, JsValue> {
        let raw = match self.storage.get(STORAGE_KEY)? {
            Some(raw) => raw,
            None => return Ok(false),
        };
        match serde_json::from_str::<ExchangeDocument>(&raw) {
            Ok(document) => {
                self.participants = document.participants;
                self.results = document.results;
                Ok(true)
            }
            Err(_) => {
                console::warn_1(&"Discarding malformed exchange data".into());
                self.storage.remove(STORAGE_KEY)?;
                self.participants = Vec::new();
                self.results = None;
                Ok(false)
            }
        }
    }

    /// Get the number of registered participants.
    #[wasm_bindgen]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// The participant list as a JSON array.
    #[wasm_bindgen]
    pub fn participants_json(&self) -> String {
        serde_json::to_string(&self.participants).unwrap_or_else(|_| "[]".to_string())
    }

    /// Validate and register one participant, then persist.
    #[wasm_bindgen]
    pub fn add_participant(&mut self, name: &str, gift_number: &str) -> Result<(), JsValue> {
        let mut roster =
            Roster::from_participants(self.participants.clone(), self.gift_number_limit)
                .map_err(to_js)?;
        roster.add(name, gift_number).map_err(to_js)?;
        self.participants = roster.into_participants();
        self.save()
    }

    /// Remove a participant by exact name. Returns whether one was
    /// removed.
    #[wasm_bindgen]
    pub fn remove_participant(&mut self, name: &str) -> Result<bool, JsValue> {
        let before = self.participants.len();
        self.participants.retain(|p| p.name != name);
        let removed = self.participants.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Drop every participant and any drawn results.
    #[wasm_bindgen]
    pub fn clear_all(&mut self) -> Result<(), JsValue> {
        self.participants.clear();
        self.results = None;
        self.storage.remove(STORAGE_KEY)
    }

    /// Whether a draw is possible.
    #[wasm_bindgen]
    pub fn can_randomize(&self) -> bool {
        self.participants.len() >= 2
    }

    /// Draw the exchange. Any previously stored result is cleared
    /// before the new draw, so a stale result is never visible next to
    /// a fresh one. Returns the number of pairings.
    #[wasm_bindgen]
    pub fn randomize(&mut self) -> Result<usize, JsValue> {
        if self.participants.len() < 2 {
            return Err(JsValue::from_str("At least 2 participants are required."));
        }
        self.results = None;
        self.save()?;

        let mut rng = TinyRng::from_seed(entropy_seed()?);
        let pairings = randomize(&self.participants, &mut rng).map_err(to_js)?;
        let document = ResultsDocument {
            data: pairings,
            randomized_at: now()?,
            roster: RosterHash::of_roster(&self.participants),
        };
        let count = document.data.len();
        self.results = Some(document);
        self.save()?;
        Ok(count)
    }

    /// Whether results have been drawn.
    #[wasm_bindgen]
    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    /// The drawn pairings as a JSON array, or `null` when nothing has
    /// been drawn.
    #[wasm_bindgen]
    pub fn results_json(&self) -> String {
        match &self.results {
            Some(document) => {
                serde_json::to_string(&document.data).unwrap_or_else(|_| "null".to_string())
            }
            None => "null".to_string(),
        }
    }

    /// The short text used for clipboard/share copy.
    #[wasm_bindgen]
    pub fn share_text(&self) -> Option<String> {
        self.results
            .as_ref()
            .map(|document| share::share_text(&document.data))
    }

    /// The downloadable text export.
    #[wasm_bindgen]
    pub fn export_txt(&self) -> Option<String> {
        self.results.as_ref().map(share::export_txt)
    }

    #[wasm_bindgen]
    pub fn export_txt_filename(&self) -> Option<String> {
        self.results.as_ref().map(share::results_txt_filename)
    }

    /// The downloadable JSON export.
    #[wasm_bindgen]
    pub fn export_json(&self) -> Result<Option<String>, JsValue> {
        match &self.results {
            Some(document) => share::export_json(document).map(Some).map_err(to_js),
            None => Ok(None),
        }
    }

    #[wasm_bindgen]
    pub fn export_json_filename(&self) -> Option<String> {
        self.results.as_ref().map(share::results_json_filename)
    }

    /// The full exchange as a backup document.
    #[wasm_bindgen]
    pub fn backup_json(&self) -> Result<String, JsValue> {
        let backup = BackupDocument {
            participants: self.participants.clone(),
            results: self.results.clone(),
            exported_at: now()?,
        };
        share::backup_json(&backup).map_err(to_js)
    }

    // Private helper methods

    fn save(&self) -> Result<(), JsValue> {
        let document = ExchangeDocument {
            participants: self.participants.clone(),
            results: self.results.clone(),
            saved_at: now()?,
        };
        let raw = serde_json::to_string(&document)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize exchange: {}", e)))?;
        self.storage.set(STORAGE_KEY, &raw)
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn entropy_seed() -> Result<u64, JsValue> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| JsValue::from_str(&format!("Failed to gather entropy: {}", e)))?;
    Ok(u64::from_le_bytes(bytes))
}

fn now() -> Result<Timestamp, JsValue> {
    Timestamp::try_from(now_timestamp()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the current timestamp as an ISO string.
#[wasm_bindgen]
pub fn now_timestamp() -> String {
    let date = js_sys::Date::new_0();
    let year = date.get_full_year();
    let month = date.get_month() + 1;
    let day = date.get_date();
    let hours = date.get_hours();
    let minutes = date.get_minutes();
    let seconds = date.get_seconds();
    let millis = date.get_milliseconds();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        year, month, day, hours, minutes, seconds, millis
    )
}
