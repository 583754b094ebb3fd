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

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::extract::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Redirect;
use giftswap_core::ResultsDocument;
use giftswap_core::Roster;
use giftswap_core::RosterHash;
use giftswap_core::Timestamp;
use giftswap_core::randomize;
use giftswap_core::rng::TinyRng;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::store::RESULTS_KEY;

#[derive(Deserialize)]
pub struct AddForm {
    pub name: String,
    pub gift_number: String,
}

pub async fn add_participant_handler(
    State(state): State<ServerState>,
    Form(form): Form<AddForm>,
) -> Redirect {
    let store = state.store.lock().unwrap();
    let participants = match store.load_participants() {
        Ok(participants) => participants,
        Err(e) => return redirect_with_alert(&e.to_string(), "error"),
    };
    let mut roster = match Roster::from_participants(participants, state.gift_number_limit) {
        Ok(roster) => roster,
        Err(e) => return redirect_with_alert(&e.to_string(), "error"),
    };
    let participant = match roster.add(&form.name, &form.gift_number) {
        Ok(participant) => participant,
        Err(e) => return redirect_with_alert(&e.to_string(), "error"),
    };
    if let Err(e) = store.save_participants(roster.participants()) {
        return redirect_with_alert(&e.to_string(), "error");
    }
    redirect_with_alert(
        &format!(
            "Added \"{}\" with gift #{}.",
            participant.name, participant.gift_number
        ),
        "success",
    )
}

pub async fn delete_participant_handler(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Redirect {
    let store = state.store.lock().unwrap();
    let mut participants = match store.load_participants() {
        Ok(participants) => participants,
        Err(e) => return redirect_with_alert(&e.to_string(), "error"),
    };
    let before = participants.len();
    participants.retain(|p| p.name != name);
    if participants.len() == before {
        return redirect_with_alert(&format!("No participant named \"{name}\"."), "error");
    }
    if let Err(e) = store.save_participants(&participants) {
        return redirect_with_alert(&e.to_string(), "error");
    }
    redirect_with_alert(&format!("Removed \"{name}\"."), "success")
}

pub async fn randomize_handler(State(state): State<ServerState>) -> Redirect {
    let store = state.store.lock().unwrap();
    let participants = match store.load_participants() {
        Ok(participants) => participants,
        Err(e) => return redirect_with_alert(&e.to_string(), "error"),
    };
    if participants.len() < 2 {
        return redirect_with_alert("At least 2 participants are required.", "error");
    }

    // Stale and fresh results must never be visible at the same time:
    // the old document goes away before the new draw starts.
    if let Err(e) = store.clear(RESULTS_KEY) {
        return redirect_with_alert(&e.to_string(), "error");
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    let mut rng = TinyRng::from_seed(seed);
    let pairings = match randomize(&participants, &mut rng) {
        Ok(pairings) => pairings,
        Err(e) => return redirect_with_alert(&e.to_string(), "error"),
    };

    let document = ResultsDocument {
        data: pairings,
        randomized_at: Timestamp::now(),
        roster: RosterHash::of_roster(&participants),
    };
    if let Err(e) = store.save_results(&document) {
        return redirect_with_alert(&e.to_string(), "error");
    }
    log::debug!("Drew {} pairings", document.data.len());
    Redirect::to("/results")
}

pub async fn reset_handler(State(state): State<ServerState>) -> Redirect {
    let store = state.store.lock().unwrap();
    match store.reset() {
        Ok(()) => redirect_with_alert("All stored data has been reset.", "success"),
        Err(e) => redirect_with_alert(&e.to_string(), "error"),
    }
}

fn redirect_with_alert(message: &str, kind: &str) -> Redirect {
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC).to_string();
    Redirect::to(&format!("/?alert={encoded}&kind={kind}"))
}
