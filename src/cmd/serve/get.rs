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

use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use giftswap_core::BackupDocument;
use giftswap_core::Timestamp;
use giftswap_core::share;
use maud::Markup;
use maud::html;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::alert_box;
use crate::cmd::serve::template::avatar_text;
use crate::cmd::serve::template::page_template;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

#[derive(Deserialize)]
pub struct AlertParams {
    pub alert: Option<String>,
    pub kind: Option<String>,
}

type Page = (StatusCode, Html<String>);
type Download = (StatusCode, [(HeaderName, String); 2], String);

pub async fn admin_handler(
    State(state): State<ServerState>,
    Query(params): Query<AlertParams>,
) -> Page {
    let store = state.store.lock().unwrap();
    let participants = match store.load_participants() {
        Ok(participants) => participants,
        Err(e) => return error_page(&e.to_string()),
    };
    let has_results = matches!(store.load_results(), Ok(Some(_)));
    drop(store);

    let limit = state.gift_number_limit;
    let body = html! {
        div class="container" {
            h1 { "Gift Exchange Admin" }
            (alert_box(params.alert.as_deref(), params.kind.as_deref()))
            section class="panel" {
                h2 { "Add Participant" }
                form class="add-form" method="post" action="/participants" {
                    input type="text" name="name" placeholder="Name" required;
                    input type="text" name="gift_number"
                        placeholder=(format!("Gift number (1-{limit})")) required;
                    button type="submit" { "Add" }
                }
            }
            section class="panel" {
                h2 { "Participants (" (participants.len()) ")" }
                @if participants.is_empty() {
                    p class="empty" { "No participants registered yet." }
                } @else {
                    ul class="participant-list" {
                        @for participant in &participants {
                            li {
                                span class="avatar" { (avatar_text(&participant.name)) }
                                span class="name" { (participant.name) }
                                span class="gift" { "Gift #" (participant.gift_number) }
                                form method="post" action=(delete_action(&participant.name)) {
                                    button type="submit" class="danger" { "Remove" }
                                }
                            }
                        }
                    }
                }
            }
            section class="panel controls" {
                form method="post" action="/randomize" {
                    button type="submit" disabled[participants.len() < 2] { "Randomize" }
                }
                @if has_results {
                    a class="button" href="/results" { "View results" }
                }
                a class="button" href="/backup.json" { "Download backup" }
                form method="post" action="/reset" {
                    button type="submit" class="danger" { "Reset all data" }
                }
            }
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

pub async fn results_handler(State(state): State<ServerState>) -> Page {
    let store = state.store.lock().unwrap();
    let document = match store.load_results() {
        Ok(document) => document,
        Err(e) => return error_page(&e.to_string()),
    };
    drop(store);

    let body = match document {
        Some(document) => html! {
            div class="container" {
                h1 { "Gift Exchange Results" }
                p class="stamp" { "Randomized at " (document.randomized_at) }
                ul class="result-list" {
                    @for (index, pairing) in document.data.iter().enumerate() {
                        li {
                            span class="avatar" { (avatar_text(&pairing.receiver)) }
                            span class="name" { (pairing.receiver) }
                            span class="position" { "Participant #" (index + 1) }
                            span class="gift" { "Gift #" (pairing.gift_number) }
                        }
                    }
                }
                section class="controls" {
                    a class="button" href="/results/export.txt" { "Export TXT" }
                    a class="button" href="/results/export.json" { "Export JSON" }
                    a class="button" href="/" { "Back to admin" }
                }
            }
        },
        None => html! {
            div class="container" {
                h1 { "Gift Exchange Results" }
                div class="empty-results" {
                    h2 { "No results yet" }
                    p { "No results have been drawn yet. Register at least two participants and randomize." }
                    a class="button" href="/" { "Back to admin" }
                }
            }
        },
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

pub async fn export_txt_handler(State(state): State<ServerState>) -> Download {
    let store = state.store.lock().unwrap();
    match store.load_results() {
        Ok(Some(document)) => download(
            "text/plain; charset=utf-8",
            &share::results_txt_filename(&document),
            share::export_txt(&document),
        ),
        Ok(None) => plain(StatusCode::NOT_FOUND, "No results have been drawn yet.\n"),
        Err(e) => plain(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

pub async fn export_json_handler(State(state): State<ServerState>) -> Download {
    let store = state.store.lock().unwrap();
    match store.load_results() {
        Ok(Some(document)) => match share::export_json(&document) {
            Ok(json) => download(
                "application/json",
                &share::results_json_filename(&document),
                json,
            ),
            Err(e) => plain(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        },
        Ok(None) => plain(StatusCode::NOT_FOUND, "No results have been drawn yet.\n"),
        Err(e) => plain(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

pub async fn backup_handler(State(state): State<ServerState>) -> Download {
    let store = state.store.lock().unwrap();
    let participants = match store.load_participants() {
        Ok(participants) => participants,
        Err(e) => return plain(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };
    let results = match store.load_results() {
        Ok(results) => results,
        Err(e) => return plain(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };
    drop(store);
    let backup = BackupDocument {
        participants,
        results,
        exported_at: Timestamp::now(),
    };
    match share::backup_json(&backup) {
        Ok(json) => download("application/json", &share::backup_filename(&backup), json),
        Err(e) => plain(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

pub async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

pub async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

fn delete_action(name: &str) -> String {
    format!(
        "/participants/{}/delete",
        utf8_percent_encode(name, NON_ALPHANUMERIC)
    )
}

fn error_page(message: &str) -> Page {
    let body: Markup = html! {
        div class="container" {
            h1 { "giftswap" }
            div class="alert alert-error" { (message) }
        }
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(page_template(body).into_string()),
    )
}

fn download(content_type: &str, filename: &str, content: String) -> Download {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        content,
    )
}

fn plain(status: StatusCode, message: &str) -> Download {
    (
        status,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, "inline".to_string()),
        ],
        message.to_string(),
    )
}
