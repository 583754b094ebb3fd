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

//! Plain-text and JSON renderings of a drawn result. These are pure
//! string builders; writing them to a file, the clipboard, or a share
//! sheet is the caller's business.

use crate::error::Fallible;
use crate::types::document::BackupDocument;
use crate::types::document::ResultsDocument;
use crate::types::pairing::Pairing;

const TITLE: &str = "Gift Exchange Results";

/// The short form used for clipboard/share copy.
pub fn share_text(pairings: &[Pairing]) -> String {
    let mut text = String::new();
    text.push_str(TITLE);
    text.push_str("\n\n");
    for (index, pairing) in pairings.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} -> Gift #{}\n",
            index + 1,
            pairing.receiver,
            pairing.gift_number
        ));
    }
    text
}

/// The downloadable text document.
pub fn export_txt(document: &ResultsDocument) -> String {
    let mut text = String::new();
    text.push_str(TITLE);
    text.push('\n');
    text.push_str(&"=".repeat(TITLE.len()));
    text.push_str("\n\n");
    for (index, pairing) in document.data.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} -> Gift #{}\n",
            index + 1,
            pairing.receiver,
            pairing.gift_number
        ));
    }
    text.push('\n');
    text.push_str(&format!("Randomized at: {}\n", document.randomized_at));
    text
}

/// The downloadable JSON document.
pub fn export_json(document: &ResultsDocument) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// The admin backup export.
pub fn backup_json(backup: &BackupDocument) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(backup)?)
}

pub fn results_txt_filename(document: &ResultsDocument) -> String {
    format!(
        "gift-exchange-results-{}.txt",
        document.randomized_at.date_string()
    )
}

pub fn results_json_filename(document: &ResultsDocument) -> String {
    format!(
        "gift-exchange-results-{}.json",
        document.randomized_at.date_string()
    )
}

pub fn backup_filename(backup: &BackupDocument) -> String {
    format!(
        "gift-exchange-backup-{}.json",
        backup.exported_at.date_string()
    )
}
