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

//! The document store: a single-table key/value database holding the
//! exchange's JSON documents.
//!
//! Every admin screen and browser tab talks to this one store through
//! the server, so it is the authoritative copy of the exchange. A
//! stored document that no longer parses is logged, cleared, and
//! treated as absent; it is never allowed to take the application down.

use std::path::Path;

use giftswap_core::Participant;
use giftswap_core::ResultsDocument;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

use crate::error::Fallible;

/// The database filename inside the data directory.
pub const STORE_FILENAME: &str = "giftswap.db";

/// Document key for the participant list.
pub const PARTICIPANTS_KEY: &str = "participants";

/// Document key for the drawn results.
pub const RESULTS_KEY: &str = "results";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// An in-memory store, for tests.
    #[cfg(test)]
    pub fn open_in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn save(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO documents (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn load(&self, key: &str) -> Fallible<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn clear(&self, key: &str) -> Fallible<()> {
        self.conn
            .execute("DELETE FROM documents WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Delete every stored document.
    pub fn reset(&self) -> Fallible<()> {
        self.conn.execute("DELETE FROM documents", [])?;
        Ok(())
    }

    /// The stored participant list, or an empty list if absent. A
    /// malformed document is cleared and reported as empty.
    pub fn load_participants(&self) -> Fallible<Vec<Participant>> {
        match self.load(PARTICIPANTS_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(participants) => Ok(participants),
                Err(e) => {
                    log::warn!("Discarding malformed participants document: {e}");
                    self.clear(PARTICIPANTS_KEY)?;
                    Ok(Vec::new())
                }
            },
        }
    }

    pub fn save_participants(&self, participants: &[Participant]) -> Fallible<()> {
        let raw = serde_json::to_string(participants)?;
        self.save(PARTICIPANTS_KEY, &raw)
    }

    /// The stored results document, if one has been drawn. A malformed
    /// document is cleared and reported as absent.
    pub fn load_results(&self) -> Fallible<Option<ResultsDocument>> {
        match self.load(RESULTS_KEY)? {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(document) => Ok(Some(document)),
                Err(e) => {
                    log::warn!("Discarding malformed results document: {e}");
                    self.clear(RESULTS_KEY)?;
                    Ok(None)
                }
            },
        }
    }

    pub fn save_results(&self, document: &ResultsDocument) -> Fallible<()> {
        let raw = serde_json::to_string(document)?;
        self.save(RESULTS_KEY, &raw)
    }
}
