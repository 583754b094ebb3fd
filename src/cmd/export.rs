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

use clap::ValueEnum;
use giftswap_core::share;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::STORE_FILENAME;
use crate::store::Store;
use crate::utils::resolve_directory;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    /// Plain-text listing.
    Txt,
    /// The raw results document as JSON.
    Json,
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Txt => write!(f, "txt"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

pub fn export_results(
    directory: Option<String>,
    format: ExportFormat,
    output: Option<String>,
) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = Store::open(&directory.join(STORE_FILENAME))?;
    let Some(document) = store.load_results()? else {
        return fail("No results have been drawn yet.");
    };
    let content = match format {
        ExportFormat::Txt => share::export_txt(&document),
        ExportFormat::Json => share::export_json(&document)?,
    };
    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            println!("Results written to {path}.");
        }
        None => print!("{content}"),
    }
    Ok(())
}
