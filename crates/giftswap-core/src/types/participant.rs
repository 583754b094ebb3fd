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

use serde::Deserialize;
use serde::Serialize;

/// A registered entrant in the exchange.
///
/// The gift number is the label on the physical gift this participant
/// contributed. It is an opaque unique label: numeric on entry, but
/// never used arithmetically after validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub gift_number: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, gift_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gift_number: gift_number.into(),
        }
    }
}
