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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "giftswap" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
            }
        }
    }
}

/// The alert banner, fed by the `alert`/`kind` query parameters a
/// redirect carries back to the page.
pub fn alert_box(message: Option<&str>, kind: Option<&str>) -> Markup {
    match message {
        Some(message) => {
            let class = match kind {
                Some("error") => "alert alert-error",
                _ => "alert alert-success",
            };
            html! {
                div class=(class) { (message) }
            }
        }
        None => html! {},
    }
}

/// Initials shown in the avatar circle next to a name: the first
/// letter, or the first letters of the first and last words.
pub fn avatar_text(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [] => "?".to_string(),
        [only] => first_letter(only),
        [first, .., last] => format!("{}{}", first_letter(first), first_letter(last)),
    }
}

fn first_letter(word: &str) -> String {
    match word.chars().next() {
        Some(c) => c.to_uppercase().to_string(),
        None => "?".to_string(),
    }
}
