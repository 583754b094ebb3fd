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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tempfile::tempdir;
    use tokio::spawn;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::error::Fallible;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    fn config(directory: &std::path::Path, port: u16) -> ServerConfig {
        ServerConfig {
            directory: Some(directory.display().to_string()),
            host: TEST_HOST.to_string(),
            port,
            gift_number_limit: 999,
        }
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let dir = tempdir()?;
        spawn(start_server(config(dir.path(), port)));
        wait_for_server(TEST_HOST, port).await?;
        let base = format!("http://{TEST_HOST}:{port}");
        let client = reqwest::Client::new();

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Unknown routes 404.
        let response = reqwest::get(format!("{base}/nope")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The admin page starts empty.
        let body = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(body.contains("No participants registered yet."));

        // No results have been drawn.
        let body = reqwest::get(format!("{base}/results")).await?.text().await?;
        assert!(body.contains("No results have been drawn yet."));
        let response = reqwest::get(format!("{base}/results/export.txt")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Register three participants.
        for (name, gift_number) in [("Alice", "1"), ("Bob", "2"), ("Carol Anne", "3")] {
            let response = client
                .post(format!("{base}/participants"))
                .form(&[("name", name), ("gift_number", gift_number)])
                .send()
                .await?;
            assert!(response.status().is_success());
        }
        let body = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(body.contains("Participants (3)"));
        assert!(body.contains("Alice"));
        assert!(body.contains("Gift #3"));

        // Validation errors surface as alerts.
        let body = client
            .post(format!("{base}/participants"))
            .form(&[("name", "alice"), ("gift_number", "9")])
            .send()
            .await?
            .text()
            .await?;
        assert!(body.contains("already registered"));
        let body = client
            .post(format!("{base}/participants"))
            .form(&[("name", "Dave"), ("gift_number", "5000")])
            .send()
            .await?
            .text()
            .await?;
        assert!(body.contains("between 1 and 999"));

        // Delete works on percent-encoded names.
        let body = client
            .post(format!("{base}/participants/Carol%20Anne/delete"))
            .send()
            .await?
            .text()
            .await?;
        assert!(body.contains("Participants (2)"));

        // Draw the exchange.
        let body = client
            .post(format!("{base}/randomize"))
            .send()
            .await?
            .text()
            .await?;
        assert!(body.contains("Gift Exchange Results"));
        assert!(body.contains("Randomized at"));
        // With two participants each must receive the other's gift.
        assert!(body.contains("Alice"));
        assert!(body.contains("Bob"));

        // Exports carry the results.
        let txt = reqwest::get(format!("{base}/results/export.txt"))
            .await?
            .text()
            .await?;
        assert!(txt.starts_with("Gift Exchange Results"));
        assert!(txt.contains("Gift #1"));
        assert!(txt.contains("Gift #2"));
        let response = reqwest::get(format!("{base}/results/export.json")).await?;
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let json = response.text().await?;
        assert!(json.contains("\"randomized_at\""));
        let backup = reqwest::get(format!("{base}/backup.json")).await?.text().await?;
        assert!(backup.contains("\"participants\""));

        // Reset wipes everything.
        let body = client.post(format!("{base}/reset")).send().await?.text().await?;
        assert!(body.contains("No participants registered yet."));
        let body = reqwest::get(format!("{base}/results")).await?.text().await?;
        assert!(body.contains("No results have been drawn yet."));

        Ok(())
    }

    #[tokio::test]
    async fn test_randomize_requires_two_participants() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let dir = tempdir()?;
        spawn(start_server(config(dir.path(), port)));
        wait_for_server(TEST_HOST, port).await?;
        let base = format!("http://{TEST_HOST}:{port}");
        let client = reqwest::Client::new();

        let body = client
            .post(format!("{base}/randomize"))
            .send()
            .await?
            .text()
            .await?;
        assert!(body.contains("At least 2 participants are required."));

        client
            .post(format!("{base}/participants"))
            .form(&[("name", "Alice"), ("gift_number", "1")])
            .send()
            .await?;
        let body = client
            .post(format!("{base}/randomize"))
            .send()
            .await?
            .text()
            .await?;
        assert!(body.contains("At least 2 participants are required."));
        Ok(())
    }
}
