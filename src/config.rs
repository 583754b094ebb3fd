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

//! Optional per-exchange configuration, read from `giftswap.toml` in
//! the data directory. Command-line flags override anything set here.

use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILENAME: &str = "giftswap.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub exchange: ExchangeSection,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct ExchangeSection {
    pub gift_number_limit: Option<u32>,
}

/// Load the config file from the data directory. An absent file is the
/// default config; a file that fails to parse is an error, since
/// silently ignoring a typo'd config would be worse.
pub fn load_config(directory: &Path) -> Fallible<Config> {
    let path = directory.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&raw)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_absent_file_is_default() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(load_config(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_full_config() -> Fallible<()> {
        let dir = tempdir()?;
        let raw = r#"
[server]
host = "0.0.0.0"
port = 9000

[exchange]
gift_number_limit = 100
"#;
        std::fs::write(dir.path().join(CONFIG_FILENAME), raw)?;
        let config = load_config(dir.path())?;
        assert_eq!(config.server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.exchange.gift_number_limit, Some(100));
        Ok(())
    }

    #[test]
    fn test_partial_config() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(CONFIG_FILENAME), "[server]\nport = 9000\n")?;
        let config = load_config(dir.path())?;
        assert_eq!(config.server.host, None);
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.exchange.gift_number_limit, None);
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_an_error() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(CONFIG_FILENAME), "server = 12\n")?;
        assert!(load_config(dir.path()).is_err());
        Ok(())
    }
}
