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

use std::process::exit;

use clap::Parser;
use giftswap_core::roster::DEFAULT_GIFT_NUMBER_LIMIT;
use tokio::spawn;

use crate::cmd::check::check_exchange;
use crate::cmd::export::ExportFormat;
use crate::cmd::export::export_results;
use crate::cmd::reset::reset_exchange;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::config::Config;
use crate::config::DEFAULT_HOST;
use crate::config::DEFAULT_PORT;
use crate::config::load_config;
use crate::error::Fallible;
use crate::utils::resolve_directory;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Run the gift exchange through a web interface.
    Serve {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// Highest accepted gift number. Default is 999.
        #[arg(long)]
        gift_number_limit: Option<u32>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Check the integrity of the stored exchange data.
    Check {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Export the drawn results.
    Export {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = ExportFormat::Txt)]
        format: ExportFormat,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Delete every stored document.
    Reset {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            host,
            port,
            gift_number_limit,
            open_browser,
        } => {
            let file: Config = load_config(&resolve_directory(directory.clone())?)?;
            let host = host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = port.or(file.server.port).unwrap_or(DEFAULT_PORT);
            let gift_number_limit = gift_number_limit
                .or(file.exchange.gift_number_limit)
                .unwrap_or(DEFAULT_GIFT_NUMBER_LIMIT);
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
                gift_number_limit,
            };
            start_server(config).await
        }
        Command::Check { directory } => {
            let file: Config = load_config(&resolve_directory(directory.clone())?)?;
            let gift_number_limit = file
                .exchange
                .gift_number_limit
                .unwrap_or(DEFAULT_GIFT_NUMBER_LIMIT);
            check_exchange(directory, gift_number_limit)
        }
        Command::Export {
            directory,
            format,
            output,
        } => export_results(directory, format, output),
        Command::Reset { directory } => reset_exchange(directory),
    }
}
