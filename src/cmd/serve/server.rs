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

use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::serve::get::admin_handler;
use crate::cmd::serve::get::backup_handler;
use crate::cmd::serve::get::export_json_handler;
use crate::cmd::serve::get::export_txt_handler;
use crate::cmd::serve::get::not_found_handler;
use crate::cmd::serve::get::results_handler;
use crate::cmd::serve::get::style_handler;
use crate::cmd::serve::post::add_participant_handler;
use crate::cmd::serve::post::delete_participant_handler;
use crate::cmd::serve::post::randomize_handler;
use crate::cmd::serve::post::reset_handler;
use crate::cmd::serve::state::ServerState;
use crate::error::Fallible;
use crate::store::STORE_FILENAME;
use crate::store::Store;
use crate::utils::resolve_directory;

pub struct ServerConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
    pub gift_number_limit: u32,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let directory = resolve_directory(config.directory)?;
    let store = Store::open(&directory.join(STORE_FILENAME))?;
    let state = ServerState {
        store: Arc::new(Mutex::new(store)),
        gift_number_limit: config.gift_number_limit,
    };

    let app = Router::new();
    let app = app.route("/", get(admin_handler));
    let app = app.route("/participants", post(add_participant_handler));
    let app = app.route("/participants/{name}/delete", post(delete_participant_handler));
    let app = app.route("/randomize", post(randomize_handler));
    let app = app.route("/reset", post(reset_handler));
    let app = app.route("/results", get(results_handler));
    let app = app.route("/results/export.txt", get(export_txt_handler));
    let app = app.route("/results/export.json", get(export_json_handler));
    let app = app.route("/backup.json", get(backup_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    log::debug!("Received Ctrl+C, shutting down gracefully");
}
