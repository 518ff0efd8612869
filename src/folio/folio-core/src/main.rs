/*
 * folio portfolio contact service
 * Copyright (C) 2022 viridIT SAS
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * this program. If not, see https://www.gnu.org/licenses/.
 *
*/

use anyhow::Context;
use clap::Parser;
use folio::{init_logs, Args};
use folio_config::Config;
use folio_delivery::SmtpRelay;
use folio_server::{socket_bind_anyhow, Server};
use folio_store::{GenericRecordStore, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env file is not an error, the environment may already be set
    dotenv::dotenv().ok();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_json_path(path),
        None => Config::from_env(),
    }
    .context("Cannot load the configuration")?;
    let config = std::sync::Arc::new(config);

    init_logs(&args, &config).context("Cannot initialize logs")?;

    let store = RecordStore::from_config(&config);
    store.initialize().await.with_context(|| {
        format!(
            "Cannot initialize the record store at '{}'",
            store.path().display()
        )
    })?;

    if args.init_only {
        return Ok(());
    }

    let listener = socket_bind_anyhow(config.server.addr)?;
    let relay = std::sync::Arc::new(SmtpRelay::new(&config));

    Server::new(config, std::sync::Arc::new(store), relay)
        .listen(listener)
        .await
}
