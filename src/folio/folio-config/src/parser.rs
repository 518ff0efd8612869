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

use crate::Config;
use anyhow::Context;

impl Config {
    /// Parse a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// * the document is not valid JSON
    /// * a field is missing or has the wrong type, the error names its path
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(input);
        serde_path_to_error::deserialize(deserializer).map_err(|error| {
            let path = error.path().to_string();
            anyhow::anyhow!(error.into_inner()).context(format!("at '{path}'"))
        })
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// * the file cannot be read
    /// * see [`Config::from_json`]
    pub fn from_json_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration file '{}'", path.display()))?;

        let mut config = Self::from_json(&input)
            .with_context(|| format!("invalid configuration file '{}'", path.display()))?;
        config.path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Configuration loaded.");

        Ok(config)
    }
}
