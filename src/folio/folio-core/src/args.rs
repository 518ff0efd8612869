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

/// Command line of the website.
#[derive(Debug, Default, clap::Parser, PartialEq, Eq)]
#[clap(about, version, author)]
pub struct Args {
    /// Path of the configuration file (json format),
    /// the environment is read when omitted.
    #[clap(short, long, action)]
    pub config: Option<std::path::PathBuf>,

    /// Also write the logs to stdout.
    #[clap(long, action)]
    pub stdout: bool,

    /// Create the record store, then stop.
    #[clap(long, action)]
    pub init_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_arg() {
        assert_eq!(Args::try_parse_from([""]).unwrap(), Args::default());

        assert_eq!(
            Args::try_parse_from(["", "-c", "path"]).unwrap(),
            Args {
                config: Some("path".into()),
                ..Args::default()
            }
        );

        assert_eq!(
            Args::try_parse_from(["", "--config", "path", "--stdout"]).unwrap(),
            Args {
                config: Some("path".into()),
                stdout: true,
                init_only: false,
            }
        );

        assert_eq!(
            Args::try_parse_from(["", "--init-only"]).unwrap(),
            Args {
                init_only: true,
                ..Args::default()
            }
        );

        assert!(Args::try_parse_from(["", "--foo"]).is_err());
    }
}
