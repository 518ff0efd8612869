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

//! folio test suite: fixtures shared by the integration tests.

#![doc(html_no_source)]
#![forbid(unsafe_code)]
//
#![warn(rust_2018_idioms)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod relay;
pub mod store;

#[cfg(test)]
mod tests;
