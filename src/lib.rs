/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! whatsup - report which satellites are visible (above a minimum elevation) from a
//! ground location over a future time window.
//!
//! The pipeline is: resolve the observer location (geocoding or literal coordinates),
//! fetch TLEs for the selected celestrak groups, propagate all satellites over an
//! evenly spaced time grid with SGP4 and keep the highest-elevation satellite per step,
//! then print a color-coded table and an optional terminal plot.

use chrono::{DateTime,TimeZone,Utc};
use satkit::Instant;

pub mod errors;
pub mod config;
pub mod geo;
pub mod geocode;
pub mod tle;
pub mod visibility;
pub mod report;

//--- general utility functions

pub fn instant_from_datetime<Z> (dt: DateTime<Z>) -> Instant where Z: TimeZone {
    Instant::from_unixtime( dt.timestamp_millis() as f64 / 1000.0)
}

pub fn datetime_from_instant (t: &Instant) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis( (t.as_unixtime() * 1000.0).round() as i64).unwrap_or( DateTime::<Utc>::UNIX_EPOCH)
}
