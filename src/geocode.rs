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

/// resolving observer locations from city names or literal coordinates

use std::sync::LazyLock;
use chrono_tz::Tz;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info,warn};
use tzf_rs::DefaultFinder;
use crate::errors::{geocode_error, Result, WhatsupError};
use crate::geo::{Cartesian3, Cartographic};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// regex to recognize literal "lat,lon" location specs in decimal degrees
pub static LATLON_RE: LazyLock<Regex> = LazyLock::new(||
    Regex::new( r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$").unwrap()
);

static TZ_FINDER: LazyLock<DefaultFinder> = LazyLock::new(|| DefaultFinder::new());

/// the resolved observer location: geodetic position plus (optional) local timezone
#[derive(Debug,Clone)]
pub struct GroundSite {
    pub name: String,
    pub position: Cartographic,
    pub timezone: Option<Tz>,
}

impl GroundSite {
    pub fn from_lat_lon (lat_deg: f64, lon_deg: f64) -> Self {
        let name = format!("{:.4},{:.4}", lat_deg, lon_deg);
        let position = Cartographic::from_degrees( lon_deg, lat_deg, 0.0);
        let timezone = find_timezone( lat_deg, lon_deg);

        GroundSite { name, position, timezone }
    }

    pub fn ecef (&self) -> Cartesian3 {
        Cartesian3::from( &self.position)
    }
}

/// the parts of a Nominatim search hit we care about
#[derive(Deserialize,Debug)]
pub struct NominatimPlace {
    pub lat: String,  // Nominatim serializes coordinates as strings
    pub lon: String,
    pub display_name: String,
}

/// resolve a location spec into a GroundSite. A spec that parses as "lat,lon"
/// (decimal degrees) is used literally, everything else is geocoded
pub async fn resolve_site (spec: &str, client: &Client) -> Result<GroundSite> {
    if let Some((lat, lon)) = parse_lat_lon( spec) {
        Ok( GroundSite::from_lat_lon( lat, lon))
    } else {
        geocode( spec, client).await
    }
}

pub fn parse_lat_lon (spec: &str) -> Option<(f64,f64)> {
    let cap = LATLON_RE.captures(spec)?;
    let lat: f64 = cap[1].parse().ok()?;
    let lon: f64 = cap[2].parse().ok()?;

    if lat.abs() <= 90.0 && lon.abs() <= 180.0 { Some((lat,lon)) } else { None }
}

async fn geocode (city: &str, client: &Client) -> Result<GroundSite> {
    let response = client
        .get( NOMINATIM_URL)
        .query( &[("q", city), ("format", "json"), ("limit", "1")])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err( geocode_error!("geocoding query for '{city}' failed: {}", response.status()))
    }

    let places: Vec<NominatimPlace> = response.json().await?;
    let place = places.first().ok_or( geocode_error!("no geocoding result for '{city}'"))?;

    let lat: f64 = place.lat.parse().map_err(|_| geocode_error!("invalid latitude '{}'", place.lat))?;
    let lon: f64 = place.lon.parse().map_err(|_| geocode_error!("invalid longitude '{}'", place.lon))?;
    info!("resolved '{city}' to {lat:.4},{lon:.4} ({})", place.display_name);

    let position = Cartographic::from_degrees( lon, lat, 0.0);
    let timezone = find_timezone( lat, lon);

    Ok( GroundSite { name: city.to_string(), position, timezone })
}

/// offline lat/lon to IANA timezone lookup. Falls back to None (i.e. UTC display) if
/// the polygon lookup comes up empty or yields a name chrono-tz does not know
pub fn find_timezone (lat_deg: f64, lon_deg: f64) -> Option<Tz> {
    let name = TZ_FINDER.get_tz_name( lon_deg, lat_deg);
    if name.is_empty() {
        warn!("no timezone found for {lat_deg:.4},{lon_deg:.4}, using UTC");
        return None
    }

    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            warn!("unknown timezone '{name}', using UTC");
            None
        }
    }
}
