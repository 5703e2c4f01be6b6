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

/// obtaining GP data from celestrak

use std::{fs::{read_dir,File}, io::Write, path::{Path,PathBuf}, sync::LazyLock, time::Duration};
use async_trait::async_trait;
use chrono::{DateTime,TimeZone,Utc};
use regex::Regex;
use reqwest::Client;
use satkit::TLE;
use tracing::{debug,info,warn};
use crate::errors::{tle_error, Result, WhatsupError};

pub const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// regex to extract group name, year, month, day and hour from a cached TLE filename
/// e.g. starlink_2025-03-13_1810.tle
pub static TLE_FNAME_RE: LazyLock<Regex> = LazyLock::new(||
    Regex::new( r"([\w-]+)_(\d\d\d\d)-(\d\d)-(\d\d)_(\d\d\d\d)\.tle").unwrap()
);

/// a trait to obtain TLE sets from external sources
#[async_trait]
pub trait TleSource {
    /// get all TLEs this source provides. If none can be obtained return an error
    async fn fetch (&self) -> Result<Vec<TLE>>;

    fn name (&self) -> String;
}

/// a live TleSource that queries the celestrak GP endpoint for a named satellite group
/// (e.g. "starlink", "oneweb" or "stations") in 3-line element format.
/// Downloaded element sets are cached in a local directory so that repeated runs within
/// the cache age do not hit the network - group data is normally just updated a few times per day
pub struct CelesTrakSource {
    group: String,
    base_url: String,
    cache_dir: Option<PathBuf>,
    max_cache_age: Duration,
    client: Client,
}

impl CelesTrakSource {
    pub fn new (group: impl ToString, base_url: impl ToString, cache_dir: Option<PathBuf>, max_cache_age: Duration, client: Client) -> Self {
        CelesTrakSource {
            group: group.to_string(),
            base_url: base_url.to_string(),
            cache_dir, max_cache_age, client
        }
    }

    fn query_url (&self) -> String {
        format!("{}?GROUP={}&FORMAT=tle", self.base_url, self.group)
    }

    /// look for a cached element set of this group that makes the age cut-off.
    /// Returns the newest match, if any
    fn load_cached (&self) -> Option<String> {
        let dir = self.cache_dir.as_ref()?;
        if !dir.is_dir() { return None }

        let mut newest: Option<(DateTime<Utc>,PathBuf)> = None;
        for entry in read_dir(dir).ok()? {
            let entry = entry.ok()?;
            if let Some(fname) = entry.file_name().to_str() {
                if let Some(cap) = TLE_FNAME_RE.captures(fname) {
                    if &cap[1] == self.group.as_str() {
                        if let Some(t) = datetime_from_fname_caps( &cap) {
                            if newest.as_ref().map(|(tn,_)| t > *tn).unwrap_or(true) {
                                newest = Some( (t, entry.path()) );
                            }
                        }
                    }
                }
            }
        }

        let (t, path) = newest?;
        let age = (Utc::now() - t).num_seconds();
        if age >= 0 && (age as u64) < self.max_cache_age.as_secs() {
            debug!("using cached {} elements from {}", self.group, path.display());
            std::fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    fn store_cached (&self, text: &str) -> Result<()> {
        if let Some(dir) = &self.cache_dir {
            std::fs::create_dir_all(dir)?;
            let path = dir.join( cache_filename( &self.group, Utc::now()));
            let mut file = File::create(&path)?;
            file.write_all( text.as_bytes())?;
            debug!("cached {} elements in {}", self.group, path.display());
        }
        Ok(())
    }

    async fn download (&self) -> Result<String> {
        let url = self.query_url();
        info!("fetching TLEs for group '{}' from {url}", self.group);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err( tle_error!("error retrieving TLE data for group '{}': {}", self.group, response.status()))
        }

        let text = response.text().await?;
        if text.trim().is_empty() || text.contains("No GP data found") {
            return Err( tle_error!("no GP data for group '{}'", self.group))
        }
        Ok(text)
    }
}

#[async_trait]
impl TleSource for CelesTrakSource {
    async fn fetch (&self) -> Result<Vec<TLE>> {
        let text = match self.load_cached() {
            Some(text) => text,
            None => {
                let text = self.download().await?;
                if let Err(e) = self.store_cached(&text) { // the download is still good without a cache
                    warn!("could not cache {} elements: {e}", self.group);
                }
                text
            }
        };

        let tles = parse_tle_entries( &text);
        if tles.is_empty() {
            Err( tle_error!("response for group '{}' contained no usable TLEs", self.group))
        } else {
            info!("loaded {} satellites for group '{}'", tles.len(), self.group);
            Ok(tles)
        }
    }

    fn name (&self) -> String {
        format!("celestrak group '{}'", self.group)
    }
}

/// a TleSource reading a local file with 2-line or 3-line element sets, for
/// offline runs and tests
pub struct TleFileSource {
    path: PathBuf
}

impl TleFileSource {
    pub fn new (path: impl AsRef<Path>) -> Self {
        TleFileSource { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl TleSource for TleFileSource {
    async fn fetch (&self) -> Result<Vec<TLE>> {
        let text = std::fs::read_to_string(&self.path)?;
        let tles = parse_tle_entries( &text);
        if tles.is_empty() {
            Err( tle_error!("no usable TLEs in {}", self.path.display()))
        } else {
            Ok(tles)
        }
    }

    fn name (&self) -> String {
        format!("file {}", self.path.display())
    }
}

/* #region general helpers *******************************************************************************/

/// parse concatenated 2-line/3-line element sets as served by the celestrak GP endpoint.
/// A name line is optional, unparseable entries are skipped with a warning
pub fn parse_tle_entries (text: &str) -> Vec<TLE> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end()).collect();
    let mut tles: Vec<TLE> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.starts_with("1 ") && i+1 < lines.len() && lines[i+1].starts_with("2 ") {
            let res = if i > 0 && is_name_line( lines[i-1]) {
                TLE::load_3line( lines[i-1], line, lines[i+1])
            } else {
                TLE::load_2line( line, lines[i+1])
            };

            match res {
                Ok(tle) => tles.push(tle),
                Err(e) => warn!("skipping unparseable TLE entry at line {}: {:?}", i+1, e)
            }
            i += 2;
        } else {
            i += 1;
        }
    }

    tles
}

fn is_name_line (line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with("1 ") && !line.starts_with("2 ")
}

/// retain only the satellite with the given name (e.g. "ISS (ZARYA)" from the "stations" group)
pub fn filter_by_name (tles: Vec<TLE>, name: &str) -> Vec<TLE> {
    tles.into_iter().filter( |tle| tle.name.trim() == name).collect()
}

/// a request to load one celestrak group, optionally reduced to just the ISS entry
#[derive(Debug,Clone,PartialEq)]
pub struct GroupRequest {
    pub group: String,
    pub iss_only: bool,
}

impl GroupRequest {
    pub fn new (group: impl ToString, iss_only: bool) -> Self {
        GroupRequest { group: group.to_string(), iss_only }
    }
}

/// collapse duplicate group requests and fall back to the config defaults if nothing was
/// requested explicitly. An explicit full-group request wins over an ISS-only one for the
/// same group, so that `--iss` never narrows a group the user asked for by name
pub fn merge_group_requests (requests: Vec<GroupRequest>, config_defaults: &[String], have_files: bool) -> Vec<GroupRequest> {
    let requests = if requests.is_empty() && !have_files {
        config_defaults.iter().map( |g| GroupRequest::new( g, false)).collect()
    } else {
        requests
    };

    let mut merged: Vec<GroupRequest> = Vec::with_capacity( requests.len());
    for r in requests {
        if let Some(prev) = merged.iter_mut().find( |m| m.group == r.group) {
            prev.iss_only = prev.iss_only && r.iss_only;
        } else {
            merged.push(r);
        }
    }
    merged
}

pub fn cache_filename (group: &str, t: DateTime<Utc>) -> String {
    format!("{}_{}.tle", group, t.format("%Y-%m-%d_%H%M"))
}

fn datetime_from_fname_caps (cap: &regex::Captures) -> Option<DateTime<Utc>> {
    let year: i32 = cap[2].parse().ok()?;
    let month: u32 = cap[3].parse().ok()?;
    let day: u32 = cap[4].parse().ok()?;
    let hhmm: u32 = cap[5].parse().ok()?;

    Utc.with_ymd_and_hms( year, month, day, hhmm / 100, hhmm % 100, 0).single()
}

/* #endregion general helpers */
