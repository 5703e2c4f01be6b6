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

use std::{path::{Path,PathBuf}, time::Duration};
use serde::Deserialize;
use crate::errors::{Result, WhatsupError};
use crate::tle::CELESTRAK_GP_URL;

/// run configuration, loadable from a RON file. All values have code defaults
/// and are overridable from the command line
#[derive(Deserialize,Debug)]
#[serde(default)]
pub struct WhatsupConfig {
    pub catalog_url: String,      // celestrak GP endpoint
    pub cache_dir: Option<PathBuf>,
    pub max_cache_age: Duration,  // refetch group elements older than this
    pub request_timeout: Duration,

    pub yellow_elevation: f64,    // below: red rows
    pub green_elevation: f64,     // at/above: green rows
    pub min_elevation: f64,       // visibility mask in degrees

    pub groups: Vec<String>,      // celestrak groups to load when none are given on the command line
}

impl Default for WhatsupConfig {
    fn default () -> Self {
        WhatsupConfig {
            catalog_url: CELESTRAK_GP_URL.to_string(),
            cache_dir: None,
            max_cache_age: Duration::from_secs( 6 * 3600),
            request_timeout: Duration::from_secs(20),
            yellow_elevation: 55.0,
            green_elevation: 70.0,
            min_elevation: 0.0,
            groups: Vec::new(),
        }
    }
}

pub fn load_config (path: impl AsRef<Path>) -> Result<WhatsupConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    ron::from_str(&text).map_err( |e| WhatsupError::ConfigError( format!("{}: {e}", path.display())))
}
