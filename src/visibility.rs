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

/// propagating satellite sets over a time grid and reducing to the best-visible satellite per step

use std::fmt;
use satkit::{Duration, Instant, TLE, frametransform::qteme2itrf, sgp4::sgp4};
use tracing::debug;
use crate::errors::{op_failed, Result, WhatsupError};
use crate::geo::{look_angle, Cartesian3, LookAngle};
use crate::geocode::GroundSite;

/// per-instant scan result: the highest-elevation satellite at this time step.
/// `satellite` is None if nothing was above the elevation mask
#[derive(Debug,Clone)]
pub struct CoverageSample {
    pub time: Instant,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub satellite: Option<String>,
}

impl CoverageSample {
    fn empty (time: Instant) -> Self {
        CoverageSample { time, elevation_deg: 0.0, azimuth_deg: 0.0, satellite: None }
    }
}

impl fmt::Display for CoverageSample {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.satellite {
            Some(name) => write!(f, "CoverageSample( t:{}, sat:{}, el:{:.1}, az:{:.1})", self.time, name, self.elevation_deg, self.azimuth_deg),
            None => write!(f, "CoverageSample( t:{}, -)", self.time)
        }
    }
}

/// build a monotonic, evenly spaced time grid from `start` to `start + duration` (exclusive)
pub fn time_grid (start: Instant, duration: Duration, step: Duration) -> Vec<Instant> {
    let n = (duration.as_seconds() / step.as_seconds()).ceil().max(1.0) as usize;
    let mut t = start;

    let mut tv: Vec<Instant> = Vec::with_capacity(n);
    for _ in 0..n {
        tv.push(t);
        t += step;
    }

    tv
}

/// does `la` beat the satellite currently recorded in `current`?
pub fn is_better_candidate (current: &CoverageSample, la: &LookAngle, min_elevation_deg: f64) -> bool {
    la.elevation_deg >= min_elevation_deg
        && (current.satellite.is_none() || la.elevation_deg > current.elevation_deg)
}

/// the object that scans a satellite set over a time grid for the given ground site.
/// For each grid instant the satellite with the highest elevation at/above the mask is retained
pub struct CoverageCalculator {
    site: GroundSite,
    satellites: Vec<TLE>,
    min_elevation_deg: f64,
}

impl CoverageCalculator {
    pub fn new (site: GroundSite, satellites: Vec<TLE>, min_elevation_deg: f64) -> Self {
        CoverageCalculator { site, satellites, min_elevation_deg }
    }

    pub fn n_satellites (&self) -> usize {
        self.satellites.len()
    }

    /// propagate all satellites over the time grid and keep the best look angle per step.
    /// Satellites are propagated as a batch over the full grid, which is considerably faster
    /// than going step-by-step
    pub fn compute (&self, start: Instant, duration: Duration, step: Duration) -> Result<Vec<CoverageSample>> {
        if step.as_seconds() <= 0.0 {
            return Err( op_failed!("non-positive sample interval"))
        }
        if duration.as_seconds() <= 0.0 {
            return Err( op_failed!("non-positive time window"))
        }

        let tvec = time_grid( start, duration, step);
        let mut samples: Vec<CoverageSample> = tvec.iter().map( |t| CoverageSample::empty(*t)).collect();
        if self.satellites.is_empty() {
            return Ok(samples)
        }

        let site_pos = self.site.position;
        let site_ecef = self.site.ecef();

        // TEME->ITRF rotations only depend on the grid instant, not the satellite
        let rots: Vec<_> = tvec.iter().map( |t| qteme2itrf(t).to_rotation_matrix()).collect();

        for tle in &self.satellites {
            let mut tle = tle.clone(); // sgp4 mutates the TLE, which is why we need a copy
            let name = tle.name.trim().to_string();
            let (pteme, _vteme, _errs) = sgp4( &mut tle, &tvec);

            for i in 0..tvec.len() {
                let v = pteme.column(i);
                let itrf = rots[i] * v;
                let p = Cartesian3::new( itrf[0], itrf[1], itrf[2]);
                if !p.is_finite() { // propagation failed for this step (e.g. decayed object)
                    debug!("skipping {} at {} (no finite position)", name, tvec[i]);
                    continue;
                }

                let la = look_angle( &site_pos, &site_ecef, &p);
                if is_better_candidate( &samples[i], &la, self.min_elevation_deg) {
                    samples[i].elevation_deg = la.elevation_deg;
                    samples[i].azimuth_deg = la.azimuth_deg;
                    samples[i].satellite = Some( name.clone());
                }
            }
        }

        Ok(samples)
    }
}
