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

/// console output: the color-coded coverage table and the terminal elevation plot

use chrono::{DateTime,Timelike,Utc};
use chrono_tz::Tz;
use crossterm::style::{Color,Stylize};
use rasciigraph::{plot,Config};
use satkit::Instant;
use crate::datetime_from_instant;
use crate::visibility::CoverageSample;

const TABLE_DATE_FMT: &str = "%Y-%m-%d %H:%M";

/// elevation thresholds (degrees) for the row background color
#[derive(Debug,Clone,Copy)]
pub struct ColorThresholds {
    pub yellow: f64, // below this: red
    pub green: f64,  // at/above this: green, in between: yellow
}

pub fn elevation_color (elevation_deg: f64, thresholds: &ColorThresholds) -> Color {
    if elevation_deg < thresholds.yellow { Color::DarkRed }
    else if elevation_deg < thresholds.green { Color::DarkYellow }
    else { Color::DarkGreen }
}

pub fn format_time (t: &Instant, tz: &Option<Tz>, fmt: &str) -> String {
    let dt = datetime_from_instant(t);
    match tz {
        Some(tz) => dt.with_timezone(tz).format(fmt).to_string(),
        None => dt.format(fmt).to_string()
    }
}

/// print the per-step coverage table: local time, best satellite, elevation and azimuth,
/// with the row background colored according to the elevation thresholds
pub fn print_table (samples: &[CoverageSample], tz: &Option<Tz>, thresholds: &ColorThresholds) {
    let header = format!("{:<16} {:>24} {:>15} {:>13}", "Time", "Satellite Name", "Elevation [deg]", "Azimuth [deg]");
    println!("{}", header.on(Color::DarkBlue));

    for sample in samples {
        let time = format_time( &sample.time, tz, TABLE_DATE_FMT);
        let row = match &sample.satellite {
            Some(name) => format!("{:<16} {:>24} {:>15.1} {:>13.0}", time, name, sample.elevation_deg, sample.azimuth_deg),
            None => format!("{:<16} {:>24} {:>15.1} {:>13}", time, "", 0.0, "")
        };
        println!("{}", row.on( elevation_color( sample.elevation_deg, thresholds)));
    }
}

/// local time of day as fractional hours, unwrapped so that a series crossing
/// midnight stays monotonic ([23.5, 0.25] becomes [23.5, 24.25])
pub fn fractional_hours (times: &[DateTime<Utc>], tz: &Option<Tz>) -> Vec<f64> {
    let mut hours: Vec<f64> = Vec::with_capacity( times.len());
    let mut offset = 0.0;
    let mut last = f64::NEG_INFINITY;

    for t in times {
        let h = match tz {
            Some(tz) => {
                let lt = t.with_timezone(tz);
                lt.hour() as f64 + lt.minute() as f64 / 60.0
            }
            None => t.hour() as f64 + t.minute() as f64 / 60.0
        };

        let mut h = h + offset;
        while h < last { // wrapped past midnight
            h += 24.0;
            offset += 24.0;
        }
        last = h;
        hours.push(h);
    }

    hours
}

/// render a terminal line plot of the best elevation over the scanned time window.
/// The x range is local time of day in fractional hours, unwrapped across midnight
pub fn plot_elevation (samples: &[CoverageSample], tz: &Option<Tz>) -> String {
    if samples.is_empty() { return String::new() }

    let series: Vec<f64> = samples.iter().map( |s| s.elevation_deg).collect();
    let times: Vec<DateTime<Utc>> = samples.iter().map( |s| datetime_from_instant( &s.time)).collect();
    let hours = fractional_hours( &times, tz);
    let tz_name = tz.as_ref().map( |tz| tz.to_string()).unwrap_or_else(|| "UTC".to_string());

    let caption = format!("elevation [deg] over local hour {:.2} .. {:.2} ({})", hours[0], hours[hours.len()-1], tz_name);
    plot( series, Config::default().with_height(12).with_caption(caption))
}
