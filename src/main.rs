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

use std::path::PathBuf;
use anyhow::{anyhow,Result};
use chrono_tz::Tz;
use clap::Parser;
use reqwest::Client;
use satkit::{Duration,Instant,TLE};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use whatsup::{
    config::{load_config, WhatsupConfig},
    geocode::{resolve_site, GroundSite},
    report::{plot_elevation, print_table, ColorThresholds},
    tle::{filter_by_name, merge_group_requests, CelesTrakSource, GroupRequest, TleFileSource, TleSource},
    visibility::CoverageCalculator,
};

const ISS_NAME: &str = "ISS (ZARYA)";

#[derive(Parser,Debug)]
#[command(about="show which satellites are visible from a ground location over a future time window")]
struct Args {
    /// time window in hours
    #[arg(default_value_t=12.0)]
    hours: f64,

    /// sample interval in minutes
    #[arg(default_value_t=15.0)]
    minutes: f64,

    /// city name, or "lat,lon" in decimal degrees
    #[arg(default_value="Seattle, WA")]
    place: String,

    /// include the oneweb constellation
    #[arg(long)]
    oneweb: bool,

    /// include the starlink constellation
    #[arg(long)]
    starlink: bool,

    /// include the ISS
    #[arg(long)]
    iss: bool,

    /// additional celestrak group to include (can be given multiple times)
    #[arg(long)]
    group: Vec<String>,

    /// local file with 2-line/3-line element sets (can be given multiple times)
    #[arg(long)]
    tle_file: Vec<PathBuf>,

    /// observer latitude in degrees (requires --lon, skips geocoding)
    #[arg(long, requires="lon", allow_hyphen_values=true)]
    lat: Option<f64>,

    /// observer longitude in degrees (requires --lat, skips geocoding)
    #[arg(long, requires="lat", allow_hyphen_values=true)]
    lon: Option<f64>,

    /// show UTC time instead of local time
    #[arg(long)]
    utc: bool,

    /// IANA timezone name to use for display (overrides the resolved one)
    #[arg(long, conflicts_with="utc")]
    tz: Option<String>,

    /// elevation below which rows are colored red (degrees)
    #[arg(long)]
    yellow_elevation: Option<f64>,

    /// elevation at/above which rows are colored green (degrees)
    #[arg(long)]
    green_elevation: Option<f64>,

    /// minimum elevation for a satellite to count as visible (degrees)
    #[arg(long, allow_hyphen_values=true)]
    min_elevation: Option<f64>,

    /// print a terminal plot of the best elevation after the table
    #[arg(long)]
    plot: bool,

    /// directory for cached TLE downloads
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// pathname of an optional RON run configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// the celestrak groups to load, either from explicit flags or from the config defaults.
    /// `--iss` contributes an ISS-only "stations" request, which an explicit `--group stations` widens
    fn group_requests (&self, config: &WhatsupConfig) -> Vec<GroupRequest> {
        let mut requests: Vec<GroupRequest> = Vec::new();
        if self.oneweb { requests.push( GroupRequest::new( "oneweb", false)) }
        if self.starlink { requests.push( GroupRequest::new( "starlink", false)) }
        if self.iss { requests.push( GroupRequest::new( "stations", true)) }
        for g in &self.group { requests.push( GroupRequest::new( g, false)) }

        merge_group_requests( requests, &config.groups, !self.tle_file.is_empty())
    }
}

#[tokio::main]
async fn main () -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let args = Args::parse();

    let mut config = if let Some(path) = &args.config { load_config(path)? } else { WhatsupConfig::default() };
    if let Some(dir) = &args.cache_dir { config.cache_dir = Some(dir.clone()) }

    let client = Client::builder()
        .user_agent( concat!("whatsup/", env!("CARGO_PKG_VERSION")))
        .timeout( config.request_timeout)
        .build()?;

    let site = get_site( &args, &client).await?;
    let display_tz = get_display_tz( &args, &site)?;

    let satellites = load_satellites( &args, &config, &client).await?;
    if satellites.is_empty() {
        warn!("no satellites loaded (use --starlink, --oneweb, --iss, --group or --tle-file) - the table will be empty");
    }

    let thresholds = ColorThresholds {
        yellow: args.yellow_elevation.unwrap_or( config.yellow_elevation),
        green: args.green_elevation.unwrap_or( config.green_elevation),
    };
    let min_elevation = args.min_elevation.unwrap_or( config.min_elevation);

    let calc = CoverageCalculator::new( site, satellites, min_elevation);
    let samples = calc.compute(
        Instant::now(),
        Duration::from_seconds( args.hours * 3600.0),
        Duration::from_seconds( args.minutes * 60.0)
    )?;

    print_table( &samples, &display_tz, &thresholds);
    if args.plot {
        println!("\n{}", plot_elevation( &samples, &display_tz));
    }

    Ok(())
}

async fn get_site (args: &Args, client: &Client) -> Result<GroundSite> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        Ok( GroundSite::from_lat_lon( lat, lon))
    } else {
        Ok( resolve_site( &args.place, client).await?)
    }
}

fn get_display_tz (args: &Args, site: &GroundSite) -> Result<Option<Tz>> {
    if args.utc {
        Ok(None)
    } else if let Some(name) = &args.tz {
        let tz: Tz = name.parse().map_err( |_| anyhow!("unknown timezone '{name}'"))?;
        Ok( Some(tz))
    } else {
        Ok( site.timezone)
    }
}

async fn load_satellites (args: &Args, config: &WhatsupConfig, client: &Client) -> Result<Vec<TLE>> {
    let mut satellites: Vec<TLE> = Vec::new();

    for req in args.group_requests(config) {
        let source = CelesTrakSource::new( &req.group, &config.catalog_url, config.cache_dir.clone(), config.max_cache_age, client.clone());
        let mut tles = source.fetch().await?;
        if req.iss_only {
            tles = filter_by_name( tles, ISS_NAME);
        }
        satellites.append( &mut tles);
    }

    for path in &args.tle_file {
        let source = TleFileSource::new(path);
        satellites.append( &mut source.fetch().await?);
    }

    Ok(satellites)
}
