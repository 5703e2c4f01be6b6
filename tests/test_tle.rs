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

use std::time::Duration;
use chrono::{TimeZone,Utc};
use reqwest::Client;
use whatsup::tle::{
    cache_filename, filter_by_name, merge_group_requests, parse_tle_entries,
    CelesTrakSource, GroupRequest, TleSource, TLE_FNAME_RE
};

/* #region test-data *************************************************************/

const GROUP_RESPONSE: &'static str = "\
ISS (ZARYA)
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
NOAA 21
1 54234U 22150A   25076.92835707  .00000366  00000-0  19403-3 0  9994
2 54234  98.7204  17.0432 0002710  72.7407 287.4066 14.19556514121811
";

const TWO_LINE_RESPONSE: &'static str = "\
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
";

const NOISY_RESPONSE: &'static str = "\
this line is not a TLE

NOAA 21
1 54234U 22150A   25076.57593612  .00000324  00000-0  17437-3 0  9990
2 54234  98.7204  16.6962 0002723  73.3399 286.8075 14.19555996121765
trailing garbage
";

/* #endregion test-data */

#[test]
fn test_parse_group_response () {
    let tles = parse_tle_entries( GROUP_RESPONSE);
    assert_eq!( tles.len(), 2);

    assert_eq!( tles[0].name.trim(), "ISS (ZARYA)");
    assert_eq!( tles[0].sat_num, 25544);

    assert_eq!( tles[1].name.trim(), "NOAA 21");
    assert_eq!( tles[1].sat_num, 54234);
}

#[test]
fn test_parse_two_line_response () {
    let tles = parse_tle_entries( TWO_LINE_RESPONSE);
    assert_eq!( tles.len(), 1);
    assert_eq!( tles[0].sat_num, 25544);
}

#[test]
fn test_parse_skips_garbage () {
    let tles = parse_tle_entries( NOISY_RESPONSE);
    assert_eq!( tles.len(), 1);
    assert_eq!( tles[0].sat_num, 54234);
}

#[test]
fn test_parse_empty () {
    assert!( parse_tle_entries( "").is_empty());
    assert!( parse_tle_entries( "nothing to see here\n").is_empty());
}

#[test]
fn test_filter_by_name () {
    let tles = parse_tle_entries( GROUP_RESPONSE);
    let filtered = filter_by_name( tles, "ISS (ZARYA)");
    assert_eq!( filtered.len(), 1);
    assert_eq!( filtered[0].sat_num, 25544);

    let tles = parse_tle_entries( GROUP_RESPONSE);
    assert!( filter_by_name( tles, "NO SUCH SATELLITE").is_empty());
}

#[test]
fn test_cache_filename_roundtrip () {
    let t = Utc.with_ymd_and_hms( 2025, 3, 13, 18, 10, 0).unwrap();
    let fname = cache_filename( "starlink", t);
    assert_eq!( fname, "starlink_2025-03-13_1810.tle");

    let cap = TLE_FNAME_RE.captures( &fname).unwrap();
    assert_eq!( &cap[1], "starlink");
    assert_eq!( &cap[2], "2025");
    assert_eq!( &cap[3], "03");
    assert_eq!( &cap[4], "13");
    assert_eq!( &cap[5], "1810");
}

#[test]
fn test_fname_re_rejects_other_files () {
    assert!( TLE_FNAME_RE.captures( "starlink.tle").is_none());
    assert!( TLE_FNAME_RE.captures( "notes.txt").is_none());
}

// the unroutable base URL guarantees these tests never leave the machine

#[tokio::test]
async fn test_cache_hit_avoids_network () {
    let dir = std::env::temp_dir().join( "whatsup_test_cache_hit");
    std::fs::create_dir_all( &dir).unwrap();
    std::fs::write( dir.join( cache_filename( "testgroup", Utc::now())), GROUP_RESPONSE).unwrap();

    let source = CelesTrakSource::new( "testgroup", "http://127.0.0.1:9/gp.php", Some(dir.clone()), Duration::from_secs( 3600), Client::new());
    let tles = source.fetch().await.unwrap();
    assert_eq!( tles.len(), 2);

    std::fs::remove_dir_all( &dir).unwrap();
}

/// serve one canned HTTP response on an ephemeral loopback port and return the endpoint URL
async fn serve_once (body: &'static str) -> String {
    use tokio::io::{AsyncReadExt,AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind( "127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn( async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = stream.read( &mut buf).await;
        let response = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}", body.len(), body);
        let _ = stream.write_all( response.as_bytes()).await;
    });

    format!("http://{addr}/gp.php")
}

#[tokio::test]
async fn test_cache_write_failure_is_not_fatal () {
    // a plain file in the cache dir path makes every cache write fail
    let blocker = std::env::temp_dir().join( "whatsup_test_cache_blocker");
    std::fs::write( &blocker, "x").unwrap();
    let cache_dir = blocker.join( "cache");

    let url = serve_once( GROUP_RESPONSE).await;
    let source = CelesTrakSource::new( "testgroup", &url, Some(cache_dir), Duration::from_secs( 3600), Client::new());
    let tles = source.fetch().await.unwrap(); // download still usable without the cache
    assert_eq!( tles.len(), 2);

    std::fs::remove_file( &blocker).unwrap();
}

#[test]
fn test_merge_group_requests () {
    // an explicit full "stations" request widens an ISS-only one
    let merged = merge_group_requests( vec![
        GroupRequest::new( "stations", true),
        GroupRequest::new( "stations", false),
        GroupRequest::new( "oneweb", false),
    ], &[], false);
    assert_eq!( merged.len(), 2);
    assert_eq!( merged[0], GroupRequest::new( "stations", false));
    assert_eq!( merged[1], GroupRequest::new( "oneweb", false));

    // an ISS-only request stays narrowed on its own
    let merged = merge_group_requests( vec![ GroupRequest::new( "stations", true)], &[], false);
    assert_eq!( merged, vec![ GroupRequest::new( "stations", true)]);

    // config defaults only apply when nothing was requested and no local files are given
    let defaults = vec![ "weather".to_string()];
    let merged = merge_group_requests( Vec::new(), &defaults, false);
    assert_eq!( merged, vec![ GroupRequest::new( "weather", false)]);
    assert!( merge_group_requests( Vec::new(), &defaults, true).is_empty());
}

#[tokio::test]
async fn test_stale_cache_forces_refetch () {
    let dir = std::env::temp_dir().join( "whatsup_test_cache_stale");
    std::fs::create_dir_all( &dir).unwrap();
    let t = Utc::now() - chrono::Duration::hours(10);
    std::fs::write( dir.join( cache_filename( "testgroup", t)), GROUP_RESPONSE).unwrap();

    let source = CelesTrakSource::new( "testgroup", "http://127.0.0.1:9/gp.php", Some(dir.clone()), Duration::from_secs( 6 * 3600), Client::new());
    assert!( source.fetch().await.is_err()); // past the age cutoff the cache is ignored and the download fails

    std::fs::remove_dir_all( &dir).unwrap();
}
