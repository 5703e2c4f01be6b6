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

use whatsup::geo::{
    look_angle, normalize_360, Cartesian3, Cartographic,
    EQUATORIAL_EARTH_RADIUS, POLAR_EARTH_RADIUS
};

#[test]
fn test_normalize () {
    assert_eq!( normalize_360( -90.0), 270.0);
    assert_eq!( normalize_360( 370.0), 10.0);
    assert_eq!( normalize_360( 0.0), 0.0);
}

#[test]
fn test_ecef_equator () {
    let p = Cartographic::from_degrees( 0.0, 0.0, 0.0);
    let ecef = Cartesian3::from( &p);

    assert!( (ecef.x - EQUATORIAL_EARTH_RADIUS).abs() < 1e-6);
    assert!( ecef.y.abs() < 1e-6);
    assert!( ecef.z.abs() < 1e-6);
}

#[test]
fn test_ecef_pole () {
    let p = Cartographic::from_degrees( 0.0, 90.0, 0.0);
    let ecef = Cartesian3::from( &p);

    assert!( (ecef.x).abs() < 1e-3);
    assert!( (ecef.z - POLAR_EARTH_RADIUS).abs() < 1e-3);
}

#[test]
fn test_look_angle_zenith () {
    // a point at the same geodetic position but 550 km up is along the local normal
    let site = Cartographic::from_degrees( -122.33, 47.61, 0.0);
    let site_ecef = Cartesian3::from( &site);
    let sat = Cartesian3::from( &Cartographic::from_degrees( -122.33, 47.61, 550000.0));

    let la = look_angle( &site, &site_ecef, &sat);
    assert!( (la.elevation_deg - 90.0).abs() < 1e-6);
    assert!( (la.range - 550000.0).abs() < 1.0);
}

#[test]
fn test_look_angle_north () {
    // from the equator a surface point due north is below the horizon, bearing 0
    let site = Cartographic::from_degrees( 0.0, 0.0, 0.0);
    let site_ecef = Cartesian3::from( &site);
    let target = Cartesian3::from( &Cartographic::from_degrees( 0.0, 1.0, 0.0));

    let la = look_angle( &site, &site_ecef, &target);
    assert!( la.azimuth_deg.abs() < 1e-6 || (la.azimuth_deg - 360.0).abs() < 1e-6);
    assert!( la.elevation_deg < 0.0);
}

#[test]
fn test_look_angle_east () {
    let site = Cartographic::from_degrees( 0.0, 0.0, 0.0);
    let site_ecef = Cartesian3::from( &site);
    let target = Cartesian3::from( &Cartographic::from_degrees( 1.0, 0.0, 0.0));

    let la = look_angle( &site, &site_ecef, &target);
    assert!( (la.azimuth_deg - 90.0).abs() < 1e-6);
    assert!( la.elevation_deg < 0.0);
}

#[test]
fn test_cartesian_ops () {
    let a = Cartesian3::new( 3.0, 0.0, 4.0);
    let b = Cartesian3::new( 1.0, 0.0, 4.0);

    assert_eq!( a.length(), 5.0);
    let d = &a - &b;
    assert_eq!( d.x, 2.0);
    assert_eq!( d.z, 0.0);
    assert_eq!( a.dot(&b), 19.0);

    assert!( a.is_finite());
    assert!( !Cartesian3::new( f64::NAN, 0.0, 0.0).is_finite());
}
