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

/// geodetic coordinates and topocentric look angles.
/// Cartographic is an internal radians-based format to efficiently interface with unit-less
/// 3rd party libraries (satkit works in meters/ECEF), Cartesian3 covers the few vector ops
/// we need on ECEF points without committing to a linear algebra crate in the public API.

use std::fmt;
use std::ops::{Add,Sub};
use serde::{Serialize,Deserialize};

/* #region geodetic constants ***************************************************************************/

/// WGS84 semi major axis in meters
pub const EQUATORIAL_EARTH_RADIUS: f64 = 6378137.0;

/// WGS84 semi minor axis in meters
pub const POLAR_EARTH_RADIUS: f64 = 6356752.3142;

pub const EARTH_RADIUS_RATIO: f64 = POLAR_EARTH_RADIUS / EQUATORIAL_EARTH_RADIUS; // b / a

/// b²/a² - squared ratio of minor/major axis
pub const EARTH_RADIUS_RATIO_SQUARED: f64 = EARTH_RADIUS_RATIO * EARTH_RADIUS_RATIO;

/// first eccentricity of earth
pub const E_EARTH: f64 = 0.08181919092890692; // (1.0 - b²/a²).sqrt() - f64::sqrt() not const
pub const E_EARTH_SQUARED: f64 = E_EARTH * E_EARTH;

/* #endregion geodetic constants */

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/* #region Cartographic *********************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Cartographic {
    pub longitude: f64, // radians
    pub latitude: f64,  // radians
    pub height: f64     // meters above ellipsoid
}

impl Cartographic {
    pub fn new (longitude: f64, latitude: f64, height: f64)->Self {
        Cartographic { longitude, latitude, height }
    }

    pub fn from_degrees (lon: f64, lat: f64, height: f64)->Self {
        Cartographic::new( lon.to_radians(), lat.to_radians(), height)
    }

    pub fn longitude_deg (&self)->f64 { self.longitude.to_degrees() }
    pub fn latitude_deg (&self)->f64 { self.latitude.to_degrees() }
}

impl fmt::Display for Cartographic {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ longitude: {:.4}, latitude: {:.4}, height: {:.0} }}",
            self.longitude.to_degrees(), self.latitude.to_degrees(), self.height)
    }
}

/* #endregion Cartographic */

/* #region Cartesian3 ***********************************************************************************/

/// a cartesian ECEF point/vector in meters
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    pub fn zero ()->Cartesian3 {
        Cartesian3{ x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn dot (&self, p: &Cartesian3) -> f64 {
        (self.x * p.x) + (self.y * p.y) + (self.z * p.z)
    }

    pub fn length (&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z)).sqrt()
    }

    pub fn is_finite (&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for &Cartesian3 {
    type Output = Cartesian3;
    fn add (self, p: &Cartesian3)->Cartesian3 { Cartesian3::new( self.x + p.x, self.y + p.y, self.z + p.z) }
}

impl Sub for &Cartesian3 {
    type Output = Cartesian3;
    fn sub (self, p: &Cartesian3)->Cartesian3 { Cartesian3::new( self.x - p.x, self.y - p.y, self.z - p.z) }
}

impl From<&Cartographic> for Cartesian3 {
    /// geodetic to ECEF conversion on the WGS84 ellipsoid
    fn from (p: &Cartographic) -> Self {
        let φ = p.latitude;
        let λ = p.longitude;
        let h = p.height;

        let sin_φ = φ.sin();
        let cos_φ = φ.cos();

        let b = EQUATORIAL_EARTH_RADIUS / (1.0 - E_EARTH_SQUARED * (sin_φ * sin_φ)).sqrt();
        let c = (b + h) * cos_φ;

        let x = c * λ.cos();
        let y = c * λ.sin();
        let z = (EARTH_RADIUS_RATIO_SQUARED * b + h) * sin_φ;

        Cartesian3::new( x, y, z)
    }
}

/* #endregion Cartesian3 */

/* #region look angles **********************************************************************************/

/// topocentric direction from an observer to a satellite
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct LookAngle {
    pub elevation_deg: f64, // angle above local horizon [-90..90]
    pub azimuth_deg: f64,   // compass bearing [0..360)
    pub range: f64          // slant range in meters
}

impl fmt::Display for LookAngle {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookAngle( el: {:.1}, az: {:.1}, range: {:.0} m)", self.elevation_deg, self.azimuth_deg, self.range)
    }
}

/// compute elevation/azimuth/range from an observer to a satellite, both in ECEF.
/// the range vector is decomposed into East-North-Up components at the observer,
/// elevation is the angle above the horizontal plane, azimuth the bearing from north
pub fn look_angle (observer: &Cartographic, observer_ecef: &Cartesian3, sat_ecef: &Cartesian3) -> LookAngle {
    let d = sat_ecef - observer_ecef;

    let sin_lat = observer.latitude.sin();
    let cos_lat = observer.latitude.cos();
    let sin_lon = observer.longitude.sin();
    let cos_lon = observer.longitude.cos();

    let east  = -sin_lon * d.x           + cos_lon * d.y;
    let north = -sin_lat * cos_lon * d.x - sin_lat * sin_lon * d.y + cos_lat * d.z;
    let up    =  cos_lat * cos_lon * d.x + cos_lat * sin_lon * d.y + sin_lat * d.z;

    let range_horiz = (east * east + north * north).sqrt();
    let elevation_deg = up.atan2( range_horiz).to_degrees();
    let azimuth_deg = normalize_360( east.atan2( north).to_degrees());

    LookAngle { elevation_deg, azimuth_deg, range: d.length() }
}

/* #endregion look angles */
