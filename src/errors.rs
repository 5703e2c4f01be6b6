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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WhatsupError>;

#[derive(Error,Debug)]
pub enum WhatsupError {

   #[error("TLE error {0}")]
   TleError( String ),

   #[error("geocoding error {0}")]
   GeocodeError( String ),

   #[error("config error {0}")]
   ConfigError( String ),

   #[error("IO error {0}")]
   IOError( #[from] std::io::Error),

   #[error("http error {0}")]
   HttpError( #[from] reqwest::Error),

   #[error("operation failed {0}")]
   OpFailedError(String),
}

macro_rules! tle_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        WhatsupError::TleError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use tle_error;

macro_rules! geocode_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        WhatsupError::GeocodeError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use geocode_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        WhatsupError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
