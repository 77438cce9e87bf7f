/*
    orbital-states, spacecraft state representation conversions
    Copyright (C) 2026 the orbital-states authors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::errors::StateError;
use crate::keplerian::CartesianState;
use crate::linalg::{Matrix3, Vector6};
use crate::utils::acos_clamped;
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Both spherical representations are undefined below this position or
/// velocity magnitude, in km or km/s.
pub const SPHERICAL_MAG_TOL: f64 = 1e-10;

/// The spherical representation whose velocity is expressed as a magnitude,
/// right ascension of velocity, and declination of velocity.
/// Magnitudes in km and km/s, angles in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalRaDecState {
    pub rmag_km: f64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub vmag_km_s: f64,
    pub ra_vel_deg: f64,
    pub dec_vel_deg: f64,
}

impl SphericalRaDecState {
    pub fn new(
        rmag_km: f64,
        ra_deg: f64,
        dec_deg: f64,
        vmag_km_s: f64,
        ra_vel_deg: f64,
        dec_vel_deg: f64,
    ) -> Self {
        Self {
            rmag_km,
            ra_deg,
            dec_deg,
            vmag_km_s,
            ra_vel_deg,
            dec_vel_deg,
        }
    }

    /// Returns this state as a Vector6 [rmag, ra, dec, vmag, raV, decV]
    pub fn to_vec(self) -> Vector6<f64> {
        Vector6::new(
            self.rmag_km,
            self.ra_deg,
            self.dec_deg,
            self.vmag_km_s,
            self.ra_vel_deg,
            self.dec_vel_deg,
        )
    }
}

impl fmt::Display for SphericalRaDecState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "rmag = {:.*} km, ra = {:.*} deg, dec = {:.*} deg, vmag = {:.*} km/s, raV = {:.*} deg, decV = {:.*} deg",
            decimals,
            self.rmag_km,
            decimals,
            self.ra_deg,
            decimals,
            self.dec_deg,
            decimals,
            self.vmag_km_s,
            decimals,
            self.ra_vel_deg,
            decimals,
            self.dec_vel_deg
        )
    }
}

/// The spherical representation whose velocity is expressed as a magnitude,
/// flight path azimuth, and vertical flight path angle.
/// Magnitudes in km and km/s, angles in degrees.
///
/// The azimuth precedes the flight path angle in the vector form, matching
/// the historical element ordering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalAzFpaState {
    pub rmag_km: f64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub vmag_km_s: f64,
    pub azimuth_deg: f64,
    pub fpa_deg: f64,
}

impl SphericalAzFpaState {
    pub fn new(
        rmag_km: f64,
        ra_deg: f64,
        dec_deg: f64,
        vmag_km_s: f64,
        azimuth_deg: f64,
        fpa_deg: f64,
    ) -> Self {
        Self {
            rmag_km,
            ra_deg,
            dec_deg,
            vmag_km_s,
            azimuth_deg,
            fpa_deg,
        }
    }

    /// Returns this state as a Vector6 [rmag, ra, dec, vmag, azimuth, fpa]
    pub fn to_vec(self) -> Vector6<f64> {
        Vector6::new(
            self.rmag_km,
            self.ra_deg,
            self.dec_deg,
            self.vmag_km_s,
            self.azimuth_deg,
            self.fpa_deg,
        )
    }
}

impl fmt::Display for SphericalAzFpaState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "rmag = {:.*} km, ra = {:.*} deg, dec = {:.*} deg, vmag = {:.*} km/s, azimuth = {:.*} deg, fpa = {:.*} deg",
            decimals,
            self.rmag_km,
            decimals,
            self.ra_deg,
            decimals,
            self.dec_deg,
            decimals,
            self.vmag_km_s,
            decimals,
            self.azimuth_deg,
            decimals,
            self.fpa_deg
        )
    }
}

fn check_magnitudes(rmag: f64, vmag: f64, target: &str) -> Result<(), StateError> {
    if rmag < SPHERICAL_MAG_TOL {
        return Err(StateError::InvalidInput {
            msg: format!("{target} elements are undefined because RMAG ({rmag}) is less than 1e-10"),
        });
    }
    if vmag < SPHERICAL_MAG_TOL {
        return Err(StateError::InvalidInput {
            msg: format!("{target} elements are undefined because VMAG ({vmag}) is less than 1e-10"),
        });
    }
    Ok(())
}

/// Converts a Cartesian state to the RA/DEC spherical representation.
pub fn cartesian_to_spherical_radec(
    cart: &CartesianState,
) -> Result<SphericalRaDecState, StateError> {
    let pos = cart.radius();
    let vel = cart.velocity();
    let rmag = pos.norm();
    let vmag = vel.norm();
    check_magnitudes(rmag, vmag, "SphericalRADEC")?;

    let lambda = pos[1].atan2(pos[0]);
    let delta = (pos[2] / rmag).asin();
    let lambda_v = vel[1].atan2(vel[0]);
    let delta_v = (vel[2] / vmag).asin();

    Ok(SphericalRaDecState::new(
        rmag,
        lambda.to_degrees(),
        delta.to_degrees(),
        vmag,
        lambda_v.to_degrees(),
        delta_v.to_degrees(),
    ))
}

/// Converts the RA/DEC spherical representation to a Cartesian state.
pub fn spherical_radec_to_cartesian(sph: &SphericalRaDecState) -> CartesianState {
    let rmag = sph.rmag_km;
    let lambda = sph.ra_deg.to_radians();
    let delta = sph.dec_deg.to_radians();
    let vmag = sph.vmag_km_s;
    let lambda_v = sph.ra_vel_deg.to_radians();
    let delta_v = sph.dec_vel_deg.to_radians();

    let x = rmag * delta.cos() * lambda.cos();
    let y = rmag * delta.cos() * lambda.sin();
    let z = rmag * delta.sin();

    // vy is computed directly rather than as vx * tan(raV), which is
    // indeterminate when the velocity right ascension is +/- 90 deg
    let vx = vmag * delta_v.cos() * lambda_v.cos();
    let vy = vmag * delta_v.cos() * lambda_v.sin();
    let vz = vmag * delta_v.sin();

    CartesianState::new(x, y, z, vx, vy, vz)
}

/// Converts a Cartesian state to the AZ/FPA spherical representation.
///
/// The azimuth is measured in a local frame whose z axis points north, from
/// the projection of the velocity onto the local horizontal.
pub fn cartesian_to_spherical_azfpa(
    cart: &CartesianState,
) -> Result<SphericalAzFpaState, StateError> {
    let pos = cart.radius();
    let vel = cart.velocity();
    let rmag = pos.norm();
    let vmag = vel.norm();
    check_magnitudes(rmag, vmag, "SphericalAZFPA")?;

    let lambda = pos[1].atan2(pos[0]);
    let delta = (pos[2] / rmag).asin();

    // Vertical flight path angle, measured from the radial direction
    let psi = acos_clamped(pos.dot(&vel) / (rmag * vmag), 1e-10);

    // Rows of the rotation into the local frame: x up, z north
    let (sin_delta, cos_delta) = delta.sin_cos();
    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let r_li = Matrix3::new(
        cos_delta * cos_lambda,
        cos_delta * sin_lambda,
        sin_delta,
        (lambda + FRAC_PI_2).cos(),
        (lambda + FRAC_PI_2).sin(),
        0.0,
        -sin_delta * cos_lambda,
        -sin_delta * sin_lambda,
        cos_delta,
    );
    let v_local = r_li * vel;
    let alpha_f = v_local[1].atan2(v_local[2]);

    Ok(SphericalAzFpaState::new(
        rmag,
        lambda.to_degrees(),
        delta.to_degrees(),
        vmag,
        alpha_f.to_degrees(),
        psi.to_degrees(),
    ))
}

/// Converts the AZ/FPA spherical representation to a Cartesian state.
pub fn spherical_azfpa_to_cartesian(sph: &SphericalAzFpaState) -> CartesianState {
    let rmag = sph.rmag_km;
    let lambda = sph.ra_deg.to_radians();
    let delta = sph.dec_deg.to_radians();
    let vmag = sph.vmag_km_s;
    let alpha_f = sph.azimuth_deg.to_radians();
    let psi = sph.fpa_deg.to_radians();

    let (sin_delta, cos_delta) = delta.sin_cos();
    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let (sin_psi, cos_psi) = psi.sin_cos();
    let (sin_alpha_f, cos_alpha_f) = alpha_f.sin_cos();

    let x = rmag * cos_delta * cos_lambda;
    let y = rmag * cos_delta * sin_lambda;
    let z = rmag * sin_delta;

    let vx = vmag
        * (cos_psi * cos_delta * cos_lambda
            - sin_psi * (sin_alpha_f * sin_lambda + cos_alpha_f * sin_delta * cos_lambda));
    let vy = vmag
        * (cos_psi * cos_delta * sin_lambda
            + sin_psi * (sin_alpha_f * cos_lambda - cos_alpha_f * sin_delta * sin_lambda));
    let vz = vmag * (cos_psi * sin_delta + sin_psi * cos_alpha_f * cos_delta);

    CartesianState::new(x, y, z, vx, vy, vz)
}
