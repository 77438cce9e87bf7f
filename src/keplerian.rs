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

use crate::anomaly::{self, AnomalyType};
use crate::errors::StateError;
use crate::linalg::{Vector3, Vector6};
use crate::utils::{acos_clamped, between_0_360, between_pm_180};
use crate::{
    ECC_CIRCLE_TOL, INFINITE_RADIUS_TOL, MU_TOL, PARABOLIC_ECC_TOL, RETROGRADE_INC_TOL,
    SINGULAR_RP_TOL_KM,
};
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Tolerance on the cosine arguments of the angle extractions.
const COS_ARG_TOL: f64 = 1e-10;

/// Angular momenta below this magnitude (km^2/s) are treated as zero.
const ZERO_MOMENTUM_TOL: f64 = 1e-10;

/// A Cartesian position and velocity, in km and km/s.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianState {
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
    pub vx_km_s: f64,
    pub vy_km_s: f64,
    pub vz_km_s: f64,
}

impl CartesianState {
    pub fn new(x_km: f64, y_km: f64, z_km: f64, vx_km_s: f64, vy_km_s: f64, vz_km_s: f64) -> Self {
        Self {
            x_km,
            y_km,
            z_km,
            vx_km_s,
            vy_km_s,
            vz_km_s,
        }
    }

    /// Creates a new state from a 6 length vector [X, Y, Z, VX, VY, VZ]
    pub fn cartesian_vec(state: &Vector6<f64>) -> Self {
        Self::new(state[0], state[1], state[2], state[3], state[4], state[5])
    }

    /// Returns this state as a Cartesian Vector6 in [km, km, km, km/s, km/s, km/s]
    pub fn to_cartesian_vec(self) -> Vector6<f64> {
        Vector6::new(
            self.x_km,
            self.y_km,
            self.z_km,
            self.vx_km_s,
            self.vy_km_s,
            self.vz_km_s,
        )
    }

    /// Returns the radius vector of this state in [km, km, km]
    pub fn radius(&self) -> Vector3<f64> {
        Vector3::new(self.x_km, self.y_km, self.z_km)
    }

    /// Returns the velocity vector of this state in [km/s, km/s, km/s]
    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.vx_km_s, self.vy_km_s, self.vz_km_s)
    }

    /// Returns the magnitude of the radius vector in km
    pub fn rmag_km(&self) -> f64 {
        self.radius().norm()
    }

    /// Returns the magnitude of the velocity vector in km/s
    pub fn vmag_km_s(&self) -> f64 {
        self.velocity().norm()
    }

    /// Returns the orbital momentum vector
    pub fn hvec(&self) -> Vector3<f64> {
        self.radius().cross(&self.velocity())
    }

    /// Returns the norm of the orbital momentum in km^2/s
    pub fn hmag(&self) -> f64 {
        self.hvec().norm()
    }

    /// Returns the semi parameter computed from the angular momentum, in km.
    /// Zero if the momentum itself is zero.
    pub fn semi_parameter_km(&self, mu_km3_s2: f64) -> f64 {
        let hmag = self.hmag();
        if hmag < ZERO_MOMENTUM_TOL {
            0.0
        } else {
            hmag.powi(2) / mu_km3_s2
        }
    }

    /// Returns the specific mechanical energy in km^2/s^2
    pub fn energy_km2_s2(&self, mu_km3_s2: f64) -> f64 {
        self.vmag_km_s().powi(2) / 2.0 - mu_km3_s2 / self.rmag_km()
    }
}

impl fmt::Display for CartesianState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "position = [{:.*}, {:.*}, {:.*}] km, velocity = [{:.*}, {:.*}, {:.*}] km/s",
            decimals,
            self.x_km,
            decimals,
            self.y_km,
            decimals,
            self.z_km,
            decimals,
            self.vx_km_s,
            decimals,
            self.vy_km_s,
            decimals,
            self.vz_km_s
        )
    }
}

/// The four geometric classes of a two-body orbit, used to select which
/// angles of the Keplerian set are well defined.
///
/// An orbit is circular below an eccentricity of [`ECC_CIRCLE_TOL`] and
/// equatorial within the same tolerance (in radians) of 0 or 180 degrees of
/// inclination.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitGeometry {
    CircularEquatorial,
    CircularInclined,
    EccentricEquatorial,
    EccentricInclined,
}

impl OrbitGeometry {
    pub fn classify(ecc: f64, inc_rad: f64) -> Self {
        let circular = ecc < ECC_CIRCLE_TOL;
        let equatorial = inc_rad < ECC_CIRCLE_TOL || inc_rad > PI - ECC_CIRCLE_TOL;
        match (circular, equatorial) {
            (true, true) => Self::CircularEquatorial,
            (true, false) => Self::CircularInclined,
            (false, true) => Self::EccentricEquatorial,
            (false, false) => Self::EccentricInclined,
        }
    }
}

/// The classical Keplerian elements. Angles in degrees, semi-major axis in km.
///
/// The sixth element is the true anomaly. States whose sixth element is a
/// mean, eccentric, or hyperbolic anomaly are built with
/// [`KeplerianState::with_anomaly`], which resolves it to a true anomaly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeplerianState {
    pub sma_km: f64,
    pub ecc: f64,
    pub inc_deg: f64,
    pub raan_deg: f64,
    pub aop_deg: f64,
    pub ta_deg: f64,
}

impl KeplerianState {
    pub fn new(
        sma_km: f64,
        ecc: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        ta_deg: f64,
    ) -> Self {
        Self {
            sma_km,
            ecc,
            inc_deg,
            raan_deg,
            aop_deg,
            ta_deg,
        }
    }

    /// Builds a Keplerian state whose sixth element is the provided anomaly type.
    pub fn with_anomaly(
        sma_km: f64,
        ecc: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        anomaly_deg: f64,
        kind: AnomalyType,
    ) -> Result<Self, StateError> {
        let ta_rad = anomaly::to_true_rad(anomaly_deg.to_radians(), kind, ecc)?;
        Ok(Self::new(
            sma_km,
            ecc,
            inc_deg,
            raan_deg,
            aop_deg,
            between_0_360(ta_rad.to_degrees()),
        ))
    }

    /// Returns the sixth element expressed in the provided anomaly type, in degrees.
    pub fn anomaly_deg(&self, kind: AnomalyType) -> f64 {
        let value_rad = anomaly::from_true_rad(self.ta_deg.to_radians(), kind, self.ecc);
        match kind {
            AnomalyType::Hyperbolic => value_rad.to_degrees(),
            _ => between_0_360(value_rad.to_degrees()),
        }
    }

    /// Returns the radius of periapsis in km
    pub fn periapsis_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc)
    }

    /// Returns the radius of apoapsis in km, or zero if the orbit is not closed
    pub fn apoapsis_km(&self) -> f64 {
        if 1.0 - self.ecc < 1e-12 {
            0.0
        } else {
            self.sma_km * (1.0 + self.ecc)
        }
    }

    /// Returns the semi parameter (semilatus rectum) in km
    pub fn semi_parameter_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc.powi(2))
    }

    /// Returns the orbital period in seconds, or zero for an open orbit
    pub fn period_s(&self, mu_km3_s2: f64) -> f64 {
        if self.sma_km < 0.0 {
            0.0
        } else {
            2.0 * PI * (self.sma_km.powi(3) / mu_km3_s2).sqrt()
        }
    }

    /// Returns the mean motion in radians per second.
    ///
    /// Near-parabolic orbits use the parabolic mean motion `2 sqrt(mu)`.
    pub fn mean_motion_rad_s(&self, mu_km3_s2: f64) -> f64 {
        if self.ecc < 1.0 - PARABOLIC_ECC_TOL {
            (mu_km3_s2 / self.sma_km.powi(3)).sqrt()
        } else if self.ecc > 1.0 + PARABOLIC_ECC_TOL {
            (-mu_km3_s2 / self.sma_km.powi(3)).sqrt()
        } else {
            2.0 * mu_km3_s2.sqrt()
        }
    }

    /// Returns the specific mechanical energy in km^2/s^2
    pub fn energy_km2_s2(&self, mu_km3_s2: f64) -> f64 {
        -mu_km3_s2 / (2.0 * self.sma_km)
    }

    /// Returns the characteristic energy C3 in km^2/s^2
    pub fn c3_km2_s2(&self, mu_km3_s2: f64) -> f64 {
        -mu_km3_s2 / self.sma_km
    }

    /// Returns the velocity at periapsis in km/s
    pub fn vel_periapsis_km_s(&self, mu_km3_s2: f64) -> f64 {
        let energy = self.energy_km2_s2(mu_km3_s2);
        (2.0 * (energy + mu_km3_s2 / self.periapsis_km())).sqrt()
    }

    /// Returns the velocity at apoapsis in km/s, or zero if the orbit is not closed
    pub fn vel_apoapsis_km_s(&self, mu_km3_s2: f64) -> f64 {
        if 1.0 - self.ecc < 1e-12 {
            0.0
        } else {
            let energy = self.energy_km2_s2(mu_km3_s2);
            (2.0 * (energy + mu_km3_s2 / self.apoapsis_km())).sqrt()
        }
    }

    /// Returns this state as a Vector6 [sma, ecc, inc, raan, aop, ta]
    pub fn to_vec(self) -> Vector6<f64> {
        Vector6::new(
            self.sma_km,
            self.ecc,
            self.inc_deg,
            self.raan_deg,
            self.aop_deg,
            self.ta_deg,
        )
    }
}

impl fmt::Display for KeplerianState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "sma = {:.*} km, ecc = {:.*}, inc = {:.*} deg, raan = {:.*} deg, aop = {:.*} deg, ta = {:.*} deg",
            decimals,
            self.sma_km,
            decimals,
            self.ecc,
            decimals,
            self.inc_deg,
            decimals,
            self.raan_deg,
            decimals,
            self.aop_deg,
            decimals,
            self.ta_deg
        )
    }
}

/// Computes the classical Keplerian elements from a Cartesian state.
///
/// Rejects near-parabolic eccentricities, singular conics (periapsis below
/// one meter), 180-degree inclinations, zero position or momentum vectors,
/// and non-physical gravitational parameters. The angles undefined for the
/// orbit's geometric class are returned as zero.
pub fn cartesian_to_keplerian(
    mu_km3_s2: f64,
    cart: &CartesianState,
) -> Result<KeplerianState, StateError> {
    if mu_km3_s2 < MU_TOL {
        return Err(StateError::InvalidInput {
            msg: format!("gravitational parameter {mu_km3_s2} km^3/s^2 is too small"),
        });
    }
    let pos = cart.radius();
    let vel = cart.velocity();
    let rmag = pos.norm();
    if rmag < 1e-10 {
        return Err(StateError::InvalidInput {
            msg: "position vector is zero".to_string(),
        });
    }
    let v2 = vel.norm_squared();
    let rdotv = pos.dot(&vel);

    let evec = ((v2 - mu_km3_s2 / rmag) * pos - rdotv * vel) / mu_km3_s2;
    let ecc = evec.norm();
    if (1.0 - ecc).abs() < PARABOLIC_ECC_TOL {
        return Err(StateError::DegenerateOrbit {
            msg: format!("orbit is nearly parabolic (ecc = {ecc}), the Keplerian elements are undefined"),
        });
    }
    let zeta = 0.5 * v2 - mu_km3_s2 / rmag;
    let sma = -mu_km3_s2 / (2.0 * zeta);
    let rp = sma * (1.0 - ecc);
    if rp.abs() < SINGULAR_RP_TOL_KM {
        return Err(StateError::SingularConic { rp_km: rp });
    }

    let hvec = pos.cross(&vel);
    let hmag = hvec.norm();
    if hmag < 1e-30 {
        return Err(StateError::InvalidInput {
            msg: "angular momentum is zero, the orbit is rectilinear".to_string(),
        });
    }
    let inc = acos_clamped(hvec[2] / hmag, COS_ARG_TOL);
    if inc >= PI - RETROGRADE_INC_TOL {
        return Err(StateError::DegenerateOrbit {
            msg: format!(
                "inclination of {} deg is retrograde equatorial, for which the node is undefined",
                inc.to_degrees()
            ),
        });
    }

    // Node vector, k cross h
    let nvec = Vector3::new(-hvec[1], hvec[0], 0.0);
    let nmag = nvec.norm();

    let (raan, aop, ta) = match OrbitGeometry::classify(ecc, inc) {
        OrbitGeometry::EccentricInclined => {
            let mut raan = acos_clamped(nvec[0] / nmag, COS_ARG_TOL);
            if nvec[1] < 0.0 {
                raan = 2.0 * PI - raan;
            }
            let mut aop = acos_clamped(nvec.dot(&evec) / (nmag * ecc), COS_ARG_TOL);
            if evec[2] < 0.0 {
                aop = 2.0 * PI - aop;
            }
            let mut ta = acos_clamped(evec.dot(&pos) / (ecc * rmag), COS_ARG_TOL);
            if rdotv < 0.0 {
                ta = 2.0 * PI - ta;
            }
            (raan, aop, ta)
        }
        OrbitGeometry::EccentricEquatorial => {
            let mut aop = acos_clamped(evec[0] / ecc, COS_ARG_TOL);
            if evec[1] < 0.0 {
                aop = 2.0 * PI - aop;
            }
            let mut ta = acos_clamped(evec.dot(&pos) / (ecc * rmag), COS_ARG_TOL);
            if rdotv < 0.0 {
                ta = 2.0 * PI - ta;
            }
            (0.0, aop, ta)
        }
        OrbitGeometry::CircularInclined => {
            let mut raan = acos_clamped(nvec[0] / nmag, COS_ARG_TOL);
            if nvec[1] < 0.0 {
                raan = 2.0 * PI - raan;
            }
            let mut ta = acos_clamped(nvec.dot(&pos) / (nmag * rmag), COS_ARG_TOL);
            if pos[2] < 0.0 {
                ta = 2.0 * PI - ta;
            }
            (raan, 0.0, ta)
        }
        OrbitGeometry::CircularEquatorial => {
            let mut ta = acos_clamped(pos[0] / rmag, COS_ARG_TOL);
            if pos[1] < 0.0 {
                ta = 2.0 * PI - ta;
            }
            (0.0, 0.0, ta)
        }
    };

    Ok(KeplerianState::new(
        sma,
        ecc,
        inc.to_degrees(),
        between_0_360(raan.to_degrees()),
        between_0_360(aop.to_degrees()),
        between_0_360(ta.to_degrees()),
    ))
}

/// Computes the Cartesian state from the classical Keplerian elements.
///
/// A negative eccentricity or a semi-major axis whose sign disagrees with the
/// eccentricity is corrected with a warning before converting. Near-parabolic
/// eccentricities, singular conics, hyperbolic true anomalies beyond the
/// asymptote, and infinite radii are rejected.
pub fn keplerian_to_cartesian(
    mu_km3_s2: f64,
    kep: &KeplerianState,
) -> Result<CartesianState, StateError> {
    if mu_km3_s2 < MU_TOL {
        return Err(StateError::InvalidInput {
            msg: format!("gravitational parameter {mu_km3_s2} km^3/s^2 is too small"),
        });
    }
    let ecc = if kep.ecc < 0.0 {
        warn!("eccentricity cannot be negative: sign of eccentricity changed");
        -kep.ecc
    } else {
        kep.ecc
    };
    let sma = if ecc > 1.0 && kep.sma_km > 0.0 {
        warn!("eccentricity > 1 (hyperbolic) BUT SMA > 0 (elliptical): sign of SMA changed");
        -kep.sma_km
    } else if ecc < 1.0 && kep.sma_km < 0.0 {
        warn!("eccentricity < 1 (elliptical) BUT SMA < 0 (hyperbolic): sign of SMA changed");
        -kep.sma_km
    } else {
        kep.sma_km
    };
    if (1.0 - ecc).abs() < PARABOLIC_ECC_TOL {
        return Err(StateError::DegenerateOrbit {
            msg: format!("orbit is nearly parabolic (ecc = {ecc}), the Keplerian elements are undefined"),
        });
    }
    let rp = sma * (1.0 - ecc);
    if rp.abs() < SINGULAR_RP_TOL_KM {
        return Err(StateError::SingularConic { rp_km: rp });
    }
    if ecc > 1.0 {
        let ta_pm = between_pm_180(kep.ta_deg);
        let limit_deg = (PI - (1.0 / ecc).acos()).to_degrees();
        if ta_pm.abs() > limit_deg {
            return Err(StateError::InvalidInput {
                msg: format!(
                    "true anomaly of {ta_pm} deg lies beyond the asymptote ({limit_deg} deg) of this hyperbola (ecc = {ecc})"
                ),
            });
        }
    }

    let inc = kep.inc_deg.to_radians();
    let raan = kep.raan_deg.to_radians();
    let aop = kep.aop_deg.to_radians();
    let ta = kep.ta_deg.to_radians();

    let fac = 1.0 + ecc * ta.cos();
    if fac < INFINITE_RADIUS_TOL {
        return Err(StateError::NumericSingularity {
            msg: format!("radius of orbit is infinite (1 + ecc cos TA = {fac})"),
        });
    }

    let p = sma * (1.0 - ecc.powi(2));
    let radius = p / fac;
    let (sin_aop_ta, cos_aop_ta) = (aop + ta).sin_cos();
    let (sin_inc, cos_inc) = inc.sin_cos();
    let (sin_raan, cos_raan) = raan.sin_cos();
    let (sin_aop, cos_aop) = aop.sin_cos();
    let x = radius * (cos_aop_ta * cos_raan - cos_inc * sin_aop_ta * sin_raan);
    let y = radius * (cos_aop_ta * sin_raan + cos_inc * sin_aop_ta * cos_raan);
    let z = radius * sin_aop_ta * sin_inc;
    let sqrt_mu_p = (mu_km3_s2 / p).sqrt();
    let cos_ta_ecc = ta.cos() + ecc;
    let sin_ta = ta.sin();

    let vx = sqrt_mu_p * cos_ta_ecc * (-sin_aop * cos_raan - cos_inc * sin_raan * cos_aop)
        - sqrt_mu_p * sin_ta * (cos_aop * cos_raan - cos_inc * sin_raan * sin_aop);
    let vy = sqrt_mu_p * cos_ta_ecc * (-sin_aop * sin_raan + cos_inc * cos_raan * cos_aop)
        - sqrt_mu_p * sin_ta * (cos_aop * sin_raan + cos_inc * cos_raan * sin_aop);
    let vz = sqrt_mu_p * (cos_ta_ecc * sin_inc * cos_aop - sin_ta * sin_inc * sin_aop);

    Ok(CartesianState::new(x, y, z, vx, vy, vz))
}
