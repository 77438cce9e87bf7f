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
use crate::keplerian::KeplerianState;
use crate::linalg::Vector6;
use crate::SINGULAR_RP_TOL_KM;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The Modified Keplerian elements: the apsis radii replace the semi-major
/// axis and eccentricity. Radii in km, angles in degrees.
///
/// A hyperbolic orbit carries a negative radius of apoapsis, by convention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModKeplerianState {
    pub rad_per_km: f64,
    pub rad_apo_km: f64,
    pub inc_deg: f64,
    pub raan_deg: f64,
    pub aop_deg: f64,
    pub ta_deg: f64,
}

impl ModKeplerianState {
    pub fn new(
        rad_per_km: f64,
        rad_apo_km: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        ta_deg: f64,
    ) -> Self {
        Self {
            rad_per_km,
            rad_apo_km,
            inc_deg,
            raan_deg,
            aop_deg,
            ta_deg,
        }
    }

    /// Returns this state as a Vector6 [radPer, radApo, inc, raan, aop, ta]
    pub fn to_vec(self) -> Vector6<f64> {
        Vector6::new(
            self.rad_per_km,
            self.rad_apo_km,
            self.inc_deg,
            self.raan_deg,
            self.aop_deg,
            self.ta_deg,
        )
    }
}

impl fmt::Display for ModKeplerianState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "radPer = {:.*} km, radApo = {:.*} km, inc = {:.*} deg, raan = {:.*} deg, aop = {:.*} deg, ta = {:.*} deg",
            decimals,
            self.rad_per_km,
            decimals,
            self.rad_apo_km,
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

/// Converts classical Keplerian elements to the Modified Keplerian set.
///
/// Unlike the Cartesian conversion, inconsistent inputs are rejected rather
/// than corrected: a negative eccentricity, a positive semi-major axis with a
/// hyperbolic eccentricity, a non-finite semi-major axis, a parabolic orbit
/// at machine precision, and a singular conic all fail.
pub fn keplerian_to_modified(kep: &KeplerianState) -> Result<ModKeplerianState, StateError> {
    let sma = kep.sma_km;
    let ecc = kep.ecc;
    if ecc < 0.0 {
        return Err(StateError::InvalidInput {
            msg: format!("eccentricity cannot be negative ({ecc})"),
        });
    }
    if sma > 0.0 && ecc > 1.0 {
        return Err(StateError::InvalidInput {
            msg: format!(
                "eccentricity {ecc} is hyperbolic but the semi-major axis {sma} km is positive; a hyperbolic orbit needs a negative semi-major axis"
            ),
        });
    }
    if !sma.is_finite() {
        return Err(StateError::InvalidInput {
            msg: format!("semi-major axis is not finite ({sma})"),
        });
    }
    if (1.0 - ecc).abs() < 2.0 * f64::EPSILON {
        return Err(StateError::DegenerateOrbit {
            msg: format!("orbit is parabolic (ecc = {ecc}), the apsis radii are undefined"),
        });
    }
    let rad_per = sma * (1.0 - ecc);
    if rad_per.abs() < SINGULAR_RP_TOL_KM {
        return Err(StateError::SingularConic { rp_km: rad_per });
    }
    // Negative for a hyperbola
    let rad_apo = sma * (1.0 + ecc);

    Ok(ModKeplerianState::new(
        rad_per,
        rad_apo,
        kep.inc_deg,
        kep.raan_deg,
        kep.aop_deg,
        kep.ta_deg,
    ))
}

/// Converts the Modified Keplerian set back to classical Keplerian elements.
pub fn modified_to_keplerian(modkep: &ModKeplerianState) -> Result<KeplerianState, StateError> {
    let rad_per = modkep.rad_per_km;
    let rad_apo = modkep.rad_apo_km;
    if rad_apo.abs() < SINGULAR_RP_TOL_KM {
        return Err(StateError::InvalidInput {
            msg: format!("radius of apoapsis must not be zero ({rad_apo} km)"),
        });
    }
    if rad_apo < rad_per && rad_apo > 0.0 {
        return Err(StateError::InvalidInput {
            msg: format!(
                "radius of apoapsis ({rad_apo} km) cannot be smaller than the radius of periapsis ({rad_per} km); for a hyperbolic orbit, set the radius of apoapsis negative"
            ),
        });
    }
    if rad_per <= 0.0 {
        return Err(StateError::InvalidInput {
            msg: format!("radius of periapsis must be positive ({rad_per} km)"),
        });
    }

    let rp_by_ra = rad_per / rad_apo;
    let ecc = (1.0 - rp_by_ra) / (1.0 + rp_by_ra);
    let sma = rad_per / (1.0 - ecc);

    Ok(KeplerianState::new(
        sma,
        ecc,
        modkep.inc_deg,
        modkep.raan_deg,
        modkep.aop_deg,
        modkep.ta_deg,
    ))
}
