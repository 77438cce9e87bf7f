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
use crate::linalg::{Matrix3, Vector3, Vector6};
use crate::utils::{acos_clamped, between_0_360, between_0_2pi};
use crate::{
    ECC_CIRCLE_TOL, LONGITUDE_SOLVE_TOL, MAX_NEWTON_ITERS, MU_TOL, NEWTON_DERIVATIVE_TOL,
    PARABOLIC_ECC_TOL, RETROGRADE_INC_TOL, SINGULAR_RP_TOL_KM,
};
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// The equinoctial elements, non-singular for circular and equatorial closed
/// orbits. Semi-major axis in km, mean longitude in degrees, the rest
/// dimensionless.
///
/// `h` and `k` are the projections of the eccentricity vector, `p` and `q`
/// those of the node, onto the equinoctial basis with the retrograde factor
/// fixed at +1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EquinoctialState {
    pub sma_km: f64,
    pub h: f64,
    pub k: f64,
    pub p: f64,
    pub q: f64,
    pub mean_longitude_deg: f64,
}

impl EquinoctialState {
    pub fn new(sma_km: f64, h: f64, k: f64, p: f64, q: f64, mean_longitude_deg: f64) -> Self {
        Self {
            sma_km,
            h,
            k,
            p,
            q,
            mean_longitude_deg,
        }
    }

    /// Returns the eccentricity encoded by the h and k projections
    pub fn ecc(&self) -> f64 {
        (self.h.powi(2) + self.k.powi(2)).sqrt()
    }

    /// Returns this state as a Vector6 [sma, h, k, p, q, meanLongitude]
    pub fn to_vec(self) -> Vector6<f64> {
        Vector6::new(
            self.sma_km,
            self.h,
            self.k,
            self.p,
            self.q,
            self.mean_longitude_deg,
        )
    }
}

impl fmt::Display for EquinoctialState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "sma = {:.*} km, h = {:.*}, k = {:.*}, p = {:.*}, q = {:.*}, meanLongitude = {:.*} deg",
            decimals,
            self.sma_km,
            decimals,
            self.h,
            decimals,
            self.k,
            decimals,
            self.p,
            decimals,
            self.q,
            decimals,
            self.mean_longitude_deg
        )
    }
}

/// Converts a Cartesian state to the equinoctial elements.
///
/// Only closed orbits have equinoctial elements: parabolic and hyperbolic
/// eccentricities are rejected, as are singular conics and 180-degree
/// inclinations (the retrograde factor is fixed at +1).
pub fn cartesian_to_equinoctial(
    mu_km3_s2: f64,
    cart: &CartesianState,
) -> Result<EquinoctialState, StateError> {
    let pos = cart.radius();
    let vel = cart.velocity();
    let rmag = pos.norm();
    let vmag = vel.norm();
    if rmag <= 0.0 {
        return Err(StateError::InvalidInput {
            msg: "position vector is zero".to_string(),
        });
    }
    if mu_km3_s2 < MU_TOL {
        return Err(StateError::InvalidInput {
            msg: format!("gravitational parameter {mu_km3_s2} km^3/s^2 is too small"),
        });
    }

    let evec = ((vmag.powi(2) - mu_km3_s2 / rmag) * pos - pos.dot(&vel) * vel) / mu_km3_s2;
    let ecc = evec.norm();
    if ecc > 1.0 - PARABOLIC_ECC_TOL {
        return Err(StateError::DegenerateOrbit {
            msg: format!(
                "equinoctial elements require a closed orbit, but ecc = {ecc} is parabolic or hyperbolic"
            ),
        });
    }

    let xi = vmag.powi(2) / 2.0 - mu_km3_s2 / rmag;
    let sma = -mu_km3_s2 / (2.0 * xi);
    let rp = sma * (1.0 - ecc);
    if rp.abs() < SINGULAR_RP_TOL_KM {
        return Err(StateError::SingularConic { rp_km: rp });
    }

    let am = pos.cross(&vel).normalize();
    let inc = acos_clamped(am[2], ECC_CIRCLE_TOL);
    if inc >= PI - RETROGRADE_INC_TOL {
        return Err(StateError::DegenerateOrbit {
            msg: "equinoctial elements do not support an inclination of 180 degrees".to_string(),
        });
    }

    // Equinoctial basis, with the retrograde factor j = +1
    let f = Vector3::new(
        1.0 - am[0].powi(2) / (1.0 + am[2]),
        -(am[0] * am[1]) / (1.0 + am[2]),
        -am[0],
    )
    .normalize();
    let g = am.cross(&f).normalize();

    let h = evec.dot(&g);
    let k = evec.dot(&f);
    let p = am[0] / (1.0 + am[2]);
    let q = -am[1] / (1.0 + am[2]);

    // Eccentric longitude from the position in the equinoctial frame
    let x1 = pos.dot(&f);
    let y1 = pos.dot(&g);
    let tmp_sqrt = (1.0 - h.powi(2) - k.powi(2)).sqrt();
    let beta = 1.0 / (1.0 + tmp_sqrt);
    let cos_el = k + ((1.0 - k.powi(2) * beta) * x1 - h * k * beta * y1) / (sma * tmp_sqrt);
    let sin_el = h + ((1.0 - h.powi(2) * beta) * y1 - h * k * beta * x1) / (sma * tmp_sqrt);
    let ecc_long = between_0_2pi(sin_el.atan2(cos_el));

    let mean_long = ecc_long + h * cos_el - k * sin_el;

    Ok(EquinoctialState::new(
        sma,
        h,
        k,
        p,
        q,
        between_0_360(mean_long.to_degrees()),
    ))
}

/// Converts the equinoctial elements to a Cartesian state.
///
/// The mean longitude is resolved to the eccentric longitude with a
/// Newton-Raphson solve capped at [`MAX_NEWTON_ITERS`] iterations.
pub fn equinoctial_to_cartesian(
    mu_km3_s2: f64,
    equi: &EquinoctialState,
) -> Result<CartesianState, StateError> {
    let sma = equi.sma_km;
    let h = equi.h;
    let k = equi.k;
    let p = equi.p;
    let q = equi.q;
    let lambda = equi.mean_longitude_deg.to_radians();

    let ecc = equi.ecc();
    if ecc > 1.0 - PARABOLIC_ECC_TOL {
        return Err(StateError::InvalidInput {
            msg: format!(
                "EquinoctialH and EquinoctialK encode an eccentricity of {ecc}, which must be less than {}",
                1.0 - PARABOLIC_ECC_TOL
            ),
        });
    }
    if mu_km3_s2 < MU_TOL {
        return Err(StateError::InvalidInput {
            msg: format!("gravitational parameter {mu_km3_s2} km^3/s^2 is too small"),
        });
    }

    // Mean longitude to eccentric longitude
    let mut ecc_long = lambda;
    let mut iter = 0;
    loop {
        iter += 1;
        if iter > MAX_NEWTON_ITERS {
            return Err(StateError::IterationLimit {
                iters: MAX_NEWTON_ITERS,
            });
        }
        let prev = ecc_long;
        let f_val = prev + h * prev.cos() - k * prev.sin() - lambda;
        let f_prime = 1.0 - h * prev.sin() - k * prev.cos();
        if f_prime.abs() < NEWTON_DERIVATIVE_TOL {
            return Err(StateError::NumericSingularity {
                msg: format!("longitude iteration derivative vanished at F = {prev}"),
            });
        }
        ecc_long = prev - f_val / f_prime;
        if (ecc_long - prev).abs() < LONGITUDE_SOLVE_TOL {
            break;
        }
    }
    ecc_long = between_0_2pi(ecc_long);

    let tmp_sqrt = (1.0 - h.powi(2) - k.powi(2)).sqrt();
    let beta = 1.0 / (1.0 + tmp_sqrt);
    let n = (mu_km3_s2 / sma.powi(3)).sqrt();
    let (sin_el, cos_el) = ecc_long.sin_cos();
    let rmag = sma * (1.0 - k * cos_el - h * sin_el);
    if rmag <= 0.0 {
        return Err(StateError::NumericSingularity {
            msg: format!("reconstructed radius is not positive ({rmag} km)"),
        });
    }

    // Position and velocity in the equinoctial frame
    let x1 = sma * ((1.0 - h.powi(2) * beta) * cos_el + h * k * beta * sin_el - k);
    let y1 = sma * ((1.0 - k.powi(2) * beta) * sin_el + h * k * beta * cos_el - h);
    let x1_dot = (n * sma.powi(2) / rmag) * (h * k * beta * cos_el - (1.0 - h.powi(2) * beta) * sin_el);
    let y1_dot = (n * sma.powi(2) / rmag) * ((1.0 - k.powi(2) * beta) * cos_el - h * k * beta * sin_el);

    // Basis vectors from the direction cosine matrix, retrograde factor j = +1
    let qmat = Matrix3::new(
        1.0 - p.powi(2) + q.powi(2),
        2.0 * p * q,
        2.0 * p,
        2.0 * p * q,
        1.0 + p.powi(2) - q.powi(2),
        -2.0 * q,
        -2.0 * p,
        2.0 * q,
        1.0 - p.powi(2) - q.powi(2),
    ) / (1.0 + p.powi(2) + q.powi(2));
    let f = Vector3::new(qmat[(0, 0)], qmat[(1, 0)], qmat[(2, 0)]).normalize();
    let g = Vector3::new(qmat[(0, 1)], qmat[(1, 1)], qmat[(2, 1)]).normalize();

    let pos = x1 * f + y1 * g;
    let vel = x1_dot * f + y1_dot * g;

    Ok(CartesianState::new(
        pos[0], pos[1], pos[2], vel[0], vel[1], vel[2],
    ))
}
