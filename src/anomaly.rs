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
use crate::utils::between_0_360;
use crate::{
    ANOMALY_CONVERGENCE_TOL, MAX_NEWTON_ITERS, NEWTON_DERIVATIVE_TOL, PARABOLIC_ECC_TOL,
};
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// The four anomaly angles which may stand as the sixth Keplerian element.
///
/// True and mean anomalies apply to any non-parabolic conic; the eccentric
/// anomaly only to closed orbits and the hyperbolic anomaly only to open ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyType {
    True,
    Mean,
    Eccentric,
    Hyperbolic,
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::True => write!(f, "TA"),
            Self::Mean => write!(f, "MA"),
            Self::Eccentric => write!(f, "EA"),
            Self::Hyperbolic => write!(f, "HA"),
        }
    }
}

impl FromStr for AnomalyType {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TA" | "TrueAnomaly" => Ok(Self::True),
            "MA" | "MeanAnomaly" => Ok(Self::Mean),
            "EA" | "EccentricAnomaly" => Ok(Self::Eccentric),
            "HA" | "HyperbolicAnomaly" => Ok(Self::Hyperbolic),
            _ => Err(StateError::UnknownAnomalyType {
                name: s.to_string(),
            }),
        }
    }
}

/// Converts a true anomaly to an eccentric anomaly, all in radians.
///
/// Returns the eccentric anomaly in [0, 2π). On a non-closed orbit
/// (`ecc >= 1 - PARABOLIC_ECC_TOL`) the eccentric anomaly is undefined and
/// zero is returned.
pub fn true_to_eccentric_rad(ta_rad: f64, ecc: f64) -> f64 {
    if ecc > 1.0 - PARABOLIC_ECC_TOL {
        return 0.0;
    }
    let (sin_ta, cos_ta) = ta_rad.sin_cos();
    let denom = 1.0 + ecc * cos_ta;
    let cos_ea = (ecc + cos_ta) / denom;
    let sin_ea = ((1.0 - ecc.powi(2)).sqrt() * sin_ta) / denom;
    let mut ea = sin_ea.atan2(cos_ea);
    if ea < 0.0 {
        ea += 2.0 * PI;
    }
    ea
}

/// Converts a true anomaly to a hyperbolic anomaly, all in radians.
///
/// The hyperbolic anomaly is signed and is not normalized. On a non-open
/// orbit (`ecc <= 1 + PARABOLIC_ECC_TOL`) it is undefined and zero is
/// returned.
pub fn true_to_hyperbolic_rad(ta_rad: f64, ecc: f64) -> f64 {
    if ecc < 1.0 + PARABOLIC_ECC_TOL {
        return 0.0;
    }
    let (sin_ta, cos_ta) = ta_rad.sin_cos();
    let sinh_ha = (sin_ta * (ecc.powi(2) - 1.0).sqrt()) / (1.0 + ecc * cos_ta);
    sinh_ha.asinh()
}

/// Converts a true anomaly to a mean anomaly via Kepler's equation, in radians.
///
/// Elliptic orbits return M = E - e sin E in [0, 2π); hyperbolic orbits
/// return N = e sinh H - H, signed. Near-parabolic eccentricities have no
/// mean anomaly: a warning is logged and zero returned.
pub fn true_to_mean_rad(ta_rad: f64, ecc: f64) -> f64 {
    if ecc < 1.0 - PARABOLIC_ECC_TOL {
        let ea = true_to_eccentric_rad(ta_rad, ecc);
        let mut ma = ea - ecc * ea.sin();
        if ma < 0.0 {
            ma += 2.0 * PI;
        }
        ma
    } else if ecc > 1.0 + PARABOLIC_ECC_TOL {
        let ha = true_to_hyperbolic_rad(ta_rad, ecc);
        ecc * ha.sinh() - ha
    } else {
        warn!(
            "mean anomaly is undefined for a parabolic orbit (ecc = {}), returning 0.0",
            ecc
        );
        0.0
    }
}

/// Converts an eccentric anomaly to a true anomaly, all in radians.
pub fn eccentric_to_true_rad(ea_rad: f64, ecc: f64) -> Result<f64, StateError> {
    let (sin_ea, cos_ea) = ea_rad.sin_cos();
    let denom = 1.0 - ecc * cos_ea;
    if denom.abs() < NEWTON_DERIVATIVE_TOL {
        return Err(StateError::NumericSingularity {
            msg: format!(
                "1 - ecc*cos(EA) = {denom} is too close to zero (ecc = {ecc}, EA = {ea_rad} rad)"
            ),
        });
    }
    let cos_ta = (cos_ea - ecc) / denom;
    let sin_ta = ((1.0 - ecc.powi(2)).sqrt() * sin_ea) / denom;
    let mut ta = sin_ta.atan2(cos_ta);
    if ta < 0.0 {
        ta += 2.0 * PI;
    }
    Ok(ta)
}

/// Converts a hyperbolic anomaly to a true anomaly, all in radians.
pub fn hyperbolic_to_true_rad(ha_rad: f64, ecc: f64) -> Result<f64, StateError> {
    let cosh_ha = ha_rad.cosh();
    let denom = 1.0 - ecc * cosh_ha;
    if denom.abs() < NEWTON_DERIVATIVE_TOL {
        return Err(StateError::NumericSingularity {
            msg: format!(
                "1 - ecc*cosh(HA) = {denom} is too close to zero (ecc = {ecc}, HA = {ha_rad} rad)"
            ),
        });
    }
    let cos_ta = (cosh_ha - ecc) / denom;
    let sin_ta = -((ecc.powi(2) - 1.0).sqrt() * ha_rad.sinh()) / denom;
    Ok(sin_ta.atan2(cos_ta))
}

/// Solves Kepler's equation for the true anomaly from a mean anomaly, in radians.
///
/// Newton-Raphson with two refinement passes per loop turn. The elliptic
/// branch is seeded at `M + e sin M`, the hyperbolic branch at zero. Both
/// branches are capped at [`MAX_NEWTON_ITERS`] iterations and fail with
/// `NumericSingularity` if the local derivative vanishes.
pub fn mean_to_true_rad(ma_rad: f64, ecc: f64, tol: f64) -> Result<f64, StateError> {
    if ecc < 1.0 {
        let rm = ma_rad;
        let mut e2 = rm + ecc * rm.sin();

        let mut iter = 0;
        loop {
            iter += 1;
            if iter > MAX_NEWTON_ITERS {
                return Err(StateError::IterationLimit {
                    iters: MAX_NEWTON_ITERS,
                });
            }

            let normalizer = 1.0 - ecc * e2.cos();
            if normalizer.abs() < NEWTON_DERIVATIVE_TOL {
                return Err(StateError::NumericSingularity {
                    msg: format!("Kepler iteration derivative vanished at E = {e2} (ecc = {ecc})"),
                });
            }
            let e1 = e2 - (e2 - ecc * e2.sin() - rm) / normalizer;
            if (e2 - e1).abs() < tol {
                e2 = e1;
                break;
            }

            let normalizer = 1.0 - ecc * e1.cos();
            if normalizer.abs() < NEWTON_DERIVATIVE_TOL {
                return Err(StateError::NumericSingularity {
                    msg: format!("Kepler iteration derivative vanished at E = {e1} (ecc = {ecc})"),
                });
            }
            e2 = e1 - (e1 - ecc * e1.sin() - rm) / normalizer;
            if (e1 - e2).abs() < tol {
                break;
            }
        }

        let ea = e2;
        // tan(E/2) blows up at apoapsis, where E is already the true anomaly
        let c = (ea - PI).abs();
        if c >= 1.0e-8 {
            Ok(2.0 * (((1.0 + ecc) / (1.0 - ecc)).sqrt() * (ea / 2.0).tan()).atan())
        } else {
            Ok(ea)
        }
    } else {
        let rm = ma_rad;
        let mut f2: f64 = 0.0;

        let mut iter = 0;
        loop {
            iter += 1;
            if iter > MAX_NEWTON_ITERS {
                return Err(StateError::IterationLimit {
                    iters: MAX_NEWTON_ITERS,
                });
            }

            let normalizer = ecc * f2.cosh() - 1.0;
            if normalizer.abs() < NEWTON_DERIVATIVE_TOL {
                return Err(StateError::NumericSingularity {
                    msg: format!("Kepler iteration derivative vanished at H = {f2} (ecc = {ecc})"),
                });
            }
            let f1 = f2 - (ecc * f2.sinh() - f2 - rm) / normalizer;
            if (f2 - f1).abs() < tol {
                f2 = f1;
                break;
            }

            let normalizer = ecc * f1.cosh() - 1.0;
            if normalizer.abs() < NEWTON_DERIVATIVE_TOL {
                return Err(StateError::NumericSingularity {
                    msg: format!("Kepler iteration derivative vanished at H = {f1} (ecc = {ecc})"),
                });
            }
            f2 = f1 - (ecc * f1.sinh() - f1 - rm) / normalizer;
            if (f1 - f2).abs() < tol {
                break;
            }
        }

        let ha = f2;
        Ok(2.0 * (((ecc + 1.0) / (ecc - 1.0)).sqrt() * (ha / 2.0).tanh()).atan())
    }
}

/// Converts any anomaly type to the true anomaly, in radians.
pub fn to_true_rad(value_rad: f64, kind: AnomalyType, ecc: f64) -> Result<f64, StateError> {
    match kind {
        AnomalyType::True => Ok(value_rad),
        AnomalyType::Mean => mean_to_true_rad(value_rad, ecc, ANOMALY_CONVERGENCE_TOL),
        AnomalyType::Eccentric => eccentric_to_true_rad(value_rad, ecc),
        AnomalyType::Hyperbolic => hyperbolic_to_true_rad(value_rad, ecc),
    }
}

/// Converts a true anomaly to any anomaly type, in radians.
pub fn from_true_rad(ta_rad: f64, kind: AnomalyType, ecc: f64) -> f64 {
    match kind {
        AnomalyType::True => ta_rad,
        AnomalyType::Mean => true_to_mean_rad(ta_rad, ecc),
        AnomalyType::Eccentric => true_to_eccentric_rad(ta_rad, ecc),
        AnomalyType::Hyperbolic => true_to_hyperbolic_rad(ta_rad, ecc),
    }
}

/// Converts an anomaly value between any two anomaly types, routing through
/// the true anomaly, in radians.
pub fn convert_rad(
    value_rad: f64,
    from: AnomalyType,
    to: AnomalyType,
    ecc: f64,
) -> Result<f64, StateError> {
    if from == to {
        return Ok(value_rad);
    }
    let ta = to_true_rad(value_rad, from, ecc)?;
    Ok(from_true_rad(ta, to, ecc))
}

/// An anomaly value in degrees together with the orbit shape it refers to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub value_deg: f64,
    pub kind: AnomalyType,
    pub sma_km: f64,
    pub ecc: f64,
}

impl Anomaly {
    pub fn new(value_deg: f64, kind: AnomalyType, sma_km: f64, ecc: f64) -> Self {
        Self {
            value_deg,
            kind,
            sma_km,
            ecc,
        }
    }

    /// Returns this anomaly expressed in the requested type.
    ///
    /// Eccentric and mean results on closed orbits are normalized to
    /// [0, 360) degrees; hyperbolic values keep their sign.
    pub fn in_kind(&self, kind: AnomalyType) -> Result<Self, StateError> {
        if kind == self.kind {
            return Ok(*self);
        }
        let value_rad = convert_rad(
            self.value_deg.to_radians(),
            self.kind,
            kind,
            self.ecc,
        )?;
        let value_deg = match kind {
            AnomalyType::Hyperbolic => value_rad.to_degrees(),
            _ => between_0_360(value_rad.to_degrees()),
        };
        Ok(Self {
            value_deg,
            kind,
            sma_km: self.sma_km,
            ecc: self.ecc,
        })
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:.6} deg (ecc = {:.6})", self.kind, self.value_deg, self.ecc)
    }
}
