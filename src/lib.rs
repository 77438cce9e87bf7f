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

/*! # orbital-states

Conversions between the six spacecraft orbital state representations used in
mission analysis: Cartesian, Keplerian, Modified Keplerian (apsis radii),
Spherical RA/DEC, Spherical AZ/FPA, and Equinoctial, together with the
anomaly resolution engine (True/Mean/Eccentric/Hyperbolic) they rely on.

All conversions are pure functions over value types: a six-element state, the
gravitational parameter of the central body, and (for the Keplerian family)
an anomaly type tag. Distances are in kilometers, velocities in kilometers
per second, and angles in degrees at the public struct level. Fallible
operations return a [`StateError`]; library code does not panic.
*/

#[macro_use]
extern crate log;
extern crate nalgebra as na;

/// Anomaly types and the conversions between them, including the Kepler equation solver.
pub mod anomaly;

/// The orchestrator dispatching any-to-any representation conversions through Cartesian.
pub mod converter;

/// Cartesian to and from the singularity-free equinoctial elements.
pub mod equinoctial;

/// Cartesian to and from classical Keplerian elements, and the derived orbit scalars.
pub mod keplerian;

/// Keplerian to and from Modified Keplerian (periapsis/apoapsis radius) elements.
pub mod modkeplerian;

/// Cartesian to and from the two spherical representations (RA/DEC and AZ/FPA).
pub mod spherical;

/// Angle normalization and safe inverse-trig helpers shared by the conversion modules.
pub mod utils;

mod errors;
pub use self::errors::StateError;

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

pub use self::anomaly::{Anomaly, AnomalyType};
pub use self::converter::{State6, StateConverter, StateType};
pub use self::keplerian::{CartesianState, KeplerianState, OrbitGeometry};

/// Below this eccentricity an orbit is classified circular; the same value, in
/// radians, classifies an inclination as equatorial.
pub const ECC_CIRCLE_TOL: f64 = 1e-11;

/// An eccentricity within this value of 1.0 is treated as parabolic, for which
/// the Keplerian-family elements are undefined.
pub const PARABOLIC_ECC_TOL: f64 = 1e-7;

/// Inclinations within this value (radians) of 180 degrees are rejected, the
/// ascending node is undefined for a retrograde equatorial orbit.
pub const RETROGRADE_INC_TOL: f64 = 1e-5;

/// Conics whose periapsis radius falls below one meter are rejected as singular.
pub const SINGULAR_RP_TOL_KM: f64 = 1e-3;

/// Gravitational parameters below this value (km^3/s^2) cannot scale two-body motion.
pub const MU_TOL: f64 = 1e-15;

/// A `1 + ecc*cos(ta)` below this value means the orbit radius overflows.
pub const INFINITE_RADIUS_TOL: f64 = 1e-30;

/// Default convergence tolerance of the mean anomaly Newton solver, in radians.
pub const ANOMALY_CONVERGENCE_TOL: f64 = 1e-8;

/// A Newton denominator whose magnitude falls below this value is a numerical singularity.
pub const NEWTON_DERIVATIVE_TOL: f64 = 1e-16;

/// Convergence tolerance of the equinoctial mean-to-eccentric longitude solve, in radians.
pub const LONGITUDE_SOLVE_TOL: f64 = 1e-10;

/// Hard cap on the iterations of every Newton solver in this crate.
pub const MAX_NEWTON_ITERS: usize = 1000;
