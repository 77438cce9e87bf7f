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

use crate::converter::StateType;
use snafu::Snafu;

/// Errors raised by state representation conversions.
#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StateError {
    #[snafu(display("orbit is degenerate for this representation: {msg}"))]
    DegenerateOrbit { msg: String },
    #[snafu(display(
        "conic section is nearly singular: radius of periapsis is {rp_km} km (must exceed 1e-3 km)"
    ))]
    SingularConic { rp_km: f64 },
    #[snafu(display("invalid input: {msg}"))]
    InvalidInput { msg: String },
    #[snafu(display("numerical singularity: {msg}"))]
    NumericSingularity { msg: String },
    #[snafu(display("solver did not converge within {iters} iterations"))]
    IterationLimit { iters: usize },
    #[snafu(display("conversion from {from} to {to} is not supported"))]
    UnsupportedConversion { from: StateType, to: StateType },
    #[snafu(display("unknown state representation type {name:?}"))]
    UnknownStateType { name: String },
    #[snafu(display("unknown anomaly type {name:?} (expected TA, MA, EA, or HA)"))]
    UnknownAnomalyType { name: String },
}
