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

use std::f64::consts::PI;

/// Returns the provided angle bounded between 0.0 and 360.0 degrees.
pub fn between_0_360(val: f64) -> f64 {
    let mut new_val = val;
    while new_val >= 360.0 {
        new_val -= 360.0;
    }
    while new_val < 0.0 {
        new_val += 360.0;
    }
    new_val
}

/// Returns the provided angle bounded between -180.0 and +180.0 degrees.
pub fn between_pm_180(val: f64) -> f64 {
    let mut new_val = val;
    while new_val > 180.0 {
        new_val -= 360.0;
    }
    while new_val < -180.0 {
        new_val += 360.0;
    }
    new_val
}

/// Returns the provided angle bounded between 0.0 and 2*PI radians.
pub fn between_0_2pi(val: f64) -> f64 {
    let mut new_val = val;
    while new_val >= 2.0 * PI {
        new_val -= 2.0 * PI;
    }
    while new_val < 0.0 {
        new_val += 2.0 * PI;
    }
    new_val
}

/// Arc cosine tolerant of arguments slightly outside [-1, 1].
///
/// Round-off in dot products routinely pushes a cosine a few ULPs out of its
/// domain. Arguments within `tol` of the domain are clamped; anything farther
/// out returns NaN just like `f64::acos`.
pub fn acos_clamped(val: f64, tol: f64) -> f64 {
    if val > 1.0 {
        if val - 1.0 < tol {
            0.0
        } else {
            f64::NAN
        }
    } else if val < -1.0 {
        if -1.0 - val < tol {
            PI
        } else {
            f64::NAN
        }
    } else {
        val.acos()
    }
}
