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
use crate::equinoctial::{cartesian_to_equinoctial, equinoctial_to_cartesian, EquinoctialState};
use crate::errors::StateError;
use crate::keplerian::{
    cartesian_to_keplerian, keplerian_to_cartesian, CartesianState, KeplerianState,
};
use crate::linalg::Vector6;
use crate::modkeplerian::{keplerian_to_modified, modified_to_keplerian, ModKeplerianState};
use crate::spherical::{
    cartesian_to_spherical_azfpa, cartesian_to_spherical_radec, spherical_azfpa_to_cartesian,
    spherical_radec_to_cartesian, SphericalAzFpaState, SphericalRaDecState,
};
use crate::utils::between_0_360;
use enum_iterator::Sequence;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The state representations this crate converts between.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Sequence, Serialize, Deserialize)]
pub enum StateType {
    Cartesian,
    Keplerian,
    ModifiedKeplerian,
    SphericalAzFpa,
    SphericalRaDec,
    Equinoctial,
}

impl StateType {
    /// Whether this representation only makes sense around a celestial body,
    /// i.e. whether its elements depend on the gravitational parameter.
    pub fn requires_celestial_center(self) -> bool {
        matches!(
            self,
            Self::Keplerian | Self::ModifiedKeplerian | Self::Equinoctial
        )
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Cartesian => write!(f, "Cartesian"),
            Self::Keplerian => write!(f, "Keplerian"),
            Self::ModifiedKeplerian => write!(f, "ModifiedKeplerian"),
            Self::SphericalAzFpa => write!(f, "SphericalAZFPA"),
            Self::SphericalRaDec => write!(f, "SphericalRADEC"),
            Self::Equinoctial => write!(f, "Equinoctial"),
        }
    }
}

impl FromStr for StateType {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cartesian" => Ok(Self::Cartesian),
            "Keplerian" => Ok(Self::Keplerian),
            "ModifiedKeplerian" => Ok(Self::ModifiedKeplerian),
            "SphericalAZFPA" => Ok(Self::SphericalAzFpa),
            "SphericalRADEC" => Ok(Self::SphericalRaDec),
            "Equinoctial" => Ok(Self::Equinoctial),
            _ => Err(StateError::UnknownStateType {
                name: s.to_string(),
            }),
        }
    }
}

/// A six-element state vector tagged with its representation.
///
/// The element order matches the representation's vector form, e.g.
/// [sma, ecc, inc, raan, aop, anomaly] for Keplerian or
/// [rmag, ra, dec, vmag, azimuth, fpa] for SphericalAZFPA.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State6 {
    pub vector: Vector6<f64>,
    pub state_type: StateType,
}

impl State6 {
    pub fn new(vector: Vector6<f64>, state_type: StateType) -> Self {
        Self { vector, state_type }
    }

    pub fn cartesian(cart: &CartesianState) -> Self {
        Self::new(cart.to_cartesian_vec(), StateType::Cartesian)
    }
}

impl fmt::Display for State6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{} state] {:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
            self.state_type,
            self.vector[0],
            self.vector[1],
            self.vector[2],
            self.vector[3],
            self.vector[4],
            self.vector[5]
        )
    }
}

/// Converts tagged state vectors between any two representations, pivoting
/// through Cartesian.
///
/// The converter is built from the gravitational parameter of the central
/// body. States centered on a point which is not a celestial body have no
/// gravitational parameter: such a converter handles the point-to-point
/// representations (Cartesian and both sphericals) and fails cleanly on the
/// orbit-element ones.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateConverter {
    pub mu_km3_s2: f64,
}

impl StateConverter {
    /// Builds a converter around a celestial body of the provided
    /// gravitational parameter in km^3/s^2.
    pub fn new(mu_km3_s2: f64) -> Self {
        Self { mu_km3_s2 }
    }

    /// Builds a converter from an optional gravitational parameter.
    ///
    /// A missing parameter means the center is not a celestial body; the
    /// Keplerian-family conversions will then fail with `InvalidInput`.
    pub fn from_center(mu_km3_s2: Option<f64>) -> Self {
        match mu_km3_s2 {
            Some(mu) => Self::new(mu),
            None => {
                warn!("state center is not a celestial body: orbit-element conversions will fail");
                Self::new(0.0)
            }
        }
    }

    /// Converts a tagged state to the requested representation.
    ///
    /// `anomaly` fixes the meaning of the sixth element of Keplerian and
    /// Modified Keplerian vectors, on both the input and the output side.
    /// Converting a representation to itself returns the state unchanged.
    pub fn convert(
        &self,
        state: &State6,
        to: StateType,
        anomaly: AnomalyType,
    ) -> Result<State6, StateError> {
        if state.state_type == to {
            return Ok(*state);
        }
        let cart = self.to_cartesian(state, anomaly)?;
        self.from_cartesian(&cart, to, anomaly)
    }

    /// Resolves any tagged state to its Cartesian equivalent.
    pub fn to_cartesian(
        &self,
        state: &State6,
        anomaly: AnomalyType,
    ) -> Result<CartesianState, StateError> {
        let v = &state.vector;
        match state.state_type {
            StateType::Cartesian => Ok(CartesianState::cartesian_vec(v)),
            StateType::Keplerian => {
                let kep =
                    KeplerianState::with_anomaly(v[0], v[1], v[2], v[3], v[4], v[5], anomaly)?;
                keplerian_to_cartesian(self.mu_km3_s2, &kep)
            }
            StateType::ModifiedKeplerian => {
                let modkep = ModKeplerianState::new(v[0], v[1], v[2], v[3], v[4], v[5]);
                let mut kep = modified_to_keplerian(&modkep)?;
                if anomaly != AnomalyType::True {
                    let ta_rad = anomaly::to_true_rad(kep.ta_deg.to_radians(), anomaly, kep.ecc)?;
                    kep.ta_deg = between_0_360(ta_rad.to_degrees());
                }
                keplerian_to_cartesian(self.mu_km3_s2, &kep)
            }
            StateType::SphericalAzFpa => {
                let sph = SphericalAzFpaState::new(v[0], v[1], v[2], v[3], v[4], v[5]);
                Ok(spherical_azfpa_to_cartesian(&sph))
            }
            StateType::SphericalRaDec => {
                let sph = SphericalRaDecState::new(v[0], v[1], v[2], v[3], v[4], v[5]);
                Ok(spherical_radec_to_cartesian(&sph))
            }
            StateType::Equinoctial => {
                let equi = EquinoctialState::new(v[0], v[1], v[2], v[3], v[4], v[5]);
                equinoctial_to_cartesian(self.mu_km3_s2, &equi)
            }
        }
    }

    /// Expresses a Cartesian state in the requested representation.
    pub fn from_cartesian(
        &self,
        cart: &CartesianState,
        to: StateType,
        anomaly: AnomalyType,
    ) -> Result<State6, StateError> {
        let vector = match to {
            StateType::Cartesian => cart.to_cartesian_vec(),
            StateType::Keplerian => {
                let kep = cartesian_to_keplerian(self.mu_km3_s2, cart)?;
                let mut vec = kep.to_vec();
                vec[5] = kep.anomaly_deg(anomaly);
                vec
            }
            StateType::ModifiedKeplerian => {
                let kep = cartesian_to_keplerian(self.mu_km3_s2, cart)?;
                let modkep = keplerian_to_modified(&kep)?;
                let mut vec = modkep.to_vec();
                vec[5] = kep.anomaly_deg(anomaly);
                vec
            }
            StateType::SphericalAzFpa => cartesian_to_spherical_azfpa(cart)?.to_vec(),
            StateType::SphericalRaDec => cartesian_to_spherical_radec(cart)?.to_vec(),
            StateType::Equinoctial => cartesian_to_equinoctial(self.mu_km3_s2, cart)?.to_vec(),
        };
        Ok(State6::new(vector, to))
    }
}
