extern crate orbital_states;
extern crate pretty_env_logger as pel;

use crate::EARTH_MU_KM3_S2;
use enum_iterator::all;
use orbital_states::keplerian::CartesianState;
use orbital_states::linalg::Vector6;
use orbital_states::{AnomalyType, State6, StateConverter, StateError, StateType};

/// The default GMAT spacecraft state and its published Keplerian equivalent.
fn default_cart() -> CartesianState {
    CartesianState::new(7_100.0, 0.0, 1_300.0, 0.0, 7.35, 1.0)
}

#[test]
fn default_state_to_keplerian() {
    let _ = pel::try_init();
    let converter = StateConverter::new(EARTH_MU_KM3_S2);
    let state = State6::cartesian(&default_cart());
    let kep = converter
        .convert(&state, StateType::Keplerian, AnomalyType::True)
        .unwrap();
    assert_eq!(kep.state_type, StateType::Keplerian);
    let v = kep.vector;
    assert!((v[0] - 7_191.938_817_629_05).abs() < 1e-5, "sma = {}", v[0]);
    assert!((v[1] - 0.024_549_749_005_981_37).abs() < 1e-9, "ecc = {}", v[1]);
    assert!((v[2] - 12.850_080_056_580_97).abs() < 1e-7, "inc = {}", v[2]);
    assert!((v[3] - 306.614_802_194_798_4).abs() < 1e-7, "raan = {}", v[3]);
    assert!((v[4] - 314.190_551_535_992_1).abs() < 1e-6, "aop = {}", v[4]);
    assert!((v[5] - 99.887_749_332_041_82).abs() < 1e-6, "ta = {}", v[5]);
}

#[test]
fn identity_is_a_no_op() {
    // The identity conversion does not validate, it returns the state as is
    let vector = Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    for state_type in all::<StateType>() {
        let state = State6::new(vector, state_type);
        let converter = StateConverter::new(EARTH_MU_KM3_S2);
        let out = converter
            .convert(&state, state_type, AnomalyType::True)
            .unwrap();
        assert_eq!(out, state, "{state_type} identity");
    }
}

#[test]
fn all_representations_round_trip() {
    let converter = StateConverter::new(EARTH_MU_KM3_S2);
    let cart = State6::cartesian(&default_cart());
    for state_type in all::<StateType>() {
        for anomaly in [AnomalyType::True, AnomalyType::Mean, AnomalyType::Eccentric] {
            let there = converter.convert(&cart, state_type, anomaly).unwrap();
            assert_eq!(there.state_type, state_type);
            let back = converter
                .convert(&there, StateType::Cartesian, anomaly)
                .unwrap();
            for i in 0..6 {
                assert!(
                    (back.vector[i] - cart.vector[i]).abs() < 1e-5,
                    "{state_type} with {anomaly}: element {i} came back {} instead of {}",
                    back.vector[i],
                    cart.vector[i]
                );
            }
        }
    }
}

#[test]
fn cross_conversions_pivot_through_cartesian() {
    let converter = StateConverter::new(EARTH_MU_KM3_S2);
    let cart = State6::cartesian(&default_cart());
    let kep = converter
        .convert(&cart, StateType::Keplerian, AnomalyType::True)
        .unwrap();
    // Keplerian straight to equinoctial equals Cartesian to equinoctial
    let equi_direct = converter
        .convert(&kep, StateType::Equinoctial, AnomalyType::True)
        .unwrap();
    let equi_ref = converter
        .convert(&cart, StateType::Equinoctial, AnomalyType::True)
        .unwrap();
    for i in 0..6 {
        assert!(
            (equi_direct.vector[i] - equi_ref.vector[i]).abs() < 1e-7,
            "element {i}"
        );
    }
}

#[test]
fn anomaly_type_applies_to_both_sides() {
    let converter = StateConverter::new(EARTH_MU_KM3_S2);
    let cart = State6::cartesian(&default_cart());

    let with_ta = converter
        .convert(&cart, StateType::Keplerian, AnomalyType::True)
        .unwrap();
    let with_ma = converter
        .convert(&cart, StateType::Keplerian, AnomalyType::Mean)
        .unwrap();
    // The first five elements agree, the sixth is a different anomaly
    for i in 0..5 {
        assert!((with_ta.vector[i] - with_ma.vector[i]).abs() < 1e-12);
    }
    assert!((with_ta.vector[5] - with_ma.vector[5]).abs() > 0.1);

    // Reading the mean anomaly state back with the same tag recovers Cartesian
    let back = converter
        .convert(&with_ma, StateType::Cartesian, AnomalyType::Mean)
        .unwrap();
    for i in 0..6 {
        assert!((back.vector[i] - cart.vector[i]).abs() < 1e-5, "element {i}");
    }

    // Modified Keplerian carries the tagged anomaly in its sixth slot too
    let modkep_ma = converter
        .convert(&cart, StateType::ModifiedKeplerian, AnomalyType::Mean)
        .unwrap();
    assert!((modkep_ma.vector[5] - with_ma.vector[5]).abs() < 1e-12);
}

#[test]
fn non_celestial_center() {
    let _ = pel::try_init();
    let converter = StateConverter::from_center(None);
    let cart = State6::cartesian(&default_cart());

    // Point-to-point representations still work without a mu
    let sph = converter
        .convert(&cart, StateType::SphericalAzFpa, AnomalyType::True)
        .unwrap();
    let back = converter
        .convert(&sph, StateType::Cartesian, AnomalyType::True)
        .unwrap();
    for i in 0..6 {
        assert!((back.vector[i] - cart.vector[i]).abs() < 1e-9, "element {i}");
    }

    // Orbit-element representations need a celestial center
    for state_type in all::<StateType>().filter(|t| t.requires_celestial_center()) {
        assert!(
            matches!(
                converter.convert(&cart, state_type, AnomalyType::True),
                Err(StateError::InvalidInput { .. })
            ),
            "{state_type} must fail without a gravitational parameter"
        );
    }
}

#[test]
fn state_type_parsing_round_trip() {
    use std::str::FromStr;
    for state_type in all::<StateType>() {
        assert_eq!(
            StateType::from_str(&state_type.to_string()).unwrap(),
            state_type
        );
    }
    assert!(matches!(
        StateType::from_str("OutgoingAsymptote"),
        Err(StateError::UnknownStateType { .. })
    ));
}
