extern crate orbital_states;

use approx::assert_abs_diff_eq;
use crate::EARTH_MU_KM3_S2;
use orbital_states::equinoctial::{
    cartesian_to_equinoctial, equinoctial_to_cartesian, EquinoctialState,
};
use orbital_states::keplerian::{
    cartesian_to_keplerian, keplerian_to_cartesian, CartesianState, KeplerianState,
};
use orbital_states::StateError;

macro_rules! f64_eq {
    ($x:expr, $val:expr, $msg:expr) => {
        assert!(
            ($x - $val).abs() < 1e-10,
            "{}: {:.2e}",
            $msg,
            ($x - $val).abs()
        )
    };
}

#[test]
fn elements_match_keplerian_shape() {
    let cart = CartesianState::new(-2436.45, -2436.45, 6891.037, 5.088_611, -5.088_611, 0.0);
    let equi = cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart).unwrap();
    let kep = cartesian_to_keplerian(EARTH_MU_KM3_S2, &cart).unwrap();

    f64_eq!(equi.sma_km, kep.sma_km, "sma");
    assert!((equi.ecc() - kep.ecc).abs() < 1e-12, "ecc from h and k");
    // p and q encode the inclination through tan(i/2)
    let tan_half_i = (kep.inc_deg.to_radians() / 2.0).tan();
    assert!(
        ((equi.p.powi(2) + equi.q.powi(2)).sqrt() - tan_half_i).abs() < 1e-12,
        "inclination from p and q"
    );
    assert!(
        (0.0..360.0).contains(&equi.mean_longitude_deg),
        "mean longitude is normalized"
    );
}

#[test]
fn round_trip_inclined() {
    let cart = CartesianState::new(
        5_946.673_548_288_958,
        1_656.154_606_023_661,
        2_259.012_129_598_249,
        -3.098_683_050_943_824,
        4.579_534_132_135_011,
        6.246_541_551_539_432,
    );
    let equi = cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart).unwrap();
    let back = equinoctial_to_cartesian(EARTH_MU_KM3_S2, &equi).unwrap();
    assert_abs_diff_eq!(back.x_km, cart.x_km, epsilon = 1e-6);
    assert_abs_diff_eq!(back.y_km, cart.y_km, epsilon = 1e-6);
    assert_abs_diff_eq!(back.z_km, cart.z_km, epsilon = 1e-6);
    assert_abs_diff_eq!(back.vx_km_s, cart.vx_km_s, epsilon = 1e-9);
    assert_abs_diff_eq!(back.vy_km_s, cart.vy_km_s, epsilon = 1e-9);
    assert_abs_diff_eq!(back.vz_km_s, cart.vz_km_s, epsilon = 1e-9);
}

#[test]
fn near_circular_equatorial_is_stable() {
    // The Keplerian angles are ill conditioned here; the equinoctial set is not
    let kep = KeplerianState::new(42_164.0, 1e-8, 0.001, 78.9, 65.4, 12.3);
    let cart = keplerian_to_cartesian(EARTH_MU_KM3_S2, &kep).unwrap();
    let equi = cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart).unwrap();
    let back = equinoctial_to_cartesian(EARTH_MU_KM3_S2, &equi).unwrap();
    assert!((back.x_km - cart.x_km).abs() < 1e-5, "x");
    assert!((back.y_km - cart.y_km).abs() < 1e-5, "y");
    assert!((back.z_km - cart.z_km).abs() < 1e-5, "z");
    assert!((back.vx_km_s - cart.vx_km_s).abs() < 1e-9, "vx");
    assert!((back.vy_km_s - cart.vy_km_s).abs() < 1e-9, "vy");
    assert!((back.vz_km_s - cart.vz_km_s).abs() < 1e-9, "vz");
}

#[test]
fn open_orbits_rejected() {
    let kep = KeplerianState::new(-7_200.0, 1.5, 10.0, 20.0, 30.0, 40.0);
    let cart = keplerian_to_cartesian(EARTH_MU_KM3_S2, &kep).unwrap();
    assert!(matches!(
        cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart),
        Err(StateError::DegenerateOrbit { .. })
    ));

    // Retrograde equatorial, the retrograde factor is fixed at +1
    let cart = CartesianState::new(7_000.0, 0.0, 0.0, 0.0, -7.5, 0.0);
    assert!(matches!(
        cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart),
        Err(StateError::DegenerateOrbit { .. })
    ));

    // h and k encoding an eccentricity of 1 or more
    let equi = EquinoctialState::new(8_000.0, 0.8, 0.7, 0.0, 0.0, 10.0);
    assert!(matches!(
        equinoctial_to_cartesian(EARTH_MU_KM3_S2, &equi),
        Err(StateError::InvalidInput { .. })
    ));
}

#[test]
fn invalid_inputs_rejected() {
    let cart = CartesianState::new(0.0, 0.0, 0.0, 1.0, 2.0, 3.0);
    assert!(matches!(
        cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart),
        Err(StateError::InvalidInput { .. })
    ));

    let cart = CartesianState::new(-2436.45, -2436.45, 6891.037, 5.088_611, -5.088_611, 0.0);
    assert!(matches!(
        cartesian_to_equinoctial(0.0, &cart),
        Err(StateError::InvalidInput { .. })
    ));
}

#[test]
fn longitude_solve_converges() {
    // Sweep the mean longitude at a moderate eccentricity and verify the
    // conversion reproduces the encoded shape
    for lambda_deg in (0..360).step_by(30) {
        let equi = EquinoctialState::new(8_191.93, 0.15, 0.1, 0.05, -0.02, f64::from(lambda_deg));
        let cart = equinoctial_to_cartesian(EARTH_MU_KM3_S2, &equi).unwrap();
        let back = cartesian_to_equinoctial(EARTH_MU_KM3_S2, &cart).unwrap();
        assert!((back.sma_km - equi.sma_km).abs() < 1e-6, "sma at {lambda_deg}");
        assert!((back.h - equi.h).abs() < 1e-10, "h at {lambda_deg}");
        assert!((back.k - equi.k).abs() < 1e-10, "k at {lambda_deg}");
        assert!((back.p - equi.p).abs() < 1e-12, "p at {lambda_deg}");
        assert!((back.q - equi.q).abs() < 1e-12, "q at {lambda_deg}");
        let mut dl = back.mean_longitude_deg - f64::from(lambda_deg);
        if dl > 180.0 {
            dl -= 360.0;
        } else if dl < -180.0 {
            dl += 360.0;
        }
        assert!(dl.abs() < 1e-6, "mean longitude at {lambda_deg}: {dl}");
    }
}
