extern crate orbital_states;

use orbital_states::keplerian::CartesianState;
use orbital_states::spherical::{
    cartesian_to_spherical_azfpa, cartesian_to_spherical_radec, spherical_azfpa_to_cartesian,
    spherical_radec_to_cartesian, SphericalAzFpaState, SphericalRaDecState,
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

fn circ_inc_cart() -> CartesianState {
    CartesianState::new(-2436.45, -2436.45, 6891.037, 5.088_611, -5.088_611, 0.0)
}

#[test]
fn radec_elements() {
    let cart = circ_inc_cart();
    let sph = cartesian_to_spherical_radec(&cart).unwrap();
    f64_eq!(sph.rmag_km, cart.rmag_km(), "rmag");
    f64_eq!(sph.vmag_km_s, cart.vmag_km_s(), "vmag");
    // Position RA is atan2(y, x), here exactly -135 deg, and is not normalized
    f64_eq!(sph.ra_deg, -135.0, "ra");
    f64_eq!(sph.dec_deg, (6891.037 / cart.rmag_km()).asin().to_degrees(), "dec");
    // Velocity along (+x, -x) diagonal with no z component
    f64_eq!(sph.ra_vel_deg, -45.0, "raV");
    f64_eq!(sph.dec_vel_deg, 0.0, "decV");
}

#[test]
fn radec_round_trip() {
    let cart = circ_inc_cart();
    let sph = cartesian_to_spherical_radec(&cart).unwrap();
    let back = spherical_radec_to_cartesian(&sph);
    f64_eq!(back.x_km, cart.x_km, "x");
    f64_eq!(back.y_km, cart.y_km, "y");
    f64_eq!(back.z_km, cart.z_km, "z");
    f64_eq!(back.vx_km_s, cart.vx_km_s, "vx");
    f64_eq!(back.vy_km_s, cart.vy_km_s, "vy");
    f64_eq!(back.vz_km_s, cart.vz_km_s, "vz");
}

#[test]
fn azfpa_elements() {
    let cart = circ_inc_cart();
    let sph = cartesian_to_spherical_azfpa(&cart).unwrap();
    f64_eq!(sph.rmag_km, cart.rmag_km(), "rmag");
    f64_eq!(sph.vmag_km_s, cart.vmag_km_s(), "vmag");
    f64_eq!(sph.ra_deg, -135.0, "ra");
    // This state sits at periapsis: the velocity is normal to the radius
    f64_eq!(sph.fpa_deg, 90.0, "fpa");
}

#[test]
fn azfpa_round_trip() {
    let cart = circ_inc_cart();
    let sph = cartesian_to_spherical_azfpa(&cart).unwrap();
    let back = spherical_azfpa_to_cartesian(&sph);
    f64_eq!(back.x_km, cart.x_km, "x");
    f64_eq!(back.y_km, cart.y_km, "y");
    f64_eq!(back.z_km, cart.z_km, "z");
    f64_eq!(back.vx_km_s, cart.vx_km_s, "vx");
    f64_eq!(back.vy_km_s, cart.vy_km_s, "vy");
    f64_eq!(back.vz_km_s, cart.vz_km_s, "vz");
}

#[test]
fn azfpa_round_trip_eccentric() {
    // Away from periapsis, so the flight path angle is not 90 degrees
    let cart = CartesianState::new(
        5_946.673_548_288_958,
        1_656.154_606_023_661,
        2_259.012_129_598_249,
        -3.098_683_050_943_824,
        4.579_534_132_135_011,
        6.246_541_551_539_432,
    );
    let sph = cartesian_to_spherical_azfpa(&cart).unwrap();
    assert!((sph.fpa_deg - 90.0).abs() > 1.0, "not at an apsis");
    let back = spherical_azfpa_to_cartesian(&sph);
    f64_eq!(back.x_km, cart.x_km, "x");
    f64_eq!(back.y_km, cart.y_km, "y");
    f64_eq!(back.z_km, cart.z_km, "z");
    f64_eq!(back.vx_km_s, cart.vx_km_s, "vx");
    f64_eq!(back.vy_km_s, cart.vy_km_s, "vy");
    f64_eq!(back.vz_km_s, cart.vz_km_s, "vz");
}

#[test]
fn polar_velocity_right_ascension() {
    // A velocity right ascension of 90 deg puts the whole speed on the y axis
    let sph = SphericalRaDecState::new(7_000.0, 30.0, 10.0, 7.5, 90.0, 0.0);
    let cart = spherical_radec_to_cartesian(&sph);
    f64_eq!(cart.vx_km_s, 0.0, "vx");
    f64_eq!(cart.vy_km_s, 7.5, "vy");
    f64_eq!(cart.vz_km_s, 0.0, "vz");

    let back = cartesian_to_spherical_radec(&cart).unwrap();
    f64_eq!(back.ra_vel_deg, 90.0, "raV");
}

#[test]
fn zero_magnitudes_rejected() {
    let cart = CartesianState::new(0.0, 0.0, 0.0, 1.0, 2.0, 3.0);
    assert!(matches!(
        cartesian_to_spherical_radec(&cart),
        Err(StateError::InvalidInput { .. })
    ));
    assert!(matches!(
        cartesian_to_spherical_azfpa(&cart),
        Err(StateError::InvalidInput { .. })
    ));

    let cart = CartesianState::new(7_000.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    assert!(cartesian_to_spherical_radec(&cart).is_err());
    assert!(cartesian_to_spherical_azfpa(&cart).is_err());
}

#[test]
fn azimuth_ordering_in_vector_form() {
    // The vector form carries the azimuth at index 4 and the flight path
    // angle at index 5
    let sph = SphericalAzFpaState::new(7_100.0, 10.0, 20.0, 7.35, 82.0, 88.6);
    let vec = sph.to_vec();
    assert_eq!(vec[4], 82.0);
    assert_eq!(vec[5], 88.6);
}
