use crate::geo::Coordinates;

/// The Kaaba in Mecca, the fixed target of every qibla bearing.
pub const KAABA: Coordinates = Coordinates {
    latitude_deg: 21.4225,
    longitude_deg: 39.8262,
};

/// Great-circle initial bearing from `origin` toward the Kaaba, in [0, 360).
///
/// Degenerate origins at the target itself resolve to 0.0 instead of letting
/// atan2 rounding pick an arbitrary direction.
pub fn qibla_bearing_deg(origin: Coordinates) -> f64 {
    let phi = origin.lat_rad();
    let lambda = origin.lon_rad();
    let phi_k = KAABA.lat_rad();
    let lambda_k = KAABA.lon_rad();

    let delta_lambda = lambda_k - lambda;
    let x = delta_lambda.sin();
    let y = phi.cos() * phi_k.tan() - phi.sin() * delta_lambda.cos();

    if x.abs() < 1e-9 && y.abs() < 1e-9 {
        return 0.0;
    }

    x.atan2(y).to_degrees().rem_euclid(360.0)
}

pub fn normalize_deg(angle_deg: f64) -> f64 {
    angle_deg.rem_euclid(360.0)
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
pub fn shortest_diff_deg(from_deg: f64, to_deg: f64) -> f64 {
    let mut diff = (to_deg - from_deg).rem_euclid(360.0);
    if diff > 180.0 {
        diff -= 360.0;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jakarta_points_west_northwest() {
        let bearing = qibla_bearing_deg(Coordinates::new(-6.2088, 106.8456));
        assert!((bearing - 295.0).abs() < 1.0, "bearing {bearing}");
    }

    #[test]
    fn origin_at_the_kaaba_is_deterministic() {
        let bearing = qibla_bearing_deg(KAABA);
        assert_eq!(bearing, 0.0);
        assert!(!bearing.is_nan());
    }

    #[test]
    fn due_north_and_due_south_of_the_kaaba() {
        let from_south = qibla_bearing_deg(Coordinates::new(0.0, 39.8262));
        assert!(from_south.abs() < 0.01 || (360.0 - from_south) < 0.01);

        let from_north = qibla_bearing_deg(Coordinates::new(45.0, 39.8262));
        assert!((from_north - 180.0).abs() < 0.01);
    }

    #[test]
    fn bearing_stays_in_range() {
        for lat in [-80.0, -30.0, 0.0, 30.0, 80.0] {
            for lon in [-170.0, -60.0, 0.0, 60.0, 170.0] {
                let b = qibla_bearing_deg(Coordinates::new(lat, lon));
                assert!((0.0..360.0).contains(&b), "bearing {b} at {lat},{lon}");
            }
        }
    }

    #[test]
    fn shortest_diff_crosses_the_wrap_cleanly() {
        assert_eq!(shortest_diff_deg(350.0, 10.0), 20.0);
        assert_eq!(shortest_diff_deg(10.0, 350.0), -20.0);
        assert_eq!(shortest_diff_deg(0.0, 180.0), 180.0);
        assert_eq!(shortest_diff_deg(90.0, 90.0), 0.0);
    }
}
