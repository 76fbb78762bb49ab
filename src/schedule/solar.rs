use chrono::{NaiveDate, NaiveTime};

use crate::geo::Coordinates;
use crate::schedule::error::ScheduleError;

/// Atmospheric refraction plus solar semi-diameter; the sun altitude at
/// apparent sunrise/sunset.
pub const HORIZON_DEPRESSION_DEG: f64 = 0.833;

const J2000_JD: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;

#[derive(Debug, Clone, Copy)]
pub struct SunPosition {
    pub declination_deg: f64,
    pub equation_of_time_hours: f64,
}

/// Which horizon crossing of the day is wanted relative to solar noon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Morning,
    Evening,
}

fn julian_day(date: NaiveDate, hours_utc: f64) -> f64 {
    let midnight = date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64;
    midnight / 86400.0 + UNIX_EPOCH_JD + hours_utc / 24.0
}

/// Low-precision solar ephemeris (Astronomical Almanac approximation),
/// accurate to well under a minute of time over the current era.
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000_JD;

    let mean_anomaly_deg = (357.529 + 0.98560028 * d).rem_euclid(360.0);
    let mean_longitude_deg = (280.459 + 0.98564736 * d).rem_euclid(360.0);
    let g = mean_anomaly_deg.to_radians();
    let ecliptic_longitude = (mean_longitude_deg
        + 1.915 * g.sin()
        + 0.020 * (2.0 * g).sin())
    .to_radians();
    let obliquity = (23.439 - 0.00000036 * d).to_radians();

    let declination_deg = (obliquity.sin() * ecliptic_longitude.sin())
        .asin()
        .to_degrees();
    let right_ascension_hours = (obliquity.cos() * ecliptic_longitude.sin())
        .atan2(ecliptic_longitude.cos())
        .to_degrees()
        .rem_euclid(360.0)
        / 15.0;

    let mut equation_of_time_hours = mean_longitude_deg / 15.0 - right_ascension_hours;
    if equation_of_time_hours > 12.0 {
        equation_of_time_hours -= 24.0;
    } else if equation_of_time_hours < -12.0 {
        equation_of_time_hours += 24.0;
    }

    SunPosition {
        declination_deg,
        equation_of_time_hours,
    }
}

/// Solar transit (apparent noon) for the date, in decimal UTC hours.
pub fn solar_transit_utc_hours(date: NaiveDate, longitude_deg: f64) -> f64 {
    let mut t = 12.0 - longitude_deg / 15.0;
    // Two refinement passes pin the equation of time at the transit itself
    for _ in 0..2 {
        let pos = sun_position(julian_day(date, t));
        t = 12.0 - longitude_deg / 15.0 - pos.equation_of_time_hours;
    }
    t
}

fn hour_angle_hours(lat_deg: f64, declination_deg: f64, altitude_deg: f64) -> Option<f64> {
    let lat = lat_deg.to_radians();
    let decl = declination_deg.to_radians();
    let alt = altitude_deg.to_radians();

    let cos_h = (alt.sin() - decl.sin() * lat.sin()) / (decl.cos() * lat.cos());
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(cos_h.acos().to_degrees() / 15.0)
}

/// UTC hours at which the sun reaches `altitude_deg` on the given side of
/// solar noon. Fails where the sun never gets there (polar day/night,
/// or extreme depression angles at high latitude).
pub fn time_at_sun_altitude(
    date: NaiveDate,
    coords: Coordinates,
    altitude_deg: f64,
    crossing: Crossing,
) -> Result<f64, ScheduleError> {
    let transit = solar_transit_utc_hours(date, coords.longitude_deg);
    let mut t = transit;

    for _ in 0..2 {
        let pos = sun_position(julian_day(date, t));
        let ha = hour_angle_hours(coords.latitude_deg, pos.declination_deg, altitude_deg)
            .ok_or(ScheduleError::SunNeverReaches {
                altitude_deg,
                latitude_deg: coords.latitude_deg,
                date,
            })?;
        t = match crossing {
            Crossing::Morning => transit - ha,
            Crossing::Evening => transit + ha,
        };
    }

    Ok(t)
}

/// Sun altitude at asr: shadow of an object equals `shadow_factor` times its
/// height plus the noon shadow.
pub fn asr_altitude_deg(lat_deg: f64, declination_deg: f64, shadow_factor: f64) -> f64 {
    let noon_zenith = (lat_deg - declination_deg).abs().to_radians();
    (1.0 / (shadow_factor + noon_zenith.tan())).atan().to_degrees()
}

/// Declination at the day's transit, used to fix the asr altitude.
pub fn declination_at_transit(date: NaiveDate, longitude_deg: f64) -> f64 {
    let transit = solar_transit_utc_hours(date, longitude_deg);
    sun_position(julian_day(date, transit)).declination_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn declination_stays_within_obliquity() {
        for day in [
            date(2024, 1, 1),
            date(2024, 3, 20),
            date(2024, 6, 21),
            date(2024, 9, 22),
            date(2024, 12, 21),
        ] {
            let pos = sun_position(julian_day(day, 12.0));
            assert!(pos.declination_deg.abs() < 23.5);
            assert!(pos.equation_of_time_hours.abs() < 0.3);
        }
    }

    #[test]
    fn june_solstice_declination_is_near_maximum() {
        let pos = sun_position(julian_day(date(2024, 6, 21), 12.0));
        assert!(pos.declination_deg > 23.0);
        let pos = sun_position(julian_day(date(2024, 12, 21), 12.0));
        assert!(pos.declination_deg < -23.0);
    }

    #[test]
    fn transit_tracks_longitude() {
        // Jakarta is ~107°E, so solar noon falls a bit before 05:00 UTC.
        let t = solar_transit_utc_hours(date(2024, 3, 20), 106.8456);
        assert!(t > 4.4 && t < 5.4, "transit {t}");
        // Greenwich noon stays near 12:00 UTC.
        let t = solar_transit_utc_hours(date(2024, 3, 20), 0.0);
        assert!(t > 11.5 && t < 12.5, "transit {t}");
    }

    #[test]
    fn morning_crossing_precedes_evening_crossing() {
        let coords = Coordinates::FALLBACK;
        let day = date(2024, 3, 20);
        let sunrise =
            time_at_sun_altitude(day, coords, -HORIZON_DEPRESSION_DEG, Crossing::Morning).unwrap();
        let sunset =
            time_at_sun_altitude(day, coords, -HORIZON_DEPRESSION_DEG, Crossing::Evening).unwrap();
        let transit = solar_transit_utc_hours(day, coords.longitude_deg);
        assert!(sunrise < transit && transit < sunset);
        // Near the equinox, day length is close to 12 hours.
        let day_length = sunset - sunrise;
        assert!((day_length - 12.0).abs() < 0.5, "day length {day_length}");
    }

    #[test]
    fn polar_night_is_an_error() {
        let coords = Coordinates::new(78.0, 15.0); // Svalbard
        let result = time_at_sun_altitude(
            date(2024, 12, 21),
            coords,
            -HORIZON_DEPRESSION_DEG,
            Crossing::Morning,
        );
        assert!(matches!(
            result,
            Err(ScheduleError::SunNeverReaches { .. })
        ));
    }

    #[test]
    fn asr_altitude_is_below_noon_altitude() {
        // At 30°N with declination 10°, noon zenith distance is 20°.
        let alt = asr_altitude_deg(30.0, 10.0, 1.0);
        assert!(alt > 0.0 && alt < 70.0);
    }
}
