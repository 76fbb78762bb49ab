use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::geo::Coordinates;
use crate::schedule::error::ScheduleError;
use crate::schedule::method::Method;
use crate::schedule::solar::{self, Crossing, HORIZON_DEPRESSION_DEG};

/// The six daily instants, in their fixed order. Sunrise is a marker, not a
/// prayer, but participates in current/next resolution like the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// The prayer immediately after this one in the day, if any.
    pub fn successor(self) -> Option<Prayer> {
        match self {
            Prayer::Fajr => Some(Prayer::Sunrise),
            Prayer::Sunrise => Some(Prayer::Dhuhr),
            Prayer::Dhuhr => Some(Prayer::Asr),
            Prayer::Asr => Some(Prayer::Maghrib),
            Prayer::Maghrib => Some(Prayer::Isha),
            Prayer::Isha => None,
        }
    }
}

/// One day's computed prayer instants for a coordinate + method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Timetable {
    pub date: NaiveDate,
    pub fajr: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
}

impl Timetable {
    /// Compute the six instants for the civil date at the location.
    ///
    /// Coordinate validity (-90..90, -180..180) is the caller's contract; the
    /// solar provider's behavior on nonsense input is inherited as-is.
    pub fn compute(
        coords: Coordinates,
        date: NaiveDate,
        method: Method,
    ) -> Result<Self, ScheduleError> {
        let params = method.parameters();

        let transit = solar::solar_transit_utc_hours(date, coords.longitude_deg);
        let declination = solar::declination_at_transit(date, coords.longitude_deg);
        let asr_altitude =
            solar::asr_altitude_deg(coords.latitude_deg, declination, params.asr_shadow_factor);

        let fajr =
            solar::time_at_sun_altitude(date, coords, -params.fajr_angle_deg, Crossing::Morning)?;
        let sunrise =
            solar::time_at_sun_altitude(date, coords, -HORIZON_DEPRESSION_DEG, Crossing::Morning)?;
        let asr = solar::time_at_sun_altitude(date, coords, asr_altitude, Crossing::Evening)?;
        let maghrib =
            solar::time_at_sun_altitude(date, coords, -HORIZON_DEPRESSION_DEG, Crossing::Evening)?;
        let isha =
            solar::time_at_sun_altitude(date, coords, -params.isha_angle_deg, Crossing::Evening)?;

        Ok(Timetable {
            date,
            fajr: instant(date, fajr),
            sunrise: instant(date, sunrise),
            dhuhr: instant(date, transit),
            asr: instant(date, asr),
            maghrib: instant(date, maghrib),
            isha: instant(date, isha),
        })
    }

    pub fn time(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// The six instants in fixed name order.
    pub fn instants(&self) -> [(Prayer, DateTime<Utc>); 6] {
        [
            (Prayer::Fajr, self.fajr),
            (Prayer::Sunrise, self.sunrise),
            (Prayer::Dhuhr, self.dhuhr),
            (Prayer::Asr, self.asr),
            (Prayer::Maghrib, self.maghrib),
            (Prayer::Isha, self.isha),
        ]
    }
}

fn instant(date: NaiveDate, hours_utc: f64) -> DateTime<Utc> {
    let millis = (hours_utc * 3_600_000.0).round() as i64;
    (date.and_time(NaiveTime::MIN) + Duration::milliseconds(millis)).and_utc()
}

/// Civil calendar date at the location, approximated from the longitude
/// (lon/15 hours off UTC). A service has no device timezone to lean on; this
/// keeps "today" aligned with the location's solar day.
pub fn civil_date_at(coords: Coordinates, now: DateTime<Utc>) -> NaiveDate {
    let offset_minutes = (coords.longitude_deg * 4.0).round() as i64;
    (now + Duration::minutes(offset_minutes)).date_naive()
}

/// Yesterday/today/tomorrow timetables, enough to resolve windows across
/// midnight in either direction.
#[derive(Debug, Clone, Copy)]
pub struct DaySet {
    pub yesterday: Timetable,
    pub today: Timetable,
    pub tomorrow: Timetable,
}

impl DaySet {
    pub fn compute(
        coords: Coordinates,
        now: DateTime<Utc>,
        method: Method,
    ) -> Result<Self, ScheduleError> {
        let today = civil_date_at(coords, now);
        let yesterday = today.pred_opt().ok_or(ScheduleError::DateRange)?;
        let tomorrow = today.succ_opt().ok_or(ScheduleError::DateRange)?;

        Ok(DaySet {
            yesterday: Timetable::compute(coords, yesterday, method)?,
            today: Timetable::compute(coords, today, method)?,
            tomorrow: Timetable::compute(coords, tomorrow, method)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jakarta() -> Coordinates {
        Coordinates::FALLBACK
    }

    #[test]
    fn six_instants_strictly_increasing() {
        for method in Method::ALL {
            for (y, m, d) in [(2024, 1, 15), (2024, 6, 21), (2024, 12, 21), (2025, 3, 1)] {
                let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
                let table = Timetable::compute(jakarta(), date, method).unwrap();
                let instants = table.instants();
                assert_eq!(instants.len(), 6);
                for pair in instants.windows(2) {
                    assert!(
                        pair[0].1 < pair[1].1,
                        "{} !< {} on {} ({})",
                        pair[0].0,
                        pair[1].0,
                        date,
                        method
                    );
                }
            }
        }
    }

    #[test]
    fn dhuhr_lands_near_local_solar_noon() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let table = Timetable::compute(jakarta(), date, Method::default()).unwrap();
        // Jakarta solar noon is around 04:50 UTC (11:50 local).
        let hour = table.dhuhr.timestamp() as f64 / 3600.0 % 24.0;
        assert!(hour > 4.4 && hour < 5.4, "dhuhr at {hour} UTC");
    }

    #[test]
    fn mid_latitude_works_for_all_methods() {
        let london = Coordinates::new(51.5074, -0.1278);
        let date = NaiveDate::from_ymd_opt(2024, 9, 22).unwrap();
        for method in Method::ALL {
            Timetable::compute(london, date, method).unwrap();
        }
    }

    #[test]
    fn civil_date_follows_the_longitude() {
        // 23:00 UTC is already the next day in Jakarta (UTC+~7).
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 23, 0, 0).unwrap();
        assert_eq!(
            civil_date_at(jakarta(), now),
            NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()
        );
        // And still the same day at Greenwich.
        assert_eq!(
            civil_date_at(Coordinates::new(51.5, 0.0), now),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
    }

    #[test]
    fn day_set_covers_three_consecutive_dates() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let days = DaySet::compute(jakarta(), now, Method::default()).unwrap();
        assert_eq!(days.yesterday.date.succ_opt().unwrap(), days.today.date);
        assert_eq!(days.today.date.succ_opt().unwrap(), days.tomorrow.date);
        assert!(days.yesterday.isha < days.today.fajr);
        assert!(days.today.isha < days.tomorrow.fajr);
    }
}
