mod cities;
mod error;
mod geocode;
mod hijri;
mod quran;

pub use cities::{monthly_schedule, City, CityDirectory, CitySchedule, ScheduleRow};
pub use error::ProviderError;
pub use geocode::{reverse_geocode, PlaceName};
pub use hijri::{
    holidays_by_hijri_year, month_calendar, GregorianDate, HijriDate, HijriDay, HijriMonth,
};
pub use quran::{surah_detail, surah_directory, Ayah, Surah, SurahDetail};
