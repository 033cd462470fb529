use ordered_float::OrderedFloat;

/// One day of historical observations.
#[derive(Debug, PartialEq, Clone)]
pub struct HistoricalRecord {
    pub min_temp: f64,
    pub max_temp: f64,
    /// Compass label of the strongest gust, e.g. `SSW`.
    pub wind_gust_dir: String,
    pub wind_gust_speed: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub temp: f64,
    /// `Yes` or `No` label for rain on the following day.
    pub rain_tomorrow: String,
}

/// Hashable view of a record, used to detect exact duplicate rows.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct RecordKey<'a> {
    numbers: [OrderedFloat<f64>; 6],
    wind_gust_dir: &'a str,
    rain_tomorrow: &'a str,
}

impl HistoricalRecord {
    pub(crate) fn key(&self) -> RecordKey<'_> {
        RecordKey {
            numbers: [
                OrderedFloat(self.min_temp),
                OrderedFloat(self.max_temp),
                OrderedFloat(self.wind_gust_speed),
                OrderedFloat(self.humidity),
                OrderedFloat(self.pressure),
                OrderedFloat(self.temp),
            ],
            wind_gust_dir: &self.wind_gust_dir,
            rain_tomorrow: &self.rain_tomorrow,
        }
    }
}
