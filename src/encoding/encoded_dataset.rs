use crate::encoding::category_encoder::CategoryEncoder;
use crate::historical::record::HistoricalRecord;
use std::fmt;

/// The categorical columns of a [`HistoricalRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    WindGustDir,
    RainTomorrow,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 2] =
        [CategoricalColumn::WindGustDir, CategoricalColumn::RainTomorrow];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::WindGustDir => "wind_gust_dir",
            CategoricalColumn::RainTomorrow => "rain_tomorrow",
        }
    }

    pub fn value(self, record: &HistoricalRecord) -> &str {
        match self {
            CategoricalColumn::WindGustDir => &record.wind_gust_dir,
            CategoricalColumn::RainTomorrow => &record.rain_tomorrow,
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A historical record with its categorical fields replaced by codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedRecord {
    pub min_temp: f64,
    pub max_temp: f64,
    pub wind_gust_dir: u32,
    pub wind_gust_speed: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub temp: f64,
    pub rain_tomorrow: u32,
}

/// Historical records encoded with code tables built from those same records.
///
/// The tables live only as long as this value; nothing is persisted between runs.
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    records: Vec<EncodedRecord>,
    wind_gust_dir: CategoryEncoder,
    rain_tomorrow: CategoryEncoder,
}

impl EncodedDataset {
    pub fn encode(records: &[HistoricalRecord]) -> Self {
        let fit = |column: CategoricalColumn| {
            CategoryEncoder::fit_encode(column.name(), records.iter().map(|r| column.value(r)))
        };
        let (wind_gust_dir, wind_codes) = fit(CategoricalColumn::WindGustDir);
        let (rain_tomorrow, rain_codes) = fit(CategoricalColumn::RainTomorrow);

        let encoded = records
            .iter()
            .zip(wind_codes.into_iter().zip(rain_codes))
            .map(|(r, (wind_code, rain_code))| EncodedRecord {
                min_temp: r.min_temp,
                max_temp: r.max_temp,
                wind_gust_dir: wind_code,
                wind_gust_speed: r.wind_gust_speed,
                humidity: r.humidity,
                pressure: r.pressure,
                temp: r.temp,
                rain_tomorrow: rain_code,
            })
            .collect();

        Self {
            records: encoded,
            wind_gust_dir,
            rain_tomorrow,
        }
    }

    pub fn records(&self) -> &[EncodedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn encoder(&self, column: CategoricalColumn) -> &CategoryEncoder {
        match column {
            CategoricalColumn::WindGustDir => &self.wind_gust_dir,
            CategoricalColumn::RainTomorrow => &self.rain_tomorrow,
        }
    }
}
