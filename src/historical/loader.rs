use crate::historical::error::DataError;
use crate::historical::record::HistoricalRecord;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const COL_MIN_TEMP: &str = "min_temp";
const COL_MAX_TEMP: &str = "max_temp";
const COL_WIND_GUST_DIR: &str = "wind_gust_dir";
const COL_WIND_GUST_SPEED: &str = "wind_gust_speed";
const COL_HUMIDITY: &str = "humidity";
const COL_PRESSURE: &str = "pressure";
const COL_TEMP: &str = "temp";
const COL_RAIN_TOMORROW: &str = "rain_tomorrow";

/// Column names the loader requires, in their canonical snake_case spelling.
///
/// Headers are matched ignoring case and underscores, so `MinTemp` and `min_temp`
/// both resolve to `min_temp`. Any other columns in the file are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_MIN_TEMP,
    COL_MAX_TEMP,
    COL_WIND_GUST_DIR,
    COL_WIND_GUST_SPEED,
    COL_HUMIDITY,
    COL_PRESSURE,
    COL_TEMP,
    COL_RAIN_TOMORROW,
];

const NULL_MARKERS: [&str; 2] = ["NA", "NaN"];

fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Reads the historical daily record set and cleans it for training.
pub struct HistoricalDataLoader {
    path: PathBuf,
}

impl HistoricalDataLoader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the CSV, drops incomplete rows, then drops exact duplicates.
    ///
    /// Row order of the surviving records is preserved. An empty result is not an
    /// error here; callers that train on the records must reject it themselves.
    pub fn load(&self) -> Result<Vec<HistoricalRecord>, DataError> {
        std::fs::metadata(&self.path).map_err(|e| DataError::Unreadable(self.path.clone(), e))?;

        let df = self.read_frame()?;
        let columns = self.resolve_columns(&df)?;
        if df.height() == 0 {
            warn!("Historical dataset {:?} contains no rows", self.path);
            return Ok(Vec::new());
        }

        let min_temp = numeric_values(&df, &columns[0])?;
        let max_temp = numeric_values(&df, &columns[1])?;
        let wind_gust_dir = label_values(&df, &columns[2])?;
        let wind_gust_speed = numeric_values(&df, &columns[3])?;
        let humidity = numeric_values(&df, &columns[4])?;
        let pressure = numeric_values(&df, &columns[5])?;
        let temp = numeric_values(&df, &columns[6])?;
        let rain_tomorrow = label_values(&df, &columns[7])?;

        let complete: Vec<HistoricalRecord> = (0..df.height())
            .filter_map(|i| {
                Some(HistoricalRecord {
                    min_temp: min_temp[i]?,
                    max_temp: max_temp[i]?,
                    wind_gust_dir: wind_gust_dir[i].clone()?,
                    wind_gust_speed: wind_gust_speed[i]?,
                    humidity: humidity[i]?,
                    pressure: pressure[i]?,
                    temp: temp[i]?,
                    rain_tomorrow: rain_tomorrow[i].clone()?,
                })
            })
            .collect();
        let dropped_incomplete = df.height() - complete.len();

        let records = deduplicate(complete);
        info!(
            "Loaded {} historical records from {:?} ({} rows read, {} incomplete)",
            records.len(),
            self.path,
            df.height(),
            dropped_incomplete
        );
        if records.is_empty() {
            warn!("Historical dataset {:?} is empty after cleaning", self.path);
        }
        Ok(records)
    }

    fn read_frame(&self) -> Result<DataFrame, DataError> {
        let null_values: Vec<PlSmallStr> = NULL_MARKERS.iter().map(|m| (*m).into()).collect();
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .map_parse_options(|parse_options| {
                parse_options.with_null_values(Some(NullValues::AllColumns(null_values.clone())))
            })
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| DataError::CsvRead {
                path: self.path.clone(),
                source: e,
            })?
            .finish()
            .map_err(|e| DataError::CsvRead {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Maps each required column to the header actually used in the file.
    fn resolve_columns(&self, df: &DataFrame) -> Result<Vec<String>, DataError> {
        let headers: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        debug!("Historical dataset headers: {:?}", headers);

        REQUIRED_COLUMNS
            .iter()
            .map(|required| {
                let wanted = normalize_header(required);
                headers
                    .iter()
                    .find(|header| normalize_header(header) == wanted)
                    .cloned()
                    .ok_or_else(|| DataError::MissingColumn {
                        path: self.path.clone(),
                        column: required.to_string(),
                    })
            })
            .collect()
    }
}

fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DataError> {
    let column = df.column(name).map_err(|e| DataError::ColumnProcessing {
        column: name.to_string(),
        source: e,
    })?;
    // A column with no values at all is read as text; every row of it is incomplete.
    if column.null_count() == column.len() {
        debug!("Column '{}' has no values", name);
        return Ok(vec![None; column.len()]);
    }
    let dtype = column.dtype();
    if !(dtype.is_float() || dtype.is_integer() || *dtype == DataType::Null) {
        return Err(DataError::NonNumericColumn {
            column: name.to_string(),
            found: dtype.clone(),
        });
    }
    let as_float = column
        .cast(&DataType::Float64)
        .map_err(|e| DataError::ColumnProcessing {
            column: name.to_string(),
            source: e,
        })?;
    let values = as_float.f64().map_err(|e| DataError::ColumnProcessing {
        column: name.to_string(),
        source: e,
    })?;
    Ok(values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

fn label_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DataError> {
    let column = df.column(name).map_err(|e| DataError::ColumnProcessing {
        column: name.to_string(),
        source: e,
    })?;
    let as_text = column
        .cast(&DataType::String)
        .map_err(|e| DataError::ColumnProcessing {
            column: name.to_string(),
            source: e,
        })?;
    let values = as_text.str().map_err(|e| DataError::ColumnProcessing {
        column: name.to_string(),
        source: e,
    })?;
    Ok(values
        .into_iter()
        .map(|v| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect())
}

/// Removes rows that are exact copies of an earlier row, keeping first occurrences.
pub fn deduplicate(records: Vec<HistoricalRecord>) -> Vec<HistoricalRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let keep: Vec<bool> = records.iter().map(|r| seen.insert(r.key())).collect();
    drop(seen);
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

/// Convenience wrapper around [`HistoricalDataLoader::load`].
pub fn load_historical(path: &Path) -> Result<Vec<HistoricalRecord>, DataError> {
    HistoricalDataLoader::new(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const HEADER: &str =
        "MinTemp,MaxTemp,WindGustDir,WindGustSpeed,Humidity,Pressure,Temp,RainTomorrow\n";

    #[test]
    fn test_load_drops_incomplete_and_duplicate_rows() -> Result<(), DataError> {
        let csv = format!(
            "{HEADER}\
             8.0,24.3,NW,30,29,1015.0,23.6,Yes\n\
             14.0,26.9,ENE,39,36,1008.4,25.7,Yes\n\
             8.0,24.3,NW,30,29,1015.0,23.6,Yes\n\
             13.7,23.4,NA,85,69,1007.2,20.2,Yes\n\
             13.3,15.5,W,54,,1007.0,14.1,No\n\
             7.6,16.1,SSE,50,56,1018.5,15.5,No\n"
        );
        let file = write_csv(&csv);
        let records = load_historical(file.path())?;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].wind_gust_dir, "NW");
        assert_eq!(records[1].wind_gust_dir, "ENE");
        assert_eq!(records[2].wind_gust_dir, "SSE");
        assert_eq!(records[2].humidity, 56.0);
        assert_eq!(records[2].rain_tomorrow, "No");
        Ok(())
    }

    #[test]
    fn test_load_accepts_snake_case_headers_and_extra_columns() -> Result<(), DataError> {
        let csv = "date,min_temp,max_temp,wind_gust_dir,wind_gust_speed,humidity,pressure,temp,rain_tomorrow,Rainfall\n\
                   2024-01-01,1.0,10.0,N,20,50,1010,9.0,No,0.0\n";
        let file = write_csv(csv);
        let records = load_historical(file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].max_temp, 10.0);
        assert_eq!(records[0].pressure, 1010.0);
        Ok(())
    }

    #[test]
    fn test_load_missing_column() {
        let csv = "MinTemp,MaxTemp,WindGustDir,WindGustSpeed,Humidity,Pressure,Temp\n\
                   1.0,10.0,N,20,50,1010,9.0\n";
        let file = write_csv(csv);
        let err = load_historical(file.path()).unwrap_err();

        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "rain_tomorrow"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_text_in_numeric_column() {
        let csv = format!("{HEADER}1.0,10.0,N,fast,50,1010,9.0,No\n");
        let file = write_csv(&csv);
        let err = load_historical(file.path()).unwrap_err();

        assert!(matches!(err, DataError::NonNumericColumn { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_historical(&dir.path().join("absent.csv")).unwrap_err();

        assert!(matches!(err, DataError::Unreadable(..)));
    }

    #[test]
    fn test_load_all_rows_incomplete_is_empty_not_error() -> Result<(), DataError> {
        let csv = format!("{HEADER}1.0,10.0,NA,20,50,1010,9.0,No\n2.0,,N,20,50,1010,9.0,Yes\n");
        let file = write_csv(&csv);
        let records = load_historical(file.path())?;

        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_numeric_column_without_values_is_empty() -> Result<(), DataError> {
        let csv = format!("{HEADER}1.0,10.0,N,NA,50,1010,9.0,No\n2.0,11.0,S,NA,55,1011,9.5,Yes\n");
        let file = write_csv(&csv);
        let records = load_historical(file.path())?;

        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_numeric_column_of_empty_cells_is_empty() -> Result<(), DataError> {
        let csv = format!("{HEADER}1.0,10.0,N,,50,1010,9.0,No\n2.0,11.0,S,,55,1011,9.5,Yes\n");
        let file = write_csv(&csv);
        let records = load_historical(file.path())?;

        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_header_only_is_empty() -> Result<(), DataError> {
        let file = write_csv(HEADER);
        let records = load_historical(file.path())?;

        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_deduplicate_keeps_first_occurrence_order() {
        let make = |t: f64, dir: &str| HistoricalRecord {
            min_temp: t,
            max_temp: t + 10.0,
            wind_gust_dir: dir.to_string(),
            wind_gust_speed: 30.0,
            humidity: 50.0,
            pressure: 1012.0,
            temp: t + 5.0,
            rain_tomorrow: "No".to_string(),
        };
        let records = vec![make(1.0, "N"), make(2.0, "S"), make(1.0, "N"), make(1.0, "E")];
        let unique = deduplicate(records);

        assert_eq!(unique, vec![make(1.0, "N"), make(2.0, "S"), make(1.0, "E")]);
    }
}
