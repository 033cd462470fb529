//! Label encoding for categorical historical columns.
//!
//! Codes are dense (`0..k`) and follow the sorted order of the distinct labels, so the
//! same set of observed categories always yields the same table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of looking up a label in a [`CategoryEncoder`].
///
/// Serializes as the numeric code, or `null` when the label was never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum CategoryCode {
    /// The label was present in the training data and maps to this code.
    Known(u32),
    /// The label never appeared in this run's training data.
    Unknown,
}

impl CategoryCode {
    /// Value fed to the models for this code. Unknown categories sit at `-1`, outside
    /// the range of every real code.
    pub fn as_feature(self) -> f64 {
        match self {
            CategoryCode::Known(code) => f64::from(code),
            CategoryCode::Unknown => -1.0,
        }
    }

    pub fn known(self) -> Option<u32> {
        match self {
            CategoryCode::Known(code) => Some(code),
            CategoryCode::Unknown => None,
        }
    }
}

impl From<Option<u32>> for CategoryCode {
    fn from(value: Option<u32>) -> Self {
        value.map_or(CategoryCode::Unknown, CategoryCode::Known)
    }
}

impl From<CategoryCode> for Option<u32> {
    fn from(value: CategoryCode) -> Self {
        value.known()
    }
}

/// Bijection between the distinct labels of one column and `0..k`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEncoder {
    column: String,
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl CategoryEncoder {
    /// Builds the code table from every label observed in `values`.
    pub fn fit<'a, I>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::fit_encode(column, values).0
    }

    /// Builds the code table and returns the code of each input label, in input order.
    ///
    /// Codes come from the same sorted pass that assigns them, so every input label
    /// is guaranteed a code.
    pub fn fit_encode<'a, I>(column: &str, values: I) -> (Self, Vec<u32>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = values.into_iter().collect();
        let mut order: Vec<usize> = (0..labels.len()).collect();
        order.sort_by_key(|&row| labels[row]);

        let mut classes: Vec<String> = Vec::new();
        let mut row_codes = vec![0u32; labels.len()];
        for row in order {
            let label = labels[row];
            if classes.last().map(String::as_str) != Some(label) {
                classes.push(label.to_string());
            }
            row_codes[row] = (classes.len() - 1) as u32;
        }

        let codes = classes
            .iter()
            .zip(0u32..)
            .map(|(label, code)| (label.clone(), code))
            .collect();
        let encoder = Self {
            column: column.to_string(),
            classes,
            codes,
        };
        (encoder, row_codes)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Observed labels, indexed by their code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn encode(&self, label: &str) -> CategoryCode {
        self.codes.get(label).copied().into()
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compass_encoder() -> CategoryEncoder {
        CategoryEncoder::fit("wind_gust_dir", ["W", "NW", "ENE", "NW", "SSE", "W"])
    }

    #[test]
    fn test_codes_are_dense_and_sorted() {
        let encoder = compass_encoder();

        assert_eq!(encoder.len(), 4);
        assert_eq!(encoder.classes(), ["ENE", "NW", "SSE", "W"]);
        assert_eq!(encoder.encode("ENE"), CategoryCode::Known(0));
        assert_eq!(encoder.encode("W"), CategoryCode::Known(3));
    }

    #[test]
    fn test_round_trip_for_every_observed_label() {
        let encoder = compass_encoder();

        for label in ["W", "NW", "ENE", "SSE"] {
            let code = encoder.encode(label).known().expect("observed label has a code");
            assert_eq!(encoder.decode(code), Some(label));
        }
    }

    #[test]
    fn test_unobserved_label_is_unknown() {
        let encoder = compass_encoder();

        assert_eq!(encoder.encode("SSW"), CategoryCode::Unknown);
        assert_eq!(encoder.encode("nw"), CategoryCode::Unknown);
        assert_eq!(encoder.decode(17), None);
    }

    #[test]
    fn test_unknown_feature_value_is_outside_code_range() {
        assert_eq!(CategoryCode::Unknown.as_feature(), -1.0);
        assert_eq!(CategoryCode::Known(5).as_feature(), 5.0);
    }

    #[test]
    fn test_yes_no_labels() {
        let encoder = CategoryEncoder::fit("rain_tomorrow", ["Yes", "No", "No"]);

        assert_eq!(encoder.encode("No"), CategoryCode::Known(0));
        assert_eq!(encoder.encode("Yes"), CategoryCode::Known(1));
    }

    #[test]
    fn test_fit_encode_codes_every_input_row() {
        let labels = ["W", "NW", "ENE", "NW", "SSE", "W"];
        let (encoder, codes) = CategoryEncoder::fit_encode("wind_gust_dir", labels);

        assert_eq!(encoder, compass_encoder());
        assert_eq!(codes, vec![3, 1, 0, 1, 2, 3]);
        for (label, code) in labels.iter().zip(&codes) {
            assert_eq!(encoder.encode(label), CategoryCode::Known(*code));
        }
    }

    #[test]
    fn test_fit_encode_empty_input() {
        let (encoder, codes) = CategoryEncoder::fit_encode("rain_tomorrow", []);

        assert!(encoder.is_empty());
        assert!(codes.is_empty());
    }

    #[test]
    fn test_code_serializes_as_number_or_null() {
        assert_eq!(serde_json::to_string(&CategoryCode::Known(9)).unwrap(), "9");
        assert_eq!(serde_json::to_string(&CategoryCode::Unknown).unwrap(), "null");
    }
}
