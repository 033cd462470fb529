use crate::model::error::ModelError;

/// Feature rows paired with numeric targets, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    values: Vec<f64>,
    targets: Vec<f64>,
    width: usize,
}

impl TrainingSet {
    /// Validates and packs `features`/`targets`.
    ///
    /// # Errors
    ///
    /// * [`ModelError::EmptyTrainingSet`] when there are no rows.
    /// * [`ModelError::LengthMismatch`] when the row and target counts differ.
    /// * [`ModelError::FeatureWidth`] when rows have differing or zero widths.
    /// * [`ModelError::NonFiniteValue`] for NaN or infinite features or targets.
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self, ModelError> {
        if features.len() != targets.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                targets: targets.len(),
            });
        }
        let width = match features.first() {
            None => return Err(ModelError::EmptyTrainingSet),
            Some(first) if first.is_empty() => {
                return Err(ModelError::FeatureWidth {
                    expected: 1,
                    found: 0,
                })
            }
            Some(first) => first.len(),
        };

        let mut values = Vec::with_capacity(features.len() * width);
        for (row, (feature_row, target)) in features.iter().zip(&targets).enumerate() {
            if feature_row.len() != width {
                return Err(ModelError::FeatureWidth {
                    expected: width,
                    found: feature_row.len(),
                });
            }
            if !target.is_finite() || feature_row.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::NonFiniteValue { row });
            }
            values.extend_from_slice(feature_row);
        }

        Ok(Self {
            values,
            targets,
            width,
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of features per row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.width..(index + 1) * self.width]
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Copies the listed rows into a new set, keeping their order.
    pub fn subset(&self, indices: &[usize]) -> Result<Self, ModelError> {
        let features = indices.iter().map(|&i| self.row(i).to_vec()).collect();
        let targets = indices.iter().map(|&i| self.targets[i]).collect();
        Self::new(features, targets)
    }
}
