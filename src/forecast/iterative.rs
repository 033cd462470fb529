use crate::model::error::ModelError;
use crate::model::step::StepPredictor;

/// Number of future steps every forecast produces.
pub const FORECAST_STEPS: usize = 5;

/// Applies `model` to its own output [`FORECAST_STEPS`] times, starting from `current`.
///
/// Step `k` is the model applied to step `k - 1`, so any error made early is carried
/// into every later step.
///
/// # Examples
///
/// ```
/// use skycast::iterative_forecast;
///
/// let steps = iterative_forecast(&|x: f64| x + 1.0, 20.0).unwrap();
/// assert_eq!(steps, [21.0, 22.0, 23.0, 24.0, 25.0]);
/// ```
pub fn iterative_forecast<P>(model: &P, current: f64) -> Result<[f64; FORECAST_STEPS], ModelError>
where
    P: StepPredictor + ?Sized,
{
    let mut steps = [0.0; FORECAST_STEPS];
    let mut value = current;
    for step in steps.iter_mut() {
        value = model.predict_next(value)?;
        *step = value;
    }
    Ok(steps)
}
