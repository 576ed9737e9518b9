// src/dashboard/state.rs
use crate::api::PredictForm;

/// Navigation tabs of the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Dashboard,
    Jobs,
    Skills,
    Predictor,
}

/// Outcome of a list fetch. Keeping `Failed` separate from an empty `Loaded`
/// preserves the reason even though rendering shows both as an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

impl<T> LoadState<Vec<T>> {
    /// Rendering view of the list: anything not successfully loaded is empty.
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// Salary predictor panel state.
#[derive(Debug, Clone, Default)]
pub struct PredictorState {
    pub form: PredictForm,
    pub predicting: bool,
    /// Predicted salary; `None` until a prediction succeeds.
    pub result: Option<f64>,
    pub error: Option<String>,
}
