//! Read-only state passed to every disease callback.

use ob_core::Params;

/// What a [`DiseaseModel`][crate::DiseaseModel] may consult while deciding a
/// transition.
pub struct DiseaseContext<'a> {
    /// Simulated time at which the callback happens.
    pub time: f64,

    /// Current parameters (duration, contagiousness, lethality, …).
    pub params: &'a Params,
}

impl<'a> DiseaseContext<'a> {
    #[inline]
    pub fn new(time: f64, params: &'a Params) -> Self {
        Self { time, params }
    }
}
