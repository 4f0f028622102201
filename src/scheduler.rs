use crate::cancel::{cancel_pair, CancelHandle};
use crate::error::RecommendError;
use crate::model::{IngredientAnalysis, IngredientSet};
use crate::providers::CompletionOptions;
use crate::recommender::RecipeRecommender;
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Debounces ingredient analysis so that only the latest request is answered.
///
/// Each call to [`AnalysisScheduler::analyze`] cancels whatever request came
/// before it, whether that request is still waiting out the debounce period or
/// already talking to the completion service. Superseded calls resolve to `None`.
pub struct AnalysisScheduler {
    recommender: Arc<RecipeRecommender>,
    debounce: Duration,
    current: Mutex<Option<CancelHandle>>,
}

impl AnalysisScheduler {
    pub fn new(recommender: Arc<RecipeRecommender>, debounce: Duration) -> Self {
        Self {
            recommender,
            debounce,
            current: Mutex::new(None),
        }
    }

    pub async fn analyze(&self, ingredients: &IngredientSet) -> Option<IngredientAnalysis> {
        let (handle, signal) = cancel_pair();
        if let Some(previous) = self.slot().replace(handle.clone()) {
            debug!("Superseding pending ingredient analysis");
            previous.cancel();
        }

        tokio::select! {
            biased;
            _ = signal.cancelled() => return None,
            _ = tokio::time::sleep(self.debounce) => {}
        }

        let options = CompletionOptions::default().with_cancel(signal.clone());
        let result = self
            .recommender
            .try_analyze_with(ingredients, &options)
            .await;

        {
            let mut slot = self.slot();
            if slot.as_ref().is_some_and(|current| current.same_as(&handle)) {
                slot.take();
            }
        }

        if signal.is_cancelled() {
            return None;
        }
        match result {
            Ok(analysis) => Some(analysis),
            Err(RecommendError::Cancelled) => None,
            Err(e) => {
                warn!("Ingredient analysis failed ({}): {}", e.kind(), e);
                Some(IngredientAnalysis::default())
            }
        }
    }

    /// Cancel any pending analysis, e.g. when the ingredient list is cleared.
    pub fn cancel_pending(&self) {
        if let Some(previous) = self.slot().take() {
            previous.cancel();
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<CancelHandle>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
