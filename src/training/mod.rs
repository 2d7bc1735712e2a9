//! Model Trainer
//!
//! Fits a regression and a classification model per position from the
//! pattern store's corpus, and blends model output with the store's
//! historical enhancement.
//!
//! - `dataset`: training samples and feature normalization
//! - `model`: linear models, their scoring, and trainer outputs
//! - `fitting`: pluggable weight fitting strategies

pub mod dataset;
pub mod fitting;
pub mod model;


use crate::{
    config::EngineConfig,
    error::Result,
    history::{
        models::{HistoricalEnhancement, ProjectionContext},
        HistoricalPatternStore, PatternIndex,
    },
    util::round2,
    PlayerId, Position,
};
use dataset::{build_training_set, position_samples, TrainingInput, TrainingSample};
use fitting::{fitter_for, train_position, WeightFitter};
use model::{MlEnhancedProjection, PositionModels, PositionStatus, TrainingStatus};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const HISTORICAL_WEIGHT: f64 = 0.6;
const ML_WEIGHT: f64 = 0.4;
const MAX_CONFIDENCE: f64 = 95.0;
/// Boom probability reported when no model applies.
pub const DEFAULT_BOOM_PROBABILITY: u8 = 20;

type ModelMap = HashMap<Position, Arc<PositionModels>>;

pub struct ModelTrainer {
    store: Arc<HistoricalPatternStore>,
    fitter: Arc<dyn WeightFitter>,
    positions: Vec<Position>,
    min_samples: usize,
    models: RwLock<ModelMap>,
    initialized: AtomicBool,
    init_lock: Mutex<()>,
}

impl ModelTrainer {
    pub fn new(store: Arc<HistoricalPatternStore>, config: &EngineConfig) -> Self {
        Self {
            store,
            fitter: Arc::from(fitter_for(config.fitter)),
            positions: config.trained_positions.clone(),
            min_samples: config.min_training_samples,
            models: RwLock::new(HashMap::new()),
            initialized: AtomicBool::new(false),
            init_lock: Mutex::new(()),
        }
    }

    pub fn with_fitter(mut self, fitter: Box<dyn WeightFitter>) -> Self {
        self.fitter = Arc::from(fitter);
        self
    }

    pub fn store(&self) -> &Arc<HistoricalPatternStore> {
        &self.store
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn models_for(&self, position: Position) -> Option<Arc<PositionModels>> {
        self.models.read().get(&position).cloned()
    }

    /// Initialize the pattern store, then fit every configured position.
    ///
    /// Safe to call concurrently; only the first caller trains. A store that
    /// fails to load yields no models and leaves the trainer uninitialized, so
    /// the next call tries again.
    pub async fn initialize_training(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }
        let _guard = self.init_lock.lock().await;
        if self.is_initialized() {
            return Ok(());
        }

        info!(fitter = self.fitter.name(), "initializing model training");
        if !self.store.initialize().await {
            warn!("historical data unavailable, models will not be trained");
            return Ok(());
        }
        self.train_models().await?;
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Reload the history and replace the whole model set.
    pub async fn retrain_models(&self) -> Result<()> {
        let _guard = self.init_lock.lock().await;
        info!("retraining models with updated data");
        let loaded = self.store.refresh().await;
        self.train_models().await?;
        self.initialized.store(loaded, Ordering::Release);
        Ok(())
    }

    /// Fit and install the models for a single position.
    ///
    /// Returns `false` when the position has too few samples; any model it
    /// had before is left in place.
    pub fn train_position_model(&self, position: Position) -> Result<bool> {
        let Some(index) = self.store.snapshot() else {
            warn!(%position, "no historical data loaded, skipping training");
            return Ok(false);
        };
        let samples = position_samples(&index, position);
        match fit_position(self.fitter.as_ref(), self.min_samples, position, &samples)? {
            Some(models) => {
                self.models.write().insert(position, Arc::new(models));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fit every configured position off the async runtime and swap the
    /// whole model set in at once.
    async fn train_models(&self) -> Result<()> {
        let models = match self.store.snapshot() {
            Some(index) => {
                let fitter = Arc::clone(&self.fitter);
                let positions = self.positions.clone();
                let min_samples = self.min_samples;
                tokio::task::spawn_blocking(move || {
                    fit_all(&index, fitter.as_ref(), &positions, min_samples)
                })
                .await??
            }
            None => ModelMap::new(),
        };
        info!(positions = models.len(), "model training complete");
        *self.models.write() = models;
        Ok(())
    }

    /// Blend the historical enhancement with the position's models.
    ///
    /// Without a model for `position`, or without a pattern for the player,
    /// the historical enhancement is returned unchanged with a boom
    /// probability of 20. Only a malformed model is an error.
    pub fn enhance_projection(
        &self,
        player_id: &PlayerId,
        position: Position,
        base_projection: f64,
        context: &ProjectionContext,
    ) -> Result<MlEnhancedProjection> {
        let historical = self.store.enhance_projection(player_id, base_projection, context);

        let Some(models) = self.models_for(position) else {
            debug!(%position, "no trained model, using historical projection");
            return Ok(historical_only(historical));
        };
        let Some(pattern) = self.store.get_player_pattern(player_id) else {
            return Ok(historical_only(historical));
        };

        let input = TrainingInput::for_projection(position, &pattern, context);
        let ml_projection = models.points.predict(&input)?;
        let boom = (models.boom.classify(&input)? * 100.0).round();

        let blended = HISTORICAL_WEIGHT * historical.enhanced_projection + ML_WEIGHT * ml_projection;
        let confidence = ((f64::from(historical.confidence) + models.points.accuracy) / 2.0)
            .clamp(0.0, MAX_CONFIDENCE)
            .round();

        let mut explanation = historical.explanation;
        explanation.push(format!("ML model confidence: {:.1}%", models.points.accuracy));
        explanation.push(format!("Boom probability: {boom}%"));

        Ok(MlEnhancedProjection {
            enhanced_projection: round2(blended),
            confidence: confidence as u8,
            boom_probability: boom as u8,
            explanation,
            ml_projection: Some(ml_projection),
        })
    }

    pub fn training_status(&self) -> TrainingStatus {
        let models = self.models.read();
        let accuracies: Vec<f64> = models.values().map(|m| m.points.accuracy).collect();
        let avg_accuracy = if accuracies.is_empty() {
            0.0
        } else {
            (accuracies.iter().sum::<f64>() / accuracies.len() as f64).round()
        };

        TrainingStatus {
            models_count: models.len() * 2,
            avg_accuracy,
            last_training_date: models.values().map(|m| m.points.last_trained).max(),
            position_models: models
                .iter()
                .map(|(position, m)| {
                    (
                        *position,
                        PositionStatus {
                            accuracy: m.points.accuracy,
                            boom_accuracy: m.boom.accuracy,
                            trained: m.points.last_trained,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Drop every model and shut the pattern store down.
    pub fn shutdown(&self) {
        self.models.write().clear();
        self.initialized.store(false, Ordering::Release);
        self.store.shutdown();
        info!("model trainer shut down");
    }
}

fn fit_all(
    index: &PatternIndex,
    fitter: &dyn WeightFitter,
    positions: &[Position],
    min_samples: usize,
) -> Result<ModelMap> {
    let training_set = build_training_set(index, positions);
    let total: usize = training_set.values().map(Vec::len).sum();
    info!(samples = total, "training dataset prepared");

    let fitted: Vec<(Position, Option<PositionModels>)> = training_set
        .into_par_iter()
        .map(|(position, samples)| -> Result<(Position, Option<PositionModels>)> {
            Ok((position, fit_position(fitter, min_samples, position, &samples)?))
        })
        .collect::<Result<_>>()?;

    Ok(fitted
        .into_iter()
        .filter_map(|(position, models)| models.map(|m| (position, Arc::new(m))))
        .collect())
}

fn fit_position(
    fitter: &dyn WeightFitter,
    min_samples: usize,
    position: Position,
    samples: &[TrainingSample],
) -> Result<Option<PositionModels>> {
    if samples.len() < min_samples {
        info!(
            %position,
            samples = samples.len(),
            required = min_samples,
            "insufficient data for position model training"
        );
        return Ok(None);
    }
    let models = train_position(fitter, samples)?;
    info!(
        %position,
        regression_accuracy = models.points.accuracy,
        classification_accuracy = models.boom.accuracy,
        "position models trained"
    );
    Ok(Some(models))
}

fn historical_only(historical: HistoricalEnhancement) -> MlEnhancedProjection {
    MlEnhancedProjection {
        enhanced_projection: historical.enhanced_projection,
        confidence: historical.confidence,
        boom_probability: DEFAULT_BOOM_PROBABILITY,
        explanation: historical.explanation,
        ml_projection: None,
    }
}
