//! Per-position linear models and the features they read.

use super::dataset::{TrainingInput, TrainingSample};
use crate::{
    error::{CoachError, Result},
    util::sigmoid,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Input features a model can weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    SeasonalMultiplier,
    MatchupHistory,
    ConsistencyScore,
    TrendSlope,
    InjuryFactor,
    IsHome,
    Week,
}

impl Feature {
    pub const REGRESSION: [Feature; 7] = [
        Feature::SeasonalMultiplier,
        Feature::MatchupHistory,
        Feature::ConsistencyScore,
        Feature::TrendSlope,
        Feature::InjuryFactor,
        Feature::IsHome,
        Feature::Week,
    ];

    pub const CLASSIFICATION: [Feature; 5] = [
        Feature::SeasonalMultiplier,
        Feature::MatchupHistory,
        Feature::ConsistencyScore,
        Feature::TrendSlope,
        Feature::InjuryFactor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::SeasonalMultiplier => "seasonalMultiplier",
            Feature::MatchupHistory => "matchupHistory",
            Feature::ConsistencyScore => "consistencyScore",
            Feature::TrendSlope => "trendSlope",
            Feature::InjuryFactor => "injuryFactor",
            Feature::IsHome => "isHome",
            Feature::Week => "week",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Point estimate of fantasy points.
    Regression,
    /// Probability of a boom game.
    Classification,
}

/// A bias-anchored weighted sum over a fixed feature list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlModel {
    pub kind: ModelKind,
    pub features: Vec<Feature>,
    pub weights: BTreeMap<Feature, f64>,
    pub bias: f64,
    /// Percentage; MAPE-derived for regression, hit rate for classification.
    pub accuracy: f64,
    pub last_trained: DateTime<Utc>,
}

impl MlModel {
    /// Build a model and score it against the samples it was fitted on.
    pub fn fitted(
        kind: ModelKind,
        weights: BTreeMap<Feature, f64>,
        bias: f64,
        samples: &[TrainingSample],
    ) -> Result<Self> {
        let features = match kind {
            ModelKind::Regression => Feature::REGRESSION.to_vec(),
            ModelKind::Classification => Feature::CLASSIFICATION.to_vec(),
        };
        let mut model = Self {
            kind,
            features,
            weights,
            bias,
            accuracy: 0.0,
            last_trained: Utc::now(),
        };
        model.accuracy = match kind {
            ModelKind::Regression => model.regression_accuracy(samples)?,
            ModelKind::Classification => model.classification_accuracy(samples)?,
        };
        Ok(model)
    }

    /// `bias + Σ weight × value` over the model's features.
    ///
    /// A feature without a weight is a malformed model, not missing data.
    pub fn logit(&self, input: &TrainingInput) -> Result<f64> {
        self.features.iter().try_fold(self.bias, |sum, feature| {
            let weight = self
                .weights
                .get(feature)
                .ok_or_else(|| CoachError::MalformedFeatureMap {
                    feature: feature.to_string(),
                })?;
            Ok(sum + weight * input.feature_value(*feature))
        })
    }

    /// Non-negative point prediction.
    pub fn predict(&self, input: &TrainingInput) -> Result<f64> {
        Ok(self.logit(input)?.max(0.0))
    }

    /// Probability in (0, 1).
    pub fn classify(&self, input: &TrainingInput) -> Result<f64> {
        Ok(sigmoid(self.logit(input)?))
    }

    /// `max(0, 100 - MAPE)` where MAPE is total absolute error over total points.
    pub fn regression_accuracy(&self, samples: &[TrainingSample]) -> Result<f64> {
        let mut total_error = 0.0;
        let mut total_actual = 0.0;
        for sample in samples {
            let actual = sample.output.actual_fantasy_points;
            total_error += (self.predict(&sample.input)? - actual).abs();
            total_actual += actual;
        }
        if total_actual <= 0.0 {
            return Ok(0.0);
        }
        let mape = total_error / total_actual * 100.0;
        Ok((100.0 - mape).max(0.0))
    }

    /// Share of samples, in percent, where `p > 0.5` matches the boom label.
    pub fn classification_accuracy(&self, samples: &[TrainingSample]) -> Result<f64> {
        if samples.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0usize;
        for sample in samples {
            let predicted = self.classify(&sample.input)? > 0.5;
            if predicted == sample.output.exceeded_25_points {
                correct += 1;
            }
        }
        Ok(correct as f64 / samples.len() as f64 * 100.0)
    }
}

/// The regression and classification models trained for one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionModels {
    pub points: MlModel,
    pub boom: MlModel,
}

/// A projection blended from the historical enhancement and the position's
/// models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlEnhancedProjection {
    pub enhanced_projection: f64,
    pub confidence: u8,
    /// Percent chance of exceeding the boom threshold.
    pub boom_probability: u8,
    pub explanation: Vec<String>,
    /// Raw regression output; absent when no model was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_projection: Option<f64>,
}

/// Per-position model summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionStatus {
    pub accuracy: f64,
    pub boom_accuracy: f64,
    pub trained: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatus {
    pub models_count: usize,
    /// Mean regression accuracy, rounded to a whole percent.
    pub avg_accuracy: f64,
    pub last_training_date: Option<DateTime<Utc>>,
    pub position_models: BTreeMap<crate::Position, PositionStatus>,
}
