//! Weight fitting strategies.
//!
//! A fitter only decides weights and bias; accuracy is always scored the
//! same way by [`MlModel::fitted`].

use super::{
    dataset::TrainingSample,
    model::{Feature, MlModel, ModelKind, PositionModels},
};
use crate::{config::FitterKind, error::Result, util::{mean, sigmoid}};
use std::collections::BTreeMap;

/// Weights and bias produced for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedWeights {
    pub weights: BTreeMap<Feature, f64>,
    pub bias: f64,
}

pub trait WeightFitter: Send + Sync {
    fn name(&self) -> &'static str;

    fn fit_regression(&self, samples: &[TrainingSample]) -> FittedWeights;

    fn fit_classification(&self, samples: &[TrainingSample]) -> FittedWeights;
}

pub fn fitter_for(kind: FitterKind) -> Box<dyn WeightFitter> {
    match kind {
        FitterKind::Empirical => Box::new(EmpiricalCorrelations),
        FitterKind::GradientDescent => Box::new(GradientDescent::default()),
    }
}

/// Fit both models for one position's samples.
pub fn train_position(fitter: &dyn WeightFitter, samples: &[TrainingSample]) -> Result<PositionModels> {
    let points = fitter.fit_regression(samples);
    let boom = fitter.fit_classification(samples);
    Ok(PositionModels {
        points: MlModel::fitted(ModelKind::Regression, points.weights, points.bias, samples)?,
        boom: MlModel::fitted(ModelKind::Classification, boom.weights, boom.bias, samples)?,
    })
}

/// Fixed correlation tables, independent of the samples except for the
/// regression bias.
///
/// These constants are placeholders, not tuned values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmpiricalCorrelations;

impl EmpiricalCorrelations {
    const CLASSIFICATION_BIAS: f64 = -1.5;

    fn regression_weight(feature: Feature) -> f64 {
        match feature {
            Feature::SeasonalMultiplier => 0.15,
            Feature::MatchupHistory => 0.25,
            Feature::ConsistencyScore => 0.30,
            Feature::TrendSlope => 0.20,
            Feature::InjuryFactor => 0.35,
            Feature::IsHome => 0.08,
            Feature::Week => -0.02,
        }
    }

    fn classification_weight(feature: Feature) -> f64 {
        match feature {
            Feature::SeasonalMultiplier => 0.8,
            Feature::MatchupHistory => 1.2,
            Feature::ConsistencyScore => 0.6,
            Feature::TrendSlope => 0.9,
            Feature::InjuryFactor => 1.1,
            Feature::IsHome | Feature::Week => 0.5,
        }
    }
}

impl WeightFitter for EmpiricalCorrelations {
    fn name(&self) -> &'static str {
        "empirical"
    }

    fn fit_regression(&self, samples: &[TrainingSample]) -> FittedWeights {
        let actual: Vec<f64> = samples.iter().map(|s| s.output.actual_fantasy_points).collect();
        FittedWeights {
            weights: Feature::REGRESSION
                .iter()
                .map(|&f| (f, Self::regression_weight(f)))
                .collect(),
            // 10% of the average target
            bias: mean(&actual) * 0.1,
        }
    }

    fn fit_classification(&self, _samples: &[TrainingSample]) -> FittedWeights {
        FittedWeights {
            weights: Feature::CLASSIFICATION
                .iter()
                .map(|&f| (f, Self::classification_weight(f)))
                .collect(),
            bias: Self::CLASSIFICATION_BIAS,
        }
    }
}

/// Batch gradient descent: least squares for points, logistic loss for booms.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            epochs: 2_000,
        }
    }
}

impl GradientDescent {
    fn descend<F>(
        &self,
        samples: &[TrainingSample],
        features: &[Feature],
        initial_bias: f64,
        target: impl Fn(&TrainingSample) -> f64,
        activation: F,
    ) -> FittedWeights
    where
        F: Fn(f64) -> f64,
    {
        let mut weights = vec![0.0; features.len()];
        let mut bias = initial_bias;
        if samples.is_empty() {
            return Self::collect(features, &weights, bias);
        }

        let rows: Vec<Vec<f64>> = samples
            .iter()
            .map(|s| features.iter().map(|&f| s.input.feature_value(f)).collect())
            .collect();
        let targets: Vec<f64> = samples.iter().map(&target).collect();
        let n = samples.len() as f64;

        for _ in 0..self.epochs {
            let mut grad_w = vec![0.0; features.len()];
            let mut grad_b = 0.0;
            for (row, y) in rows.iter().zip(&targets) {
                let z = bias + row.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>();
                let error = activation(z) - y;
                for (g, x) in grad_w.iter_mut().zip(row) {
                    *g += error * x;
                }
                grad_b += error;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * g / n;
            }
            bias -= self.learning_rate * grad_b / n;
        }

        Self::collect(features, &weights, bias)
    }

    fn collect(features: &[Feature], weights: &[f64], bias: f64) -> FittedWeights {
        FittedWeights {
            weights: features.iter().copied().zip(weights.iter().copied()).collect(),
            bias,
        }
    }
}

impl WeightFitter for GradientDescent {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn fit_regression(&self, samples: &[TrainingSample]) -> FittedWeights {
        let actual: Vec<f64> = samples.iter().map(|s| s.output.actual_fantasy_points).collect();
        self.descend(
            samples,
            &Feature::REGRESSION,
            mean(&actual),
            |s| s.output.actual_fantasy_points,
            |z| z,
        )
    }

    fn fit_classification(&self, samples: &[TrainingSample]) -> FittedWeights {
        self.descend(
            samples,
            &Feature::CLASSIFICATION,
            0.0,
            |s| if s.output.exceeded_25_points { 1.0 } else { 0.0 },
            sigmoid,
        )
    }
}
