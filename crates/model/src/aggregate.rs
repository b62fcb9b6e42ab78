//! Portfolio return aggregation for the long and short legs.

use std::collections::HashMap;

use factorcheck_math::{cap_weights, equal_weights, normalize_weights, quantile};
use factorcheck_primitives::{BucketAssignment, CrossSection, EntityId, Observation, Weighting};
use ndarray::Array1;

use crate::ModelError;

/// A formed portfolio leg: members with a forward return, their weights and returns.
#[derive(Debug, Clone, PartialEq)]
pub struct LegPortfolio {
    /// Members that contribute to the leg return.
    pub entities: Vec<EntityId>,
    /// Weights, summing to 1.
    pub weights: Array1<f64>,
    /// Forward returns, aligned with `entities`.
    pub returns: Array1<f64>,
}

impl LegPortfolio {
    /// Weighted leg return.
    #[must_use]
    pub fn ret(&self) -> f64 {
        self.weights.dot(&self.returns)
    }

    /// Number of contributing members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Computes long-short spread returns from a bucket assignment.
///
/// Weights are fixed at formation from the formation-period market weight.
/// Members lacking a forward return are dropped and the remaining weights
/// renormalized, so a missing return never acts as a zero return.
#[derive(Debug, Clone, Copy)]
pub struct PortfolioAggregator {
    weighting: Weighting,
    cap_quantile: f64,
}

impl PortfolioAggregator {
    /// Create an aggregator. `cap_quantile` only affects capped value weighting.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` if `cap_quantile` is outside `[0, 1]`.
    pub fn new(weighting: Weighting, cap_quantile: f64) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&cap_quantile) {
            return Err(ModelError::InvalidConfig(format!(
                "cap quantile must lie in [0, 1], got {cap_quantile}"
            )));
        }
        Ok(Self { weighting, cap_quantile })
    }

    /// Weighting scheme.
    #[must_use]
    pub const fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Long-short spread `long_return - short_return` for the period.
    ///
    /// Returns `None` if either leg has no member with a forward return.
    ///
    /// # Errors
    /// Returns `ModelError::Math` if the weight cap cannot be computed.
    pub fn aggregate(
        &self,
        section: &CrossSection,
        assignment: &BucketAssignment,
        long_bucket: usize,
        short_bucket: usize,
        next_returns: &HashMap<EntityId, f64>,
    ) -> Result<Option<f64>, ModelError> {
        let cap = self.weight_cap(section, assignment)?;
        let long = self.form_leg(section, assignment.bucket(long_bucket), cap, next_returns);
        let short = self.form_leg(section, assignment.bucket(short_bucket), cap, next_returns);
        Ok(long.zip(short).map(|(l, s)| l.ret() - s.ret()))
    }

    /// Cap on raw market weights for the period, if the scheme uses one.
    ///
    /// The cap is the `cap_quantile` quantile of market weight across every
    /// sorted entity in the period, not just the two legs.
    ///
    /// # Errors
    /// Returns `ModelError::Math` if the quantile cannot be computed.
    pub fn weight_cap(
        &self,
        section: &CrossSection,
        assignment: &BucketAssignment,
    ) -> Result<Option<f64>, ModelError> {
        if self.weighting != Weighting::CappedValue || assignment.is_empty() {
            return Ok(None);
        }
        let weights: Vec<f64> = assignment
            .iter()
            .filter_map(|(e, _)| section.get(e).and_then(|obs| obs.positive_weight()))
            .collect();
        Ok(Some(quantile(&weights, self.cap_quantile)?))
    }

    /// Form one leg from bucket members.
    ///
    /// Returns `None` when no member has both a usable weight and a forward return.
    #[must_use]
    pub fn form_leg(
        &self,
        section: &CrossSection,
        members: &[EntityId],
        cap: Option<f64>,
        next_returns: &HashMap<EntityId, f64>,
    ) -> Option<LegPortfolio> {
        let mut entities = Vec::with_capacity(members.len());
        let mut market = Vec::with_capacity(members.len());
        let mut returns = Vec::with_capacity(members.len());

        for &entity in members {
            let Some(&ret) = next_returns.get(&entity) else { continue };
            let Some(weight) = section.get(entity).and_then(Observation::positive_weight) else {
                continue;
            };
            entities.push(entity);
            market.push(weight);
            returns.push(ret);
        }
        if entities.is_empty() {
            return None;
        }

        let market = Array1::from_vec(market);
        let weights = match (self.weighting, cap) {
            (Weighting::Equal, _) => equal_weights(market.len()),
            (Weighting::CappedValue, Some(cap)) => normalize_weights(&cap_weights(&market, cap))?,
            (Weighting::Value | Weighting::CappedValue, _) => normalize_weights(&market)?,
        };
        Some(LegPortfolio { entities, weights, returns: Array1::from_vec(returns) })
    }
}
