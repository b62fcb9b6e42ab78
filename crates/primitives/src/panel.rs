//! The characteristic panel: per-period cross-sections of observations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{Characteristic, CharacteristicValues, EntityId, PanelError, Period};

/// One entity's data for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Entity identifier.
    pub entity: EntityId,
    /// Characteristic values observed at the end of the period.
    pub characteristics: CharacteristicValues,
    /// Market weight (market equity) at the end of the period.
    pub market_weight: Option<f64>,
    /// Return realized over the period.
    pub ret: Option<f64>,
}

impl Observation {
    /// Observation with every field missing.
    #[must_use]
    pub const fn new(entity: EntityId) -> Self {
        Self {
            entity,
            characteristics: CharacteristicValues::empty(),
            market_weight: None,
            ret: None,
        }
    }

    /// Set a characteristic value.
    #[must_use]
    pub fn with_characteristic(mut self, characteristic: Characteristic, value: f64) -> Self {
        self.characteristics.set(characteristic, Some(value));
        self
    }

    /// Set the market weight.
    #[must_use]
    pub fn with_market_weight(mut self, weight: f64) -> Self {
        self.market_weight = Some(weight).filter(|w| w.is_finite());
        self
    }

    /// Set the realized return.
    #[must_use]
    pub fn with_return(mut self, ret: f64) -> Self {
        self.ret = Some(ret).filter(|r| r.is_finite());
        self
    }

    /// Value of `characteristic`, if present.
    #[must_use]
    pub const fn characteristic(&self, characteristic: Characteristic) -> Option<f64> {
        self.characteristics.get(characteristic)
    }

    /// Market weight if it is present, finite and strictly positive.
    #[must_use]
    pub fn positive_weight(&self) -> Option<f64> {
        self.market_weight.filter(|w| w.is_finite() && *w > 0.0)
    }
}

/// All observations for a single period.
#[derive(Debug, Clone)]
pub struct CrossSection {
    period: Period,
    observations: Vec<Observation>,
    index: HashMap<EntityId, usize>,
}

impl CrossSection {
    /// Create a cross-section, rejecting duplicate entities.
    ///
    /// # Errors
    /// Returns `PanelError::DuplicateObservation` if an entity appears twice.
    pub fn new(period: Period, observations: Vec<Observation>) -> Result<Self, PanelError> {
        let mut index = HashMap::with_capacity(observations.len());
        for (i, obs) in observations.iter().enumerate() {
            if index.insert(obs.entity, i).is_some() {
                return Err(PanelError::DuplicateObservation { entity: obs.entity, period });
            }
        }
        Ok(Self { period, observations, index })
    }

    /// Period of this cross-section.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Observations in their original order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Observation for `entity`, if present.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&Observation> {
        self.index.get(&entity).map(|&i| &self.observations[i])
    }

    /// Realized returns of every entity that has one.
    #[must_use]
    pub fn returns(&self) -> HashMap<EntityId, f64> {
        self.observations
            .iter()
            .filter_map(|obs| obs.ret.filter(|r| r.is_finite()).map(|r| (obs.entity, r)))
            .collect()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Immutable panel of cross-sections in strictly increasing period order.
///
/// `columns` records which characteristic fields the provider actually
/// supplied; a field absent from it is missing for the whole panel.
#[derive(Debug, Clone)]
pub struct CharacteristicPanel {
    sections: Vec<CrossSection>,
    columns: BTreeSet<Characteristic>,
}

impl CharacteristicPanel {
    /// Create a panel from ordered cross-sections.
    ///
    /// # Errors
    /// Returns `PanelError::UnorderedPeriods` unless periods strictly increase.
    pub fn new(
        sections: Vec<CrossSection>,
        columns: impl IntoIterator<Item = Characteristic>,
    ) -> Result<Self, PanelError> {
        for pair in sections.windows(2) {
            if pair[1].period <= pair[0].period {
                return Err(PanelError::UnorderedPeriods {
                    previous: pair[0].period,
                    next: pair[1].period,
                });
            }
        }
        Ok(Self { sections, columns: columns.into_iter().collect() })
    }

    /// Create a panel from unordered `(period, observation)` rows.
    ///
    /// # Errors
    /// Returns `PanelError::DuplicateObservation` if an (entity, period) pair repeats.
    pub fn from_observations(
        rows: impl IntoIterator<Item = (Period, Observation)>,
        columns: impl IntoIterator<Item = Characteristic>,
    ) -> Result<Self, PanelError> {
        let mut grouped: BTreeMap<Period, Vec<Observation>> = BTreeMap::new();
        for (period, obs) in rows {
            grouped.entry(period).or_default().push(obs);
        }

        let sections = grouped
            .into_iter()
            .map(|(period, observations)| CrossSection::new(period, observations))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(sections, columns)
    }

    /// Cross-sections in chronological order.
    #[must_use]
    pub fn sections(&self) -> &[CrossSection] {
        &self.sections
    }

    /// Cross-section for `period`, if present.
    #[must_use]
    pub fn section(&self, period: Period) -> Option<&CrossSection> {
        self.sections
            .binary_search_by_key(&period, CrossSection::period)
            .ok()
            .map(|i| &self.sections[i])
    }

    /// Periods in chronological order.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.sections.iter().map(CrossSection::period)
    }

    /// Characteristic fields supplied by the provider.
    #[must_use]
    pub const fn columns(&self) -> &BTreeSet<Characteristic> {
        &self.columns
    }

    /// Whether `characteristic` was supplied at all.
    #[must_use]
    pub fn has_column(&self, characteristic: Characteristic) -> bool {
        self.columns.contains(&characteristic)
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of observations across all periods.
    #[must_use]
    pub fn n_observations(&self) -> usize {
        self.sections.iter().map(CrossSection::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(m: u32) -> Period {
        crate::month_end(Period::from_ymd_opt(2020, m, 1).unwrap()).unwrap()
    }

    fn obs(id: u64) -> Observation {
        Observation::new(EntityId::new(id))
            .with_characteristic(Characteristic::BookToMarket, id as f64)
            .with_market_weight(100.0)
            .with_return(0.01)
    }

    #[test]
    fn from_observations_orders_periods() {
        let rows = vec![(period(3), obs(1)), (period(1), obs(1)), (period(2), obs(2))];
        let panel = CharacteristicPanel::from_observations(rows, [Characteristic::BookToMarket])
            .unwrap();

        let periods: Vec<_> = panel.periods().collect();
        assert_eq!(periods, vec![period(1), period(2), period(3)]);
        assert_eq!(panel.n_observations(), 3);
        assert!(panel.has_column(Characteristic::BookToMarket));
        assert!(!panel.has_column(Characteristic::AssetGrowth));
    }

    #[test]
    fn duplicate_entity_in_period_is_rejected() {
        let rows = vec![(period(1), obs(1)), (period(1), obs(1))];
        let err = CharacteristicPanel::from_observations(rows, []).unwrap_err();
        assert!(matches!(err, PanelError::DuplicateObservation { .. }));
    }

    #[test]
    fn unordered_sections_are_rejected() {
        let a = CrossSection::new(period(2), vec![obs(1)]).unwrap();
        let b = CrossSection::new(period(1), vec![obs(1)]).unwrap();
        let err = CharacteristicPanel::new(vec![a, b], []).unwrap_err();
        assert_eq!(err, PanelError::UnorderedPeriods { previous: period(2), next: period(1) });
    }

    #[test]
    fn section_lookup_and_returns() {
        let rows = vec![(period(1), obs(1)), (period(1), obs(2).with_return(f64::NAN))];
        let panel = CharacteristicPanel::from_observations(rows, []).unwrap();
        let section = panel.section(period(1)).unwrap();

        assert_eq!(section.get(EntityId::new(2)).unwrap().entity, EntityId::new(2));
        // NaN return on entity 2 is discarded at construction
        let returns = section.returns();
        assert_eq!(returns.len(), 1);
        assert!(panel.section(period(5)).is_none());
    }

    #[test]
    fn positive_weight_filters_non_positive() {
        let o = Observation::new(EntityId::new(1)).with_market_weight(0.0);
        assert_eq!(o.positive_weight(), None);
        let o = Observation::new(EntityId::new(1)).with_market_weight(-5.0);
        assert_eq!(o.positive_weight(), None);
        let o = Observation::new(EntityId::new(1)).with_market_weight(5.0);
        assert_eq!(o.positive_weight(), Some(5.0));
    }
}
