use crate::data_structures::{UsageDataset, UsageRecord};

/// Where a [`Totals`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsSource {
    /// Copied verbatim from the input's `total` object.
    Reported,
    /// Summed over the records.
    Computed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    cost: f64,
    tokens: Option<u64>,
    source: TotalsSource,
}

impl Totals {
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// `None` means the token line is not shown.
    pub fn tokens(&self) -> Option<u64> {
        self.tokens
    }

    pub fn source(&self) -> TotalsSource {
        self.source
    }
}

pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_total_cost(&self, records: &[UsageRecord]) -> f64 {
        records.iter().map(|record| record.cost()).sum()
    }

    /// Records without a token count contribute zero.
    pub fn calculate_total_tokens(&self, records: &[UsageRecord]) -> u64 {
        records
            .iter()
            .map(|record| record.tokens().unwrap_or(0))
            .sum()
    }

    pub fn summarize(&self, dataset: &UsageDataset) -> Totals {
        if let Some(total) = dataset.total() {
            return Totals {
                cost: total.cost(),
                tokens: total.tokens(),
                source: TotalsSource::Reported,
            };
        }

        let tokens = self.calculate_total_tokens(dataset.records());
        Totals {
            cost: self.calculate_total_cost(dataset.records()),
            tokens: (tokens > 0).then_some(tokens),
            source: TotalsSource::Computed,
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::UsageTotal;
    use chrono::NaiveDate;

    fn record(d: u32, cost: f64, tokens: Option<u64>) -> UsageRecord {
        UsageRecord::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), cost, tokens)
    }

    #[test]
    fn test_computed_totals() {
        let calculator = Calculator::new();
        let dataset = UsageDataset::new(
            vec![record(1, 5.0, Some(1000)), record(2, 25.0, None), record(3, 0.5, Some(250))],
            None,
        );

        let totals = calculator.summarize(&dataset);
        assert_eq!(totals.source(), TotalsSource::Computed);
        assert_eq!(totals.cost(), 30.5);
        assert_eq!(totals.tokens(), Some(1250));
    }

    #[test]
    fn test_zero_computed_tokens_are_omitted() {
        let calculator = Calculator::new();
        let dataset = UsageDataset::new(vec![record(1, 1.0, None), record(2, 2.0, Some(0))], None);

        let totals = calculator.summarize(&dataset);
        assert_eq!(totals.cost(), 3.0);
        assert_eq!(totals.tokens(), None);
    }

    #[test]
    fn test_reported_total_is_used_verbatim() {
        let calculator = Calculator::new();
        let dataset = UsageDataset::new(
            vec![record(1, 5.0, Some(1000))],
            Some(UsageTotal::new(99.0, Some(0))),
        );

        let totals = calculator.summarize(&dataset);
        assert_eq!(totals.source(), TotalsSource::Reported);
        assert_eq!(totals.cost(), 99.0);
        assert_eq!(totals.tokens(), Some(0));
    }
}
