//! Aggregation over heterogeneous-unit collections
//!
//! All aggregation happens in comparator space, so a collection mixing
//! grams, kilograms and pounds reduces correctly. The accumulator is a
//! small fixed-size value (count, running sum, sum of squares, min, max):
//! sum, min and max are associative, so very large collections can be
//! folded in chunks and the partial accumulators merged.

use mensura_core::Decimal;
use mensura_units::{Dimension, UnitRegistry};

use crate::config::FieldConfig;
use crate::error::QuantityError;
use crate::quantity::QuantityValue;

/// The supported aggregate computations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    StdDev,
    Variance,
}

impl AggregateKind {
    fn name(&self) -> &'static str {
        match self {
            AggregateKind::Count => "count",
            AggregateKind::Sum => "sum",
            AggregateKind::Avg => "avg",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
            AggregateKind::StdDev => "std_dev",
            AggregateKind::Variance => "variance",
        }
    }
}

/// An aggregation result: a plain integer for count, a quantity otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregated {
    Count(u64),
    Value(QuantityValue),
}

/// Streaming comparator-space accumulator
///
/// Push values (or nulls) in any order; nulls are skipped. Partial
/// accumulators over chunks of a collection merge losslessly.
#[derive(Debug, Clone)]
pub struct Accumulator {
    dimension: Dimension,
    precision: usize,
    count: u64,
    sum: Decimal,
    sum_sq: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl Accumulator {
    /// Fresh accumulator for one field
    pub fn for_field(config: &FieldConfig) -> Self {
        Accumulator {
            dimension: config.dimension(),
            precision: config.decimal_precision(),
            count: 0,
            sum: Decimal::zero(),
            sum_sq: Decimal::zero(),
            min: None,
            max: None,
        }
    }

    /// Fold one value in; nulls are skipped without error
    pub fn push(&mut self, value: Option<&QuantityValue>) -> Result<(), QuantityError> {
        let q = match value {
            None => return Ok(()),
            Some(q) => q,
        };

        if q.unit().dimension != self.dimension {
            return Err(QuantityError::IncompatibleDimension {
                from: q.unit().symbol.clone(),
                to: format!("{}", self.dimension),
                from_dim: q.unit().dimension,
                to_dim: self.dimension,
            });
        }

        let c = q.comparator().with_precision(self.precision);
        self.count += 1;
        self.sum = self.sum.add(&c);
        self.sum_sq = self.sum_sq.add(&c.mul(&c));
        self.min = Some(match self.min.take() {
            None => c.clone(),
            Some(current) => current.min(c.clone()),
        });
        self.max = Some(match self.max.take() {
            None => c,
            Some(current) => current.max(c),
        });
        Ok(())
    }

    /// Merge a partial accumulator over another chunk of the collection
    pub fn merge(&mut self, other: &Accumulator) {
        self.count += other.count;
        self.sum = self.sum.add(&other.sum);
        self.sum_sq = self.sum_sq.add(&other.sum_sq);
        self.min = match (self.min.take(), other.min.clone()) {
            (None, m) => m,
            (m, None) => m,
            (Some(a), Some(b)) => Some(a.min(b)),
        };
        self.max = match (self.max.take(), other.max.clone()) {
            (None, m) => m,
            (m, None) => m,
            (Some(a), Some(b)) => Some(a.max(b)),
        };
    }

    /// Count of non-null values folded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Finish the aggregation
    ///
    /// `sample` selects sample (N-1) vs population (N) statistics for
    /// variance and standard deviation; it is ignored by the other kinds.
    pub fn finish(
        &self,
        kind: AggregateKind,
        sample: bool,
        config: &FieldConfig,
        registry: &UnitRegistry,
    ) -> Result<Aggregated, QuantityError> {
        let base = config.base_unit(registry);

        let base_quantity =
            |value: Decimal| QuantityValue::from_parts(value.clone(), base.clone(), value);

        match kind {
            AggregateKind::Count => Ok(Aggregated::Count(self.count)),

            AggregateKind::Sum => {
                // Sum of nothing is a zero quantity, distinct from null
                Ok(Aggregated::Value(base_quantity(self.sum.clone())))
            }

            AggregateKind::Avg => {
                if self.count == 0 {
                    return Err(QuantityError::EmptyAggregation {
                        kind: kind.name().to_string(),
                    });
                }
                let n = Decimal::from_i64(self.count as i64);
                let mean = self.sum.checked_div(&n)?;
                Ok(Aggregated::Value(base_quantity(mean)))
            }

            AggregateKind::Min => match &self.min {
                None => Err(QuantityError::EmptyAggregation {
                    kind: kind.name().to_string(),
                }),
                Some(m) => Ok(Aggregated::Value(base_quantity(m.clone()))),
            },

            AggregateKind::Max => match &self.max {
                None => Err(QuantityError::EmptyAggregation {
                    kind: kind.name().to_string(),
                }),
                Some(m) => Ok(Aggregated::Value(base_quantity(m.clone()))),
            },

            AggregateKind::Variance => {
                let variance = self.variance(sample, kind)?;
                // Variance is dimensionally squared: meters in, square
                // meters out
                let squared = base.power(2);
                Ok(Aggregated::Value(QuantityValue::from_parts(
                    variance.clone(),
                    squared,
                    variance,
                )))
            }

            AggregateKind::StdDev => {
                let variance = self.variance(sample, kind)?;
                let std_dev = variance.sqrt(self.precision)?;
                Ok(Aggregated::Value(base_quantity(std_dev)))
            }
        }
    }

    fn variance(&self, sample: bool, kind: AggregateKind) -> Result<Decimal, QuantityError> {
        let n = self.count;
        if n == 0 || (sample && n < 2) {
            return Err(QuantityError::EmptyAggregation {
                kind: kind.name().to_string(),
            });
        }

        // Computational form over the fixed-size accumulator:
        // (sum_sq - sum^2 / n) / denominator
        let n_dec = Decimal::from_i64(n as i64);
        let mean_correction = self.sum.mul(&self.sum).checked_div(&n_dec)?;
        let sum_squared_dev = self.sum_sq.sub(&mean_correction);

        let denominator = if sample {
            Decimal::from_i64((n - 1) as i64)
        } else {
            n_dec
        };

        Ok(sum_squared_dev.checked_div(&denominator)?)
    }
}

/// One-shot aggregation over a collection
pub fn aggregate(
    kind: AggregateKind,
    values: &[Option<QuantityValue>],
    sample: bool,
    config: &FieldConfig,
    registry: &UnitRegistry,
) -> Result<Aggregated, QuantityError> {
    let mut acc = Accumulator::for_field(config);
    for value in values {
        acc.push(value.as_ref())?;
    }
    acc.finish(kind, sample, config, registry)
}
