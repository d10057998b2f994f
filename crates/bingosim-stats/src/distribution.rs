use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Frequency table over integer-valued samples.
///
/// Maps each distinct value to the number of times it occurred. Derived
/// statistics are computed on demand and are `None` for an empty table.
///
/// Serializes as a list of `{"value": .., "count": ..}` entries in ascending
/// value order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<DistributionEntry>", from = "Vec<DistributionEntry>")]
pub struct Distribution {
    counts: BTreeMap<i64, u64>,
}

/// One row of a [`Distribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub value: i64,
    pub count: u64,
}

/// Headline numbers of a non-empty [`Distribution`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    /// Number of samples.
    pub total: u64,
}

impl Distribution {
    /// Counts occurrences of every distinct value in `samples`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bingosim_stats::distribution::Distribution;
    /// let dist = Distribution::new([3, 1, 3]);
    /// assert_eq!(dist.count(3), 2);
    /// assert_eq!(dist.count(2), 0);
    /// assert_eq!(dist.total_count(), 3);
    /// ```
    #[must_use]
    pub fn new<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        samples.into_iter().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of occurrences of `value`.
    #[must_use]
    pub fn count(&self, value: i64) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Total number of samples.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.counts.keys().next().copied()
    }

    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.counts.keys().next_back().copied()
    }

    /// Count-weighted mean of the values.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let total = self.total_count();
        if total == 0 {
            return None;
        }
        let sum = self
            .counts
            .iter()
            .map(|(&value, &count)| value as f64 * count as f64)
            .sum::<f64>();
        Some(sum / total as f64)
    }

    #[must_use]
    pub fn summary(&self) -> Option<DistributionSummary> {
        Some(DistributionSummary {
            min: self.min()?,
            max: self.max()?,
            mean: self.mean()?,
            total: self.total_count(),
        })
    }

    /// Iterates `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts.iter().map(|(&value, &count)| (value, count))
    }

    /// Share of samples at every value from `min` to `max`, in percent.
    ///
    /// Values that never occurred are included with `0.0`, so the series
    /// can be plotted directly as a bar chart.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bingosim_stats::distribution::Distribution;
    /// let dist = Distribution::new([1, 1, 3, 3]);
    /// assert_eq!(dist.percentage_series(), [(1, 50.0), (2, 0.0), (3, 50.0)]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentage_series(&self) -> Vec<(i64, f64)> {
        let (Some(min), Some(max)) = (self.min(), self.max()) else {
            return vec![];
        };
        let total = self.total_count() as f64;
        (min..=max)
            .map(|value| (value, self.count(value) as f64 / total * 100.0))
            .collect()
    }
}

impl FromIterator<i64> for Distribution {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        let mut counts = BTreeMap::new();
        for value in iter {
            *counts.entry(value).or_insert(0) += 1;
        }
        Self { counts }
    }
}

impl From<Distribution> for Vec<DistributionEntry> {
    fn from(dist: Distribution) -> Self {
        dist.iter()
            .map(|(value, count)| DistributionEntry { value, count })
            .collect()
    }
}

impl From<Vec<DistributionEntry>> for Distribution {
    fn from(entries: Vec<DistributionEntry>) -> Self {
        let mut counts = BTreeMap::new();
        for DistributionEntry { value, count } in entries {
            if count > 0 {
                *counts.entry(value).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}
