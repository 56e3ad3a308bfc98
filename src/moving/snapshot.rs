//! Read-only view for output collaborators

/// The estimators a [`MovingAverage`](super::MovingAverage) offers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EstimatorKind {
    /// Simple moving average
    Simple,
    /// Cumulative average
    Cumulative,
    /// Weighted moving average
    Weighted,
    /// Exponential moving average
    Exponential,
    /// Moving median
    Median,
}

impl EstimatorKind {
    /// Every kind, in display order
    pub const ALL: [EstimatorKind; 5] = [
        EstimatorKind::Simple,
        EstimatorKind::Cumulative,
        EstimatorKind::Weighted,
        EstimatorKind::Exponential,
        EstimatorKind::Median,
    ];

    /// Conventional short label (`SMA`, `CA`, `WMA`, `EMA`, `MM`)
    pub fn label(self) -> &'static str {
        match self {
            EstimatorKind::Simple => "SMA",
            EstimatorKind::Cumulative => "CA",
            EstimatorKind::Weighted => "WMA",
            EstimatorKind::Exponential => "EMA",
            EstimatorKind::Median => "MM",
        }
    }
}

/// Latest raw input plus the last value each estimator produced
///
/// An estimator that was never read, or whose last read failed, is `None`.
/// This is what a formatter or telemetry sink consumes; it distinguishes
/// "not calculated" from a genuine zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<T, U> {
    /// Most recent sample passed to `add`
    pub input: Option<T>,
    /// Simple moving average
    pub simple: Option<U>,
    /// Cumulative average
    pub cumulative: Option<U>,
    /// Weighted moving average
    pub weighted: Option<U>,
    /// Exponential moving average
    pub exponential: Option<U>,
    /// Moving median
    pub median: Option<U>,
}

impl<T, U: Copy> Snapshot<T, U> {
    /// Value for one estimator
    pub fn get(&self, kind: EstimatorKind) -> Option<U> {
        match kind {
            EstimatorKind::Simple => self.simple,
            EstimatorKind::Cumulative => self.cumulative,
            EstimatorKind::Weighted => self.weighted,
            EstimatorKind::Exponential => self.exponential,
            EstimatorKind::Median => self.median,
        }
    }

    /// Calculated estimators with their labels, in display order
    pub fn calculated(&self) -> impl Iterator<Item = (EstimatorKind, U)> + '_ {
        EstimatorKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|value| (kind, value)))
    }
}
