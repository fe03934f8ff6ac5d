//! Running moments and derived bankroll statistics.

/// One-pass mean and variance accumulator (Welford's method).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Adds one observation.
    #[expect(
        clippy::cast_precision_loss,
        reason = "sample counts stay far below f64 integer precision"
    )]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Number of observations.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean, or 0 with no observations.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance with Bessel's correction; 0 below two observations.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "sample counts stay far below f64 integer precision"
    )]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    /// Sample standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Normal-approximation 95% confidence interval on a mean.
///
/// With no samples the interval collapses to `(mean, mean)`.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "sample counts stay far below f64 integer precision"
)]
pub fn confidence_interval(mean: f64, std_dev: f64, samples: u64) -> (f64, f64) {
    const Z_95: f64 = 1.96;
    if samples == 0 {
        return (mean, mean);
    }
    let margin = std_dev / (samples as f64).sqrt() * Z_95;
    (mean - margin, mean + margin)
}

/// Approximate probability of losing `bankroll` when betting `bet` per hand.
///
/// Uses the continuous gambler's-ruin estimate
/// `exp(2 * edge * bankroll / variance)` with edge and variance in bet units.
/// A non-negative edge never ruins; a losing game without variance always does.
///
/// ```
/// use bjsim::risk_of_ruin;
///
/// assert_eq!(risk_of_ruin(0.1, 1.0, 100.0, 1.0), 0.0);
/// assert_eq!(risk_of_ruin(-0.1, 0.0, 100.0, 1.0), 1.0);
/// let risk = risk_of_ruin(-0.05, 1.3, 100.0, 1.0);
/// assert!(risk > 0.0 && risk < 1.0);
/// ```
#[must_use]
pub fn risk_of_ruin(ev_per_hand: f64, variance_per_hand: f64, bankroll: f64, bet: f64) -> f64 {
    if ev_per_hand >= 0.0 {
        return 0.0;
    }
    if variance_per_hand <= 0.0 {
        return 1.0;
    }
    let edge_units = ev_per_hand / bet;
    let variance_units = variance_per_hand / (bet * bet);
    let exponent = 2.0 * edge_units * bankroll / variance_units;
    exponent.exp().clamp(0.0, 1.0)
}

/// Summary statistics of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Expected value per hand.
    pub ev_per_hand: f64,
    /// Standard deviation per hand.
    pub std_dev_per_hand: f64,
    /// Expected profit per trial.
    pub ev_run: f64,
    /// Standard deviation of profit per trial.
    pub std_dev_run: f64,
    /// 95% confidence interval on `ev_run`.
    pub ci95: (f64, f64),
    /// Approximate risk of ruin.
    pub risk_of_ruin: f64,
}

impl Stats {
    /// Derives the summary from the per-hand and per-trial accumulators.
    #[must_use]
    pub fn from_moments(
        hands: &RunningStats,
        runs: &RunningStats,
        bankroll: f64,
        bet: f64,
    ) -> Self {
        let std_dev_per_hand = hands.std_dev();
        let std_dev_run = runs.std_dev();
        Self {
            ev_per_hand: hands.mean(),
            std_dev_per_hand,
            ev_run: runs.mean(),
            std_dev_run,
            ci95: confidence_interval(runs.mean(), std_dev_run, runs.count()),
            risk_of_ruin: risk_of_ruin(
                hands.mean(),
                std_dev_per_hand * std_dev_per_hand,
                bankroll,
                bet,
            ),
        }
    }
}

/// Equal-width histogram of a sample.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    /// Bin midpoints, ascending.
    pub bins: Vec<f64>,
    /// Observation count per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins `values` into `bin_count` equal-width bins spanning the sample.
    ///
    /// The spanned range is floored at 1, so a sample of identical values
    /// still yields bins of non-zero width. Rounding at the edges clamps into
    /// the first or last bin.
    ///
    /// ```
    /// use bjsim::Histogram;
    ///
    /// let h = Histogram::from_samples(&[0.0, 1.0, 9.0, 10.0], 2);
    /// assert_eq!(h.bins, vec![2.5, 7.5]);
    /// assert_eq!(h.counts, vec![2, 2]);
    /// ```
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "bin counts stay far below f64 integer precision"
    )]
    pub fn from_samples(values: &[f64], bin_count: usize) -> Self {
        if values.is_empty() || bin_count == 0 {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = (max - min).max(1.0);
        let width = range / bin_count as f64;

        let bins = (0..bin_count)
            .map(|i| (i as f64 + 0.5).mul_add(width, min))
            .collect();
        let mut counts = vec![0; bin_count];

        for value in values {
            let position = ((value - min) / range * bin_count as f64).floor();
            let index = if position <= 0.0 {
                0
            } else {
                (position as usize).min(bin_count - 1)
            };
            counts[index] += 1;
        }

        Self { bins, counts }
    }

    /// Total number of observations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
