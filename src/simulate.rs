//! Monte-Carlo bankroll simulation.

use crate::error::SimulationError;
use crate::game::{play_round, valid_bet};
use crate::result::RoundResult;
use crate::rng::create_rng;
use crate::rules::Rules;
use crate::shoe::Shoe;
use crate::stats::{Histogram, RunningStats, Stats};

/// Simulation parameters.
///
/// ```
/// use bjsim::{Rules, SimConfig};
///
/// let config = SimConfig::new(Rules::default(), 10.0, 500)
///     .with_seed(42)
///     .with_trials(200)
///     .with_capture_first_trial(true);
/// assert_eq!(config.trials, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Table rules.
    pub rules: Rules,
    /// Flat bet per hand.
    pub bet: f64,
    /// Maximum hands per trial.
    pub hands: u32,
    /// Seed for a reproducible run; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Number of trials.
    pub trials: u32,
    /// Keep every round of the first trial for replay.
    pub capture_first_trial: bool,
    /// Histogram bin count; `None` picks one from the trial count.
    pub histogram_bins: Option<usize>,
}

impl SimConfig {
    /// Creates a single-trial, unseeded configuration.
    #[must_use]
    pub const fn new(rules: Rules, bet: f64, hands: u32) -> Self {
        Self {
            rules,
            bet,
            hands,
            seed: None,
            trials: 1,
            capture_first_trial: false,
            histogram_bins: None,
        }
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of trials.
    #[must_use]
    pub const fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Sets whether the first trial keeps its rounds.
    #[must_use]
    pub const fn with_capture_first_trial(mut self, capture: bool) -> Self {
        self.capture_first_trial = capture;
        self
    }

    /// Sets the histogram bin count.
    #[must_use]
    pub const fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Bin count used for the profit histogram: 11 to 41, tracking trials.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.histogram_bins
            .unwrap_or_else(|| (self.trials as usize).clamp(11, 41))
    }
}

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    /// Bankroll at the start of the trial.
    pub starting_bankroll: f64,
    /// Bankroll at the end of the trial.
    pub ending_bankroll: f64,
    /// Ending minus starting bankroll.
    pub profit: f64,
    /// Hands actually played.
    pub hands_played: u32,
    /// Starting bankroll followed by the bankroll after each hand.
    pub bankroll_history: Vec<f64>,
    /// Every round, when this trial was captured.
    pub rounds: Option<Vec<RoundResult>>,
}

/// Everything a simulation produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Simulation {
    /// One entry per trial, in order.
    pub results: Vec<TrialResult>,
    /// Summary statistics.
    pub stats: Stats,
    /// Histogram of per-trial profit.
    pub histogram: Histogram,
}

/// Runs `config.trials` trials starting from `starting_bankroll` each.
///
/// All trials draw from one random stream in order, each with a fresh shoe.
/// A trial stops after `config.hands` hands or once the bankroll falls below
/// one bet.
///
/// # Errors
///
/// Returns an error if the rules, bet, bankroll, or histogram bin count are
/// invalid.
///
/// # Example
///
/// ```
/// use bjsim::{Rules, SimConfig, simulate};
///
/// let config = SimConfig::new(Rules::default(), 10.0, 100).with_seed(7).with_trials(20);
/// let sim = simulate(&config, 1_000.0).unwrap();
/// assert_eq!(sim.results.len(), 20);
/// assert_eq!(sim.histogram.total(), 20);
/// ```
pub fn simulate(config: &SimConfig, starting_bankroll: f64) -> Result<Simulation, SimulationError> {
    config.rules.validate()?;
    if !valid_bet(config.bet) {
        return Err(SimulationError::InvalidBet);
    }
    if !(starting_bankroll.is_finite() && starting_bankroll >= 0.0) {
        return Err(SimulationError::InvalidBankroll);
    }
    let bin_count = config.bin_count();
    if bin_count == 0 {
        return Err(SimulationError::ZeroHistogramBins);
    }

    tracing::info!(
        trials = config.trials,
        hands = config.hands,
        bet = config.bet,
        seed = ?config.seed,
        "simulation started"
    );

    let mut rng = create_rng(config.seed);
    let mut hand_stats = RunningStats::new();
    let mut run_stats = RunningStats::new();
    let mut results = Vec::with_capacity(config.trials as usize);

    for trial in 0..config.trials {
        let capture = config.capture_first_trial && trial == 0;
        let mut shoe = Shoe::new(&config.rules, &mut rng)?;
        let mut bankroll = starting_bankroll;
        let mut hands_played = 0;
        let mut history = Vec::with_capacity(config.hands as usize + 1);
        history.push(bankroll);
        let mut rounds = capture.then(Vec::new);

        while hands_played < config.hands && bankroll >= config.bet {
            let round = play_round(&mut shoe, &config.rules, config.bet, bankroll)?;
            bankroll += round.net;
            history.push(bankroll);
            hands_played += 1;
            hand_stats.push(round.net);
            if let Some(rounds) = rounds.as_mut() {
                rounds.push(round);
            }
        }

        let profit = bankroll - starting_bankroll;
        run_stats.push(profit);
        tracing::debug!(trial, hands_played, profit, "trial finished");

        results.push(TrialResult {
            starting_bankroll,
            ending_bankroll: bankroll,
            profit,
            hands_played,
            bankroll_history: history,
            rounds,
        });
    }

    let stats = Stats::from_moments(&hand_stats, &run_stats, starting_bankroll, config.bet);
    let profits: Vec<f64> = results.iter().map(|r| r.profit).collect();
    let histogram = Histogram::from_samples(&profits, bin_count);

    tracing::info!(
        ev_per_hand = stats.ev_per_hand,
        ev_run = stats.ev_run,
        risk_of_ruin = stats.risk_of_ruin,
        "simulation finished"
    );

    Ok(Simulation {
        results,
        stats,
        histogram,
    })
}
