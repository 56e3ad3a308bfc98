//! Windowed statistics engine

use super::config::MovingAverageConfig;
use super::snapshot::{EstimatorKind, Snapshot};
use crate::averages::{simple_mean, weighted_mean, CumulativeAverage, ExponentialAverage};
use crate::order::SkipList;
use crate::traits::{Average, BoundedSequence, ConfigError, Estimator, StatsError};
use crate::window::RingWindow;

/// Moving averages and a moving median over a stream of samples
///
/// Samples of type `T` are converted into the averaging type `U`; pick a `U`
/// wider than `T` (e.g. `T = u8`, `U = i32` or `f32`) when fractional results
/// matter. Window storage `W` defaults to a [`RingWindow`].
///
/// # Lifecycle
///
/// A new engine is *disabled*. [`start`](Self::start) enables it and
/// [`stop`](Self::stop) disables it again. While disabled every read returns
/// `Ok(U::zero())` and leaves all state untouched; use
/// [`is_enabled`](Self::is_enabled) or [`snapshot`](Self::snapshot) to tell
/// that apart from a real zero.
///
/// # Ticks
///
/// Each [`add`](Self::add) starts a new tick. The first windowed read (simple,
/// weighted or median) of a tick pushes the latest sample into the window,
/// evicting the oldest one when full, so every windowed read within a tick sees
/// the same window. A sample is only blended into the exponential average the
/// first time that average is read in its tick; repeated reads return the same
/// value. Samples added without any read in between never reach the window or
/// the exponential average, only the cumulative average.
///
/// # Example
///
/// ```
/// use movingstats::moving::{MovingAverage, MovingAverageConfig};
///
/// let config = MovingAverageConfig::new(3).with_smoothing_factor(0.5);
/// let mut stats = MovingAverage::<i16, f32>::new(config).unwrap();
/// stats.start();
///
/// for reading in [10, 40, 20, 30] {
///     stats.add(reading);
///     stats.simple_average().unwrap();
/// }
///
/// // window is now [40, 20, 30]
/// assert_eq!(stats.simple_average(), Ok(30.0));
/// assert_eq!(stats.moving_median(), Ok(30.0));
/// assert_eq!(stats.cumulative_average(), Ok(25.0));
/// ```
#[derive(Clone, Debug)]
pub struct MovingAverage<T, U, W = RingWindow<U>> {
    config: MovingAverageConfig,
    enabled: bool,
    input: Option<T>,
    /// Latest sample converted to `U`, pending window sync
    latest: Option<U>,
    window: W,
    window_synced: bool,
    cumulative: CumulativeAverage<U>,
    exponential: ExponentialAverage<U>,
    exponential_synced: bool,
    /// Last value produced per estimator, `None` until calculated
    last: Snapshot<T, U>,
}

impl<T, U> MovingAverage<T, U, RingWindow<U>>
where
    T: Copy + Into<U>,
    U: Average,
{
    /// Create a disabled engine with a heap-allocated window
    pub fn new(config: MovingAverageConfig) -> Result<Self, ConfigError> {
        Self::with_window(config, RingWindow::new(config.window_size))
    }
}

impl<T, U, W> MovingAverage<T, U, W>
where
    T: Copy + Into<U>,
    U: Average,
    W: BoundedSequence<U>,
{
    /// Create a disabled engine over caller-provided window storage
    ///
    /// The window's capacity takes precedence over `config.window_size`, so a
    /// statically sized `heapless::Deque<U, N>` always holds `N` samples.
    /// Any elements already in `window` are discarded.
    pub fn with_window(mut config: MovingAverageConfig, mut window: W) -> Result<Self, ConfigError> {
        config.window_size = window.capacity();
        config.validate()?;
        window.clear();

        Ok(Self {
            config,
            enabled: false,
            input: None,
            latest: None,
            window,
            window_synced: true,
            cumulative: CumulativeAverage::new(),
            exponential: ExponentialAverage::new(config.smoothing_factor)?,
            exponential_synced: true,
            last: Snapshot {
                input: None,
                simple: None,
                cumulative: None,
                weighted: None,
                exponential: None,
                median: None,
            },
        })
    }

    /// Effective configuration
    pub fn config(&self) -> &MovingAverageConfig {
        &self.config
    }

    /// Capacity of the trailing window
    pub fn window_size(&self) -> usize {
        self.config.window_size
    }

    /// Enable reads
    pub fn start(&mut self) {
        if !self.enabled {
            log::debug!("moving average started (window {})", self.config.window_size);
        }
        self.enabled = true;
    }

    /// Disable reads; state is kept for the next [`start`](Self::start)
    pub fn stop(&mut self) {
        if self.enabled {
            log::debug!("moving average stopped");
        }
        self.enabled = false;
    }

    /// Check if reads are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a new sample and start a new tick
    ///
    /// The sample feeds the cumulative average immediately; the window and
    /// exponential average pick it up on their next read. NaN samples are
    /// dropped.
    pub fn add(&mut self, input: T) {
        let value: U = input.into();
        if !value.is_comparable() {
            log::warn!("dropping incomparable sample {:?}", value);
            return;
        }

        self.input = Some(input);
        self.latest = Some(value);
        self.cumulative.add(value);
        self.window_synced = false;
        self.exponential_synced = false;
    }

    /// Most recent sample passed to [`add`](Self::add)
    pub fn latest(&self) -> Option<T> {
        self.input
    }

    /// Number of samples accepted by [`add`](Self::add)
    pub fn sample_count(&self) -> u64 {
        self.cumulative.len()
    }

    /// The trailing window as of the last windowed read, oldest first
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Simple moving average over the window
    ///
    /// `Ok(U::zero())` while disabled.
    pub fn simple_average(&mut self) -> Result<U, StatsError> {
        if !self.enabled {
            return Ok(U::zero());
        }
        self.sync_window();
        let result = simple_mean(&self.window);
        Self::record(&mut self.last.simple, result)
    }

    /// Mean of every sample since construction or [`reset`](Self::reset)
    ///
    /// `Ok(U::zero())` while disabled.
    pub fn cumulative_average(&mut self) -> Result<U, StatsError> {
        if !self.enabled {
            return Ok(U::zero());
        }
        let result = self.cumulative.read();
        Self::record(&mut self.last.cumulative, result)
    }

    /// Linearly recency-weighted average over the window
    ///
    /// Fails with [`StatsError::DegenerateWeights`] for a window size below 2.
    /// `Ok(U::zero())` while disabled.
    pub fn weighted_average(&mut self) -> Result<U, StatsError> {
        if !self.enabled {
            return Ok(U::zero());
        }
        self.sync_window();
        let result = weighted_mean(&self.window);
        Self::record(&mut self.last.weighted, result)
    }

    /// Exponential moving average with the configured smoothing factor
    ///
    /// `Ok(U::zero())` while disabled.
    pub fn exponential_average(&mut self) -> Result<U, StatsError> {
        if !self.enabled {
            return Ok(U::zero());
        }
        if !self.exponential_synced {
            if let Some(value) = self.latest {
                self.exponential.add(value);
            }
            self.exponential_synced = true;
        }
        let result = self.exponential.read();
        Self::record(&mut self.last.exponential, result)
    }

    /// Median of the distinct values in the window
    ///
    /// A skip list is built from the window for this read and dropped
    /// afterwards. Repeated values count once, and an even number of distinct
    /// values yields the upper median. An empty window fails with
    /// [`StatsError::OutOfRange`]. `Ok(U::zero())` while disabled.
    pub fn moving_median(&mut self) -> Result<U, StatsError> {
        if !self.enabled {
            return Ok(U::zero());
        }
        self.sync_window();

        let levels = SkipList::<U>::levels_for(self.window.capacity());
        let mut list = SkipList::with_seed(levels, self.config.seed);
        list.extend(self.window.iter().copied());

        let result = list.get_median();
        Self::record(&mut self.last.median, result)
    }

    /// Read an estimator by kind
    pub fn read(&mut self, kind: EstimatorKind) -> Result<U, StatsError> {
        match kind {
            EstimatorKind::Simple => self.simple_average(),
            EstimatorKind::Cumulative => self.cumulative_average(),
            EstimatorKind::Weighted => self.weighted_average(),
            EstimatorKind::Exponential => self.exponential_average(),
            EstimatorKind::Median => self.moving_median(),
        }
    }

    /// Check if `kind` has produced a value since construction or reset
    pub fn is_calculated(&self, kind: EstimatorKind) -> bool {
        self.last.get(kind).is_some()
    }

    /// Latest input and the last value of every calculated estimator
    pub fn snapshot(&self) -> Snapshot<T, U> {
        Snapshot {
            input: self.input,
            ..self.last
        }
    }

    /// Forget every sample and estimate, keeping configuration and enablement
    pub fn reset(&mut self) {
        self.input = None;
        self.latest = None;
        self.window.clear();
        self.window_synced = true;
        self.cumulative = CumulativeAverage::new();
        self.exponential_synced = true;
        self.exponential.clear();
        self.last = Snapshot {
            input: None,
            simple: None,
            cumulative: None,
            weighted: None,
            exponential: None,
            median: None,
        };
    }

    /// Push the latest sample into the window once per tick
    fn sync_window(&mut self) {
        if self.window_synced {
            return;
        }
        if let Some(value) = self.latest {
            if let Some(evicted) = self.window.append(value) {
                log::trace!("window full, evicted {:?}", evicted);
            }
        }
        self.window_synced = true;
    }

    /// Keep the last successful value; a failed read does not clear it
    fn record(slot: &mut Option<U>, result: Result<U, StatsError>) -> Result<U, StatsError> {
        if let Ok(value) = result {
            *slot = Some(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(window_size: usize) -> MovingAverage<i16, f64> {
        let config = MovingAverageConfig::new(window_size).with_smoothing_factor(0.5);
        let mut engine = MovingAverage::new(config).unwrap();
        engine.start();
        engine
    }

    fn window_contents<T, U, W>(engine: &MovingAverage<T, U, W>) -> Vec<U>
    where
        T: Copy + Into<U>,
        U: Average,
        W: BoundedSequence<U>,
    {
        engine.window().iter().copied().collect()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert_eq!(
            MovingAverage::<i16, i16>::new(MovingAverageConfig::new(0)).unwrap_err(),
            ConfigError::ZeroWindow
        );
        let config = MovingAverageConfig::new(3).with_smoothing_factor(-1.0);
        assert!(MovingAverage::<i16, i16>::new(config).is_err());
    }

    #[test]
    fn test_starts_disabled() {
        let mut engine = MovingAverage::<i16, i16>::new(MovingAverageConfig::new(3)).unwrap();
        assert!(!engine.is_enabled());
        engine.add(5);
        assert_eq!(engine.simple_average(), Ok(0));
        assert_eq!(engine.moving_median(), Ok(0));
        assert!(engine.window().is_empty());
    }

    #[test]
    fn test_reads_before_any_sample() {
        let mut engine = engine(3);
        assert_eq!(engine.simple_average(), Err(StatsError::Empty));
        assert_eq!(engine.cumulative_average(), Err(StatsError::Empty));
        assert_eq!(engine.weighted_average(), Err(StatsError::Empty));
        assert_eq!(engine.exponential_average(), Err(StatsError::Empty));
        assert_eq!(
            engine.moving_median(),
            Err(StatsError::OutOfRange { index: 0, len: 0 })
        );
        assert!(!engine.is_calculated(EstimatorKind::Simple));
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut engine = engine(3);
        for v in 1..=5 {
            engine.add(v);
            engine.simple_average().unwrap();
            assert!(engine.window().len() <= 3);
        }
        assert_eq!(window_contents(&engine), vec![3.0, 4.0, 5.0]);
        assert_eq!(engine.simple_average(), Ok(4.0));
    }

    #[test]
    fn test_window_syncs_once_per_tick() {
        let mut engine = engine(4);
        engine.add(7);
        engine.simple_average().unwrap();
        engine.weighted_average().unwrap();
        engine.moving_median().unwrap();
        engine.simple_average().unwrap();
        assert_eq!(window_contents(&engine), vec![7.0]);
    }

    #[test]
    fn test_unread_samples_skip_the_window() {
        let mut engine = engine(4);
        engine.add(1);
        engine.add(2);
        engine.add(3);
        engine.simple_average().unwrap();
        assert_eq!(window_contents(&engine), vec![3.0]);
        // the cumulative average sees every sample
        assert_eq!(engine.cumulative_average(), Ok(2.0));
        assert_eq!(engine.sample_count(), 3);
    }

    #[test]
    fn test_weighted_recency_bias() {
        let mut engine = engine(3);
        for v in [1, 2, 3] {
            engine.add(v);
            engine.weighted_average().unwrap();
        }
        let wma = engine.weighted_average().unwrap();
        assert!((wma - 14.0 / 6.0).abs() < 1e-12);
        assert_eq!(engine.simple_average(), Ok(2.0));
    }

    #[test]
    fn test_weighted_degenerate_window() {
        let mut engine = engine(1);
        engine.add(4);
        assert_eq!(
            engine.weighted_average(),
            Err(StatsError::DegenerateWeights { window_size: 1 })
        );
        assert!(!engine.is_calculated(EstimatorKind::Weighted));
        // other windowed reads still work on a single-slot window
        assert_eq!(engine.simple_average(), Ok(4.0));
        assert_eq!(engine.moving_median(), Ok(4.0));
    }

    #[test]
    fn test_exponential_blends_once_per_tick() {
        let mut engine = engine(3);
        engine.add(8);
        assert_eq!(engine.exponential_average(), Ok(4.0));
        assert_eq!(engine.exponential_average(), Ok(4.0));
        engine.add(8);
        assert_eq!(engine.exponential_average(), Ok(6.0));
    }

    #[test]
    fn test_median_odd_even_and_duplicates() {
        let mut engine = engine(5);
        for v in [9, 1, 5] {
            engine.add(v);
            engine.moving_median().unwrap();
        }
        assert_eq!(engine.moving_median(), Ok(5.0));

        engine.add(7);
        // {1, 5, 7, 9}: upper median
        assert_eq!(engine.moving_median(), Ok(7.0));

        engine.add(1);
        // window [9, 1, 5, 7, 1] collapses to {1, 5, 7, 9}
        assert_eq!(engine.moving_median(), Ok(7.0));
    }

    #[test]
    fn test_stop_preserves_state() {
        let mut engine = engine(3);
        for v in [2, 4, 6] {
            engine.add(v);
            engine.simple_average().unwrap();
            engine.exponential_average().unwrap();
        }
        let before = (
            engine.simple_average(),
            engine.cumulative_average(),
            engine.exponential_average(),
            engine.moving_median(),
        );

        engine.stop();
        for kind in EstimatorKind::ALL {
            assert_eq!(engine.read(kind), Ok(0.0));
        }

        engine.start();
        let after = (
            engine.simple_average(),
            engine.cumulative_average(),
            engine.exponential_average(),
            engine.moving_median(),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_snapshot_tracks_calculated() {
        let mut engine = engine(3);
        engine.add(3);
        engine.simple_average().unwrap();
        engine.cumulative_average().unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.input, Some(3));
        assert_eq!(snapshot.simple, Some(3.0));
        assert_eq!(snapshot.cumulative, Some(3.0));
        assert_eq!(snapshot.median, None);
        assert!(engine.is_calculated(EstimatorKind::Cumulative));
        assert!(!engine.is_calculated(EstimatorKind::Exponential));
    }

    #[test]
    fn test_failed_read_keeps_last_value() {
        let mut slot = Some(3.0);
        let result = MovingAverage::<i16, f64>::record(&mut slot, Err(StatsError::Conversion));
        assert_eq!(result, Err(StatsError::Conversion));
        assert_eq!(slot, Some(3.0));

        let _ = MovingAverage::<i16, f64>::record(&mut slot, Ok(4.5));
        assert_eq!(slot, Some(4.5));
    }

    #[test]
    fn test_integer_cumulative_is_exact() {
        let mut engine = MovingAverage::<i16, i16>::new(MovingAverageConfig::new(4)).unwrap();
        engine.start();
        for v in [-35, 13, 47, 7] {
            engine.add(v);
        }
        assert_eq!(engine.cumulative_average(), Ok(8));
    }

    #[test]
    fn test_nan_dropped() {
        let mut engine =
            MovingAverage::<f32, f32>::new(MovingAverageConfig::new(3)).unwrap();
        engine.start();
        engine.add(1.0);
        engine.add(f32::NAN);
        assert_eq!(engine.latest(), Some(1.0));
        assert_eq!(engine.simple_average(), Ok(1.0));
        assert_eq!(engine.sample_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(3);
        engine.add(10);
        engine.simple_average().unwrap();
        engine.reset();

        assert!(engine.is_enabled());
        assert_eq!(engine.latest(), None);
        assert!(engine.window().is_empty());
        assert_eq!(engine.cumulative_average(), Err(StatsError::Empty));
        assert_eq!(engine.snapshot(), Snapshot::default());
    }

    #[test]
    fn test_integer_averaging_type() {
        let config = MovingAverageConfig::new(4);
        let mut engine = MovingAverage::<u8, i32>::new(config).unwrap();
        engine.start();
        for v in [1u8, 2, 2, 2] {
            engine.add(v);
            engine.simple_average().unwrap();
        }
        // 7 / 4 truncates
        assert_eq!(engine.simple_average(), Ok(1));
        assert_eq!(engine.moving_median(), Ok(2));
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_static_window() {
        let config = MovingAverageConfig::new(100);
        let window: heapless::Deque<f32, 2> = heapless::Deque::new();
        let mut engine = MovingAverage::<i16, f32, _>::with_window(config, window).unwrap();
        assert_eq!(engine.window_size(), 2);
        engine.start();
        for v in [1, 2, 3] {
            engine.add(v);
            engine.simple_average().unwrap();
        }
        assert_eq!(engine.simple_average(), Ok(2.5));
    }
}
