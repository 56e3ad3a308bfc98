//! Simple and weighted means over a window

use crate::traits::{Average, BoundedSequence, StatsError};

/// Arithmetic mean of every element in `window`
///
/// The sum is accumulated in `f64`; integer results truncate toward zero.
pub fn simple_mean<U, W>(window: &W) -> Result<U, StatsError>
where
    U: Average,
    W: BoundedSequence<U> + ?Sized,
{
    let len = window.len();
    if len == 0 {
        return Err(StatsError::Empty);
    }

    let mut sum = 0.0;
    for value in window.iter() {
        sum += value.widen()?;
    }
    U::narrow(sum / len as f64)
}

/// Mean weighted linearly by recency
///
/// The oldest element gets weight 1 and the newest weight `len`; the total
/// weight is the triangular number `len * (len + 1) / 2`. Once the window is
/// full that is `capacity * (capacity + 1) / 2`.
///
/// Fails with [`StatsError::DegenerateWeights`] when the window capacity is
/// below 2, since a single weight reduces to the plain value and is almost
/// certainly a configuration mistake.
///
/// # Example
///
/// ```
/// use movingstats::averages::weighted_mean;
/// use movingstats::traits::BoundedSequence;
/// use movingstats::window::RingWindow;
///
/// let mut window = RingWindow::new(3);
/// for v in [1.0, 2.0, 3.0] {
///     window.append(v);
/// }
///
/// // (1*1 + 2*2 + 3*3) / 6
/// let wma: f64 = weighted_mean(&window).unwrap();
/// assert!((wma - 14.0 / 6.0).abs() < 1e-12);
/// ```
pub fn weighted_mean<U, W>(window: &W) -> Result<U, StatsError>
where
    U: Average,
    W: BoundedSequence<U> + ?Sized,
{
    let window_size = window.capacity();
    if window_size <= 1 {
        return Err(StatsError::DegenerateWeights { window_size });
    }

    let len = window.len();
    if len == 0 {
        return Err(StatsError::Empty);
    }

    let mut weighted_sum = 0.0;
    for (i, value) in window.iter().enumerate() {
        weighted_sum += value.widen()? * (i + 1) as f64;
    }
    let weight_total = (len * (len + 1) / 2) as f64;
    U::narrow(weighted_sum / weight_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::RingWindow;

    fn window_of<U: Copy>(capacity: usize, values: &[U]) -> RingWindow<U> {
        let mut window = RingWindow::new(capacity);
        for &v in values {
            window.append(v);
        }
        window
    }

    #[test]
    fn test_simple_mean() {
        let window = window_of(3, &[1.0, 2.0, 3.0]);
        assert_eq!(simple_mean::<f64, _>(&window), Ok(2.0));
    }

    #[test]
    fn test_simple_mean_integer_truncates() {
        let window = window_of(4, &[1i16, 2, 2, 2]);
        assert_eq!(simple_mean(&window), Ok(1i16));
    }

    #[test]
    fn test_simple_mean_empty() {
        let window: RingWindow<f32> = RingWindow::new(3);
        assert_eq!(simple_mean(&window), Err(StatsError::Empty));
    }

    #[test]
    fn test_weighted_recency_bias() {
        let window = window_of(3, &[1.0, 2.0, 3.0]);
        let wma: f64 = weighted_mean(&window).unwrap();
        let sma: f64 = simple_mean(&window).unwrap();
        assert!((wma - 14.0 / 6.0).abs() < 1e-12);
        assert_eq!(sma, 2.0);
        assert!(wma > sma);
    }

    #[test]
    fn test_weighted_partial_window_uses_current_len() {
        // only two samples in a window of five: weights 1 and 2, total 3
        let window = window_of(5, &[3.0, 6.0]);
        assert_eq!(weighted_mean::<f64, _>(&window), Ok(5.0));
    }

    #[test]
    fn test_weighted_degenerate_window() {
        let window = window_of(1, &[3.0]);
        assert_eq!(
            weighted_mean::<f64, _>(&window),
            Err(StatsError::DegenerateWeights { window_size: 1 })
        );
    }

    #[test]
    fn test_weighted_no_overflow_in_narrow_type() {
        let window = window_of(8, &[i16::MAX; 8]);
        assert_eq!(weighted_mean(&window), Ok(i16::MAX));
    }
}
