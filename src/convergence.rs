use crate::constants::{Float, SHORT_WINDOW_RATIO};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Running,
    Converged,
}

/// Running sum over the most recent `length` samples.
#[derive(Debug, Clone)]
struct Window {
    length: usize,
    sum: Float,
}

impl Window {
    fn new(length: usize) -> Self {
        Window { length, sum: 0.0 }
    }

    fn add(&mut self, value: Float) {
        self.sum += value;
    }

    fn remove(&mut self, value: Float) {
        self.sum -= value;
    }

    fn mean(&self) -> Float {
        self.sum / self.length as Float
    }
}

/// Steady-state detector comparing a short and a long moving average of a
/// scalar signal.
///
/// # Examples
/// ```
/// # use lbperm::convergence::ConvergenceTracker;
/// let mut tracker = ConvergenceTracker::new(1.0, 50.0, 1e-4);
/// for _ in 0..49 {
///     tracker.take_value(0.25);
/// }
/// assert!(!tracker.has_converged());
///
/// tracker.take_value(0.25);
/// assert!(tracker.has_converged());
/// ```
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    tolerance: Float,
    history: VecDeque<Float>,
    short_window: Window,
    long_window: Window,
    step: usize,
    status: ConvergenceStatus,
}

impl ConvergenceTracker {
    /// The long window spans `size / velocity` steps, the short one a fixed
    /// fraction of it.
    pub fn new(velocity: Float, size: Float, tolerance: Float) -> Self {
        let long_length = ((size / velocity).round() as usize).max(1);
        let short_length = (long_length / SHORT_WINDOW_RATIO).max(1);
        ConvergenceTracker {
            tolerance,
            history: VecDeque::new(),
            short_window: Window::new(short_length),
            long_window: Window::new(long_length),
            step: 0,
            status: ConvergenceStatus::Running,
        }
    }

    pub fn take_value(&mut self, value: Float) {
        self.step += 1;
        let filled = self.history.len();
        if filled >= self.short_window.length {
            let leaving = self.history[filled - self.short_window.length];
            self.short_window.remove(leaving);
        }
        if filled == self.long_window.length {
            if let Some(oldest) = self.history.pop_front() {
                self.long_window.remove(oldest);
            }
        }
        self.history.push_back(value);
        self.short_window.add(value);
        self.long_window.add(value);
        if self.step % self.long_window.length == 0 {
            self.resynchronize();
        }

        if self.status == ConvergenceStatus::Running && self.is_steady() {
            self.status = ConvergenceStatus::Converged;
        }
    }

    /// Rebuilds both running sums from the stored samples, dropping the
    /// rounding residue left by retired values.
    fn resynchronize(&mut self) {
        self.long_window.sum = self.history.iter().sum();
        self.short_window.sum = self
            .history
            .iter()
            .rev()
            .take(self.short_window.length)
            .sum();
    }

    /// Standard deviation of the long window, computed in two passes over
    /// the stored samples.
    fn long_standard_deviation(&self) -> Float {
        let length = self.history.len() as Float;
        let mean = self.history.iter().sum::<Float>() / length;
        let variance = self
            .history
            .iter()
            .map(|value| (value - mean) * (value - mean))
            .sum::<Float>()
            / length;
        variance.sqrt()
    }

    fn is_steady(&self) -> bool {
        if self.step < self.long_window.length {
            return false;
        }
        let long_mean = self.long_window.mean();
        let difference = (self.short_window.mean() - long_mean).abs();
        let relative_difference = if difference == 0.0 {
            0.0
        } else {
            difference / long_mean.abs()
        };
        if !(relative_difference < self.tolerance) {
            return false;
        }
        let deviation = self.long_standard_deviation();
        let relative_deviation = if deviation == 0.0 {
            0.0
        } else {
            deviation / long_mean.abs()
        };
        relative_deviation < self.tolerance
    }

    pub fn has_converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }

    pub fn get_status(&self) -> ConvergenceStatus {
        self.status
    }

    pub fn get_step(&self) -> usize {
        self.step
    }

    pub fn get_short_average(&self) -> Float {
        self.short_window.mean()
    }

    pub fn get_long_average(&self) -> Float {
        self.long_window.mean()
    }

    pub fn get_long_window_length(&self) -> usize {
        self.long_window.length
    }

    pub fn get_short_window_length(&self) -> usize {
        self.short_window.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_lengths() {
        let tracker = ConvergenceTracker::new(1.0, 1000.0, 1e-4);

        assert_eq!(tracker.get_long_window_length(), 1000);
        assert_eq!(tracker.get_short_window_length(), 100);

        let tracker = ConvergenceTracker::new(2.0, 1000.0, 1e-4);
        assert_eq!(tracker.get_long_window_length(), 500);

        let tracker = ConvergenceTracker::new(1.0, 5.0, 1e-4);
        assert_eq!(tracker.get_short_window_length(), 1);
    }

    #[test]
    fn test_constant_signal_converges_once_long_window_is_filled() {
        let mut tracker = ConvergenceTracker::new(1.0, 1000.0, 1e-4);
        for _ in 0..999 {
            tracker.take_value(3.5e-6);
            assert!(!tracker.has_converged());
        }
        tracker.take_value(3.5e-6);

        assert!(tracker.has_converged());
        assert_eq!(tracker.get_status(), ConvergenceStatus::Converged);
    }

    #[test]
    fn test_zero_signal_converges() {
        let mut tracker = ConvergenceTracker::new(1.0, 20.0, 1e-4);
        (0..20).for_each(|_| tracker.take_value(0.0));

        assert!(tracker.has_converged());
    }

    #[test]
    fn test_oscillating_signal_never_converges() {
        let mut tracker = ConvergenceTracker::new(1.0, 100.0, 1e-4);
        for step in 0..20_000 {
            let value = if step % 2 == 0 { 1.0 } else { 1.01 };
            tracker.take_value(value);
        }

        assert!(!tracker.has_converged());
    }

    #[test]
    fn test_slow_periodic_signal_never_converges() {
        let mut tracker = ConvergenceTracker::new(1.0, 100.0, 1e-4);
        for step in 0..20_000 {
            let value = 1.0 + 0.01 * (step as Float * 0.05).sin();
            tracker.take_value(value);
        }

        assert!(!tracker.has_converged());
    }

    #[test]
    fn test_growing_signal_converges_after_it_settles() {
        let mut tracker = ConvergenceTracker::new(1.0, 100.0, 1e-4);
        let mut converged_at = None;
        for step in 0..5_000 {
            let value = 1.0 - (-(step as Float) / 50.0).exp();
            tracker.take_value(value);
            if tracker.has_converged() && converged_at.is_none() {
                converged_at = Some(step);
            }
        }

        let converged_at = converged_at.expect("Signal settles well within the harness");
        assert!(converged_at > 100);
    }

    #[test]
    fn test_constant_signal_after_large_transient_converges() {
        let mut tracker = ConvergenceTracker::new(1.0, 1000.0, 1e-4);
        for step in 0..1000 {
            tracker.take_value(if step % 2 == 0 { 1.0 } else { 0.3 });
        }
        assert!(!tracker.has_converged());

        (0..2000).for_each(|_| tracker.take_value(1e-6));

        assert!(tracker.has_converged());
        assert_relative_eq!(tracker.get_long_average(), 1e-6, max_relative = 1e-9);
    }

    #[test]
    fn test_small_plateau_after_decaying_transient_converges() {
        let mut tracker = ConvergenceTracker::new(1.0, 500.0, 1e-4);
        for step in 0..500 {
            tracker.take_value(1e-3 * (-(step as Float) / 100.0).exp());
        }
        (0..1500).for_each(|_| tracker.take_value(2e-8));

        assert!(tracker.has_converged());
    }

    #[test]
    fn test_unbounded_window_never_fills() {
        let mut tracker = ConvergenceTracker::new(1.0, Float::INFINITY, 1e-4);
        (0..100).for_each(|_| tracker.take_value(1.0));

        assert!(!tracker.has_converged());
        assert_eq!(tracker.get_step(), 100);
    }

    #[test]
    fn test_converged_state_is_latched() {
        let mut tracker = ConvergenceTracker::new(1.0, 10.0, 1e-4);
        (0..10).for_each(|_| tracker.take_value(2.0));
        assert!(tracker.has_converged());

        for step in 0..100 {
            tracker.take_value(if step % 2 == 0 { 0.0 } else { 50.0 });
            assert!(tracker.has_converged());
        }
    }

    #[test]
    fn test_has_converged_does_not_mutate() {
        let mut tracker = ConvergenceTracker::new(1.0, 10.0, 1e-4);
        (0..5).for_each(|_| tracker.take_value(1.0));
        for _ in 0..10 {
            assert!(!tracker.has_converged());
        }

        assert_eq!(tracker.get_step(), 5);
    }

    #[test]
    fn test_window_averages_track_recent_values() {
        let mut tracker = ConvergenceTracker::new(1.0, 20.0, 1e-4);
        (0..20).for_each(|_| tracker.take_value(1.0));
        (0..2).for_each(|_| tracker.take_value(3.0));

        assert_relative_eq!(tracker.get_short_average(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(tracker.get_long_average(), 1.2, epsilon = 1e-12);
    }
}
