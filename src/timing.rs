//! Scope timer for measuring numeric workloads.

use std::time::{Duration, Instant};

use log::info;

/// Logs the wall-clock time of a scope when dropped.
///
/// The message is emitted at `info` level through the `log` facade as
/// `Timer [name]: 12.345 ms`. Nothing is printed unless the application
/// installs a logger.
///
/// # Examples
/// ```
/// use u_numstable::stats::kahan_sum;
/// use u_numstable::timing::Timer;
///
/// let data = vec![0.1; 10_000];
/// let total = {
///     let _t = Timer::start("kahan_sum");
///     kahan_sum(&data)
/// };
/// assert!((total - 1000.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Starts timing a scope labelled `name`.
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Returns the label passed to [`start`](Self::start).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time elapsed since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(
            "Timer [{}]: {:.3} ms",
            self.name,
            self.elapsed().as_secs_f64() * 1000.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log;
    use log::Level;

    /// `<digits>.<3 digits> ms`
    fn is_millis(text: &str) -> bool {
        let Some(number) = text.strip_suffix(" ms") else {
            return false;
        };
        let Some((whole, frac)) = number.split_once('.') else {
            return false;
        };
        !whole.is_empty()
            && whole.bytes().all(|b| b.is_ascii_digit())
            && frac.len() == 3
            && frac.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn test_timer_elapsed_monotonic() {
        let t = Timer::start("monotonic");
        let a = t.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        let b = t.elapsed();
        assert!(b >= a + Duration::from_millis(2));
        assert_eq!(t.name(), "monotonic");
    }

    #[test]
    fn test_timer_logs_on_drop() {
        test_log::init();
        {
            let _t = Timer::start("drop-report");
            std::thread::sleep(Duration::from_millis(1));
        }
        let records = test_log::records_with_prefix("Timer [drop-report]: ");
        assert_eq!(records.len(), 1, "expected one timer line, got {records:?}");
        let (level, msg) = &records[0];
        assert_eq!(*level, Level::Info);
        let value = &msg["Timer [drop-report]: ".len()..];
        assert!(is_millis(value), "unexpected timer format: {msg}");
    }

    #[test]
    fn test_is_millis_format() {
        assert!(is_millis("0.042 ms"));
        assert!(is_millis("1234.500 ms"));
        assert!(!is_millis("1.5 ms"));
        assert!(!is_millis(".123 ms"));
        assert!(!is_millis("1.234 s"));
    }
}
