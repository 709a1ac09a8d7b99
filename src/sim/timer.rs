//! Looping tick timers

use serde::{Deserialize, Serialize};

/// A repeating timer counted in simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub period_ticks: u32,
    pub elapsed_ticks: u32,
}

impl Timer {
    pub fn new(period_ticks: u32) -> Self {
        Self {
            period_ticks: period_ticks.max(1),
            elapsed_ticks: 0,
        }
    }

    /// Period given in milliseconds, rounded to whole ticks of `dt` seconds
    pub fn from_millis(ms: u32, dt: f32) -> Self {
        let ticks = (ms as f32 / 1000.0 / dt).round() as u32;
        Self::new(ticks)
    }

    /// Count one tick; true when the period elapses
    pub fn advance(&mut self) -> bool {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.period_ticks {
            self.elapsed_ticks = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_from_millis() {
        assert_eq!(Timer::from_millis(1000, SIM_DT).period_ticks, 120);
        assert_eq!(Timer::from_millis(5000, SIM_DT).period_ticks, 600);
        // Never zero
        assert_eq!(Timer::from_millis(1, SIM_DT).period_ticks, 1);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = Timer::new(3);
        let fired: Vec<bool> = (0..7).map(|_| timer.advance()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
    }
}
