//! Cosmetic progress indicator shown while a prediction runs

use crate::config::ProgressConfig;
use std::time::Duration;
use tracing::debug;

/// Text displayed next to the progress bar
pub const PROGRESS_TEXT: &str = "Predicting forest cover type...";

/// Fixed, bounded delay stepped from 0 to 100 percent.
///
/// Not cancellable; completes in `steps * step_delay` regardless of load.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    steps: u32,
    step_delay: Duration,
}

impl ProgressIndicator {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            steps: config.steps,
            step_delay: Duration::from_millis(config.step_delay_ms),
        }
    }

    /// Total time a run takes
    pub fn total_duration(&self) -> Duration {
        self.step_delay * self.steps
    }

    /// Percent complete after `step` increments (1-based)
    pub fn percent_at(&self, step: u32) -> u32 {
        if self.steps == 0 {
            return 100;
        }
        (step.min(self.steps) * 100) / self.steps
    }

    /// Step through the indicator, returning the final percentage
    pub async fn run(&self) -> u32 {
        let mut percent = if self.steps == 0 { 100 } else { 0 };

        for step in 1..=self.steps {
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
            let next = self.percent_at(step);
            if next / 25 != percent / 25 {
                debug!(percent = next, "{}", PROGRESS_TEXT);
            }
            percent = next;
        }

        percent
    }
}
