use super::signal::RefreshStats;
use chrono::Timelike;
use std::collections::HashMap;

/// Hourly mean occupancy above which premium pricing is suggested.
const HIGH_UTILISATION: f32 = 0.8;
/// Hourly mean occupancy below which an early-bird discount is suggested.
const LOW_UTILISATION: f32 = 0.3;

/// Session-scoped occupancy statistics. Fed one sample per rendered cycle;
/// nothing here outlives the process.
pub struct UtilisationTracker {
    samples: Vec<UtilSample>,
}

#[derive(Debug, Clone, Copy)]
struct UtilSample {
    hour: u32,
    ratio: f32,
}

impl Default for UtilisationTracker {
    fn default() -> Self { Self::new() }
}

impl UtilisationTracker {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Records a rendered cycle. Cycles with an empty slot list carry no
    /// occupancy information and are not sampled.
    pub fn record(&mut self, stats: &RefreshStats) {
        if let Some(ratio) = stats.utilisation() {
            self.samples.push(UtilSample {
                hour: stats.timestamp().hour(),
                ratio,
            });
        }
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    #[allow(clippy::cast_precision_loss)]
    pub fn mean_utilisation(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().map(|s| s.ratio).sum::<f32>() / self.samples.len() as f32)
    }

    #[allow(clippy::cast_precision_loss)]
    fn hourly_means(&self) -> HashMap<u32, f32> {
        let mut sums: HashMap<u32, (f32, u32)> = HashMap::new();
        for s in &self.samples {
            let entry = sums.entry(s.hour).or_insert((0.0, 0));
            entry.0 += s.ratio;
            entry.1 += 1;
        }
        sums.into_iter().map(|(h, (sum, n))| (h, sum / n as f32)).collect()
    }

    fn peak_hour(&self) -> Option<u32> {
        self.hourly_means()
            .into_iter()
            .filter(|&(_, mean)| mean > HIGH_UTILISATION)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    fn trough_hour(&self) -> Option<u32> {
        self.hourly_means()
            .into_iter()
            .filter(|&(_, mean)| mean < LOW_UTILISATION)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    /// Dynamic-pricing suggestions derived from this session's samples.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pricing_tips(&self) -> Vec<String> {
        let mut tips = Vec::new();
        if let Some(peak) = self.peak_hour() {
            tips.push(format!(
                "Premium pricing between {peak:02}:00-{:02}:00 (>= {}% full)",
                peak + 1,
                (HIGH_UTILISATION * 100.0) as u32
            ));
        }
        if let Some(trough) = self.trough_hour() {
            tips.push(format!(
                "Early-bird discount around {trough:02}:00-{:02}:00 (<= {}% full)",
                trough + 1,
                (LOW_UTILISATION * 100.0) as u32
            ));
        }
        if tips.is_empty() {
            tips.push(String::from("No strong trends detected - keep flat pricing."));
        }
        tips
    }
}
