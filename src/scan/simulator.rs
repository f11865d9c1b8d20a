//! Pure progress model of the scan animation.
//!
//! Nothing here knows about timers; the runner feeds increments in and
//! renders what comes out.

use crate::core::Language;
use rand::Rng;
use thiserror::Error;

/// Value at which a scan is complete.
pub const COMPLETE: f64 = 100.0;

/// Default upper bound of a single random step.
pub const DEFAULT_MAX_INCREMENT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub threshold: f64,
    pub message: String,
}

impl Milestone {
    pub fn new(threshold: f64, message: impl Into<String>) -> Self {
        Self {
            threshold,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MilestoneError {
    #[error("milestone threshold {0} is outside (0, 100]")]
    OutOfRange(f64),
    #[error("milestone thresholds must be strictly increasing ({previous} then {next})")]
    NotIncreasing { previous: f64, next: f64 },
}

/// Log lines printed while the scan runs.
pub fn default_milestones(lang: Language) -> Vec<Milestone> {
    let messages: [(f64, &str, &str); 7] = [
        (15.0, "> Veri paketleri [0xFF4A] gönderiliyor...", "> Sending data packets [0xFF4A]..."),
        (25.0, "> Bölge taraması başlatıldı...", "> Region scan started..."),
        (40.0, "> Anomali tespiti ve manyetik alan taraması...", "> Anomaly detection and magnetic field scan..."),
        (55.0, "> Doku yoğunluğu analizi: Normal", "> Tissue density analysis: Normal"),
        (70.0, "> Manyetik alan: 45µT - Stabil", "> Magnetic field: 45µT - Stable"),
        (85.0, "> Senkronizasyon tamamlanıyor...", "> Completing synchronization..."),
        (95.0, "> Sonuçlar derleniyor...", "> Compiling results..."),
    ];
    messages
        .iter()
        .map(|(threshold, tr, en)| {
            let message = match lang {
                Language::Tr => *tr,
                Language::En => *en,
            };
            Milestone::new(*threshold, message)
        })
        .collect()
}

/// Advance progress by a non-negative step, saturating at [`COMPLETE`].
pub fn next_progress(current: f64, increment: f64) -> f64 {
    (current + increment.max(0.0)).min(COMPLETE)
}

/// Uniform step in `[0, max)`; zero unless `max` is positive and finite.
pub fn random_increment<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 0.0;
    }
    rng.gen_range(0.0..max)
}

/// What a single tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub progress: f64,
    /// Messages of milestones crossed on this tick, in threshold order.
    pub fired: Vec<String>,
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct ScanSimulator {
    milestones: Vec<Milestone>,
    next_milestone: usize,
    progress: f64,
    log: Vec<String>,
}

impl ScanSimulator {
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, MilestoneError> {
        let mut previous: Option<f64> = None;
        for milestone in &milestones {
            let t = milestone.threshold;
            if !(t > 0.0 && t <= COMPLETE) {
                return Err(MilestoneError::OutOfRange(t));
            }
            if let Some(prev) = previous {
                if t <= prev {
                    return Err(MilestoneError::NotIncreasing { previous: prev, next: t });
                }
            }
            previous = Some(t);
        }
        Ok(Self {
            milestones,
            next_milestone: 0,
            progress: 0.0,
            log: Vec::new(),
        })
    }

    pub fn with_defaults(lang: Language) -> Self {
        Self {
            milestones: default_milestones(lang),
            next_milestone: 0,
            progress: 0.0,
            log: Vec::new(),
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= COMPLETE
    }

    /// Every milestone message fired so far.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn tick(&mut self, increment: f64) -> TickOutcome {
        self.progress = next_progress(self.progress, increment);

        let mut fired = Vec::new();
        while let Some(milestone) = self.milestones.get(self.next_milestone) {
            if self.progress < milestone.threshold {
                break;
            }
            fired.push(milestone.message.clone());
            self.next_milestone += 1;
        }
        self.log.extend(fired.iter().cloned());

        TickOutcome {
            progress: self.progress,
            fired,
            complete: self.is_complete(),
        }
    }
}
