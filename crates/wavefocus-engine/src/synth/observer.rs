//! Progress reporting for synthesis runs.

/// Reported after one speaker's contribution has been accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerProgress {
    /// Index of the speaker that just finished.
    pub speaker: usize,
    /// Number of speakers finished so far, including this one.
    pub completed: usize,
    /// Total number of speakers in the run.
    pub total: usize,
}

impl SpeakerProgress {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Side channel notified as speakers complete.
///
/// Calls may arrive from worker threads and in any speaker order. Each value
/// of `completed` from 1 to `total` is reported exactly once. Observers
/// cannot alter the run.
pub trait ProgressObserver: Sync {
    /// Called once per speaker, after all of its beams are accumulated.
    fn speaker_done(&self, progress: SpeakerProgress);
}

impl<F> ProgressObserver for F
where
    F: Fn(SpeakerProgress) + Sync,
{
    fn speaker_done(&self, progress: SpeakerProgress) {
        self(progress)
    }
}
