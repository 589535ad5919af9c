use log::info;

/// Receives one tick per processed geometry.
///
/// Reporting is synchronous and cannot cancel a run. Every method but
/// [`advance`](Progress::advance) defaults to a no-op.
pub trait Progress {
    /// Called once before the first geometry with the number of
    /// geometries the run will process.
    fn begin(&mut self, _label: &'static str, _total: usize) {}

    /// Called once per processed geometry, including skipped ones.
    fn advance(&mut self);

    /// Called once after the last geometry.
    fn finish(&mut self) {}
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    #[inline]
    fn advance(&mut self) {}
}

/// Reports progress through `log::info!` at every tenth of the run.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    label: &'static str,
    total: usize,
    done: usize,
    reported: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of geometries seen so far.
    pub fn done(&self) -> usize {
        self.done
    }

    fn decile(&self) -> usize {
        if self.total == 0 {
            10
        } else {
            self.done * 10 / self.total
        }
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, label: &'static str, total: usize) {
        *self = LogProgress {
            label,
            total,
            ..Default::default()
        };
        info!("{label}: {total} geometries");
    }

    fn advance(&mut self) {
        self.done += 1;
        let decile = self.decile();
        if decile > self.reported {
            self.reported = decile;
            info!(
                "{label}: {done}/{total} ({pct}%)",
                label = self.label,
                done = self.done,
                total = self.total,
                pct = decile * 10,
            );
        }
    }

    fn finish(&mut self) {
        info!("{label}: done ({n} geometries)", label = self.label, n = self.done);
    }
}
