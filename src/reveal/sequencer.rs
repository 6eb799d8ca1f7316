//! Timed reveal of a single die.

use smallvec::SmallVec;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::core::config::RevealConfig;
use crate::core::die::DieFace;

/// Trace of a settled reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    /// Every value passed to `on_tick`, the settled one last.
    pub ticks: SmallVec<[DieFace; 24]>,
    /// The committed value.
    pub settled: DieFace,
}

/// Drives one die from transient values to a settled face.
///
/// The sequence suspends between ticks instead of blocking, and stops at the
/// next suspension point once its cancellation token fires.
#[derive(Clone, Debug)]
pub struct RevealSequencer {
    config: RevealConfig,
}

impl RevealSequencer {
    pub fn new(config: RevealConfig) -> Self {
        Self { config }
    }

    /// Schedule this sequencer follows.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Run the reveal to completion.
    ///
    /// Calls `on_tick` with `transient_ticks` independent draws, pausing
    /// `delay_after(i)` after each, then draws the final value, ticks it and
    /// returns it as the settled face. Returns `None` without further ticks
    /// if `cancel` fires first.
    pub async fn run<D, T>(
        &self,
        cancel: &CancellationToken,
        mut draw: D,
        mut on_tick: T,
    ) -> Option<Reveal>
    where
        D: FnMut() -> DieFace,
        T: FnMut(DieFace),
    {
        let mut ticks = SmallVec::new();

        for index in 0..self.config.transient_ticks {
            if cancel.is_cancelled() {
                return None;
            }
            let face = draw();
            on_tick(face);
            ticks.push(face);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    trace!(index, "reveal cancelled");
                    return None;
                }
                _ = tokio::time::sleep(self.config.delay_after(index)) => {}
            }
        }

        if cancel.is_cancelled() {
            return None;
        }
        let settled = draw();
        on_tick(settled);
        ticks.push(settled);

        Some(Reveal { ticks, settled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::die::DieSource;
    use crate::core::rng::GameRng;
    use std::time::Duration;
    use tokio::time::Instant;

    fn schedule(ticks: u32) -> RevealConfig {
        RevealConfig::default().with_ticks(ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_once_on_last_tick() {
        let sequencer = RevealSequencer::new(schedule(20));
        let mut rng = GameRng::new(42);
        let mut seen = Vec::new();

        let reveal = sequencer
            .run(&CancellationToken::new(), || rng.roll(), |face| seen.push(face))
            .await
            .expect("uncancelled reveal settles");

        assert_eq!(seen.len(), 21);
        assert_eq!(seen.last(), Some(&reveal.settled));
        assert_eq!(reveal.ticks.as_slice(), seen.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_slow_down() {
        let sequencer = RevealSequencer::new(schedule(6));
        let mut rng = GameRng::new(1);
        let mut stamps = Vec::new();
        let start = Instant::now();

        sequencer
            .run(&CancellationToken::new(), || rng.roll(), |_| stamps.push(Instant::now()))
            .await
            .unwrap();

        let gaps: Vec<Duration> = stamps.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(gaps.len(), 6);
        for pair in gaps.windows(2) {
            assert!(pair[1] > pair[0], "gaps must grow: {gaps:?}");
        }
        assert!(start.elapsed() >= sequencer.config().total_duration());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_ticks() {
        let sequencer = RevealSequencer::new(schedule(20));
        let cancel = CancellationToken::new();
        let child = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut rng = GameRng::new(3);
            let mut count = 0usize;
            let reveal = sequencer.run(&child, || rng.roll(), |_| count += 1).await;
            (reveal, count)
        });

        tokio::time::sleep(Duration::from_millis(300)).await;
        cancel.cancel();

        let (reveal, count) = handle.await.unwrap();
        assert!(reveal.is_none());
        assert!(count > 0 && count < 21, "ticks before cancel: {count}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start_never_ticks() {
        let sequencer = RevealSequencer::new(schedule(3));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut rng = GameRng::new(3);
        let mut ticked = false;

        let reveal = sequencer.run(&cancel, || rng.roll(), |_| ticked = true).await;

        assert!(reveal.is_none());
        assert!(!ticked);
    }
}
