//! Wall-clock arrival timer for interactive front ends.
//!
//! The simulation itself schedules arrivals in ticks (`CustomerFlow`); this
//! timer exists for callers that pace the game against real time instead.
//! A background thread pushes one signal per period into a bounded FIFO;
//! the consumer drains pending signals and turns them into `SpawnCustomer`
//! commands. When the consumer falls behind, overflow signals are dropped
//! rather than queued without bound.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TrySendError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// One customer arrival owed to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalSignal;

pub struct ArrivalTimer {
    rx: Receiver<ArrivalSignal>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ArrivalTimer {
    /// Spawns the producer thread. `capacity` bounds the number of arrivals
    /// that can pile up unconsumed.
    pub fn start(period: Duration, capacity: usize) -> Self {
        let (tx, rx) = std::sync::mpsc::sync_channel(capacity);
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            tracing::debug!(?period, capacity, "arrival timer started");
            loop {
                std::thread::sleep(period);
                if thread_stop.load(Ordering::Relaxed) {
                    break;
                }
                match tx.try_send(ArrivalSignal) {
                    Ok(()) => tracing::trace!("arrival signal queued"),
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!("arrival queue full, dropping signal");
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
            tracing::debug!("arrival timer stopped");
        });

        ArrivalTimer {
            rx,
            stop,
            handle: Some(handle),
        }
    }

    /// Takes every pending arrival signal without blocking.
    pub fn drain(&self) -> Vec<ArrivalSignal> {
        let mut signals = Vec::new();
        while let Ok(signal) = self.rx.try_recv() {
            signals.push(signal);
        }
        signals
    }

    /// Signals the producer thread and joins it. The thread notices the
    /// flag after at most one period. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("arrival timer thread panicked");
            }
        }
    }
}

impl Drop for ArrivalTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_produces_signals_while_running() {
        let timer = ArrivalTimer::start(Duration::from_millis(5), 64);
        std::thread::sleep(Duration::from_millis(100));
        let signals = timer.drain();
        assert!(!signals.is_empty(), "no arrivals after 100ms at 5ms period");
    }

    #[test]
    fn queue_is_bounded_by_capacity() {
        let timer = ArrivalTimer::start(Duration::from_millis(1), 3);
        std::thread::sleep(Duration::from_millis(100));
        let signals = timer.drain();
        assert!(signals.len() <= 3, "drained {} signals", signals.len());
        assert!(!signals.is_empty());
    }

    #[test]
    fn stop_joins_the_producer() {
        let mut timer = ArrivalTimer::start(Duration::from_millis(1), 8);
        std::thread::sleep(Duration::from_millis(10));
        timer.stop();
        assert!(timer.handle.is_none());

        // No new signals accumulate after stop.
        timer.drain();
        std::thread::sleep(Duration::from_millis(20));
        assert!(timer.drain().is_empty());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = ArrivalTimer::start(Duration::from_millis(1), 8);
        timer.stop();
        timer.stop();
    }
}
