//! Background-search wiring: run the engine off the caller's thread and
//! hand the chosen move back through a single-slot channel.
//!
//! The worker owns one engine behind a mutex, so the transposition table
//! survives from one search to the next and two submitted searches can
//! never explore with the same table concurrently. Cancellation is
//! cooperative: the flag is checked between iterative-deepening depths,
//! and a cancelled task simply never publishes a result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, trace};
use parking_lot::Mutex;

use crate::board::Move;
use crate::game::Position;

use super::SearchEngine;

/// Handle to one in-flight search.
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    receiver: Receiver<Move>,
    handle: Option<JoinHandle<()>>,
}

impl SearchHandle {
    /// Ask the search to stop at the next depth boundary. The task will
    /// finish without publishing a result.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Non-blocking poll for a finished result.
    #[must_use]
    pub fn try_result(&self) -> Option<Move> {
        match self.receiver.try_recv() {
            Ok(mv) => Some(mv),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the search finishes; `None` if it was cancelled.
    #[must_use]
    pub fn wait(mut self) -> Option<Move> {
        let result = self.receiver.recv().ok();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

/// Runs searches on a dedicated thread per request, against a shared,
/// persistent [`SearchEngine`].
pub struct SearchWorker {
    engine: Arc<Mutex<SearchEngine>>,
}

impl SearchWorker {
    #[must_use]
    pub fn new() -> Self {
        SearchWorker {
            engine: Arc::new(Mutex::new(SearchEngine::new())),
        }
    }

    /// Submit a position for searching. The worker takes its own
    /// independent copy; the caller's position is never touched.
    #[must_use]
    pub fn submit(&self, position: &Position, max_depth: u8) -> SearchHandle {
        let game = position.clone_for_search();
        let stop = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::sync_channel(1);

        let engine = Arc::clone(&self.engine);
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            trace!("search task started (max depth {max_depth})");
            let mut engine = engine.lock();
            let best = engine.find_best_move_cancellable(&game, max_depth, &stop_flag);
            match best {
                Some(mv) if !stop_flag.load(Ordering::Relaxed) => {
                    // A full channel means the handle was dropped; nothing
                    // to deliver to in that case.
                    let _ = sender.try_send(mv);
                }
                _ => debug!("search task finished without a result"),
            }
        });

        SearchHandle {
            stop,
            receiver,
            handle: Some(handle),
        }
    }
}

impl Default for SearchWorker {
    fn default() -> Self {
        SearchWorker::new()
    }
}
