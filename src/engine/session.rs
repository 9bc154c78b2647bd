//! Control session worker
//!
//! One dedicated thread runs the acquire-classify-dispatch loop,
//! synchronous and blocking on each frame, independent of whatever host
//! surface displays state. The host polls the shared snapshot on its own
//! cadence; the snapshot is replaced wholesale each iteration behind the
//! lock, so readers always see one consistent frame's view.
//!
//! A failed frame acquisition terminates the worker; there are no
//! per-frame retries. A cooperative flag stops it; the flag is checked
//! once per frame and [`Session::stop`] joins the thread before
//! returning.

use super::mode::Mode;
use super::GestureEngine;
use crate::platform::detector::HandSource;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info};

/// Last-frame view for the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Active mode
    pub mode: Mode,
    /// Active mode's display name
    pub mode_label: &'static str,
    /// Last executed action or idle hint
    pub action: &'static str,
    /// Frames processed so far
    pub frame_index: u64,
    /// False once the worker has exited
    pub worker_alive: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            mode: Mode::Standby,
            mode_label: Mode::Standby.label(),
            action: Mode::Standby.hint(),
            frame_index: 0,
            worker_alive: true,
        }
    }
}

/// A running control session
pub struct Session {
    running: Arc<AtomicBool>,
    snapshot: Arc<RwLock<Snapshot>>,
    worker: Option<JoinHandle<()>>,
}

impl Session {
    /// Spawn the worker thread over a frame source and engine.
    pub fn spawn(
        mut source: Box<dyn HandSource>,
        mut engine: GestureEngine,
    ) -> crate::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let snapshot = Arc::new(RwLock::new(Snapshot::default()));

        let worker_running = Arc::clone(&running);
        let worker_snapshot = Arc::clone(&snapshot);
        let worker = thread::Builder::new()
            .name("gesture-engine".into())
            .spawn(move || {
                let mut frame_index: u64 = 0;
                while worker_running.load(Ordering::SeqCst) {
                    let frame = match source.next_frame() {
                        Ok(frame) => frame,
                        Err(e) => {
                            error!("frame capture failed, stopping worker: {e}");
                            break;
                        }
                    };
                    let outcome = engine.process_frame(&frame.hands);
                    frame_index += 1;
                    *worker_snapshot.write() = Snapshot {
                        mode: outcome.mode,
                        mode_label: outcome.mode.label(),
                        action: outcome.action,
                        frame_index,
                        worker_alive: true,
                    };
                }
                worker_snapshot.write().worker_alive = false;
                worker_running.store(false, Ordering::SeqCst);
                info!(frames = frame_index, "gesture worker stopped");
            })
            .map_err(|e| crate::Error::Capture(format!("failed to spawn worker: {e}")))?;

        Ok(Self {
            running,
            snapshot,
            worker: Some(worker),
        })
    }

    /// The last processed frame's view
    pub fn snapshot(&self) -> Snapshot {
        *self.snapshot.read()
    }

    /// Whether the worker thread is still running
    pub fn is_alive(&self) -> bool {
        self.worker
            .as_ref()
            .map(|w| !w.is_finished())
            .unwrap_or(false)
    }

    /// Signal the worker to stop and join it.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
