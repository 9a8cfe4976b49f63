//! Instrumented audio backend double shared by the integration tests.
//!
//! Every open and release is counted so tests can assert the single-handle
//! invariant directly. Opens can be gated (held until the test says so) to
//! drive overlapping-load scenarios deterministically.

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::{AudioBackend, BridgeError, ResourceHandle};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Test double for the platform audio backend.
#[derive(Default)]
pub struct FakeBackend {
    opens: AtomicUsize,
    releases: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    peak_live: Arc<AtomicUsize>,
    fail_urls: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    handles: Mutex<HashMap<String, Arc<FakeHandle>>>,
    fail_teardown: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent open of `url` fail.
    pub fn fail_open(&self, url: &str) {
        self.fail_urls.lock().unwrap().insert(url.to_string());
    }

    /// Hold the next open of `url` until [`FakeBackend::open_gate`] is called.
    pub fn hold(&self, url: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::new(Notify::new()));
    }

    /// Let a held open of `url` proceed.
    pub fn open_gate(&self, url: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(url) {
            gate.notify_one();
        }
    }

    /// Make stop/release on subsequently opened handles fail.
    pub fn fail_teardown(&self) {
        self.fail_teardown.store(true, Ordering::SeqCst);
    }

    /// The most recent handle opened for `url`.
    pub fn handle_for(&self, url: &str) -> Arc<FakeHandle> {
        Arc::clone(self.handles.lock().unwrap().get(url).expect("no handle opened"))
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Handles currently open (opened minus released).
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Most handles ever open at once.
    pub fn peak_live(&self) -> usize {
        self.peak_live.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioBackend for FakeBackend {
    async fn open(&self, url: &str) -> bridge_traits::Result<Arc<dyn ResourceHandle>> {
        let gate = self.gates.lock().unwrap().get(url).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_urls.lock().unwrap().contains(url) {
            return Err(BridgeError::SourceUnavailable(format!(
                "no stream at {url}"
            )));
        }

        self.opens.fetch_add(1, Ordering::SeqCst);
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_live.fetch_max(live, Ordering::SeqCst);

        let handle = Arc::new(FakeHandle::new(
            url,
            Arc::clone(&self.releases),
            Arc::clone(&self.live),
            self.fail_teardown.load(Ordering::SeqCst),
        ));
        self.handles
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::clone(&handle));
        Ok(handle)
    }
}

/// Handle double recording every control call.
pub struct FakeHandle {
    pub url: String,
    released: AtomicBool,
    fail_teardown: bool,
    play_calls: AtomicUsize,
    pause_calls: AtomicUsize,
    resume_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    releases: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    end_signal: Notify,
}

impl FakeHandle {
    fn new(
        url: &str,
        releases: Arc<AtomicUsize>,
        live: Arc<AtomicUsize>,
        fail_teardown: bool,
    ) -> Self {
        Self {
            url: url.to_string(),
            released: AtomicBool::new(false),
            fail_teardown,
            play_calls: AtomicUsize::new(0),
            pause_calls: AtomicUsize::new(0),
            resume_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            releases,
            live,
            end_signal: Notify::new(),
        }
    }

    /// Simulate the track reaching its natural end. Can fire again after a
    /// resume past an earlier end.
    pub fn finish(&self) {
        self.end_signal.notify_one();
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    pub fn pause_calls(&self) -> usize {
        self.pause_calls.load(Ordering::SeqCst)
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    fn mark_released(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.releases.fetch_add(1, Ordering::SeqCst);
            self.live.fetch_sub(1, Ordering::SeqCst);
            // Unblock any pending ended() watcher; the track did not finish.
            self.end_signal.notify_waiters();
        }
    }
}

#[async_trait]
impl ResourceHandle for FakeHandle {
    async fn play(&self) -> bridge_traits::Result<()> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn pause(&self) -> bridge_traits::Result<()> {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn resume(&self) -> bridge_traits::Result<()> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> bridge_traits::Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_teardown {
            return Err(BridgeError::OperationFailed("stop failed".to_string()));
        }
        Ok(())
    }

    async fn release(&self) -> bridge_traits::Result<()> {
        if self.fail_teardown {
            // Still mark the handle dead; a real engine frees the resource
            // even when the call reports an error.
            self.mark_released();
            return Err(BridgeError::OperationFailed("release failed".to_string()));
        }
        self.mark_released();
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        !self.released.load(Ordering::SeqCst)
    }

    async fn ended(&self) -> bool {
        if self.released.load(Ordering::SeqCst) {
            return false;
        }
        self.end_signal.notified().await;
        !self.released.load(Ordering::SeqCst)
    }
}

/// Let spawned tasks (command dispatch, ended watchers) run to completion on
/// the current-thread test runtime.
pub async fn drain_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
