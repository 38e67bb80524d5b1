//! Asset readiness gate
//!
//! The loop must not start before its sprites are decoded. Each asset reports
//! in once; when the count reaches the threshold the gate hands out a single
//! [`Command::AllAssetsReady`].

use crate::game::Command;

#[derive(Debug, Clone)]
pub struct AssetGate {
    threshold: usize,
    loaded: usize,
    fired: bool,
    failures: Vec<String>,
}

impl AssetGate {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            loaded: 0,
            fired: false,
            failures: Vec::new(),
        }
    }

    /// An asset finished loading. Returns the ready command exactly once.
    pub fn loaded(&mut self) -> Option<Command> {
        self.loaded += 1;
        self.check()
    }

    /// An asset failed; the gate will never open
    pub fn failed(&mut self, name: &str) {
        log::warn!("Asset failed to load: {}", name);
        self.failures.push(name.to_string());
    }

    /// Fire immediately if nothing needs loading
    pub fn check(&mut self) -> Option<Command> {
        if self.fired || !self.failures.is_empty() || self.loaded < self.threshold {
            return None;
        }
        self.fired = true;
        log::info!("All {} assets ready", self.threshold);
        Some(Command::AllAssetsReady)
    }

    pub fn is_ready(&self) -> bool {
        self.fired
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// (loaded, threshold) for a progress indicator
    pub fn progress(&self) -> (usize, usize) {
        (self.loaded.min(self.threshold), self.threshold)
    }
}
