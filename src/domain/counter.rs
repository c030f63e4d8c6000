// src/domain/counter.rs
use crate::constants::FRAME_INTERVAL_MS;
use std::time::Duration;

/// Linear count-up from 0 to `target`, one value per animation frame.
///
/// Every frame adds `target / (duration / 16ms)`; frames below the target
/// show the floor of the running value, and the first frame that reaches
/// it shows exactly `target` and ends the animation.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    element_id: String,
    target: u64,
    step: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(element_id: impl Into<String>, target: u64, duration: Duration) -> Self {
        let frames = duration.as_millis() as f64 / FRAME_INTERVAL_MS as f64;
        let step = if frames > 0.0 {
            target as f64 / frames
        } else {
            f64::INFINITY
        };

        Self {
            element_id: element_id.into(),
            target,
            step,
            current: 0.0,
            done: false,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }

        self.current += self.step;
        if self.current >= self.target as f64 {
            self.done = true;
            Some(self.target)
        } else {
            Some(self.current.floor() as u64)
        }
    }
}

/// Fires once per element when enough of it is visible, then forgets it.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    observed: Vec<String>,
}

impl VisibilityObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, element_id: &str) {
        if !self.is_observing(element_id) {
            self.observed.push(element_id.to_string());
        }
    }

    pub fn is_observing(&self, element_id: &str) -> bool {
        self.observed.iter().any(|id| id == element_id)
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// Report the visible ratio of an element. Returns true exactly once.
    pub fn report(&mut self, element_id: &str, visible_ratio: f64) -> bool {
        if visible_ratio < self.threshold {
            return false;
        }
        match self.observed.iter().position(|id| id == element_id) {
            Some(pos) => {
                self.observed.remove(pos);
                true
            }
            None => false,
        }
    }
}
