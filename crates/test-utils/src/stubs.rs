//! Stub transforms standing in for the projection engine.

use std::cell::RefCell;

use projection::{ForwardTransform, ProjectionError, ProjectionResult};

/// Returns `(a * scale, b * scale)` and remembers every call.
#[derive(Debug, Default)]
pub struct RecordingTransform {
    pub scale: f64,
    calls: RefCell<Vec<(f64, f64)>>,
}

impl RecordingTransform {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Arguments of every call so far, in call order.
    pub fn calls(&self) -> Vec<(f64, f64)> {
        self.calls.borrow().clone()
    }
}

impl ForwardTransform for RecordingTransform {
    fn forward(&self, a: f64, b: f64) -> ProjectionResult<(f64, f64)> {
        self.calls.borrow_mut().push((a, b));
        Ok((a * self.scale, b * self.scale))
    }
}

/// Succeeds with the identity until asked to project `fail_at`.
#[derive(Debug, Clone, Copy)]
pub struct FailingTransform {
    pub fail_at: (f64, f64),
}

impl ForwardTransform for FailingTransform {
    fn forward(&self, a: f64, b: f64) -> ProjectionResult<(f64, f64)> {
        if (a, b) == self.fail_at {
            return Err(ProjectionError::OutOfDomain {
                crs: "stub".to_string(),
                x: a,
                y: b,
            });
        }
        Ok((a, b))
    }
}
