//! Frame interval statistics
//!
//! Tracks how many frames have completed and the running mean of their
//! intervals, and formats the HUD label. Observers registered with
//! [`FrameStats::subscribe`] are called with the new label after every
//! completed frame.

use std::fmt;

use crate::consts::NANOS_PER_MILLI;

/// Label shown before any frame has completed
pub const INITIAL_TEXT: &str = "Frame count: 0 Average frame interval: N/A";

type Observer = Box<dyn FnMut(&str)>;

#[derive(Default)]
pub struct FrameStats {
    frame_count: u64,
    /// Milliseconds
    mean_frame_interval: f64,
    observers: Vec<Observer>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Mean frame interval in milliseconds, `None` before the first frame
    pub fn mean_frame_interval(&self) -> Option<f64> {
        (self.frame_count > 0).then_some(self.mean_frame_interval)
    }

    /// Record one completed frame that took `frame_nanos`
    pub fn add_frame(&mut self, frame_nanos: u64) {
        let millis = frame_nanos as f64 / NANOS_PER_MILLI;
        let n = self.frame_count as f64;
        self.mean_frame_interval = (self.mean_frame_interval * n + millis) / (n + 1.0);
        self.frame_count += 1;

        if !self.observers.is_empty() {
            let text = self.text();
            for observer in &mut self.observers {
                observer(text.as_str());
            }
        }
    }

    /// Register a callback that receives the label after each frame
    pub fn subscribe(&mut self, observer: impl FnMut(&str) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current HUD label
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mean_frame_interval() {
            None => f.write_str(INITIAL_TEXT),
            Some(mean) => write!(
                f,
                "Frame count: {} Average frame interval: {:.3} milliseconds",
                group_thousands(self.frame_count),
                mean
            ),
        }
    }
}

impl fmt::Debug for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameStats")
            .field("frame_count", &self.frame_count)
            .field("mean_frame_interval", &self.mean_frame_interval)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Format an integer with `,` between groups of three digits
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
