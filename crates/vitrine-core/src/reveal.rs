//! Time-driven progress for effects that play once when their section first
//! comes into view, instead of following the scroll position.
//!
//! The clock is the stage's own elapsed time; the produced [`Progress`] feeds
//! the same tracks a scroll-driven section would.

use crate::constants::{COUNTER_DECIMAL_SEP, COUNTER_GROUP_SEP};
use crate::error::{Error, Result};
use crate::scroll::{is_near_viewport, Bounds, Progress, Viewport};
use std::time::Duration;

/// Fires on the first observation with the container in view, never again.
///
/// A negative margin shrinks the viewport: the container has to be that many
/// pixels inside before it counts as seen.
#[derive(Clone, Debug)]
pub struct InViewOnce {
    margin: f32,
    fired: bool,
}

impl InViewOnce {
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            fired: false,
        }
    }

    pub fn observe(&mut self, container: Bounds, viewport: Viewport) -> bool {
        if self.fired || !is_near_viewport(container, viewport, self.margin) {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Per-section progress source driven by elapsed time after the first view.
#[derive(Clone, Debug)]
pub struct RevealPublisher {
    trigger: InViewOnce,
    duration: Duration,
    started_at: Option<Duration>,
    last: Option<Progress>,
    detached: bool,
}

impl RevealPublisher {
    pub fn new(margin: f32, duration: Duration) -> Self {
        Self {
            trigger: InViewOnce::new(margin),
            duration,
            started_at: None,
            last: None,
            detached: false,
        }
    }

    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    pub fn last(&self) -> Option<Progress> {
        self.last
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Sample at stage time `now`. Holds at the start until the container is
    /// first seen; from then on only time matters, wherever the page scrolls.
    pub fn publish(
        &mut self,
        container: Option<Bounds>,
        viewport: Viewport,
        now: Duration,
    ) -> Option<Progress> {
        if self.detached {
            return None;
        }
        let container = container?;
        if self.started_at.is_none() && self.trigger.observe(container, viewport) {
            log::debug!("[reveal] started at {} ms", now.as_millis());
            self.started_at = Some(now);
        }
        let progress = match self.started_at {
            Some(t0) => Progress::from_elapsed(now.saturating_sub(t0), self.duration),
            None => Progress::START,
        };
        self.last = Some(progress);
        Some(progress)
    }

    pub fn detach(&mut self) {
        self.detached = true;
        self.last = None;
    }
}

/// Number that counts up to `target` in `steps` equal increments while the
/// progress crosses `start..end`.
#[derive(Clone, Debug, PartialEq)]
pub struct CountUp {
    pub element: String,
    target: f32,
    steps: u32,
    decimals: usize,
    start: f32,
    end: f32,
}

impl CountUp {
    pub fn new(
        element: impl Into<String>,
        target: f32,
        steps: u32,
        decimals: usize,
        start: f32,
        end: f32,
    ) -> Result<Self> {
        let element = element.into();
        if !(target.is_finite() && target >= 0.0) || steps == 0 {
            return Err(Error::Config(format!(
                "counter '{element}' needs a finite non-negative target and at least one step"
            )));
        }
        let range_ok = start.is_finite()
            && end.is_finite()
            && 0.0 <= start
            && start < end
            && end <= 1.0;
        if !range_ok {
            return Err(Error::InvalidRange {
                element,
                start,
                end,
            });
        }
        Ok(Self {
            element,
            target,
            steps,
            decimals,
            start,
            end,
        })
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Value shown at `progress`: 0 before `start`, `target` from `end` on,
    /// whole steps in between.
    pub fn value(&self, progress: Progress) -> f32 {
        let local = ((progress.get() - self.start) / (self.end - self.start)).clamp(0.0, 1.0);
        let step = (local * self.steps as f32).floor() as u32;
        if step >= self.steps {
            self.target
        } else {
            self.target * step as f32 / self.steps as f32
        }
    }

    pub fn text(&self, progress: Progress) -> String {
        format_count(self.value(progress), self.decimals)
    }
}

/// `1234.5` with one decimal renders as `1.234,5`.
pub fn format_count(value: f32, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.max(0.0));
    let (int, frac) = match fixed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::with_capacity(fixed.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(COUNTER_GROUP_SEP);
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push(COUNTER_DECIMAL_SEP);
        out.push_str(frac);
    }
    out
}
