//! Scroll progress: where a container sits inside its observation window.
//!
//! Everything here is pulled once per frame. Geometry is in document pixels:
//! `Bounds::top` is the container's offset from the top of the page and
//! `Viewport::scroll_y` is the current scroll offset.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Normalised scroll progress, always within `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress(f32);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Progress of a timed effect `elapsed` into its `duration`. A zero
    /// duration completes immediately.
    pub fn from_elapsed(elapsed: Duration, duration: Duration) -> Self {
        if duration.is_zero() {
            return Self::END;
        }
        Self::new(elapsed.as_secs_f32() / duration.as_secs_f32())
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    Start,
    Center,
    End,
}

impl Edge {
    pub fn fraction(self) -> f32 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
        }
    }
}

/// "Container edge meets viewport edge", e.g. `start end` is the moment the
/// container's top reaches the bottom of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    pub container: Edge,
    pub viewport: Edge,
}

impl Intersection {
    pub const fn new(container: Edge, viewport: Edge) -> Self {
        Self {
            container,
            viewport,
        }
    }

    /// Scroll offset at which this intersection happens.
    pub fn scroll_offset(&self, container: Bounds, viewport_height: f32) -> f32 {
        container.top + container.height * self.container.fraction()
            - viewport_height * self.viewport.fraction()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationWindow {
    pub start: Intersection,
    pub end: Intersection,
}

impl ObservationWindow {
    /// Container top enters at the bottom, container bottom leaves at the top.
    pub const ENTER_TO_EXIT: Self = Self {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::Start),
    };
    /// Sticky sections: runs while the container covers the viewport.
    pub const PINNED: Self = Self {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::End),
    };
    pub const TOP_TO_EXIT: Self = Self {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::Start),
    };
    pub const ENTER_TO_SETTLE: Self = Self {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::End),
    };
    /// Whole-document progress when the container is the page itself.
    pub const PAGE: Self = Self::PINNED;

    pub fn span(&self, container: Bounds, viewport_height: f32) -> ScrollSpan {
        ScrollSpan {
            start: self.start.scroll_offset(container, viewport_height),
            end: self.end.scroll_offset(container, viewport_height),
        }
    }
}

/// Scroll offsets delimiting an observation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpan {
    pub start: f32,
    pub end: f32,
}

impl ScrollSpan {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Raw linear mapping, clamped. A collapsed span steps from 0 to 1 at `start`.
    pub fn progress(&self, scroll_y: f32) -> Progress {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if scroll_y >= self.start {
                Progress::END
            } else {
                Progress::START
            };
        }
        Progress::new((scroll_y - self.start) / len)
    }
}

pub fn compute_progress(
    container: Bounds,
    viewport: Viewport,
    window: &ObservationWindow,
) -> Progress {
    window
        .span(container, viewport.height)
        .progress(viewport.scroll_y)
}

/// Cheap gate: is the container within `margin` pixels of the visible area?
pub fn is_near_viewport(container: Bounds, viewport: Viewport, margin: f32) -> bool {
    let view_top = viewport.scroll_y - margin;
    let view_bottom = viewport.scroll_y + viewport.height + margin;
    container.bottom() >= view_top && container.top <= view_bottom
}

/// Per-section progress source.
#[derive(Clone, Debug)]
pub struct ScrollPublisher {
    window: ObservationWindow,
    margin: f32,
    last: Option<Progress>,
    detached: bool,
}

impl ScrollPublisher {
    pub fn new(window: ObservationWindow, margin: f32) -> Self {
        Self {
            window,
            margin: margin.max(0.0),
            last: None,
            detached: false,
        }
    }

    pub fn window(&self) -> &ObservationWindow {
        &self.window
    }

    pub fn last(&self) -> Option<Progress> {
        self.last
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Produce this frame's sample. `None` means nothing to map: the publisher
    /// was detached or its container is not in the document.
    pub fn publish(&mut self, container: Option<Bounds>, viewport: Viewport) -> Option<Progress> {
        if self.detached {
            return None;
        }
        let container = container?;
        // Every window starts no earlier than "top meets viewport bottom" and
        // ends no later than "bottom meets viewport top", so off-screen
        // containers are pinned without doing the span arithmetic.
        let progress = if is_near_viewport(container, viewport, self.margin) {
            compute_progress(container, viewport, &self.window)
        } else if container.top > viewport.scroll_y {
            Progress::START
        } else {
            Progress::END
        };
        self.last = Some(progress);
        Some(progress)
    }

    pub fn detach(&mut self) {
        self.detached = true;
        self.last = None;
    }
}
