use std::collections::HashMap;
use std::time::Duration;
use vitrine_core::{
    AudioDevice, Bounds, ElementMeasure, ElementStyle, SectionConfig, StyleSink, TimerHandle,
    TimerHost,
};

/// Sections stacked top to bottom in config order. A zero-height section is
/// page-wide and spans the whole document.
pub struct Layout {
    bounds: HashMap<String, Bounds>,
    document_height: f32,
}

impl Layout {
    pub fn stack(sections: &[SectionConfig], viewport_height: f32) -> Self {
        let mut bounds = HashMap::new();
        let mut top = 0.0;
        let mut page_wide = Vec::new();
        for section in sections {
            if section.height_vh <= 0.0 {
                page_wide.push(section.id.clone());
                continue;
            }
            let height = section.height_vh * viewport_height;
            bounds.insert(section.id.clone(), Bounds::new(top, height));
            top += height;
        }
        for id in page_wide {
            bounds.insert(id, Bounds::new(0.0, top));
        }
        Self {
            bounds,
            document_height: top,
        }
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }
}

impl ElementMeasure for Layout {
    fn bounds(&self, element: &str) -> Option<Bounds> {
        self.bounds.get(element).copied()
    }
}

/// Logs every style at debug level and counts them.
#[derive(Default)]
pub struct LogSink {
    pub applied: usize,
    pub texts: usize,
}

impl StyleSink for LogSink {
    fn apply(&mut self, element: &str, style: &ElementStyle) {
        self.applied += 1;
        if log::log_enabled!(log::Level::Debug) {
            let css: Vec<String> = style
                .properties()
                .into_iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect();
            log::debug!("  #{} {{ {} }}", element, css.join("; "));
        }
    }

    fn set_text(&mut self, element: &str, text: &str) {
        self.texts += 1;
        log::debug!("  #{} \"{}\"", element, text);
    }
}

/// Virtual clock: timers fire in due order when the caller asks.
#[derive(Default)]
pub struct VirtualClock {
    now: Duration,
    next: u64,
    pending: Vec<(TimerHandle, Duration)>,
}

impl VirtualClock {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Jump to the earliest due timer and return its handle.
    pub fn advance(&mut self) -> Option<TimerHandle> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, due))| *due)
            .map(|(i, _)| i)?;
        let (handle, due) = self.pending.remove(idx);
        self.now = due;
        Some(handle)
    }
}

impl TimerHost for VirtualClock {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next += 1;
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

/// Audio device that only logs; the caller decides how `play()` settles.
#[derive(Default)]
pub struct LogAudio {
    pub play_requests: usize,
}

impl AudioDevice for LogAudio {
    fn start_playback(&mut self) {
        self.play_requests += 1;
        log::info!("[audio] play() #{}", self.play_requests);
    }

    fn pause(&mut self) {
        log::info!("[audio] pause()");
    }

    fn set_volume(&mut self, volume: f32) {
        log::info!("[audio] volume {:.2}", volume);
    }

    fn set_muted(&mut self, muted: bool) {
        log::info!("[audio] muted {}", muted);
    }
}
