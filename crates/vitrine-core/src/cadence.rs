//! Timer-driven word strobe, independent of scroll.
//!
//! The driver is a single `Running` state with a self-loop: every tick
//! advances the word, the theme variant and the rhythm position, then
//! schedules the next tick. `stop` is terminal and cancels the pending timer.

use crate::config::CadenceConfig;
use crate::constants::CADENCE_VARIANTS;
use crate::error::{Error, Result};
use crate::style::Rgba;
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Platform timer used by the driver (`setTimeout` on the web, a virtual clock
/// in tests and the native preview).
pub trait TimerHost {
    fn schedule(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Three-way alternating theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Dark,
    Light,
    Accent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub foreground: Rgba,
}

impl Variant {
    pub fn from_index(i: usize) -> Self {
        match i % CADENCE_VARIANTS {
            0 => Variant::Dark,
            1 => Variant::Light,
            _ => Variant::Accent,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Variant::Dark => Theme {
                background: Rgba::BLACK,
                foreground: Rgba::ACCENT,
            },
            Variant::Light => Theme {
                background: Rgba::WHITE,
                foreground: Rgba::BLACK,
            },
            Variant::Accent => Theme {
                background: Rgba::ACCENT,
                foreground: Rgba::WHITE,
            },
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Variant::Dark => "cadence-dark",
            Variant::Light => "cadence-light",
            Variant::Accent => "cadence-accent",
        }
    }
}

/// Jitter is drawn from `[-span, span)`, so `2 * span` must stay finite.
pub fn checked_jitter_span(span: Vec2) -> Result<Vec2> {
    for (axis, v) in [("x", span.x), ("y", span.y)] {
        if !(v.is_finite() && v >= 0.0 && (v * 2.0).is_finite()) {
            return Err(Error::Config(format!(
                "cadence jitter_{axis} must be a finite, non-negative span, got {v}"
            )));
        }
    }
    Ok(span)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CadenceState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CadenceEvent {
    pub index: usize,
    pub value: String,
    pub variant: Variant,
    /// Offset applied to the incoming word, in px.
    pub jitter: Vec2,
    pub next_delay: Duration,
}

pub struct CadenceDriver<R: Rng> {
    values: Vec<String>,
    delays: Vec<Duration>,
    jitter_span: Vec2,
    index: usize,
    variant: usize,
    delay_index: usize,
    jitter: Vec2,
    rng: R,
    pending: Option<TimerHandle>,
    state: CadenceState,
}

impl<R: Rng> CadenceDriver<R> {
    pub fn new(values: Vec<String>, delays: Vec<Duration>, jitter_span: Vec2, rng: R) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptySequence("cadence value"));
        }
        if delays.is_empty() {
            return Err(Error::EmptySequence("cadence delay"));
        }
        let jitter_span = checked_jitter_span(jitter_span)?;
        Ok(Self {
            values,
            delays,
            jitter_span,
            index: 0,
            variant: 0,
            delay_index: 0,
            jitter: Vec2::ZERO,
            rng,
            pending: None,
            state: CadenceState::Idle,
        })
    }

    pub fn from_config(config: &CadenceConfig, rng: R) -> Result<Self> {
        Self::new(
            config.words.clone(),
            config.delays(),
            config.jitter_span(),
            rng,
        )
    }

    pub fn state(&self) -> CadenceState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &str {
        &self.values[self.index]
    }

    pub fn variant(&self) -> Variant {
        Variant::from_index(self.variant)
    }

    pub fn jitter(&self) -> Vec2 {
        self.jitter
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Mount: schedule the first tick after the first delay.
    pub fn start(&mut self, host: &mut dyn TimerHost) {
        if self.state != CadenceState::Idle {
            log::debug!("[cadence] start ignored in {:?}", self.state);
            return;
        }
        self.state = CadenceState::Running;
        self.pending = Some(host.schedule(self.delays[0]));
    }

    /// Timer callback. Stale or post-stop handles are ignored.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        host: &mut dyn TimerHost,
    ) -> Option<CadenceEvent> {
        if self.state != CadenceState::Running || self.pending != Some(handle) {
            return None;
        }
        self.index = (self.index + 1) % self.values.len();
        self.variant = (self.variant + 1) % CADENCE_VARIANTS;
        self.jitter = self.draw_jitter();
        self.delay_index = (self.delay_index + 1) % self.delays.len();
        let next_delay = self.delays[self.delay_index];
        self.pending = Some(host.schedule(next_delay));
        Some(CadenceEvent {
            index: self.index,
            value: self.values[self.index].clone(),
            variant: self.variant(),
            jitter: self.jitter,
            next_delay,
        })
    }

    /// Unmount. Terminal: no tick fires afterwards.
    pub fn stop(&mut self, host: &mut dyn TimerHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel(handle);
        }
        self.state = CadenceState::Stopped;
    }

    fn draw_jitter(&mut self) -> Vec2 {
        let span = self.jitter_span;
        let x = if span.x > 0.0 {
            self.rng.gen_range(-span.x..span.x)
        } else {
            0.0
        };
        let y = if span.y > 0.0 {
            self.rng.gen_range(-span.y..span.y)
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}
