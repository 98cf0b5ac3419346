//! Per-frame orchestration of all mounted sections.
//!
//! Each section owns one progress source and a list of bindings. A frame runs
//! section by section: publish the section's progress, then map its bindings.
//! Sections never read each other's samples, so their relative order is
//! irrelevant, and a section whose container is missing is skipped without
//! affecting the rest.
//!
//! Scroll sections follow the scroll position. Reveal sections start a timer
//! the first time they are seen and follow the stage clock, which the
//! front-end advances once per frame.

use crate::config::SectionConfig;
use crate::error::{Error, Result};
use crate::reveal::{CountUp, RevealPublisher};
use crate::scroll::{Bounds, ObservationWindow, Progress, ScrollPublisher, Viewport};
use crate::style::ElementStyle;
use crate::timeline::Binding;
use smallvec::SmallVec;
use std::time::Duration;

/// Looks up a container's document bounds; `None` if it is not mounted.
pub trait ElementMeasure {
    fn bounds(&self, element: &str) -> Option<Bounds>;
}

/// Receives the composed style of one element.
pub trait StyleSink {
    fn apply(&mut self, element: &str, style: &ElementStyle);
    /// Replace the element's text; used by counters.
    fn set_text(&mut self, element: &str, text: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u32);

enum ProgressSource {
    Scroll(ScrollPublisher),
    Reveal(RevealPublisher),
}

impl ProgressSource {
    fn publish(
        &mut self,
        container: Option<Bounds>,
        viewport: Viewport,
        now: Duration,
    ) -> Option<Progress> {
        match self {
            ProgressSource::Scroll(p) => p.publish(container, viewport),
            ProgressSource::Reveal(p) => p.publish(container, viewport, now),
        }
    }

    fn last(&self) -> Option<Progress> {
        match self {
            ProgressSource::Scroll(p) => p.last(),
            ProgressSource::Reveal(p) => p.last(),
        }
    }

    fn detach(&mut self) {
        match self {
            ProgressSource::Scroll(p) => p.detach(),
            ProgressSource::Reveal(p) => p.detach(),
        }
    }
}

struct MountedCounter {
    counter: CountUp,
    shown: Option<String>,
}

struct MountedSection {
    id: SectionId,
    name: String,
    source: ProgressSource,
    bindings: Vec<Binding>,
    counters: Vec<MountedCounter>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub samples: Vec<(SectionId, Progress)>,
    /// Sections whose container could not be measured this frame.
    pub skipped: usize,
    /// Elements handed to the sink.
    pub styled: usize,
    /// Counter texts that changed this frame.
    pub texts: usize,
}

#[derive(Default)]
pub struct Stage {
    sections: Vec<MountedSection>,
    next_id: u32,
    clock: Duration,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, config: &SectionConfig) -> Result<SectionId> {
        let bindings = config.bindings()?;
        let counters = config.count_ups()?;
        let source = match &config.reveal {
            Some(reveal) => {
                ProgressSource::Reveal(RevealPublisher::new(reveal.margin, reveal.duration()))
            }
            None => ProgressSource::Scroll(ScrollPublisher::new(config.window, config.margin)),
        };
        self.mount_source(&config.id, source, bindings, counters)
    }

    pub fn mount_bindings(
        &mut self,
        name: &str,
        window: ObservationWindow,
        margin: f32,
        bindings: Vec<Binding>,
    ) -> Result<SectionId> {
        let source = ProgressSource::Scroll(ScrollPublisher::new(window, margin));
        self.mount_source(name, source, bindings, Vec::new())
    }

    fn mount_source(
        &mut self,
        name: &str,
        source: ProgressSource,
        bindings: Vec<Binding>,
        counters: Vec<CountUp>,
    ) -> Result<SectionId> {
        if self.sections.iter().any(|s| s.name == name) {
            return Err(Error::DuplicateSection(name.to_string()));
        }
        for binding in &bindings {
            let sample = binding.evaluate(Progress::START);
            if !ElementStyle::default().set(binding.channel, &sample) {
                return Err(Error::Config(format!(
                    "binding '{}' drives {:?} with the wrong value kind",
                    binding.element, binding.channel
                )));
            }
        }
        let id = SectionId(self.next_id);
        self.next_id += 1;
        log::info!(
            "[stage] mounted '{}' with {} bindings, {} counters",
            name,
            bindings.len(),
            counters.len()
        );
        self.sections.push(MountedSection {
            id,
            name: name.to_string(),
            source,
            bindings,
            counters: counters
                .into_iter()
                .map(|counter| MountedCounter {
                    counter,
                    shown: None,
                })
                .collect(),
        });
        Ok(id)
    }

    /// Detach the section; later frames never sample or style it.
    pub fn unmount(&mut self, id: SectionId) -> bool {
        match self.sections.iter().position(|s| s.id == id) {
            Some(idx) => {
                let mut section = self.sections.remove(idx);
                section.source.detach();
                log::info!("[stage] unmounted '{}'", section.name);
                true
            }
            None => false,
        }
    }

    pub fn unmount_all(&mut self) {
        for mut section in self.sections.drain(..) {
            section.source.detach();
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_id(&self, name: &str) -> Option<SectionId> {
        self.sections.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn progress(&self, id: SectionId) -> Option<Progress> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.source.last())
    }

    /// Move the clock reveal sections run on.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn frame(
        &mut self,
        viewport: Viewport,
        measure: &dyn ElementMeasure,
        sink: &mut dyn StyleSink,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        let now = self.clock;
        for section in &mut self.sections {
            let container = measure.bounds(&section.name);
            let Some(progress) = section.source.publish(container, viewport, now) else {
                report.skipped += 1;
                continue;
            };
            report.samples.push((section.id, progress));

            let mut styles: SmallVec<[(&str, ElementStyle); 4]> = SmallVec::new();
            for binding in &section.bindings {
                let value = binding.evaluate(progress);
                let slot = match styles.iter().position(|(el, _)| *el == binding.element) {
                    Some(i) => i,
                    None => {
                        styles.push((binding.element.as_str(), ElementStyle::default()));
                        styles.len() - 1
                    }
                };
                styles[slot].1.set(binding.channel, &value);
            }
            for (element, style) in &styles {
                sink.apply(element, style);
                report.styled += 1;
            }

            for mounted in &mut section.counters {
                let text = mounted.counter.text(progress);
                if mounted.shown.as_deref() != Some(text.as_str()) {
                    sink.set_text(&mounted.counter.element, &text);
                    mounted.shown = Some(text);
                    report.texts += 1;
                }
            }
        }
        report
    }
}
