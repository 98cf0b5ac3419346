use crate::cadence::checked_jitter_span;
use crate::constants::*;
use crate::ease::Ease;
use crate::error::{Error, Result};
use crate::reveal::CountUp;
use crate::scroll::ObservationWindow;
use crate::style::{Inset, Rgba};
use crate::timeline::{Binding, Channel, ControlPoint, ScrollRange, Track};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub preloader: PreloaderConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub cadence: CadenceConfig,
    #[serde(default = "crate::site::default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            preloader: PreloaderConfig::default(),
            music: MusicConfig::default(),
            cadence: CadenceConfig::default(),
            sections: crate::site::default_sections(),
        }
    }
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.preloader.tick_ms == 0 || self.preloader.max_step == 0 {
            return Err(Error::Config(
                "preloader tick_ms and max_step must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.music.volume) {
            return Err(Error::Config(format!(
                "music volume {} outside 0..=1",
                self.music.volume
            )));
        }
        if self.cadence.words.is_empty() {
            return Err(Error::EmptySequence("cadence word"));
        }
        if self.cadence.rhythm_ms.is_empty() {
            return Err(Error::EmptySequence("cadence delay"));
        }
        checked_jitter_span(self.cadence.jitter_span())?;
        for (i, section) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|s| s.id == section.id) {
                return Err(Error::DuplicateSection(section.id.clone()));
            }
            section.bindings()?;
            section.count_ups()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloaderConfig {
    #[serde(default = "PreloaderConfig::default_tick_ms")]
    pub tick_ms: u32,
    #[serde(default = "PreloaderConfig::default_max_step")]
    pub max_step: u32,
    #[serde(default = "PreloaderConfig::default_target")]
    pub target: u32,
}

impl PreloaderConfig {
    fn default_tick_ms() -> u32 {
        PRELOADER_TICK_MS
    }
    fn default_max_step() -> u32 {
        PRELOADER_MAX_STEP
    }
    fn default_target() -> u32 {
        PRELOADER_TARGET
    }
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::default_tick_ms(),
            max_step: Self::default_max_step(),
            target: Self::default_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    #[serde(default = "MusicConfig::default_src")]
    pub src: String,
    #[serde(default = "MusicConfig::default_volume")]
    pub volume: f32,
    #[serde(default = "MusicConfig::default_looped")]
    pub looped: bool,
}

impl MusicConfig {
    fn default_src() -> String {
        MUSIC_SRC.to_string()
    }
    fn default_volume() -> f32 {
        MUSIC_VOLUME
    }
    fn default_looped() -> bool {
        true
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            src: Self::default_src(),
            volume: Self::default_volume(),
            looped: Self::default_looped(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default = "CadenceConfig::default_words")]
    pub words: Vec<String>,
    #[serde(default = "CadenceConfig::default_rhythm_ms")]
    pub rhythm_ms: Vec<u64>,
    #[serde(default = "CadenceConfig::default_jitter_x")]
    pub jitter_x: f32,
    #[serde(default = "CadenceConfig::default_jitter_y")]
    pub jitter_y: f32,
    /// Fixed seed for reproducible jitter; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CadenceConfig {
    fn default_words() -> Vec<String> {
        CADENCE_WORDS.iter().map(|w| w.to_string()).collect()
    }
    fn default_rhythm_ms() -> Vec<u64> {
        CADENCE_RHYTHM_MS.to_vec()
    }
    fn default_jitter_x() -> f32 {
        JITTER_X_SPAN
    }
    fn default_jitter_y() -> f32 {
        JITTER_Y_SPAN
    }

    pub fn jitter_span(&self) -> Vec2 {
        Vec2::new(self.jitter_x, self.jitter_y)
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.rhythm_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect()
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            words: Self::default_words(),
            rhythm_ms: Self::default_rhythm_ms(),
            jitter_x: Self::default_jitter_x(),
            jitter_y: Self::default_jitter_y(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    #[serde(default = "SectionConfig::default_window")]
    pub window: ObservationWindow,
    /// Extra pixels around the viewport inside which progress is recomputed.
    #[serde(default = "SectionConfig::default_margin")]
    pub margin: f32,
    /// Layout height used by the native preview, in viewport heights. Zero
    /// marks a page-wide container that spans the whole document.
    #[serde(default = "SectionConfig::default_height_vh")]
    pub height_vh: f32,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
    /// Play the bindings once on the stage clock when the section first comes
    /// into view, instead of following the scroll position.
    #[serde(default)]
    pub reveal: Option<RevealConfig>,
    #[serde(default)]
    pub counters: Vec<CounterConfig>,
}

impl SectionConfig {
    fn default_window() -> ObservationWindow {
        ObservationWindow::ENTER_TO_EXIT
    }
    fn default_margin() -> f32 {
        VISIBILITY_MARGIN_PX
    }
    fn default_height_vh() -> f32 {
        1.0
    }

    pub fn new(id: impl Into<String>, window: ObservationWindow, height_vh: f32) -> Self {
        Self {
            id: id.into(),
            window,
            margin: Self::default_margin(),
            height_vh,
            bindings: Vec::new(),
            reveal: None,
            counters: Vec::new(),
        }
    }

    pub fn with(mut self, binding: BindingConfig) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn revealed(mut self, reveal: RevealConfig) -> Self {
        self.reveal = Some(reveal);
        self
    }

    pub fn counting(mut self, counter: CounterConfig) -> Self {
        self.counters.push(counter);
        self
    }

    pub fn bindings(&self) -> Result<Vec<Binding>> {
        self.bindings.iter().map(BindingConfig::to_binding).collect()
    }

    pub fn count_ups(&self) -> Result<Vec<CountUp>> {
        self.counters.iter().map(CounterConfig::to_count_up).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "RevealConfig::default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "RevealConfig::default_margin")]
    pub margin: f32,
}

impl RevealConfig {
    fn default_duration_ms() -> u64 {
        REVEAL_DURATION_MS
    }
    fn default_margin() -> f32 {
        REVEAL_MARGIN_PX
    }

    pub fn over_ms(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::default_duration_ms(),
            margin: Self::default_margin(),
        }
    }
}

/// Count-up text bound to the section's progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    pub element: String,
    pub target: f32,
    #[serde(default = "CounterConfig::default_steps")]
    pub steps: u32,
    #[serde(default = "CounterConfig::default_decimals")]
    pub decimals: usize,
    #[serde(default)]
    pub start: f32,
    #[serde(default = "CounterConfig::default_end")]
    pub end: f32,
}

impl CounterConfig {
    fn default_steps() -> u32 {
        COUNTER_STEPS
    }
    fn default_decimals() -> usize {
        COUNTER_DECIMALS
    }
    fn default_end() -> f32 {
        1.0
    }

    pub fn new(element: &str, target: f32, start: f32, end: f32) -> Self {
        Self {
            element: element.to_string(),
            target,
            steps: Self::default_steps(),
            decimals: Self::default_decimals(),
            start,
            end,
        }
    }

    pub fn to_count_up(&self) -> Result<CountUp> {
        CountUp::new(
            self.element.clone(),
            self.target,
            self.steps,
            self.decimals,
            self.start,
            self.end,
        )
    }
}

/// Control points as written in config. Clip insets use the CSS
/// `inset(...)` notation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointsConfig {
    Scalar(Vec<ControlPoint<f32>>),
    Inset(Vec<ControlPoint<String>>),
    Color(Vec<ControlPoint<Rgba>>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    pub element: String,
    pub channel: Channel,
    #[serde(default)]
    pub ease: Ease,
    pub points: PointsConfig,
}

impl BindingConfig {
    pub fn scalar(element: &str, channel: Channel, points: &[(f32, f32)]) -> Self {
        Self {
            element: element.to_string(),
            channel,
            ease: Ease::Linear,
            points: PointsConfig::Scalar(
                points
                    .iter()
                    .map(|(p, v)| ControlPoint::new(*p, *v))
                    .collect(),
            ),
        }
    }

    /// Two-point scalar binding spanning `range`.
    pub fn over(range: &ScrollRange, channel: Channel, from: f32, to: f32) -> Self {
        Self::scalar(
            &range.element_id,
            channel,
            &[(range.start, from), (range.end, to)],
        )
    }

    pub fn clip(element: &str, points: &[(f32, &str)]) -> Self {
        Self {
            element: element.to_string(),
            channel: Channel::ClipPath,
            ease: Ease::Linear,
            points: PointsConfig::Inset(
                points
                    .iter()
                    .map(|(p, v)| ControlPoint::new(*p, v.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn to_binding(&self) -> Result<Binding> {
        let mismatch = || {
            Error::Config(format!(
                "binding '{}': points do not fit channel {:?}",
                self.element, self.channel
            ))
        };
        match (&self.points, self.channel) {
            (PointsConfig::Inset(points), Channel::ClipPath) => {
                let parsed = points
                    .iter()
                    .map(|cp| Ok(ControlPoint::new(cp.progress, cp.value.parse::<Inset>()?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Binding::clip(
                    self.element.clone(),
                    Track::new(parsed)?.with_ease(self.ease),
                ))
            }
            (PointsConfig::Color(points), Channel::Color) => Ok(Binding::color(
                self.element.clone(),
                Track::new(points.iter().cloned())?.with_ease(self.ease),
            )),
            (PointsConfig::Scalar(points), channel)
                if !matches!(channel, Channel::ClipPath | Channel::Color) =>
            {
                Ok(Binding::scalar(
                    self.element.clone(),
                    channel,
                    Track::new(points.iter().cloned())?.with_ease(self.ease),
                ))
            }
            _ => Err(mismatch()),
        }
    }
}
