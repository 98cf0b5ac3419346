//! Timeline mapper: one upstream progress value fans out to many visual
//! channels, each with its own control points.
//!
//! Sampling is a pure function of `(progress, track)`.

use crate::ease::Ease;
use crate::error::{Error, Result};
use crate::scroll::Progress;
use crate::style::{Inset, Rgba};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Interpolation contract for animatable values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        a.lerp(*b, t)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint<T> {
    pub progress: f32,
    pub value: T,
}

impl<T> ControlPoint<T> {
    pub fn new(progress: f32, value: T) -> Self {
        Self { progress, value }
    }
}

/// Sub-interval of a container's progress over which one element animates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub element_id: String,
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    pub fn new(element_id: impl Into<String>, start: f32, end: f32) -> Result<Self> {
        let range = Self {
            element_id: element_id.into(),
            start,
            end,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        let ok = self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.end <= 1.0
            && self.start < self.end;
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidRange {
                element: self.element_id.clone(),
                start: self.start,
                end: self.end,
            })
        }
    }

    /// Position of `progress` inside this range, clamped to `[0, 1]`.
    pub fn local(&self, progress: Progress) -> f32 {
        ((progress.get() - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Piecewise interpolation over progress-sorted control points.
#[derive(Clone, Debug, PartialEq)]
pub struct Track<T> {
    points: SmallVec<[ControlPoint<T>; 4]>,
    ease: Ease,
}

impl<T> Track<T>
where
    T: Lerp + Clone,
{
    /// Points must be non-empty, finite and sorted by progress. Equal progress
    /// values are allowed and produce a hard step.
    pub fn new(points: impl IntoIterator<Item = ControlPoint<T>>) -> Result<Self> {
        let points: SmallVec<[ControlPoint<T>; 4]> = points.into_iter().collect();
        if points.is_empty() {
            return Err(Error::EmptyTrack);
        }
        if let Some(bad) = points.iter().find(|p| !p.progress.is_finite()) {
            return Err(Error::NonFiniteProgress(bad.progress));
        }
        if let Some(w) = points.windows(2).find(|w| w[0].progress > w[1].progress) {
            return Err(Error::UnsortedControlPoints {
                prev: w[0].progress,
                next: w[1].progress,
            });
        }
        Ok(Self {
            points,
            ease: Ease::Linear,
        })
    }

    /// Two-point track from `from` at `range.start` to `to` at `range.end`.
    pub fn over(range: &ScrollRange, from: T, to: T) -> Result<Self> {
        range.validate()?;
        Self::new([
            ControlPoint::new(range.start, from),
            ControlPoint::new(range.end, to),
        ])
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn points(&self) -> &[ControlPoint<T>] {
        &self.points
    }

    /// Value at `progress`. Outside the first/last control point the boundary
    /// value is held; NaN is treated as "before the first point".
    pub fn sample(&self, progress: f32) -> T {
        let first = &self.points[0];
        if progress.is_nan() {
            return first.value.clone();
        }
        let idx = self.points.partition_point(|p| p.progress <= progress);
        if idx == 0 {
            return first.value.clone();
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].value.clone();
        }
        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        let t = (progress - a.progress) / (b.progress - a.progress);
        T::lerp(&a.value, &b.value, self.ease.apply(t))
    }

    pub fn sample_progress(&self, progress: Progress) -> T {
        self.sample(progress.get())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Percent,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
        }
    }
}

/// Visual parameter driven by a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "unit")]
pub enum Channel {
    TranslateX(Unit),
    TranslateY(Unit),
    Scale,
    ScaleX,
    ScaleY,
    /// Degrees.
    Rotate,
    Opacity,
    ClipPath,
    Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrackKind {
    Scalar(Track<f32>),
    Inset(Track<Inset>),
    Color(Track<Rgba>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelValue {
    Scalar(f32),
    Inset(Inset),
    Color(Rgba),
}

/// One element's channel bound to its section's progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub element: String,
    pub channel: Channel,
    pub track: TrackKind,
}

impl Binding {
    pub fn scalar(element: impl Into<String>, channel: Channel, track: Track<f32>) -> Self {
        Self {
            element: element.into(),
            channel,
            track: TrackKind::Scalar(track),
        }
    }

    pub fn clip(element: impl Into<String>, track: Track<Inset>) -> Self {
        Self {
            element: element.into(),
            channel: Channel::ClipPath,
            track: TrackKind::Inset(track),
        }
    }

    pub fn color(element: impl Into<String>, track: Track<Rgba>) -> Self {
        Self {
            element: element.into(),
            channel: Channel::Color,
            track: TrackKind::Color(track),
        }
    }

    pub fn evaluate(&self, progress: Progress) -> ChannelValue {
        match &self.track {
            TrackKind::Scalar(t) => ChannelValue::Scalar(t.sample_progress(progress)),
            TrackKind::Inset(t) => ChannelValue::Inset(t.sample_progress(progress)),
            TrackKind::Color(t) => ChannelValue::Color(t.sample_progress(progress)),
        }
    }
}
