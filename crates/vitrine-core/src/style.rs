//! CSS-facing values and per-element style composition.

use crate::error::Error;
use crate::timeline::{Channel, ChannelValue, Lerp, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest readable number for CSS output (three decimals, no trailing zeros).
pub fn css_number(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    // avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Rectangular clip inset, each edge in percent of the element box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inset {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Inset {
    /// Fully revealed.
    pub const OPEN: Inset = Inset::uniform(0.0);
    /// Fully hidden, collapsed to the centre point.
    pub const CLOSED: Inset = Inset::uniform(50.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Hidden inset whose visible area grows out of `side` as it opens.
    pub fn reveal_from(side: Side) -> Self {
        match side {
            Side::Top => Self::new(0.0, 0.0, 100.0, 0.0),
            Side::Right => Self::new(0.0, 0.0, 0.0, 100.0),
            Side::Bottom => Self::new(100.0, 0.0, 0.0, 0.0),
            Side::Left => Self::new(0.0, 100.0, 0.0, 0.0),
        }
    }

    /// No visible area left.
    pub fn is_hidden(&self) -> bool {
        self.top + self.bottom >= 100.0 || self.left + self.right >= 100.0
    }
}

impl Lerp for Inset {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            top: <f32 as Lerp>::lerp(&a.top, &b.top, t),
            right: <f32 as Lerp>::lerp(&a.right, &b.right, t),
            bottom: <f32 as Lerp>::lerp(&a.bottom, &b.bottom, t),
            left: <f32 as Lerp>::lerp(&a.left, &b.left, t),
        }
    }
}

impl fmt::Display for Inset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inset({}% {}% {}% {}%)",
            css_number(self.top),
            css_number(self.right),
            css_number(self.bottom),
            css_number(self.left)
        )
    }
}

impl FromStr for Inset {
    type Err = Error;

    /// Parses `inset(t r b l)` with percent lengths, using CSS shorthand
    /// expansion for one to four values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::InvalidInset(s.to_string());
        let body = s
            .trim()
            .strip_prefix("inset(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(bad)?;
        let values = body
            .split_whitespace()
            .map(|part| {
                let num = part.strip_suffix('%').unwrap_or(part);
                num.parse::<f32>().map_err(|_| bad())
            })
            .collect::<Result<Vec<f32>, Error>>()?;
        match values.as_slice() {
            [a] => Ok(Self::uniform(*a)),
            [v, h] => Ok(Self::new(*v, *h, *v, *h)),
            [t, h, b] => Ok(Self::new(*t, *h, *b, *h)),
            [t, r, b, l] => Ok(Self::new(*t, *r, *b, *l)),
            _ => Err(bad()),
        }
    }
}

/// sRGB colour, channels 0..=255 and alpha 0..=1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Signature red of the cadence strobe.
    pub const ACCENT: Rgba = Rgba::rgb(0xE3, 0x06, 0x13);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a: 1.0,
        }
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            r: <f32 as Lerp>::lerp(&a.r, &b.r, t),
            g: <f32 as Lerp>::lerp(&a.g, &b.g, t),
            b: <f32 as Lerp>::lerp(&a.b, &b.b, t),
            a: <f32 as Lerp>::lerp(&a.a, &b.a, t),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        write!(
            f,
            "rgba({}, {}, {}, {})",
            c(self.r),
            c(self.g),
            c(self.b),
            css_number(self.a.clamp(0.0, 1.0))
        )
    }
}

/// Accumulated channel values for one element in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementStyle {
    pub translate_x: Option<(f32, Unit)>,
    pub translate_y: Option<(f32, Unit)>,
    pub scale: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub rotate_deg: Option<f32>,
    pub opacity: Option<f32>,
    pub clip: Option<Inset>,
    pub color: Option<Rgba>,
}

impl ElementStyle {
    /// Record one channel. Returns `false` if the value kind does not fit the
    /// channel (the value is dropped).
    pub fn set(&mut self, channel: Channel, value: &ChannelValue) -> bool {
        match (channel, value) {
            (Channel::TranslateX(unit), ChannelValue::Scalar(v)) => {
                self.translate_x = Some((*v, unit))
            }
            (Channel::TranslateY(unit), ChannelValue::Scalar(v)) => {
                self.translate_y = Some((*v, unit))
            }
            (Channel::Scale, ChannelValue::Scalar(v)) => self.scale = Some(*v),
            (Channel::ScaleX, ChannelValue::Scalar(v)) => self.scale_x = Some(*v),
            (Channel::ScaleY, ChannelValue::Scalar(v)) => self.scale_y = Some(*v),
            (Channel::Rotate, ChannelValue::Scalar(v)) => self.rotate_deg = Some(*v),
            (Channel::Opacity, ChannelValue::Scalar(v)) => self.opacity = Some(*v),
            (Channel::ClipPath, ChannelValue::Inset(v)) => self.clip = Some(*v),
            (Channel::Color, ChannelValue::Color(v)) => self.color = Some(*v),
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Composed transform: translate, then scale, then rotate.
    pub fn transform(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.translate_x.is_some() || self.translate_y.is_some() {
            let fmt_len = |v: Option<(f32, Unit)>| match v {
                Some((n, unit)) => format!("{}{}", css_number(n), unit.suffix()),
                None => "0px".to_string(),
            };
            parts.push(format!(
                "translate3d({}, {}, 0)",
                fmt_len(self.translate_x),
                fmt_len(self.translate_y)
            ));
        }
        if let Some(s) = self.scale {
            parts.push(format!("scale({})", css_number(s)));
        }
        if let Some(s) = self.scale_x {
            parts.push(format!("scaleX({})", css_number(s)));
        }
        if let Some(s) = self.scale_y {
            parts.push(format!("scaleY({})", css_number(s)));
        }
        if let Some(r) = self.rotate_deg {
            parts.push(format!("rotate({}deg)", css_number(r)));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// CSS property/value pairs ready for `style.setProperty`.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::new();
        if let Some(t) = self.transform() {
            props.push(("transform", t));
        }
        if let Some(o) = self.opacity {
            props.push(("opacity", css_number(o.clamp(0.0, 1.0))));
        }
        if let Some(c) = self.clip {
            props.push(("clip-path", c.to_string()));
        }
        if let Some(c) = self.color {
            props.push(("color", c.to_string()));
        }
        props
    }
}
