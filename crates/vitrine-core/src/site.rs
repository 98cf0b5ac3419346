//! Built-in section catalogue for the portfolio page.

use crate::config::{BindingConfig, CounterConfig, RevealConfig, SectionConfig};
use crate::ease::Ease;
use crate::scroll::ObservationWindow;
use crate::timeline::{Channel, ScrollRange, Unit};

pub const REVEAL_WORDS: [&str; 10] = [
    "Transformo",
    "ideias",
    "em",
    "experiências",
    "visuais",
    "memoráveis",
    "através",
    "da",
    "comunicação",
    "criativa.",
];

pub const MASK_IMAGES: usize = 3;

const FADE_IN_OUT: [(f32, f32); 4] = [(0.0, 0.0), (0.3, 1.0), (0.7, 1.0), (1.0, 0.0)];

pub fn default_sections() -> Vec<SectionConfig> {
    vec![
        page_indicator(),
        hero(),
        stats(),
        about(),
        text_reveal(),
        image_mask(),
        horizontal(),
        gallery(),
        parallax(),
        contact(),
    ]
}

fn page_indicator() -> SectionConfig {
    SectionConfig::new("page", ObservationWindow::PAGE, 0.0)
        .with(BindingConfig::scalar(
            "scroll-progress-bar",
            Channel::ScaleX,
            &[(0.0, 0.0), (1.0, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "scroll-progress-rail",
            Channel::ScaleY,
            &[(0.0, 0.0), (1.0, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "scroll-progress-label",
            Channel::Opacity,
            &[(0.0, 0.0), (1.0, 1.0)],
        ))
}

fn hero() -> SectionConfig {
    SectionConfig::new("hero", ObservationWindow::TOP_TO_EXIT, 1.0)
        .with(BindingConfig::scalar(
            "hero-bg",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (1.0, 50.0)],
        ))
        .with(BindingConfig::scalar(
            "hero-bg",
            Channel::Opacity,
            &[(0.0, 1.0), (0.5, 0.0)],
        ))
        .with(BindingConfig::scalar(
            "hero-bg",
            Channel::Scale,
            &[(0.0, 1.0), (0.5, 1.1)],
        ))
        .with(BindingConfig::scalar(
            "hero-title",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (0.5, 100.0)],
        ))
}

/// Audience numbers: plays once on first view, counting up over two seconds.
fn stats() -> SectionConfig {
    // Fractions of a 2.4s timeline; counters take the first 2s.
    SectionConfig::new("stats", ObservationWindow::ENTER_TO_EXIT, 1.0)
        .revealed(RevealConfig::over_ms(2400))
        .with(BindingConfig::scalar(
            "stats-label",
            Channel::Opacity,
            &[(0.0, 0.0), (0.333, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "stats-label",
            Channel::TranslateX(Unit::Px),
            &[(0.0, -50.0), (0.333, 0.0)],
        ))
        .with(BindingConfig::scalar(
            "stats-followers",
            Channel::Opacity,
            &[(0.083, 0.0), (0.417, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "stats-followers",
            Channel::TranslateY(Unit::Px),
            &[(0.083, 30.0), (0.417, 0.0)],
        ))
        .with(BindingConfig::scalar(
            "stats-likes",
            Channel::Opacity,
            &[(0.167, 0.0), (0.5, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "stats-likes",
            Channel::TranslateY(Unit::Px),
            &[(0.167, 30.0), (0.5, 0.0)],
        ))
        .with(
            BindingConfig::scalar("stats-mockup", Channel::Scale, &[(0.0, 0.8), (0.417, 1.0)])
                .with_ease(Ease::OutExpo),
        )
        .with(
            BindingConfig::scalar("stats-mockup", Channel::Rotate, &[(0.0, -5.0), (0.417, 0.0)])
                .with_ease(Ease::OutExpo),
        )
        .with(BindingConfig::scalar(
            "stats-mockup",
            Channel::Opacity,
            &[(0.0, 0.0), (0.417, 1.0)],
        ))
        .counting(CounterConfig::new("stats-followers-count", 228.7, 0.0, 0.833))
        .counting(CounterConfig::new("stats-likes-count", 2.7, 0.0, 0.833))
}

fn about() -> SectionConfig {
    SectionConfig::new("about", ObservationWindow::ENTER_TO_EXIT, 1.2).with(BindingConfig::scalar(
        "about-image",
        Channel::TranslateY(Unit::Px),
        &[(0.0, 100.0), (1.0, -100.0)],
    ))
}

/// Words light up one after another; ranges overlap so the sentence flows.
fn text_reveal() -> SectionConfig {
    let n = REVEAL_WORDS.len() as f32;
    let mut section = SectionConfig::new("text-reveal", ObservationWindow::ENTER_TO_EXIT, 1.5);
    for i in 0..REVEAL_WORDS.len() {
        let start = i as f32 / n;
        let end = start + 1.0 / n;
        let range = ScrollRange {
            element_id: format!("reveal-word-{i}"),
            start: start * 0.5,
            end: end * 0.5 + 0.3,
        };
        section = section
            .with(BindingConfig::over(&range, Channel::Opacity, 0.2, 1.0))
            .with(BindingConfig::over(
                &range,
                Channel::TranslateY(Unit::Px),
                20.0,
                0.0,
            ));
    }
    section
}

fn image_mask() -> SectionConfig {
    let mut section = SectionConfig::new("image-mask", ObservationWindow::ENTER_TO_EXIT, 1.5);
    for i in 0..MASK_IMAGES {
        let from = 0.1 + i as f32 * 0.1;
        let to = 0.3 + i as f32 * 0.1;
        section = section
            .with(BindingConfig::clip(
                &format!("mask-frame-{i}"),
                &[(from, "inset(50% 50% 50% 50%)"), (to, "inset(0% 0% 0% 0%)")],
            ))
            .with(BindingConfig::scalar(
                &format!("mask-image-{i}"),
                Channel::Scale,
                &[(from, 1.2), (to, 1.0)],
            ));
    }
    section
}

fn horizontal() -> SectionConfig {
    SectionConfig::new("horizontal", ObservationWindow::PINNED, 3.0)
        .with(BindingConfig::scalar(
            "horizontal-track",
            Channel::TranslateX(Unit::Percent),
            &[(0.0, 0.0), (1.0, -66.666)],
        ))
        .with(BindingConfig::scalar(
            "horizontal-progress",
            Channel::ScaleX,
            &[(0.0, 0.0), (1.0, 1.0)],
        ))
}

fn gallery() -> SectionConfig {
    SectionConfig::new("gallery", ObservationWindow::ENTER_TO_EXIT, 2.0)
        .with(BindingConfig::scalar(
            "gallery-column-a",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (1.0, -10.0)],
        ))
        .with(BindingConfig::scalar(
            "gallery-column-b",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (1.0, 10.0)],
        ))
}

/// Three depth layers moving at different speeds.
fn parallax() -> SectionConfig {
    let swell = [(0.0, 0.8), (0.5, 1.0), (1.0, 1.1)];
    SectionConfig::new("parallax", ObservationWindow::ENTER_TO_EXIT, 1.5)
        .with(BindingConfig::scalar(
            "parallax-back",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (1.0, -30.0)],
        ))
        .with(BindingConfig::scalar(
            "parallax-mid",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (1.0, -15.0)],
        ))
        .with(BindingConfig::scalar(
            "parallax-mid",
            Channel::Opacity,
            &FADE_IN_OUT,
        ))
        .with(BindingConfig::scalar(
            "parallax-front",
            Channel::TranslateY(Unit::Percent),
            &[(0.0, 0.0), (1.0, -45.0)],
        ))
        .with(BindingConfig::scalar("parallax-orb", Channel::Scale, &swell))
        .with(BindingConfig::scalar("parallax-ring", Channel::Scale, &swell))
        .with(BindingConfig::scalar(
            "parallax-ring",
            Channel::Rotate,
            &[(0.0, 0.0), (1.0, 5.0)],
        ))
        .with(BindingConfig::scalar(
            "parallax-line-v",
            Channel::ScaleY,
            &[(0.0, 0.0), (1.0, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "parallax-line-h",
            Channel::ScaleX,
            &[(0.0, 0.0), (1.0, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "parallax-stats",
            Channel::Opacity,
            &FADE_IN_OUT,
        ))
}

fn contact() -> SectionConfig {
    SectionConfig::new("contact", ObservationWindow::ENTER_TO_SETTLE, 1.0)
        .with(BindingConfig::scalar(
            "contact-body",
            Channel::TranslateY(Unit::Px),
            &[(0.0, 100.0), (1.0, 0.0)],
        ))
        .with(BindingConfig::scalar(
            "contact-body",
            Channel::Opacity,
            &[(0.0, 0.0), (0.5, 1.0)],
        ))
        .with(BindingConfig::scalar(
            "contact-heading",
            Channel::TranslateY(Unit::Px),
            &[(0.0, -100.0), (1.0, 0.0)],
        ))
        .with(BindingConfig::scalar(
            "contact-watermark",
            Channel::Opacity,
            &[(0.4, 0.0), (0.8, 0.05), (1.0, 0.1)],
        ))
        .with(BindingConfig::scalar(
            "contact-watermark",
            Channel::TranslateY(Unit::Px),
            &[(0.4, 200.0), (1.0, 0.0)],
        ))
}
