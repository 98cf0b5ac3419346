// Stage: per-section publish-then-map, isolation and unmounting.

use std::collections::HashMap;
use std::time::Duration;
use vitrine_core::{
    Binding, BindingConfig, Bounds, Channel, ControlPoint, CounterConfig, ElementMeasure,
    ElementStyle, Error, ObservationWindow, Progress, RevealConfig, SectionConfig, Stage,
    StyleSink, Track, Unit, Viewport,
};

#[derive(Default)]
struct MapMeasure(HashMap<String, Bounds>);

impl MapMeasure {
    fn with(mut self, id: &str, top: f32, height: f32) -> Self {
        self.0.insert(id.to_string(), Bounds::new(top, height));
        self
    }
}

impl ElementMeasure for MapMeasure {
    fn bounds(&self, element: &str) -> Option<Bounds> {
        self.0.get(element).copied()
    }
}

#[derive(Default)]
struct RecordingSink(Vec<(String, ElementStyle)>, Vec<(String, String)>);

impl RecordingSink {
    fn text_of(&self, element: &str) -> Option<&str> {
        self.1
            .iter()
            .rev()
            .find(|(el, _)| el == element)
            .map(|(_, t)| t.as_str())
    }

    fn style_of(&self, element: &str) -> Option<&ElementStyle> {
        self.0
            .iter()
            .rev()
            .find(|(el, _)| el == element)
            .map(|(_, s)| s)
    }
}

impl StyleSink for RecordingSink {
    fn apply(&mut self, element: &str, style: &ElementStyle) {
        self.0.push((element.to_string(), style.clone()));
    }

    fn set_text(&mut self, element: &str, text: &str) {
        self.1.push((element.to_string(), text.to_string()));
    }
}

const VIEW: Viewport = Viewport {
    scroll_y: 400.0,
    height: 800.0,
};

fn hero() -> SectionConfig {
    SectionConfig::new("hero", ObservationWindow::TOP_TO_EXIT, 1.0)
        .with(BindingConfig::scalar(
            "hero-title",
            Channel::Opacity,
            &[(0.0, 1.0), (1.0, 0.0)],
        ))
        .with(BindingConfig::scalar(
            "hero-title",
            Channel::TranslateY(Unit::Px),
            &[(0.0, 0.0), (1.0, 100.0)],
        ))
}

fn about() -> SectionConfig {
    SectionConfig::new("about", ObservationWindow::ENTER_TO_EXIT, 1.0).with(
        BindingConfig::scalar("about-image", Channel::Scale, &[(0.0, 1.0), (1.0, 2.0)]),
    )
}

#[test]
fn frame_publishes_then_maps_each_section() {
    let mut stage = Stage::new();
    let id = stage.mount(&hero()).unwrap();
    let measure = MapMeasure::default().with("hero", 0.0, 800.0);
    let mut sink = RecordingSink::default();

    let report = stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(report.samples.len(), 1);
    assert_eq!(report.samples[0].0, id);
    assert!((report.samples[0].1.get() - 0.5).abs() < 1e-6);
    assert_eq!(stage.progress(id), Some(report.samples[0].1));

    // both channels of one element arrive as one style
    assert_eq!(report.styled, 1);
    let style = sink.style_of("hero-title").unwrap();
    assert!((style.opacity.unwrap() - 0.5).abs() < 1e-6);
    assert_eq!(style.translate_y.map(|(_, u)| u), Some(Unit::Px));
}

#[test]
fn missing_container_skips_only_its_section() {
    let mut stage = Stage::new();
    stage.mount(&hero()).unwrap();
    stage.mount(&about()).unwrap();
    let measure = MapMeasure::default().with("about", 600.0, 800.0);
    let mut sink = RecordingSink::default();

    let report = stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.samples.len(), 1);
    assert!(sink.style_of("hero-title").is_none());
    assert!(sink.style_of("about-image").is_some());
}

#[test]
fn unmounted_sections_receive_no_further_styles() {
    let mut stage = Stage::new();
    let hero_id = stage.mount(&hero()).unwrap();
    stage.mount(&about()).unwrap();
    let measure = MapMeasure::default()
        .with("hero", 0.0, 800.0)
        .with("about", 800.0, 800.0);

    let mut sink = RecordingSink::default();
    stage.frame(VIEW, &measure, &mut sink);
    assert!(sink.style_of("hero-title").is_some());

    assert!(stage.unmount(hero_id));
    assert!(!stage.unmount(hero_id));
    assert_eq!(stage.progress(hero_id), None);

    let mut sink = RecordingSink::default();
    let report = stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(report.samples.len(), 1);
    assert!(sink.style_of("hero-title").is_none());

    stage.unmount_all();
    assert!(stage.is_empty());
    let mut sink = RecordingSink::default();
    stage.frame(VIEW, &measure, &mut sink);
    assert!(sink.0.is_empty());
}

#[test]
fn duplicate_sections_are_rejected() {
    let mut stage = Stage::new();
    stage.mount(&hero()).unwrap();
    assert!(matches!(
        stage.mount(&hero()),
        Err(Error::DuplicateSection(name)) if name == "hero"
    ));
    assert_eq!(stage.len(), 1);
}

#[test]
fn mismatched_channel_values_are_rejected_at_mount() {
    let mut stage = Stage::new();
    let bad = Binding::scalar(
        "mask",
        Channel::ClipPath,
        Track::new(vec![ControlPoint::new(0.0, 1.0f32)]).unwrap(),
    );
    let result = stage.mount_bindings("mask", ObservationWindow::ENTER_TO_EXIT, 0.0, vec![bad]);
    assert!(matches!(result, Err(Error::Config(_))));
    assert!(stage.section_id("mask").is_none());
}

#[test]
fn built_in_catalogue_mounts_cleanly() {
    let mut stage = Stage::new();
    for section in vitrine_core::site::default_sections() {
        stage.mount(&section).unwrap();
    }
    assert_eq!(stage.len(), 10);
    assert!(stage.section_id("image-mask").is_some());
    assert!(stage.section_id("stats").is_some());
}

#[test]
fn horizontal_showcase_drives_its_progress_bar() {
    let mut stage = Stage::new();
    for section in vitrine_core::site::default_sections() {
        stage.mount(&section).unwrap();
    }
    // pinned for 2400px of scroll starting at 1000
    let measure = MapMeasure::default().with("horizontal", 1000.0, 3200.0);
    let mut sink = RecordingSink::default();
    let view = Viewport {
        scroll_y: 2200.0,
        height: 800.0,
    };
    stage.frame(view, &measure, &mut sink);
    let bar = sink.style_of("horizontal-progress").unwrap();
    assert_eq!(bar.scale_x, Some(0.5));
}

fn stats() -> SectionConfig {
    SectionConfig::new("stats", ObservationWindow::ENTER_TO_EXIT, 1.0)
        .revealed(RevealConfig::over_ms(1000))
        .with(BindingConfig::scalar(
            "stats-label",
            Channel::Opacity,
            &[(0.0, 0.0), (0.5, 1.0)],
        ))
        .counting(CounterConfig::new("stats-count", 228.7, 0.0, 1.0))
}

#[test]
fn reveal_sections_play_on_the_clock_once_seen() {
    let mut stage = Stage::new();
    let id = stage.mount(&stats()).unwrap();
    let measure = MapMeasure::default().with("stats", 2000.0, 600.0);

    // out of view: held at the start however much time passes
    let mut sink = RecordingSink::default();
    stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(sink.text_of("stats-count"), Some("0,0"));
    stage.advance(Duration::from_secs(5));
    let report = stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(report.texts, 0);
    assert_eq!(stage.progress(id), Some(Progress::START));

    let in_view = Viewport {
        scroll_y: 1600.0,
        height: 800.0,
    };
    stage.frame(in_view, &measure, &mut sink);
    assert_eq!(stage.progress(id), Some(Progress::START));

    stage.advance(Duration::from_millis(500));
    stage.frame(in_view, &measure, &mut sink);
    let half = stage.progress(id).unwrap().get();
    assert!((half - 0.5).abs() < 1e-4);
    assert_eq!(sink.style_of("stats-label").unwrap().opacity, Some(1.0));
    let shown: f32 = sink.text_of("stats-count").unwrap().replace(',', ".").parse().unwrap();
    assert!(shown > 100.0 && shown < 120.0, "halfway shows {shown}");

    // scrolling away does not pause or rewind a started reveal
    stage.advance(Duration::from_millis(600));
    stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(stage.progress(id), Some(Progress::END));
    assert_eq!(sink.text_of("stats-count"), Some("228,7"));
    let report = stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(report.texts, 0);
}

#[test]
fn catalogue_remounts_after_unmount_all() {
    let mut stage = Stage::new();
    for section in vitrine_core::site::default_sections() {
        stage.mount(&section).unwrap();
    }
    stage.unmount_all();
    for section in vitrine_core::site::default_sections() {
        stage.mount(&section).unwrap();
    }
    let measure = MapMeasure::default().with("hero", 0.0, 800.0);
    let mut sink = RecordingSink::default();
    let report = stage.frame(VIEW, &measure, &mut sink);
    assert_eq!(report.samples.len(), 1);
    assert!(sink.style_of("hero-title").is_some());
}
