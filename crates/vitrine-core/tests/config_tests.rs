// Page configuration: defaults and JSON loading.

use vitrine_core::{Channel, Error, ObservationWindow, PageConfig, Unit, CADENCE_WORDS};

#[test]
fn defaults_are_valid() {
    let config = PageConfig::default();
    config.validate().unwrap();
    assert_eq!(config.preloader.tick_ms, 60);
    assert_eq!(config.preloader.target, 100);
    assert_eq!(config.music.volume, 0.4);
    assert!(config.music.looped);
    assert_eq!(config.cadence.words.len(), CADENCE_WORDS.len());
    assert_eq!(config.cadence.rhythm_ms, vec![483, 241, 120, 120, 483, 241, 483]);
    assert_eq!(config.cadence.seed, None);
    assert_eq!(config.sections.len(), 10);
    assert_eq!(config.sections[0].id, "page");
}

#[test]
fn empty_json_yields_defaults() {
    let config = PageConfig::from_json("{}").unwrap();
    assert_eq!(config.sections.len(), PageConfig::default().sections.len());
    assert_eq!(config.cadence.jitter_x, 7.0);
}

#[test]
fn parses_sections_and_bindings() {
    let text = r#"{
        "cadence": { "seed": 42, "rhythm_ms": [100, 200] },
        "sections": [
            {
                "id": "hero",
                "window": {
                    "start": { "container": "start", "viewport": "start" },
                    "end": { "container": "end", "viewport": "start" }
                },
                "bindings": [
                    {
                        "element": "hero-title",
                        "channel": { "kind": "translate-y", "unit": "percent" },
                        "ease": "out-cubic",
                        "points": [
                            { "progress": 0.0, "value": 0.0 },
                            { "progress": 0.5, "value": 100.0 }
                        ]
                    },
                    {
                        "element": "hero-mask",
                        "channel": { "kind": "clip-path" },
                        "points": [
                            { "progress": 0.0, "value": "inset(50%)" },
                            { "progress": 1.0, "value": "inset(0%)" }
                        ]
                    }
                ]
            }
        ]
    }"#;
    let config = PageConfig::from_json(text).unwrap();
    assert_eq!(config.cadence.seed, Some(42));
    assert_eq!(config.cadence.rhythm_ms, vec![100, 200]);
    assert_eq!(config.sections.len(), 1);
    let hero = &config.sections[0];
    assert_eq!(hero.window, ObservationWindow::TOP_TO_EXIT);
    assert_eq!(hero.margin, 200.0);
    let bindings = hero.bindings().unwrap();
    assert_eq!(bindings[0].channel, Channel::TranslateY(Unit::Percent));
    assert_eq!(bindings[1].channel, Channel::ClipPath);
}

#[test]
fn parses_reveal_sections_with_counters() {
    let text = r#"{ "sections": [ {
        "id": "stats",
        "reveal": { "duration_ms": 2400 },
        "counters": [ { "element": "stats-likes", "target": 2.7, "end": 0.5 } ]
    } ] }"#;
    let config = PageConfig::from_json(text).unwrap();
    let stats = &config.sections[0];
    let reveal = stats.reveal.as_ref().unwrap();
    assert_eq!(reveal.duration_ms, 2400);
    assert_eq!(reveal.margin, -100.0);
    let counter = &stats.counters[0];
    assert_eq!(counter.steps, 60);
    assert_eq!(counter.decimals, 1);
    assert_eq!(counter.start, 0.0);
    assert_eq!(stats.count_ups().unwrap()[0].target(), 2.7);
    assert!(PageConfig::default()
        .sections
        .iter()
        .any(|s| s.reveal.is_some() && !s.counters.is_empty()));
}

#[test]
fn rejects_counters_that_cannot_count() {
    for counter in [
        r#"{ "element": "c", "target": -1.0 }"#,
        r#"{ "element": "c", "target": 10.0, "steps": 0 }"#,
        r#"{ "element": "c", "target": 10.0, "start": 0.8, "end": 0.2 }"#,
    ] {
        let text = format!(r#"{{ "sections": [ {{ "id": "s", "counters": [ {counter} ] }} ] }}"#);
        assert!(PageConfig::from_json(&text).is_err(), "{counter}");
    }
}

#[test]
fn rejects_out_of_range_volume() {
    let err = PageConfig::from_json(r#"{ "music": { "volume": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn rejects_empty_cadence() {
    let err = PageConfig::from_json(r#"{ "cadence": { "words": [] } }"#).unwrap_err();
    assert!(matches!(err, Error::EmptySequence(_)));
}

#[test]
fn rejects_jitter_spans_the_driver_cannot_sample() {
    for text in [
        r#"{ "cadence": { "jitter_x": 3e38 } }"#,
        r#"{ "cadence": { "jitter_y": -2.0 } }"#,
    ] {
        let err = PageConfig::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{text}");
    }
    let mut config = PageConfig::default();
    config.cadence.jitter_x = f32::INFINITY;
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn rejects_duplicate_section_ids() {
    let err = PageConfig::from_json(r#"{ "sections": [ { "id": "a" }, { "id": "a" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateSection(_)));
}

#[test]
fn rejects_points_that_do_not_fit_the_channel() {
    let text = r#"{ "sections": [ { "id": "a", "bindings": [
        { "element": "x", "channel": { "kind": "clip-path" },
          "points": [ { "progress": 0.0, "value": 1.0 } ] }
    ] } ] }"#;
    assert!(matches!(
        PageConfig::from_json(text).unwrap_err(),
        Error::Config(_)
    ));

    let text = r#"{ "sections": [ { "id": "a", "bindings": [
        { "element": "x", "channel": { "kind": "clip-path" },
          "points": [ { "progress": 0.0, "value": "circle(1%)" } ] }
    ] } ] }"#;
    assert!(matches!(
        PageConfig::from_json(text).unwrap_err(),
        Error::InvalidInset(_)
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        PageConfig::from_json("{ nope").unwrap_err(),
        Error::ConfigParse(_)
    ));
}
