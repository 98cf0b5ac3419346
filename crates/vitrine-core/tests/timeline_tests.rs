// Timeline mapper: control point sampling, clip insets and style output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vitrine_core::{
    Binding, Channel, ChannelValue, ControlPoint, Ease, ElementStyle, Error, Inset, Progress,
    Rgba, ScrollRange, Side, Track, Unit,
};

fn scalar(points: &[(f32, f32)]) -> Track<f32> {
    Track::new(points.iter().map(|(p, v)| ControlPoint::new(*p, *v))).unwrap()
}

#[test]
fn holds_boundary_values_outside_the_points() {
    let track = scalar(&[(0.2, 10.0), (0.8, 20.0)]);
    assert_eq!(track.sample(-0.5), 10.0);
    assert_eq!(track.sample(0.0), 10.0);
    assert_eq!(track.sample(1.0), 20.0);
    assert_eq!(track.sample(1.5), 20.0);
    assert_eq!(track.sample(f32::NAN), 10.0);
}

#[test]
fn interpolates_between_neighbouring_points() {
    let track = scalar(&[(0.0, 0.0), (0.5, 1.0), (1.0, 1.0)]);
    assert_eq!(track.sample(0.5), 1.0);
    assert!((track.sample(0.25) - 0.5).abs() < 1e-6);
    assert_eq!(track.sample(0.75), 1.0);
}

#[test]
fn equal_progress_points_make_a_hard_step() {
    let track = scalar(&[(0.0, 0.0), (0.5, 0.0), (0.5, 1.0), (1.0, 1.0)]);
    assert_eq!(track.sample(0.49), 0.0);
    assert_eq!(track.sample(0.5), 1.0);
}

#[test]
fn sampling_is_idempotent() {
    let track = scalar(&[(0.0, 3.0), (0.3, -2.0), (1.0, 8.0)]);
    for i in 0..=20 {
        let p = i as f32 / 20.0;
        assert_eq!(track.sample(p), track.sample(p));
    }
}

#[test]
fn monotonic_points_give_monotonic_output() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let n = rng.gen_range(1..6);
        let mut progress: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
        progress.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut value = rng.gen_range(-100.0..100.0);
        let points: Vec<(f32, f32)> = progress
            .iter()
            .map(|p| {
                value += rng.gen_range(0.0..50.0);
                (*p, value)
            })
            .collect();
        let track = scalar(&points);
        let mut prev = track.sample(-1.0);
        for i in 0..=200 {
            let v = track.sample(i as f32 / 200.0);
            assert!(v >= prev - 1e-4, "{v} < {prev}");
            prev = v;
        }
    }
}

#[test]
fn rejects_invalid_tracks() {
    assert!(matches!(
        Track::<f32>::new(Vec::new()),
        Err(Error::EmptyTrack)
    ));
    assert!(matches!(
        Track::new(vec![ControlPoint::new(0.6, 0.0f32), ControlPoint::new(0.2, 1.0)]),
        Err(Error::UnsortedControlPoints { .. })
    ));
    assert!(matches!(
        Track::new(vec![ControlPoint::new(f32::NAN, 0.0f32)]),
        Err(Error::NonFiniteProgress(_))
    ));
}

#[test]
fn scroll_ranges_must_be_ordered_and_inside_unit_interval() {
    assert!(ScrollRange::new("w", 0.1, 0.4).is_ok());
    assert!(matches!(
        ScrollRange::new("w", 0.5, 0.5),
        Err(Error::InvalidRange { .. })
    ));
    assert!(ScrollRange::new("w", -0.1, 0.4).is_err());
    assert!(ScrollRange::new("w", 0.2, 1.1).is_err());
}

#[test]
fn scroll_range_local_position() {
    let range = ScrollRange::new("w", 0.2, 0.6).unwrap();
    assert_eq!(range.local(Progress::new(0.1)), 0.0);
    assert!((range.local(Progress::new(0.4)) - 0.5).abs() < 1e-6);
    assert_eq!(range.local(Progress::new(0.9)), 1.0);
    let track = Track::over(&range, 0.2f32, 1.0).unwrap();
    assert!((track.sample(0.4) - 0.6).abs() < 1e-6);
}

#[test]
fn track_over_checks_its_range() {
    // fields are public, so a range can be built around `ScrollRange::new`
    let inverted = ScrollRange {
        element_id: "w".into(),
        start: 0.8,
        end: 0.2,
    };
    assert!(matches!(
        Track::over(&inverted, 0.0f32, 1.0),
        Err(Error::InvalidRange { .. })
    ));
    let unbounded = ScrollRange {
        element_id: "w".into(),
        start: 0.0,
        end: f32::NAN,
    };
    assert!(Track::over(&unbounded, 0.0f32, 1.0).is_err());
}

#[test]
fn clip_inset_opens_from_the_centre() {
    let track = Track::new(vec![
        ControlPoint::new(0.0, Inset::CLOSED),
        ControlPoint::new(0.4, Inset::OPEN),
    ])
    .unwrap();
    assert!(track.sample(0.0).is_hidden());
    assert_eq!(track.sample(0.2).to_string(), "inset(25% 25% 25% 25%)");
    assert_eq!(track.sample(0.9), Inset::OPEN);
}

#[test]
fn inset_parses_css_shorthand() {
    assert_eq!("inset(10%)".parse::<Inset>().unwrap(), Inset::uniform(10.0));
    assert_eq!(
        "inset(10% 20%)".parse::<Inset>().unwrap(),
        Inset::new(10.0, 20.0, 10.0, 20.0)
    );
    assert_eq!(
        "inset(1 2 3 4)".parse::<Inset>().unwrap(),
        Inset::new(1.0, 2.0, 3.0, 4.0)
    );
    assert!("circle(50%)".parse::<Inset>().is_err());
    assert!("inset()".parse::<Inset>().is_err());
    assert!(Inset::reveal_from(Side::Left).is_hidden());
}

#[test]
fn easing_shapes_local_progress() {
    let track = scalar(&[(0.0, 0.0), (1.0, 1.0)]).with_ease(Ease::OutQuad);
    assert!((track.sample(0.5) - 0.75).abs() < 1e-6);
    assert_eq!(Ease::InOutCubic.apply(0.0), 0.0);
    assert_eq!(Ease::OutExpo.apply(1.0), 1.0);
}

#[test]
fn binding_evaluates_its_channel_value() {
    let opacity = Binding::scalar(
        "hero-title",
        Channel::Opacity,
        scalar(&[(0.0, 0.0), (0.5, 1.0), (1.0, 1.0)]),
    );
    assert_eq!(
        opacity.evaluate(Progress::new(0.5)),
        ChannelValue::Scalar(1.0)
    );
    let color = Binding::color(
        "title",
        Track::new(vec![
            ControlPoint::new(0.0, Rgba::BLACK),
            ControlPoint::new(1.0, Rgba::WHITE),
        ])
        .unwrap(),
    );
    match color.evaluate(Progress::END) {
        ChannelValue::Color(c) => assert_eq!(c, Rgba::WHITE),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn element_style_composes_transform_and_properties() {
    let mut style = ElementStyle::default();
    assert!(style.is_empty());
    assert!(style.set(Channel::TranslateY(Unit::Px), &ChannelValue::Scalar(20.0)));
    assert!(style.set(Channel::Scale, &ChannelValue::Scalar(1.2)));
    assert!(style.set(Channel::Opacity, &ChannelValue::Scalar(1.4)));
    assert!(!style.set(Channel::ClipPath, &ChannelValue::Scalar(1.0)));

    assert_eq!(
        style.transform().as_deref(),
        Some("translate3d(0px, 20px, 0) scale(1.2)")
    );
    let props = style.properties();
    assert_eq!(props[0].0, "transform");
    assert_eq!(props[1], ("opacity", "1".to_string()));
    assert_eq!(Rgba::ACCENT.to_string(), "rgba(227, 6, 19, 1)");
}
