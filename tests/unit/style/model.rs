use super::*;

#[test]
fn merge_prefers_own_values() {
    let own = Style {
        fill: Some(Paint::Color(Rgba8::rgb(255, 0, 0))),
        ..Style::default()
    };
    let fallback = Style {
        fill: Some(Paint::None),
        stroke: Some(Paint::Color(Rgba8::BLACK)),
        stroke_width: Some(2.0),
        ..Style::default()
    };
    let merged = own.merge(&fallback);
    assert_eq!(merged.fill, Some(Paint::Color(Rgba8::rgb(255, 0, 0))));
    assert_eq!(merged.stroke, Some(Paint::Color(Rgba8::BLACK)));
    assert_eq!(merged.stroke_width, Some(2.0));
}

#[test]
fn clip_placeholder_is_unpainted() {
    let s = Style::clip_placeholder();
    assert!(s.fill.as_ref().unwrap().is_empty());
    assert!(s.stroke.as_ref().unwrap().is_empty());
}

#[test]
fn default_fill_only_applies_when_unset() {
    let s = Style::default().with_default_fill(Paint::Color(Rgba8::BLACK));
    assert_eq!(s.fill, Some(Paint::Color(Rgba8::BLACK)));
    let s = Style {
        fill: Some(Paint::None),
        ..Style::default()
    }
    .with_default_fill(Paint::Color(Rgba8::BLACK));
    assert_eq!(s.fill, Some(Paint::None));
}

#[test]
fn text_defaults() {
    let s = Style::default();
    assert_eq!(s.anchor(), TextAnchor::Start);
    assert_eq!(s.font_size_or_default(), Style::DEFAULT_FONT_SIZE);
}
