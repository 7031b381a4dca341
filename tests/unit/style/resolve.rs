use super::*;

#[test]
fn inherits_everything_but_opacity() {
    let parent = Style {
        fill: Some(Paint::Color(Rgba8::rgb(1, 2, 3))),
        opacity: Some(0.5),
        font_size: Some(20.0),
        ..Style::default()
    };
    let s = PresentationStyleResolver.resolve(&parent, &Attributes::default());
    assert_eq!(s.fill, parent.fill);
    assert_eq!(s.font_size, Some(20.0));
    assert_eq!(s.opacity, None);
}

#[test]
fn applies_attributes_and_inline_style() {
    let attrs = Attributes::from([
        ("fill", "#ff0000"),
        ("style", "stroke: blue; stroke-width: 3"),
        ("fill-rule", "evenodd"),
        ("text-anchor", "middle"),
        ("opacity", "50%"),
    ]);
    let s = PresentationStyleResolver.resolve(&Style::default(), &attrs);
    assert_eq!(s.fill, Some(Paint::Color(Rgba8::rgb(255, 0, 0))));
    assert_eq!(s.stroke, Some(Paint::Color(Rgba8::rgb(0, 0, 255))));
    assert_eq!(s.stroke_width, Some(3.0));
    assert_eq!(s.fill_rule, Some(FillRule::EvenOdd));
    assert_eq!(s.text_anchor, Some(TextAnchor::Middle));
    assert_eq!(s.opacity, Some(0.5));
}

#[test]
fn relative_font_size_scales_parent() {
    let parent = Style {
        font_size: Some(10.0),
        ..Style::default()
    };
    let s = PresentationStyleResolver.resolve(&parent, &Attributes::from([("font-size", "2em")]));
    assert_eq!(s.font_size, Some(20.0));
    let s = PresentationStyleResolver.resolve(&parent, &Attributes::from([("font-size", "150%")]));
    assert_eq!(s.font_size, Some(15.0));
}

#[test]
fn current_color_uses_color_property() {
    let attrs = Attributes::from([("color", "green"), ("fill", "currentColor")]);
    let s = PresentationStyleResolver.resolve(&Style::default(), &attrs);
    assert_eq!(s.fill, Some(Paint::Color(Rgba8::rgb(0, 128, 0))));

    let s = PresentationStyleResolver.resolve(&Style::default(), &Attributes::from([("stroke", "currentColor")]));
    assert_eq!(s.stroke, Some(Paint::Color(Rgba8::BLACK)));
}

#[test]
fn paint_references() {
    assert_eq!(
        parse_paint("url(#grad) red", Rgba8::BLACK),
        Some(Paint::Reference {
            id: "grad".to_owned(),
            fallback: Some(Rgba8::rgb(255, 0, 0)),
        })
    );
    assert_eq!(
        parse_paint("url('#g2')", Rgba8::BLACK),
        Some(Paint::Reference {
            id: "g2".to_owned(),
            fallback: None,
        })
    );
    assert_eq!(parse_paint("none", Rgba8::BLACK), Some(Paint::None));
    assert_eq!(parse_paint("bogus", Rgba8::BLACK), None);
    assert_eq!(parse_paint("inherit", Rgba8::BLACK), None);
}

#[test]
fn reference_keys_are_normalized() {
    assert_eq!(reference_key("url(#a)"), "a");
    assert_eq!(reference_key("#a"), "a");
    assert_eq!(reference_key("a"), "a");
    assert_eq!(reference_key(" url('#a') "), "a");
    assert_eq!(reference_key("#"), "");
}

#[test]
fn named_colors_resolve_as_fill() {
    let s = PresentationStyleResolver.resolve(
        &Style::default(),
        &Attributes::from([("fill", "steelblue"), ("stroke", "rebeccapurple")]),
    );
    assert_eq!(s.fill, Some(Paint::Color(Rgba8::rgb(70, 130, 180))));
    assert_eq!(s.stroke, Some(Paint::Color(Rgba8::rgb(102, 51, 153))));
}
