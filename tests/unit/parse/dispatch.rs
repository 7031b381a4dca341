use super::*;
use crate::foundation::error::SceneError;
use crate::parse::{ParseOptions, SceneParser, parse_svg_str};
use crate::scene::model::SceneRoot;

fn parse(src: &str) -> SceneRoot {
    parse_svg_str(src, ParseOptions::default()).unwrap()
}

fn parse_strict(src: &str) -> SceneError {
    parse_svg_str(src, ParseOptions::strict()).unwrap_err()
}

#[test]
fn viewport_equals_view_box() {
    let scene = parse(r#"<svg width="200" height="100" viewBox="5 10 20 10"/>"#);
    assert_eq!(scene.viewport.view_box, Rect::new(5.0, 10.0, 25.0, 20.0));
    assert_eq!(scene.viewport.size, Size::new(200.0, 100.0));
}

#[test]
fn viewport_falls_back_in_both_directions() {
    let vp = parse_viewport(&Attributes::from([("width", "30"), ("height", "1in")])).unwrap();
    assert_eq!(vp.view_box, Rect::new(0.0, 0.0, 30.0, 96.0));

    let vp = parse_viewport(&Attributes::from([("viewBox", "0,0,40,20")])).unwrap();
    assert_eq!(vp.size, Size::new(40.0, 20.0));

    let vp = parse_viewport(&Attributes::from([("width", "50%"), ("viewBox", "0 0 40 20")]))
        .unwrap();
    assert_eq!(vp.size, Size::new(20.0, 20.0));

    let vp = parse_viewport(&Attributes::from([
        ("width", "10"),
        ("height", "10"),
        ("viewBox", "0 0 -1 5"),
    ]))
    .unwrap();
    assert_eq!(vp.view_box, Rect::new(0.0, 0.0, 10.0, 10.0));

    let err = parse_viewport(&Attributes::from([("width", "10")])).unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
}

#[test]
fn handler_table_covers_supported_elements() {
    type Events = std::vec::IntoIter<MarkupEvent>;
    for name in ["svg", "g", "a", "use", "rect", "path", "text", "clipPath", "defs", "desc"] {
        assert!(handler_for::<Events>(name).is_some(), "{name}");
    }
    assert!(handler_for::<Events>("tspan").is_none());
    assert!(handler_for::<Events>("foreignObject").is_none());
}

#[test]
fn defs_content_is_registered_but_not_visible() {
    let scene = parse(
        r#"<svg width="10" height="10">
             <defs>
               <g id="g"><rect id="r" width="1" height="1"/></g>
               <circle id="c" r="2"/>
             </defs>
             <rect width="3" height="3"/>
           </svg>"#,
    );
    assert_eq!(scene.node_count(), 1);
    assert_eq!(scene.definitions.node("g").unwrap().children().len(), 1);
    assert!(scene.definitions.node("r").is_some());
    assert!(scene.definitions.node("c").is_some());
}

#[test]
fn self_closing_defs_does_not_hide_siblings() {
    let scene = parse(r#"<svg width="10" height="10"><defs/><rect width="1" height="1"/></svg>"#);
    assert_eq!(scene.children.len(), 1);
}

#[test]
fn groups_nest_and_map_kinds() {
    let scene = parse(
        r#"<svg width="10" height="10">
             <a id="link"><g transform="translate(1 2)"><rect width="1" height="1"/></g></a>
             <symbol id="s"/>
           </svg>"#,
    );
    assert_eq!(scene.children.len(), 2);
    let SceneNode::Group(link) = &scene.children[0] else {
        panic!("expected group");
    };
    assert_eq!(link.kind, GroupKind::Anchor);
    let inner = &link.children[0];
    assert_eq!(inner.transform(), Some(Affine::translate((1.0, 2.0))));
    assert_eq!(inner.children()[0].kind_name(), "shape");
    let SceneNode::Group(symbol) = &scene.children[1] else {
        panic!("expected group");
    };
    assert_eq!(symbol.kind, GroupKind::Symbol);
}

#[test]
fn shapes_inherit_container_style_and_default_to_black() {
    let scene = parse(
        r#"<svg width="10" height="10">
             <g stroke="red"><rect width="1" height="1" clip-path="url(#clip)"/></g>
           </svg>"#,
    );
    let shape = &scene.children[0].children()[0];
    let SceneNode::Shape(rect) = shape else {
        panic!("expected shape");
    };
    assert_eq!(rect.clip_path.as_deref(), Some("clip"));
    assert_eq!(
        rect.style.stroke,
        Some(crate::style::model::Paint::Color(crate::foundation::core::Rgba8::rgb(255, 0, 0)))
    );
    assert_eq!(
        rect.style.fill,
        Some(crate::style::model::Paint::Color(crate::foundation::core::Rgba8::BLACK))
    );
}

#[test]
fn mismatched_close_leaves_group_open() {
    let events = vec![
        MarkupEvent::open("svg", [("width", "10"), ("height", "10")]),
        MarkupEvent::open("g", [("id", "g")]),
        MarkupEvent::close("q"),
        MarkupEvent::empty("rect", [("width", "1"), ("height", "1")]),
        MarkupEvent::close("svg"),
    ];
    let scene = SceneParser::default().parse_events(events).unwrap();
    assert_eq!(scene.children.len(), 1);
    assert_eq!(scene.children[0].children().len(), 1);
}

#[test]
fn unknown_elements_are_skipped_with_their_subtree() {
    let scene = parse(
        r#"<svg width="10" height="10">
             <title>t</title>
             <foreignObject><rect width="1" height="1"/></foreignObject>
             <rect width="1" height="1"/>
           </svg>"#,
    );
    assert_eq!(scene.node_count(), 1);

    let err = parse_strict(r#"<svg width="1" height="1"><blink/></svg>"#);
    assert!(matches!(err, SceneError::Unsupported(_)));
    parse_svg_str(
        r#"<svg width="1" height="1"><desc>d</desc></svg>"#,
        ParseOptions::strict(),
    )
    .unwrap();
}

#[test]
fn nested_root_becomes_empty_placeholder() {
    let src = r#"<svg width="10" height="10">
                   <svg width="5" height="5"><rect width="1" height="1"/></svg>
                   <circle r="1"/>
                 </svg>"#;
    let scene = parse(src);
    assert_eq!(scene.children.len(), 2);
    assert!(scene.children[0].children().is_empty());
    assert_eq!(scene.viewport.size, Size::new(10.0, 10.0));

    assert!(matches!(parse_strict(src), SceneError::Unsupported(_)));
}

#[test]
fn style_elements_are_unsupported() {
    let src = r#"<svg width="1" height="1"><style>rect { fill: red }</style></svg>"#;
    assert!(parse(src).children.is_empty());
    assert!(matches!(parse_strict(src), SceneError::Unsupported(_)));
}

#[test]
fn use_offsets_compose_after_transform() {
    let attrs = Attributes::from([("x", "3"), ("y", "4"), ("transform", "scale(2)")]);
    assert_eq!(
        reuse_transform(&attrs),
        Some(Affine::scale(2.0) * Affine::translate((3.0, 4.0)))
    );
    assert_eq!(reuse_transform(&Attributes::default()), None);
}

#[test]
fn use_without_target_is_ignored() {
    let scene = parse(r#"<svg width="1" height="1"><use/><use href=""/></svg>"#);
    assert!(scene.children.is_empty());
}
