use crate::parse::{ParseOptions, UnresolvedPolicy, parse_svg_str};
use crate::scene::model::{GroupKind, SceneNode, SceneRoot};

fn parse(src: &str) -> SceneRoot {
    parse_svg_str(src, ParseOptions::default()).unwrap()
}

fn reuse_child(node: &SceneNode) -> &SceneNode {
    let SceneNode::Group(wrapper) = node else {
        panic!("expected reuse wrapper, got {}", node.kind_name());
    };
    assert_eq!(wrapper.kind, GroupKind::Reuse);
    &wrapper.children[0]
}

#[test]
fn forward_and_backward_references_resolve_identically() {
    let forward = parse(
        r##"<svg width="10" height="10">
             <use href="#r" x="2" fill="blue"/>
             <defs><rect id="r" width="3" height="4"/></defs>
           </svg>"##,
    );
    let backward = parse(
        r##"<svg width="10" height="10">
             <defs><rect id="r" width="3" height="4"/></defs>
             <use href="#r" x="2" fill="blue"/>
           </svg>"##,
    );
    assert_eq!(forward.children, backward.children);
    assert_eq!(forward.children.len(), 1);
    assert_eq!(
        forward.children[0].transform(),
        Some(crate::foundation::core::Affine::translate((2.0, 0.0)))
    );
    let SceneNode::Shape(rect) = reuse_child(&forward.children[0]) else {
        panic!("expected shape");
    };
    assert_eq!(
        rect.style.fill,
        Some(crate::style::model::Paint::Color(crate::foundation::core::Rgba8::rgb(0, 0, 255)))
    );
}

#[test]
fn deferred_slot_keeps_reference_position() {
    let scene = parse(
        r##"<svg width="10" height="10">
             <g id="outer">
               <circle r="1"/>
               <use href="#later"/>
               <circle r="2"/>
             </g>
             <rect id="later" width="1" height="1"/>
           </svg>"##,
    );
    let outer = &scene.children[0];
    let kinds: Vec<_> = outer.children().iter().map(SceneNode::kind_name).collect();
    assert_eq!(kinds, ["shape", "group", "shape"]);
    assert_eq!(reuse_child(&outer.children()[1]).id(), "later");
}

#[test]
fn deferred_reference_inside_defs_stays_hidden() {
    let scene = parse(
        r##"<svg width="10" height="10">
             <defs><use id="copy" href="#r"/></defs>
             <rect id="r" width="1" height="1"/>
           </svg>"##,
    );
    assert_eq!(scene.children.len(), 1);
    assert_eq!(scene.children[0].kind_name(), "shape");
    let copy = scene.definitions.node("copy").unwrap();
    assert_eq!(reuse_child(copy).id(), "r");
}

#[test]
fn unresolved_references_produce_nothing_under_either_policy() {
    let src = r##"<svg width="10" height="10">
                   <use id="ghost" href="#nowhere"/>
                   <linearGradient id="g" href="#missing"/>
                 </svg>"##;
    for policy in [UnresolvedPolicy::Silent, UnresolvedPolicy::Warn] {
        let options = ParseOptions {
            unresolved_reference_policy: policy,
            ..ParseOptions::default()
        };
        let scene = parse_svg_str(src, options).unwrap();
        assert!(scene.children.is_empty());
        assert!(!scene.definitions.contains("ghost"));
        assert!(!scene.definitions.contains("g"));
    }
}

#[test]
fn self_reference_does_not_recurse() {
    let scene = parse(
        r##"<svg width="10" height="10">
             <g id="loop"><rect width="1" height="1"/><use href="#loop"/></g>
           </svg>"##,
    );
    let group = &scene.children[0];
    assert_eq!(group.children().len(), 1);
    assert_eq!(group.children()[0].kind_name(), "shape");
}
