use super::*;
use crate::text::shaper::MonospaceShaper;

fn lengths() -> LengthContext {
    LengthContext {
        width: 100.0,
        height: 100.0,
        font_size: 10.0,
    }
}

fn style() -> Style {
    Style {
        font_size: Some(10.0),
        ..Style::default()
    }
}

#[test]
fn chained_spans_continue_after_previous_chunk() {
    let mut b = TextRunBuilder::new();
    let mut shaper = MonospaceShaper;
    b.push_frame(&Attributes::default(), style(), &lengths());

    b.push_frame(&Attributes::from([("x", "0"), ("y", "0"), ("dx", "99")]), style(), &lengths());
    let (first, _) = b.emit("AB", &mut shaper).unwrap().unwrap();
    assert_eq!(first.offset, Point::new(0.0, 0.0));
    b.pop_frame();

    b.push_frame(&Attributes::default(), style(), &lengths());
    let (second, _) = b.emit("CD", &mut shaper).unwrap().unwrap();
    assert_eq!(second.offset, Point::new(first.offset.x + first.width(), 0.0));
    assert_eq!(second.offset.x, 12.0);
}

#[test]
fn deltas_apply_without_explicit_position() {
    let mut b = TextRunBuilder::new();
    b.push_frame(&Attributes::from([("x", "10"), ("y", "20")]), style(), &lengths());
    b.push_frame(&Attributes::from([("dx", "5"), ("dy", "-2")]), style(), &lengths());
    assert_eq!(b.top().unwrap().offset, Point::new(15.0, 18.0));
}

#[test]
fn outermost_frame_defaults_to_origin_and_uses_first_list_value() {
    let mut b = TextRunBuilder::new();
    b.push_frame(&Attributes::default(), style(), &lengths());
    assert_eq!(b.top().unwrap().offset, Point::ZERO);
    b.pop_frame();
    b.push_frame(&Attributes::from([("x", "3 4 5"), ("y", "50%")]), style(), &lengths());
    assert_eq!(b.top().unwrap().offset, Point::new(3.0, 50.0));
}

#[test]
fn transforms_compose_with_enclosing_frame() {
    let mut b = TextRunBuilder::new();
    b.push_frame(&Attributes::from([("transform", "translate(10 0)")]), style(), &lengths());
    b.push_frame(&Attributes::from([("transform", "scale(2)")]), style(), &lengths());
    let t = b.top().unwrap().transform;
    assert_eq!(t * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
}

#[test]
fn blank_chunks_emit_nothing() {
    let mut b = TextRunBuilder::new();
    let mut shaper = MonospaceShaper;
    assert!(b.emit("orphan", &mut shaper).unwrap().is_none());
    b.push_frame(&Attributes::default(), style(), &lengths());
    assert!(b.emit(" \n\t ", &mut shaper).unwrap().is_none());
    let (run, _) = b.emit("  a \n  b  ", &mut shaper).unwrap().unwrap();
    assert_eq!(run.text, "a b");
    assert_eq!(run.anchor, TextAnchor::Start);
    assert_eq!(run.stroke.ink, Ink::Stroke);
}

#[test]
fn preserved_space_only_strips_control_whitespace() {
    let mut b = TextRunBuilder::new();
    let mut shaper = MonospaceShaper;
    b.push_frame(&Attributes::from([("space", "preserve")]), style(), &lengths());
    b.push_frame(&Attributes::default(), style(), &lengths());
    let (run, _) = b.emit(" a\n  b ", &mut shaper).unwrap().unwrap();
    assert_eq!(run.text, " a  b ");
}

#[test]
fn push_then_pop_restores_depth() {
    let mut b = TextRunBuilder::new();
    b.push_frame(&Attributes::default(), style(), &lengths());
    let depth = b.depth();
    b.push_frame(&Attributes::default(), style(), &lengths());
    b.pop_frame();
    assert_eq!(b.depth(), depth);
    b.pop_frame();
    assert_eq!(b.depth(), 0);
    assert!(b.pop_frame().is_none());
}
