//! `linearGradient` / `radialGradient` handling, including stop inheritance through `href`.
//!
//! A gradient without stops of its own that references another gradient inherits that
//! gradient's stops. When the base is not registered yet the request is parked under the
//! base's identifier and resolved the moment the base is registered.

use crate::foundation::core::Rect;
use crate::foundation::error::SceneResult;
use crate::markup::attributes::Attributes;
use crate::markup::event::{MarkupEvent, OpenElement};
use crate::markup::walker::SubtreeWalker;
use crate::parse::context::ParserContext;
use crate::scene::gradient::{
    Gradient, GradientAttributes, GradientStops, GradientUnitResolver, GradientUnits,
    SpreadMethod,
};
use crate::scene::registry::Definition;
use crate::style::resolve::reference_key;
use crate::transform::affine::transform_attribute;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GradientKind {
    Linear,
    Radial,
}

/// A gradient waiting for its base to be registered.
#[derive(Clone, Debug)]
pub(crate) struct PendingGradient {
    kind: GradientKind,
    attrs: Attributes,
}

impl PendingGradient {
    pub(crate) fn id(&self) -> &str {
        self.attrs.get("id").unwrap_or("")
    }
}

/// The registered gradient a reference inherits from, with its raw attributes.
struct Base<'a> {
    attrs: Option<&'a Attributes>,
    gradient: &'a Gradient,
}

pub(crate) fn handle_gradient<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    let kind = match el.name.as_str() {
        "radialGradient" => GradientKind::Radial,
        _ => GradientKind::Linear,
    };
    let stops = if el.self_closing {
        GradientStops::default()
    } else {
        read_stops(walker)
    };

    let id = reference_key(el.id()).to_owned();
    if !id.is_empty() {
        ctx.gradient_sources.insert(id.clone(), el.attributes.clone());
    }

    let base = el
        .attributes
        .href()
        .map(reference_key)
        .filter(|b| !b.is_empty() && stops.is_empty());
    let gradient = match base {
        Some(base) => {
            if ctx.registry.gradient(base).is_none() {
                tracing::debug!(id = %id, base, "gradient waits for its base");
                ctx.gradient_chains
                    .entry(base.to_owned())
                    .or_default()
                    .push(PendingGradient {
                        kind,
                        attrs: el.attributes.clone(),
                    });
                return Ok(());
            }
            inherit(ctx, kind, &el.attributes, base)
        }
        None => {
            let bounds = ctx.view_box();
            build(kind, &el.attributes, None, stops, bounds)
        }
    };
    register_gradient(ctx, gradient);
    Ok(())
}

fn read_stops<I>(walker: &mut SubtreeWalker<I>) -> GradientStops
where
    I: Iterator<Item = MarkupEvent>,
{
    let mut stops = GradientStops::default();
    let mut cursor = walker.cursor();
    while let Some(event) = walker.next_in(&mut cursor) {
        let MarkupEvent::Open(child) = event else {
            continue;
        };
        if child.name == "stop" {
            stops.push_stop(&child.attributes);
        }
        if !child.self_closing {
            walker.skip_element();
        }
    }
    stops
}

/// Build a gradient that takes its stops from the registered gradient `base`.
fn inherit(
    ctx: &ParserContext<'_>,
    kind: GradientKind,
    own: &Attributes,
    base: &str,
) -> Gradient {
    let bounds = ctx.view_box();
    match ctx.registry.gradient(base) {
        Some(gradient) => {
            let base = Base {
                attrs: ctx.gradient_sources.get(base),
                gradient,
            };
            build(kind, own, Some(&base), gradient.stops.clone(), bounds)
        }
        None => build(kind, own, None, GradientStops::default(), bounds),
    }
}

fn build(
    kind: GradientKind,
    own: &Attributes,
    base: Option<&Base<'_>>,
    stops: GradientStops,
    bounds: Rect,
) -> Gradient {
    let units = own
        .get("gradientUnits")
        .and_then(GradientUnits::parse)
        .or(base.map(|b| b.gradient.units))
        .unwrap_or_default();
    let spread = own
        .get("spreadMethod")
        .and_then(SpreadMethod::parse)
        .or(base.map(|b| b.gradient.spread))
        .unwrap_or_default();
    let transform = transform_attribute(own, "gradientTransform")
        .or_else(|| base.and_then(|b| b.gradient.transform));

    let attrs = GradientAttributes {
        own,
        base: base.and_then(|b| b.attrs),
    };
    let resolver = GradientUnitResolver { units, bounds };
    let geometry = match kind {
        GradientKind::Linear => resolver.linear(attrs),
        GradientKind::Radial => resolver.radial(attrs),
    };

    Gradient {
        id: reference_key(own.get("id").unwrap_or("")).to_owned(),
        geometry,
        stops,
        units,
        spread,
        transform,
    }
}

/// Register `gradient` and resolve every gradient that was waiting for it.
fn register_gradient(ctx: &mut ParserContext<'_>, gradient: Gradient) {
    let id = gradient.id.clone();
    ctx.registry.register(&id, Definition::Gradient(gradient));
    let Some(waiting) = ctx.gradient_chains.remove(&id) else {
        return;
    };
    for pending in waiting {
        let resolved = inherit(ctx, pending.kind, &pending.attrs, &id);
        register_gradient(ctx, resolved);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/gradients.rs"]
mod tests;
