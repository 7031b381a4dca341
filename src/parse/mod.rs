//! Event-driven parse from markup events to a [`SceneRoot`].

pub(crate) mod clip;
pub(crate) mod context;
pub(crate) mod deferred;
pub(crate) mod dispatch;
pub(crate) mod gradients;
pub(crate) mod materialize;
pub(crate) mod text;

use std::collections::HashMap;

use crate::assets::decode::PreparedImage;
use crate::assets::resolve::{DataUrlResolver, ImageResolver};
use crate::foundation::error::SceneResult;
use crate::markup::event::MarkupEvent;
use crate::markup::walker::SubtreeWalker;
use crate::markup::xml::events_from_str;
use crate::parse::context::ParserContext;
use crate::scene::model::SceneRoot;
use crate::style::resolve::{PresentationStyleResolver, StyleResolver};
use crate::text::shaper::{MonospaceShaper, ParagraphShaper};

/// What to do with a deferred reference whose target never appears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Drop it without a diagnostic.
    #[default]
    Silent,
    /// Drop it and emit a warning.
    Warn,
}

/// Parser configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Treat recoverable conditions (nested root, unknown element, unsupported clip-path
    /// child, `style` element) as errors.
    pub strict: bool,
    /// Handling of `use` references and gradient chains that never resolve.
    pub unresolved_reference_policy: UnresolvedPolicy,
}

impl ParseOptions {
    /// Strict options with the default reference policy.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

/// Parses markup into a scene graph using pluggable style, text and image collaborators.
pub struct SceneParser {
    options: ParseOptions,
    styles: Box<dyn StyleResolver>,
    shaper: Box<dyn ParagraphShaper>,
    images: Box<dyn ImageResolver>,
}

impl SceneParser {
    /// Parser with presentation-attribute styles, monospace text metrics and `data:` images.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            styles: Box::new(PresentationStyleResolver),
            shaper: Box::new(MonospaceShaper),
            images: Box::new(DataUrlResolver),
        }
    }

    /// Replace the style resolver.
    pub fn with_style_resolver(mut self, styles: impl StyleResolver + 'static) -> Self {
        self.styles = Box::new(styles);
        self
    }

    /// Replace the paragraph shaper.
    pub fn with_shaper(mut self, shaper: impl ParagraphShaper + 'static) -> Self {
        self.shaper = Box::new(shaper);
        self
    }

    /// Replace the image resolver.
    pub fn with_image_resolver(mut self, images: impl ImageResolver + 'static) -> Self {
        self.images = Box::new(images);
        self
    }

    /// Active options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Tokenize `source` and parse it.
    #[tracing::instrument(skip(self, source), fields(bytes = source.len()))]
    pub fn parse_str(&mut self, source: &str) -> SceneResult<SceneRoot> {
        let events = events_from_str(source)?;
        self.parse_events(events)
    }

    /// Parse an event stream.
    ///
    /// Image references are resolved up front; the walk itself is synchronous. Deferred
    /// `use` references are resolved after the walk, before the result is returned.
    #[tracing::instrument(skip(self, events), fields(strict = self.options.strict))]
    pub fn parse_events(
        &mut self,
        events: impl IntoIterator<Item = MarkupEvent>,
    ) -> SceneResult<SceneRoot> {
        let events: Vec<MarkupEvent> = events.into_iter().collect();
        let images = prepare_images(&events, self.images.as_ref());

        let mut ctx = ParserContext::new(
            &self.options,
            self.styles.as_ref(),
            self.shaper.as_mut(),
            &images,
        );
        let mut walker = SubtreeWalker::new(events);
        let mut cursor = walker.cursor();
        while let Some(event) = walker.next_in(&mut cursor) {
            match event {
                MarkupEvent::Open(el) => dispatch::dispatch(&mut ctx, &mut walker, &el)?,
                MarkupEvent::Close { name } => ctx.close(&name),
                MarkupEvent::Text(_) | MarkupEvent::CData(_) => {}
            }
        }
        ctx.finish()
    }
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// Parse `source` with the default collaborators.
pub fn parse_svg_str(source: &str, options: ParseOptions) -> SceneResult<SceneRoot> {
    SceneParser::new(options).parse_str(source)
}

/// Resolve every distinct image reference. Failures are logged and left out of the map,
/// which drops the corresponding elements.
fn prepare_images(
    events: &[MarkupEvent],
    resolver: &dyn ImageResolver,
) -> HashMap<String, PreparedImage> {
    let mut prepared = HashMap::new();
    for event in events {
        let MarkupEvent::Open(el) = event else {
            continue;
        };
        if el.name != "image" {
            continue;
        }
        let Some(href) = el.attributes.href() else {
            continue;
        };
        if prepared.contains_key(href) {
            continue;
        }
        match resolver.resolve(href) {
            Ok(image) => {
                prepared.insert(href.to_owned(), image);
            }
            Err(err) => {
                let shown: String = href.chars().take(64).collect();
                tracing::warn!(href = %shown, %err, "dropping image");
            }
        }
    }
    prepared
}

#[cfg(test)]
#[path = "../../tests/unit/parse/mod.rs"]
mod tests;
