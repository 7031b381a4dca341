use crate::markup::attributes::Attributes;

/// One event of a forward-only markup stream.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkupEvent {
    /// An element start tag. Self-closing elements produce no matching [`MarkupEvent::Close`].
    Open(OpenElement),
    /// An element end tag.
    Close {
        /// Local element name.
        name: String,
    },
    /// Character content (already unescaped).
    Text(String),
    /// A `<![CDATA[...]]>` section.
    CData(String),
}

impl MarkupEvent {
    /// Shorthand for a non-self-closing start tag.
    pub fn open(name: impl Into<String>, attributes: impl Into<Attributes>) -> Self {
        Self::Open(OpenElement {
            name: name.into(),
            attributes: attributes.into(),
            self_closing: false,
        })
    }

    /// Shorthand for a self-closing start tag.
    pub fn empty(name: impl Into<String>, attributes: impl Into<Attributes>) -> Self {
        Self::Open(OpenElement {
            name: name.into(),
            attributes: attributes.into(),
            self_closing: true,
        })
    }

    /// Shorthand for an end tag.
    pub fn close(name: impl Into<String>) -> Self {
        Self::Close { name: name.into() }
    }

    /// Shorthand for character content.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

/// Payload of [`MarkupEvent::Open`].
#[derive(Clone, Debug, PartialEq)]
pub struct OpenElement {
    /// Local element name (namespace prefix stripped).
    pub name: String,
    /// Attributes in document order.
    pub attributes: Attributes,
    /// `<name/>` form.
    pub self_closing: bool,
}

impl OpenElement {
    /// Element is elided along with its subtree (`display="none"` or `visibility="hidden"`).
    pub fn is_hidden(&self) -> bool {
        self.attributes.get("display") == Some("none")
            || self.attributes.get("visibility") == Some("hidden")
    }

    /// The `id` attribute, or `""`.
    pub fn id(&self) -> &str {
        self.attributes.get("id").unwrap_or("")
    }
}
