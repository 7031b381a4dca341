//! `quick-xml` tokenizer adapter producing [`MarkupEvent`]s.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{
    foundation::error::{SceneError, SceneResult},
    markup::attributes::{Attribute, Attributes},
    markup::event::{MarkupEvent, OpenElement},
};

/// Tokenize an XML document into markup events.
///
/// Comments, declarations, processing instructions and doctypes are dropped. Element and
/// attribute names lose their namespace prefix; attribute prefixes are kept in
/// [`Attribute::namespace`].
pub fn events_from_str(source: &str) -> SceneResult<Vec<MarkupEvent>> {
    let mut reader = Reader::from_str(source);
    let mut out = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SceneError::xml(format!("at byte {}: {e}", reader.buffer_position())))?;
        match event {
            Event::Start(start) => out.push(MarkupEvent::Open(open_element(&start, false)?)),
            Event::Empty(start) => out.push(MarkupEvent::Open(open_element(&start, true)?)),
            Event::End(end) => out.push(MarkupEvent::Close {
                name: utf8(end.local_name().as_ref())?,
            }),
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| SceneError::xml(format!("text: {e}")))?;
                out.push(MarkupEvent::Text(text.into_owned()));
            }
            Event::CData(cdata) => {
                out.push(MarkupEvent::CData(
                    String::from_utf8_lossy(&cdata).into_owned(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn open_element(start: &BytesStart<'_>, self_closing: bool) -> SceneResult<OpenElement> {
    let name = utf8(start.local_name().as_ref())?;
    let mut entries = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SceneError::xml(format!("attribute on <{name}>: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| SceneError::xml(format!("attribute on <{name}>: {e}")))?;
        entries.push(Attribute {
            name: utf8(attr.key.local_name().as_ref())?,
            value: value.into_owned(),
            namespace: attr.key.prefix().map(|p| utf8(p.as_ref())).transpose()?,
        });
    }
    Ok(OpenElement {
        name,
        attributes: Attributes::new(entries),
        self_closing,
    })
}

fn utf8(bytes: &[u8]) -> SceneResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| SceneError::xml(format!("invalid utf-8 name: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/markup/xml.rs"]
mod tests;
