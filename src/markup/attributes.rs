/// A single `name="value"` pair with its optional namespace prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Local name (`href` for `xlink:href`).
    pub name: String,
    /// Unescaped value.
    pub value: String,
    /// Namespace prefix, if any (`xlink`, `xml`, ...).
    pub namespace: Option<String>,
}

impl Attribute {
    /// Attribute without a namespace prefix.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
        }
    }
}

/// Ordered attribute list of one element.
///
/// Lookups consult the element's own attributes first (first occurrence wins), then the
/// declarations of its inline `style` attribute. Empty values count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    /// Wrap an attribute list.
    pub fn new(entries: Vec<Attribute>) -> Self {
        Self { entries }
    }

    /// Resolve `name` on this element.
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(v) = self.own(name) {
            return Some(v);
        }
        let style = self.own("style")?;
        inline_declaration(style, name)
    }

    /// Resolve `name`, falling back to `backup` when this element does not supply it.
    pub fn get_or_backup<'a>(
        &'a self,
        name: &str,
        backup: Option<&'a Attributes>,
    ) -> Option<&'a str> {
        self.get(name).or_else(|| backup.and_then(|b| b.get(name)))
    }

    /// The reference target of `href` / `xlink:href`.
    pub fn href(&self) -> Option<&str> {
        self.get("href")
    }

    /// Iterate the raw attributes in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter()
    }

    /// Number of raw attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the element has no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn own(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.trim())
            .filter(|v| !v.is_empty())
    }
}

fn inline_declaration<'a>(style: &'a str, name: &str) -> Option<&'a str> {
    style.split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        if key.trim() != name {
            return None;
        }
        let value = value.trim();
        (!value.is_empty()).then_some(value)
    })
}

impl From<Vec<Attribute>> for Attributes {
    fn from(entries: Vec<Attribute>) -> Self {
        Self::new(entries)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attributes {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::new(pairs.iter().map(|(k, v)| Attribute::new(*k, *v)).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/attributes.rs"]
mod tests;
