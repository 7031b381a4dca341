pub(crate) mod attributes;
pub(crate) mod event;
pub(crate) mod walker;
pub(crate) mod xml;
