pub(crate) mod builder;
pub(crate) mod recorder;
pub(crate) mod shapes;
