pub(crate) mod gradient;
pub(crate) mod model;
pub(crate) mod registry;
