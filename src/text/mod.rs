pub(crate) mod runs;
pub(crate) mod shaper;
