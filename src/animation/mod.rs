pub(crate) mod ease;
pub(crate) mod placement;
pub(crate) mod scheduler;
pub(crate) mod sway;
