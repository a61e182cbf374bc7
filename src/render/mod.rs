pub(crate) mod frame;
pub(crate) mod surface;
pub(crate) mod viewport;
