pub(crate) mod entries;
pub(crate) mod model;
pub(crate) mod store;
