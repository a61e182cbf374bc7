pub(crate) mod chart;
pub(crate) mod cluster;
pub(crate) mod screensaver;
