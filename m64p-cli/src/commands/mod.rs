pub(crate) mod config;
pub(crate) mod dat;
pub(crate) mod header;
pub(crate) mod ini;
