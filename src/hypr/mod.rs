pub mod host;
pub mod hypr;
