pub(crate) mod aggregate;
pub(crate) mod clean;
pub mod error;
pub(crate) mod fetch;
pub(crate) mod processor;
