//! Translation backends

pub mod google;

pub use google::GoogleTranslator;
