//! Pin composition: fixed layout constants and the seven-step composer.

pub mod composer;
pub mod style;

pub use composer::Composer;
