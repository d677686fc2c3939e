pub mod shaper;
pub mod wrap;
