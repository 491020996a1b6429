#[cfg(feature = "charts")]
pub mod chart;
pub(crate) mod text;
