pub mod explain;
pub mod quiz;
