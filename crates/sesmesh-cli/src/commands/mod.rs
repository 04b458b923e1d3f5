pub mod chains;
pub mod surface;
