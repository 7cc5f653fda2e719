pub mod surface;
pub mod view;
