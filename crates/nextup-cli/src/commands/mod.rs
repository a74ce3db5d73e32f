pub mod calibrate;
pub mod common;
pub mod focus;
pub mod rank;
pub mod tied;
