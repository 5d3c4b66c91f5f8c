pub mod inspector;

pub use inspector::{show, show_window};
