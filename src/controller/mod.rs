mod indicator;
mod list_controller;
mod view;

pub use indicator::*;
pub use list_controller::*;
pub use view::*;
