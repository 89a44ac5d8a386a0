//! Application state module

mod focus;
pub(crate) mod forms;
mod session;
mod submission;
mod ui_area;
mod viewport;

pub use focus::*;
pub use forms::*;
pub use session::*;
pub use submission::*;
pub use ui_area::*;
pub use viewport::*;
