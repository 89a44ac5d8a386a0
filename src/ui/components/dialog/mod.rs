//! Dialog components for TUI

mod base;
mod notice_dialog;

pub use notice_dialog::{render_notice_dialog, Notice};
