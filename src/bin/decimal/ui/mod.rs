//! TUI widgets for the decimal keyboard

mod keys;
mod status;

pub use keys::render_keys;
pub use status::render_status;
