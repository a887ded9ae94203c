pub mod filter;
pub mod handler;

pub use filter::{Dispatch, InputFilter};
pub use handler::{DIRECTION_KEYS, InputHandler, KeyAction};
