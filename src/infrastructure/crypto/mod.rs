pub mod key_handler;
pub mod signing;
