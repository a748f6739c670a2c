pub mod signature;
pub mod signed_data;
pub mod webhook;
