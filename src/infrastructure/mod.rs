pub mod crypto;
pub mod hashing;
