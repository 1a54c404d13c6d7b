pub mod memory;

pub use memory::SecureString;
