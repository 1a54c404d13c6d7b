pub mod sealed_box;

pub use sealed_box::{decode_public_key, seal};
