pub mod errors;
pub mod format;
pub mod hybrid;

pub use errors::PasswordError;
pub use format::HashFormat;
pub use hybrid::HybridPasswordHasher;
