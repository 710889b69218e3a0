pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::HasherSettings;
pub use hasher::PasswordDigest;
pub use hasher::PasswordHasher;
