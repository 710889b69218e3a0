pub mod issuer;

pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use issuer::TokenSettings;
