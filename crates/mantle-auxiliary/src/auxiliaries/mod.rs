//! Built-in auxiliaries.

pub mod authenticate;
pub mod burn;
pub mod conform;
pub mod mint;
pub mod scrub;
pub mod verify;

pub use authenticate::Authenticate;
pub use burn::BurnSupply;
pub use conform::Conform;
pub use mint::MintSupply;
pub use scrub::Scrub;
pub use verify::Verify;
