//! PokéAPI クライアント
//!
//! wire（生レスポンス）→ normalize（EntityRecord）→ evolution（進化の平坦化）を Fetcher が束ねる。

pub mod evolution;
pub mod fetcher;
pub mod normalize;
pub mod wire;

pub use evolution::flatten;
pub use fetcher::{FetchError, FetchOptions, Fetcher};
pub use normalize::normalize;
