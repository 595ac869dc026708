//! Redirect link to playable stream URL resolution

pub mod patterns;
pub mod stream_resolver;

pub use patterns::{
    M3u8UrlPattern, PatternChain, PlayerFunctionPattern, StreamPattern, normalize_embed_text,
};
pub use stream_resolver::StreamResolver;
