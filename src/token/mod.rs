mod header;
mod id_token;

pub use id_token::IdToken;

pub(crate) use header::TokenHeader;
