//! Authentication

mod client_credentials;
mod session;
mod token;

pub use client_credentials::ClientCredentialsFlow;
pub use session::AuthSession;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
