mod client;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::{redact_token, Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::QuoteQuery;
pub use self::user_agent::USER_AGENT;
