mod meta;
pub use self::meta::{Meta, QuoteResponse};

mod quote;
pub use self::quote::QuoteRecord;
