/// User agent sent with every request. Also names the per-user cache directory.
pub const USER_AGENT: &str = "illallangi-telegraf-stockdata";
