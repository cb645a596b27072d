pub mod email_extractor;
pub mod email_finder;
pub mod formatter;
pub mod places;
pub mod rank_checker;
pub mod rank_locator;
pub mod response_cache;
pub mod serper_client;

pub use email_extractor::*;
pub use email_finder::*;
pub use formatter::*;
pub use places::*;
pub use rank_checker::*;
pub use response_cache::*;
pub use serper_client::*;
