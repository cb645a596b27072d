pub mod email;
pub mod organic_result;
pub mod place;
pub mod rank_record;
pub mod search_request;

pub use email::*;
pub use organic_result::*;
pub use place::*;
pub use rank_record::*;
pub use search_request::*;
