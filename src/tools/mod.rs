pub mod keywords;
pub mod rule;
pub mod search;

pub use keywords::*;
pub use rule::*;
pub use search::*;
