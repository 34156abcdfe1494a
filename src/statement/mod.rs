pub mod document;
pub mod summary;


pub use document::Statement;
pub use summary::{sort_newest_first, Summary, Totals};
