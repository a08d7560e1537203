pub mod substring;

pub use substring::{CaseMatching, filter_items, matches};
