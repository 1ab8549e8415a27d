//! Filters for [`postino::Document`].

mod join_adjacent;
mod token_length;

pub use join_adjacent::JoinAdjacentFilter;
pub use token_length::TokenLengthFilter;
