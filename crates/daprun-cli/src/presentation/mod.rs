//! Terminal output helpers.

mod tables;

pub use tables::{format_age, format_optional, print_separator, truncate_string};
