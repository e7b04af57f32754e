//! CLI operations.
//!
//! Each operation reads nothing but its arguments (and, for input
//! generation, standard input) and writes one JSON document or name to
//! standard output.

pub mod display_name;
pub mod generate_input;
pub mod print_options;
