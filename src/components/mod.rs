//! Components - Reusable Table Components
//!
//! Generic over record shape; they never know which page they are used on.

pub mod data_table;
