//! Price-time priority order book, one per trading venue
//!
//! A venue is one independent book. The regulator is the only caller of the
//! mutating operations; participants never touch a venue directly.

mod book;
mod venue;

pub use book::{Book, BookEntry};
pub use venue::Venue;
