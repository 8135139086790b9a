//! A trading venue: a named order book.

use crate::Book;

/// One venue in the fragmented market.
///
/// Venues are addressed by their index in the market's venue list; the name
/// only appears in logs and reports.
#[derive(Debug, Clone)]
pub struct Venue {
    name: String,
    book: Book,
}

impl Venue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            book: Book::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut Book {
        &mut self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{OrderId, Price, Side};

    #[test]
    fn test_venue_owns_its_book() {
        let mut venue = Venue::new("New York");
        venue
            .book_mut()
            .add(Side::Buy, OrderId(1), Price::from_int(500), 1);

        assert_eq!(venue.name(), "New York");
        assert_eq!(venue.book().best(Side::Buy), Some(Price::from_int(500)));
    }
}
