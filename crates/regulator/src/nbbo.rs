//! Consolidated quote computation.
//!
//! Reduces the per-venue best prices into a national best bid and offer,
//! optionally skipping a participant's own resting orders so a quoter does
//! not trade against the market it is itself showing.

use hermes_core::{ConsolidatedQuote, Price, QuoteSide, RestingOrder, Side, VenueId};
use hermes_venue::Book;

/// Reduce the given books, in venue-index order, into a consolidated quote.
///
/// Each side is the extremum over the venues' best visible prices and keeps
/// its source venue. Ties go to the lowest venue index. Empty sides stay
/// `None`.
pub(crate) fn consolidate<'a, I>(books: I, exclude: &[RestingOrder]) -> ConsolidatedQuote
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut quote = ConsolidatedQuote::default();
    for (index, book) in books.into_iter().enumerate() {
        let venue = VenueId(index);
        if let Some(price) = best_visible(book, Side::Buy, venue, exclude) {
            if quote.bid.is_none_or(|bid| price > bid.price) {
                quote.bid = Some(QuoteSide { price, venue });
            }
        }
        if let Some(price) = best_visible(book, Side::Sell, venue, exclude) {
            if quote.ask.is_none_or(|ask| price < ask.price) {
                quote.ask = Some(QuoteSide { price, venue });
            }
        }
    }
    quote
}

/// Best price on one book side, skipping excluded orders.
fn best_visible(book: &Book, side: Side, venue: VenueId, exclude: &[RestingOrder]) -> Option<Price> {
    book.iter(side)
        .find(|entry| !exclude.contains(&RestingOrder::new(entry.id, side, venue)))
        .map(|entry| entry.price)
}
