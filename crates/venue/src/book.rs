//! Order book implementation using BTreeMap for price-time priority.
//!
//! Price levels are kept in sorted order; within a level orders queue FIFO.
//! Order ids are unique per side only, so each side keeps its own id index.

use hermes_core::{OrderId, Price, Side};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// One resting order as stored in a book side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub id: OrderId,
    pub price: Price,
    pub quantity: u32,
}

/// One side of a book: price levels plus an id lookup.
///
/// Empty levels are removed eagerly, so the extreme key is always a valid
/// best price.
#[derive(Debug, Clone, Default)]
struct BookSide {
    levels: BTreeMap<i64, VecDeque<BookEntry>>,
    index: HashMap<OrderId, i64>,
}

impl BookSide {
    fn insert(&mut self, entry: BookEntry) {
        self.index.insert(entry.id, entry.price.raw());
        self.levels.entry(entry.price.raw()).or_default().push_back(entry);
    }

    fn remove(&mut self, id: OrderId) -> Option<BookEntry> {
        let price = self.index.remove(&id)?;
        let level = self.levels.get_mut(&price)?;
        let pos = level.iter().position(|entry| entry.id == id)?;
        let entry = level.remove(pos)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(entry)
    }

    fn reduce(&mut self, id: OrderId, quantity: u32) -> Option<BookEntry> {
        let price = *self.index.get(&id)?;
        let level = self.levels.get_mut(&price)?;
        let pos = level.iter().position(|entry| entry.id == id)?;
        if level[pos].quantity <= quantity {
            return self.remove(id);
        }
        level[pos].quantity -= quantity;
        Some(level[pos])
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

/// Order book for a single venue.
///
/// Bids iterate highest price first, asks lowest price first; FIFO within a
/// price level. Cloning a book copies every resting order, which is how
/// historic snapshots are taken.
#[derive(Debug, Clone, Default)]
pub struct Book {
    bids: BookSide,
    asks: BookSide,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Admit a resting order at the back of its price level.
    pub fn add(&mut self, side: Side, id: OrderId, price: Price, quantity: u32) {
        self.side_mut(side).insert(BookEntry {
            id,
            price,
            quantity,
        });
    }

    /// Remove an order outright. `None` if the id is not resting on
    /// this side.
    pub fn cancel(&mut self, id: OrderId, side: Side) -> Option<BookEntry> {
        self.side_mut(side).remove(id)
    }

    /// Fill an order by `quantity` units, removing it when nothing remains.
    ///
    /// Returns the entry with its remaining quantity (zero when removed);
    /// `None` if the id is not resting on this side.
    pub fn fill(&mut self, id: OrderId, quantity: u32, side: Side) -> Option<BookEntry> {
        let before = {
            let side_ref = self.side(side);
            let price = *side_ref.index.get(&id)?;
            let level = side_ref.levels.get(&price)?;
            *level.iter().find(|entry| entry.id == id)?
        };
        if before.quantity <= quantity {
            let mut removed = self.side_mut(side).remove(id)?;
            removed.quantity = 0;
            Some(removed)
        } else {
            self.side_mut(side).reduce(id, quantity)
        }
    }

    /// Best price on a side; `None` when the side is empty. Not an error:
    /// an empty side is a normal market state.
    pub fn best(&self, side: Side) -> Option<Price> {
        let side_ref = self.side(side);
        let (price, _) = match side {
            Side::Buy => side_ref.levels.iter().next_back()?,
            Side::Sell => side_ref.levels.iter().next()?,
        };
        Some(Price::from_int(*price))
    }

    /// All resting orders on a side, best price first, FIFO within a level.
    pub fn iter(&self, side: Side) -> Box<dyn Iterator<Item = &BookEntry> + '_> {
        let side_ref = self.side(side);
        match side {
            Side::Buy => Box::new(side_ref.levels.values().rev().flatten()),
            Side::Sell => Box::new(side_ref.levels.values().flatten()),
        }
    }

    pub fn len(&self, side: Side) -> usize {
        self.side(side).len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.len() == 0 && self.asks.len() == 0
    }

    /// True when the book's own best bid meets or exceeds its best ask.
    ///
    /// After any completed processing cycle this must be false; between a
    /// batch admission and its clearing it is the normal transient state.
    pub fn is_crossed(&self) -> bool {
        match (self.best(Side::Buy), self.best(Side::Sell)) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }
}
