//! Batch-auction building blocks: intake sequencing and the rank-by-rank
//! crossing scan.

use hermes_core::{Order, ParticipantId, Price, Side, SimTime};
use hermes_venue::{Book, BookEntry};
use rand::prelude::*;
use std::collections::HashMap;

/// One order waiting in the intake queue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingSubmission {
    pub owner: ParticipantId,
    pub order: Order,
    pub submitted_at: SimTime,
}

/// Deduplicate and order the drained intake for admission.
///
/// Per participant only the latest turn survives: resubmitting is an implicit
/// cancel-replace, and one turn may stage several orders at once (a quoting
/// ladder), all sharing the turn's timestamp. Survivors sort by (side, limit
/// price, random draw); the draw deliberately replaces sub-interval time
/// priority within a price level and must come from the seeded generator.
pub(crate) fn sequence_intake(
    mut staged: Vec<PendingSubmission>,
    rng: &mut StdRng,
) -> Vec<PendingSubmission> {
    let mut latest: HashMap<ParticipantId, SimTime> = HashMap::new();
    for submission in &staged {
        latest
            .entry(submission.owner)
            .and_modify(|turn| *turn = turn.max(submission.submitted_at))
            .or_insert(submission.submitted_at);
    }
    staged.retain(|s| latest.get(&s.owner) == Some(&s.submitted_at));

    let mut draws: Vec<usize> = (0..staged.len()).collect();
    draws.shuffle(rng);
    let mut keyed: Vec<(usize, PendingSubmission)> = draws.into_iter().zip(staged).collect();
    keyed.sort_by_key(|(draw, s)| (s.order.side, s.order.price, *draw));
    keyed.into_iter().map(|(_, s)| s).collect()
}

/// The crossing prefix of one venue's book and its uniform price.
#[derive(Debug)]
pub(crate) struct ClearingSet {
    pub price: Price,
    pub bids: Vec<BookEntry>,
    pub asks: Vec<BookEntry>,
}

/// Compare the bid and ask queues rank by rank, best-first, and collect every
/// crossing pair.
///
/// The scan stops at the first rank where the bid no longer meets the ask, or
/// when either side runs out. The uniform price is the floor midpoint of the
/// last crossing pair. `None` when not even the top of book crosses.
pub(crate) fn crossing_prefix(book: &Book) -> Option<ClearingSet> {
    let bids: Vec<BookEntry> = book.iter(Side::Buy).copied().collect();
    let asks: Vec<BookEntry> = book.iter(Side::Sell).copied().collect();

    let mut marked = 0;
    for rank in 0..bids.len().min(asks.len()) {
        if bids[rank].price < asks[rank].price {
            break;
        }
        marked = rank + 1;
    }
    if marked == 0 {
        return None;
    }

    let price = Price::midpoint(bids[marked - 1].price, asks[marked - 1].price);
    Some(ClearingSet {
        price,
        bids: bids[..marked].to_vec(),
        asks: asks[..marked].to_vec(),
    })
}
