//! Decides what a played card takes from the table.
//!
//! A card of equal rank on the table always wins over a sum of several
//! cards. Among summing subsets the largest is taken, and equal-sized
//! candidates are ordered by their cards sorted by (suit, rank).

use crate::model::card::Card;
use core::cmp::Ordering;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureKind {
    Direct,
    Combination,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub kind: CaptureKind,
    /// Table cards taken, in table order. Empty for `NoMatch`.
    pub cards: Vec<Card>,
}

impl Capture {
    pub fn is_capture(&self) -> bool {
        !matches!(self.kind, CaptureKind::NoMatch)
    }

    fn no_match() -> Self {
        Self {
            kind: CaptureKind::NoMatch,
            cards: Vec::new(),
        }
    }
}

pub fn resolve(played: Card, table: &[Card]) -> Capture {
    let direct: Vec<Card> = table
        .iter()
        .copied()
        .filter(|card| card.rank == played.rank)
        .collect();
    if !direct.is_empty() {
        return Capture {
            kind: CaptureKind::Direct,
            cards: direct,
        };
    }

    match best_combination(played.value(), table) {
        Some(cards) => Capture {
            kind: CaptureKind::Combination,
            cards,
        },
        None => Capture::no_match(),
    }
}

/// Best subset of two or more table cards whose values add up to `target`.
pub fn best_combination(target: u8, table: &[Card]) -> Option<Vec<Card>> {
    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by_key(|&i| table[i].value());

    let mut search = SubsetSearch {
        table,
        order: &order,
        chosen: Vec::with_capacity(table.len()),
        best: None,
    };
    search.descend(0, target);

    search.best.map(|mut indices| {
        indices.sort_unstable();
        indices.into_iter().map(|i| table[i]).collect()
    })
}

struct SubsetSearch<'a> {
    table: &'a [Card],
    order: &'a [usize],
    chosen: Vec<usize>,
    best: Option<Vec<usize>>,
}

impl SubsetSearch<'_> {
    fn descend(&mut self, start: usize, remaining: u8) {
        if remaining == 0 {
            if self.chosen.len() >= 2 && self.beats_best() {
                self.best = Some(self.chosen.clone());
            }
            return;
        }

        for pos in start..self.order.len() {
            let index = self.order[pos];
            let value = self.table[index].value();
            // `order` is ascending, so nothing further along can fit either.
            if value > remaining {
                break;
            }
            self.chosen.push(index);
            self.descend(pos + 1, remaining - value);
            self.chosen.pop();
        }
    }

    fn beats_best(&self) -> bool {
        let Some(best) = self.best.as_ref() else {
            return true;
        };
        match self.chosen.len().cmp(&best.len()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                compare_suit_first(self.table, &self.chosen, best) == Ordering::Less
            }
        }
    }
}

fn compare_suit_first(table: &[Card], a: &[usize], b: &[usize]) -> Ordering {
    let sorted = |indices: &[usize]| {
        let mut cards: Vec<Card> = indices.iter().map(|&i| table[i]).collect();
        cards.sort_by(Card::cmp_suit_first);
        cards
    };
    let (a, b) = (sorted(a), sorted(b));
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.cmp_suit_first(y))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
