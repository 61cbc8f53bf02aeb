use crate::model::card::Card;

/// Face-up cards shared by every player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCards {
    cards: Vec<Card>,
}

impl TableCards {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Removes each of `captured` from the table; returns how many were found.
    pub fn remove_all(&mut self, captured: &[Card]) -> usize {
        let before = self.cards.len();
        self.cards.retain(|card| !captured.contains(card));
        before - self.cards.len()
    }

    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
