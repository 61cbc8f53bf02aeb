use crate::error::GameError;
use crate::model::card::Card;

/// Cards held by one player, kept in the order they were drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Removes and returns the card at `index`, the player's selection for a turn.
    pub fn take(&mut self, index: usize) -> Result<Card, GameError> {
        if index >= self.cards.len() {
            return Err(GameError::InvalidHandIndex {
                index,
                hand_size: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::error::GameError;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn hand_of(cards: Vec<Card>) -> Hand {
        let mut hand = Hand::new();
        hand.extend(cards);
        hand
    }

    #[test]
    fn draw_order_is_preserved() {
        let mut hand = Hand::new();
        hand.extend([Card::new(Rank::King, Suit::Swords)]);
        hand.extend([Card::new(Rank::Two, Suit::Coins)]);
        assert_eq!(hand.cards()[0], Card::new(Rank::King, Suit::Swords));
        assert_eq!(hand.cards()[1], Card::new(Rank::Two, Suit::Coins));
    }

    #[test]
    fn take_returns_selected_card() {
        let card = Card::new(Rank::Seven, Suit::Coins);
        let mut hand = hand_of(vec![card]);
        assert_eq!(hand.take(0), Ok(card));
        assert!(hand.is_empty());
    }

    #[test]
    fn take_out_of_range_leaves_hand_untouched() {
        let mut hand = hand_of(vec![Card::new(Rank::Ace, Suit::Clubs)]);
        assert_eq!(
            hand.take(1),
            Err(GameError::InvalidHandIndex {
                index: 1,
                hand_size: 1
            })
        );
        assert_eq!(hand.len(), 1);
    }
}
