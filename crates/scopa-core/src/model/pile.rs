use crate::model::card::Card;
use crate::model::suit::Suit;

/// Cards a player has captured this round. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|c| c.suit == suit).count()
    }

    pub fn rank_sum(&self) -> u32 {
        self.cards.iter().map(|c| c.value() as u32).sum()
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

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::DiscardPile;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn tallies_suit_and_rank_sum() {
        let mut pile = DiscardPile::new();
        pile.extend([
            Card::new(Rank::Seven, Suit::Coins),
            Card::new(Rank::Jack, Suit::Swords),
            Card::new(Rank::Knight, Suit::Cups),
        ]);
        assert_eq!(pile.len(), 3);
        assert_eq!(pile.count_suit(Suit::Coins), 1);
        assert_eq!(pile.rank_sum(), 24);
        assert!(pile.contains(Card::SEVEN_OF_COINS));
    }

    #[test]
    fn clear_empties_pile() {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Rank::Ace, Suit::Clubs));
        pile.clear();
        assert!(pile.is_empty());
        assert_eq!(pile.rank_sum(), 0);
    }
}
