use crate::error::{GameError, NameError};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::pile::DiscardPile;

/// Name held back for the house seat; humans may not take it.
pub const RESERVED_NAME: &str = "Computer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    pub hand: Hand,
    pub discard_pile: DiscardPile,
    pub score: u32,
    pub special_points: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            discard_pile: DiscardPile::new(),
            score: 0,
            special_points: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Removes the card at `index` from the hand.
    pub fn play_card(&mut self, index: usize) -> Result<Card, GameError> {
        self.hand.take(index)
    }
}

/// Trims `raw` and checks it against the seating rules.
pub fn validate_name(raw: &str, taken: &[String]) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Blank);
    }
    if name == RESERVED_NAME {
        return Err(NameError::Reserved(name.to_string()));
    }
    if taken.iter().any(|t| t == name) {
        return Err(NameError::Duplicate(name.to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Player, RESERVED_NAME, validate_name};
    use crate::error::NameError;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn new_player_starts_empty() {
        let player = Player::new("Alice");
        assert_eq!(player.name(), "Alice");
        assert!(player.hand.is_empty());
        assert!(player.discard_pile.is_empty());
        assert_eq!(player.score, 0);
        assert_eq!(player.special_points, 0);
    }

    #[test]
    fn play_card_takes_from_hand() {
        let mut player = Player::new("Bob");
        let card = Card::new(Rank::Seven, Suit::Coins);
        player.hand.extend([card]);
        assert_eq!(player.play_card(0), Ok(card));
        assert!(player.play_card(0).is_err());
    }

    #[test]
    fn reserved_name_is_rejected() {
        assert_eq!(
            validate_name(RESERVED_NAME, &[]),
            Err(NameError::Reserved("Computer".to_string()))
        );
        assert_eq!(
            validate_name("  Computer ", &[]),
            Err(NameError::Reserved("Computer".to_string()))
        );
    }

    #[test]
    fn blank_and_duplicate_names_are_rejected() {
        assert_eq!(validate_name("   ", &[]), Err(NameError::Blank));
        let taken = vec!["Alice".to_string()];
        assert_eq!(
            validate_name("Alice", &taken),
            Err(NameError::Duplicate("Alice".to_string()))
        );
        assert_eq!(validate_name(" Bob ", &taken), Ok("Bob".to_string()));
    }
}
