use core::fmt;
use serde::Serialize;

/// The four end-of-round awards, each worth one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    MostCards,
    MostCoins,
    SevenOfCoins,
    HighestSum,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 4] = [
        ScoringRule::MostCards,
        ScoringRule::MostCoins,
        ScoringRule::SevenOfCoins,
        ScoringRule::HighestSum,
    ];

    pub const fn index(self) -> usize {
        match self {
            ScoringRule::MostCards => 0,
            ScoringRule::MostCoins => 1,
            ScoringRule::SevenOfCoins => 2,
            ScoringRule::HighestSum => 3,
        }
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoringRule::MostCards => "most cards",
            ScoringRule::MostCoins => "most coins",
            ScoringRule::SevenOfCoins => "seven of coins",
            ScoringRule::HighestSum => "highest sum",
        };
        f.write_str(label)
    }
}

/// Points handed out at the end of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    round: u32,
    points: Vec<u32>,
    rule_winners: [Option<usize>; 4],
}

impl ScoreBoard {
    pub fn new(round: u32, players: usize) -> Self {
        Self {
            round,
            points: vec![0; players],
            rule_winners: [None; 4],
        }
    }

    pub fn award(&mut self, rule: ScoringRule, player: usize) {
        self.rule_winners[rule.index()] = Some(player);
        self.points[player] += 1;
    }

    pub fn add_bonus(&mut self, player: usize, points: u32) {
        self.points[player] += points;
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn per_player(&self) -> &[u32] {
        &self.points
    }

    pub fn winner_of(&self, rule: ScoringRule) -> Option<usize> {
        self.rule_winners[rule.index()]
    }

    pub fn total_awarded(&self) -> u32 {
        self.points.iter().sum()
    }
}

/// Index of the strictly greatest positive value, if exactly one player holds it.
pub fn unique_max(values: &[u32]) -> Option<usize> {
    let max = values.iter().copied().max().filter(|&m| m > 0)?;
    let mut holders = values.iter().enumerate().filter(|&(_, &v)| v == max);
    let (index, _) = holders.next()?;
    if holders.next().is_some() {
        None
    } else {
        Some(index)
    }
}
