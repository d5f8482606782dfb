use super::*;
use rand::prelude::*;

/// Purely random generation; the first opened cell is made safe later by relocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        Board::generate(config, &mut rng)
    }
}
