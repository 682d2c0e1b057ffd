//! RNG module - piece sources for the spawner
//!
//! The default source draws each kind independently and uniformly, with no memory of
//! previous draws. The "7-bag" randomizer (one of each kind per shuffled bag) is kept as
//! an opt-in alternative, and a scripted source replays a fixed sequence for tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use blockfall_types::PieceKind;

/// Anything that can feed the spawner with piece kinds.
pub trait PieceSource: Send {
    /// Draw the next piece kind.
    fn next_kind(&mut self) -> PieceKind;

    /// Return to the initial state (used on game reset).
    fn reset(&mut self);
}

/// Independent uniform draws over the seven kinds.
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: StdRng,
}

impl UniformRandomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PieceSource for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// The stream continues rather than replaying; a reset game gets fresh pieces.
    fn reset(&mut self) {}
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: StdRng,
}

impl BagRandomizer {
    pub fn new(seed: u64) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl PieceSource for BagRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Drop the partially used bag so the next game starts on a full one.
    fn reset(&mut self) {
        self.refill_bag();
    }
}

/// Replays a fixed sequence of kinds, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSource {
    /// An empty sequence falls back to a single I piece.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
