pub mod classify;
pub mod normalize;
pub mod unicity;

pub use classify::{classify, CodeRules};
pub use normalize::{normalize, Normalizer};
pub use unicity::{assign_ranks, OccurrenceCounter};
