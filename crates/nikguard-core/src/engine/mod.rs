mod tally;
mod validation_engine;


pub use tally::{summarize, Tally};
pub use validation_engine::{classify_column, ValidationEngine};
