//! Position keys and the table that memoizes searched positions.

pub mod hash_key;
pub mod table;
pub mod zobrist;

pub use hash_key::{HashKey, HistoricalHashKey};
pub use table::{Entry, Probe, TranspositionTable, DEFAULT_TABLE_CAPACITY};
pub use zobrist::{HashError, ZobristHash};
