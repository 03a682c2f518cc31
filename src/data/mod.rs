// Raw feed payload parsing and normalization
pub mod normalize;
pub mod payload;

// Re-export commonly used items
pub use normalize::{NormalizeError, normalize};
pub use payload::{RawCandleRow, candle_rows, coerce_numeric};
