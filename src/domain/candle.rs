// Define the CandleType enum
#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// A single candle with every price expressed in market-cap units
/// (price x circulating supply). Volume stays in the feed's own units.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: f64,
    /// Candle open time in epoch milliseconds; 0 when the feed carried none
    pub open_time_ms: i64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64, open_time_ms: i64) -> Self {
        Candle {
            open,
            high,
            low,
            close,
            volume,
            open_time_ms,
        }
    }

    // A method to determine the type of candle.
    // Dojis (close == open) count as bearish: the breakout pattern needs a
    // strictly green body.
    pub fn get_type(&self) -> CandleType {
        if self.close > self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// Low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open, self.close),
            CandleType::Bearish => (self.close, self.open),
        }
    }
}
