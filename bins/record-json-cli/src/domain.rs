use record_json::record;

/// Market quote, the record this tool converts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quote {
    symbol: String,
    bid: f64,
    ask: f64,
    volume: i32,
    ts_ms: Option<i64>,
    indicative: bool,
}

#[record(type_name = "market.Quote", default)]
impl Quote {
    pub fn get_symbol(&self) -> &str {
        &self.symbol
    }

    pub fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol.to_ascii_uppercase();
    }

    pub fn get_bid(&self) -> f64 {
        self.bid
    }

    pub fn set_bid(&mut self, bid: f64) -> Result<(), String> {
        check_price(bid)?;
        self.bid = bid;
        Ok(())
    }

    pub fn get_ask(&self) -> f64 {
        self.ask
    }

    pub fn set_ask(&mut self, ask: f64) -> Result<(), String> {
        check_price(ask)?;
        self.ask = ask;
        Ok(())
    }

    /// Fails until both sides are set.
    pub fn get_spread(&self) -> Result<f64, String> {
        if self.bid == 0.0 || self.ask == 0.0 {
            return Err("one side of the quote is missing".into());
        }
        Ok(self.ask - self.bid)
    }

    pub fn get_volume(&self) -> i32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume;
    }

    pub fn get_ts_ms(&self) -> Option<i64> {
        self.ts_ms
    }

    pub fn set_ts_ms(&mut self, ts_ms: Option<i64>) {
        self.ts_ms = ts_ms;
    }

    pub fn is_indicative(&self) -> bool {
        self.indicative
    }

    pub fn set_indicative(&mut self, indicative: bool) {
        self.indicative = indicative;
    }
}

fn check_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(format!("price must be positive, got {price}"))
    }
}
