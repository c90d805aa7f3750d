//! Strike ladder: the ordered strikes available to the strategy builder.
//!
//! A ladder is only ever replaced wholesale: every maintenance operation
//! (`with_quote`, `without_strike`, `extend_next`) returns a new ladder and
//! leaves the original untouched.

use serde::{Deserialize, Serialize};

use super::leg::OptionType;
use super::market::InputError;

/// Strike spacing used when appending a new strike above the ladder.
pub const DEFAULT_STRIKE_STEP: f64 = 2.5;

/// Placeholder premium quoted for a freshly appended strike.
pub const DEFAULT_NEW_PREMIUM: f64 = 0.10;

/// One row of the ladder: a strike with its call and put premiums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeQuote {
    pub strike: f64,
    pub call_premium: f64,
    pub put_premium: f64,
}

impl StrikeQuote {
    pub fn new(strike: f64, call_premium: f64, put_premium: f64) -> Self {
        Self {
            strike,
            call_premium,
            put_premium,
        }
    }

    /// Quoted premium for the given side of the row.
    pub fn premium(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_premium,
            OptionType::Put => self.put_premium,
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(InputError::InvalidStrike(self.strike));
        }
        for option_type in [OptionType::Call, OptionType::Put] {
            let premium = self.premium(option_type);
            if !(premium.is_finite() && premium >= 0.0) {
                return Err(InputError::InvalidPremium {
                    strike: self.strike,
                    option_type,
                    premium,
                });
            }
        }
        Ok(())
    }
}

/// Ascending, de-duplicated sequence of strike quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StrikeLadder {
    quotes: Vec<StrikeQuote>,
}

impl StrikeLadder {
    /// Build a ladder from quotes that are already sorted ascending by strike.
    pub fn from_quotes(quotes: Vec<StrikeQuote>) -> Result<Self, InputError> {
        if quotes.is_empty() {
            return Err(InputError::EmptyLadder);
        }
        for q in &quotes {
            q.validate()?;
        }
        for pair in quotes.windows(2) {
            let (previous, next) = (pair[0].strike, pair[1].strike);
            if next == previous {
                return Err(InputError::DuplicateStrike(next));
            }
            if next < previous {
                return Err(InputError::UnsortedStrikes { previous, next });
            }
        }
        Ok(Self { quotes })
    }

    /// Sort ascending and drop repeated strikes (first occurrence wins), then validate.
    pub fn from_unsorted(mut quotes: Vec<StrikeQuote>) -> Result<Self, InputError> {
        // Stable sort keeps the first occurrence of a repeated strike in front.
        quotes.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        quotes.dedup_by(|later, earlier| later.strike == earlier.strike);
        Self::from_quotes(quotes)
    }

    /// Build from parallel strike / call / put columns.
    pub fn from_columns(strikes: &[f64], calls: &[f64], puts: &[f64]) -> Result<Self, InputError> {
        let quotes = strikes
            .iter()
            .zip(calls)
            .zip(puts)
            .map(|((&k, &c), &p)| StrikeQuote::new(k, c, p))
            .collect();
        Self::from_quotes(quotes)
    }

    pub fn quotes(&self) -> &[StrikeQuote] {
        &self.quotes
    }

    pub fn get(&self, index: usize) -> Option<&StrikeQuote> {
        self.quotes.get(index)
    }

    pub fn strikes(&self) -> Vec<f64> {
        self.quotes.iter().map(|q| q.strike).collect()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// New ladder with `quote` inserted, or replacing the row at the same strike.
    pub fn with_quote(&self, quote: StrikeQuote) -> Result<Self, InputError> {
        let mut quotes: Vec<StrikeQuote> = self
            .quotes
            .iter()
            .filter(|q| q.strike != quote.strike)
            .copied()
            .collect();
        quotes.push(quote);
        quotes.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        Self::from_quotes(quotes)
    }

    /// New ladder without the row at `strike`. The last remaining strike cannot be removed.
    pub fn without_strike(&self, strike: f64) -> Result<Self, InputError> {
        if !self.quotes.iter().any(|q| q.strike == strike) {
            return Err(InputError::StrikeNotFound(strike));
        }
        if self.quotes.len() == 1 {
            return Err(InputError::LastStrike);
        }
        let quotes = self
            .quotes
            .iter()
            .filter(|q| q.strike != strike)
            .copied()
            .collect();
        Self::from_quotes(quotes)
    }

    /// New ladder with one more strike `DEFAULT_STRIKE_STEP` above the highest,
    /// quoted at `DEFAULT_NEW_PREMIUM` on both sides.
    pub fn extend_next(&self) -> Result<Self, InputError> {
        let last = self.quotes.last().ok_or(InputError::EmptyLadder)?;
        let mut quotes = self.quotes.clone();
        quotes.push(StrikeQuote::new(
            last.strike + DEFAULT_STRIKE_STEP,
            DEFAULT_NEW_PREMIUM,
            DEFAULT_NEW_PREMIUM,
        ));
        Self::from_quotes(quotes)
    }
}

impl<'de> Deserialize<'de> for StrikeLadder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let quotes = Vec::<StrikeQuote>::deserialize(deserializer)?;
        Self::from_quotes(quotes).map_err(serde::de::Error::custom)
    }
}
