//! Credit card model
//!
//! One row of the `Cartoes` sheet. Reports only use the name, as the list of
//! valid card payment methods; closing and due days are carried for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A credit card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name, matched against `Transaction::payment_method`
    pub name: String,

    /// Statement closing day (1-31)
    pub closing_day: u32,

    /// Statement due day (1-31)
    pub due_day: u32,

    pub credit_limit: Money,
}

impl Card {
    /// Create a new card
    pub fn new(name: impl Into<String>, closing_day: u32, due_day: u32, credit_limit: Money) -> Self {
        Self {
            name: name.into(),
            closing_day,
            due_day,
            credit_limit,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (closes {}, due {}, limit {})",
            self.name, self.closing_day, self.due_day, self.credit_limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let card = Card::new("Visa", 5, 15, Money::from_units(5000));
        assert_eq!(card.to_string(), "Visa (closes 5, due 15, limit R$ 5.000,00)");
    }
}
