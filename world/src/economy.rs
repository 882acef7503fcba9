//! Resource stock held by the player.

use garden_defence_core::PlantingError;

/// Non-negative spendable balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Stock(u32);

impl Stock {
    pub(crate) const fn new(amount: u32) -> Self {
        Self(amount)
    }

    pub(crate) const fn get(self) -> u32 {
        self.0
    }

    /// Adds income and returns the new balance.
    pub(crate) fn deposit(&mut self, amount: u32) -> u32 {
        self.0 = self.0.saturating_add(amount);
        self.0
    }

    /// Fails without touching the balance when `cost` exceeds it.
    pub(crate) fn ensure_affordable(self, cost: u32) -> Result<(), PlantingError> {
        if self.0 < cost {
            Err(PlantingError::InsufficientResources {
                required: cost,
                available: self.0,
            })
        } else {
            Ok(())
        }
    }

    /// Deducts a cost previously cleared by [`Stock::ensure_affordable`].
    pub(crate) fn withdraw(&mut self, cost: u32) -> u32 {
        debug_assert!(self.0 >= cost, "withdrawing {cost} from {}", self.0);
        self.0 = self.0.saturating_sub(cost);
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_is_reported_with_both_amounts() {
        let stock = Stock::new(50);
        assert_eq!(
            stock.ensure_affordable(100),
            Err(PlantingError::InsufficientResources {
                required: 100,
                available: 50
            })
        );
        assert_eq!(stock.get(), 50);
    }

    #[test]
    fn exact_balance_is_affordable() {
        let mut stock = Stock::new(50);
        assert!(stock.ensure_affordable(50).is_ok());
        assert_eq!(stock.withdraw(50), 0);
        assert_eq!(stock.deposit(25), 25);
    }
}
