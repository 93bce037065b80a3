use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{Cost, Resource};
use crate::error::Rejection;

/// Resource balances. Every spend goes through [`Ledger::debit`], which checks
/// the whole cost vector before touching any balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(BTreeMap<Resource, f64>);

impl Default for Ledger {
    fn default() -> Self {
        Self::from_balances(&Cost::zero())
    }
}

impl Ledger {
    pub fn from_balances(balances: &Cost) -> Self {
        let mut ledger: BTreeMap<Resource, f64> =
            Resource::ALL.iter().map(|resource| (*resource, 0.0)).collect();
        for (resource, amount) in balances.iter() {
            ledger.insert(resource, amount);
        }
        Self(ledger)
    }

    pub fn balance(&self, resource: Resource) -> f64 {
        self.0.get(&resource).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, f64)> + '_ {
        self.0.iter().map(|(resource, amount)| (*resource, *amount))
    }

    pub fn can_afford(&self, cost: &Cost) -> bool {
        cost.iter()
            .all(|(resource, amount)| self.balance(resource) >= amount)
    }

    /// What is missing to pay `cost`; empty when affordable.
    pub fn shortfall(&self, cost: &Cost) -> Cost {
        cost.iter()
            .filter_map(|(resource, amount)| {
                let missing = amount - self.balance(resource);
                (missing > 0.0).then_some((resource, missing))
            })
            .collect()
    }

    pub fn debit(&self, cost: &Cost) -> Result<Self, Rejection> {
        if !self.can_afford(cost) {
            return Err(Rejection::InsufficientResources {
                cost: cost.clone(),
                shortfall: self.shortfall(cost),
            });
        }
        let mut next = self.clone();
        for (resource, amount) in cost.iter() {
            *next.0.entry(resource).or_insert(0.0) -= amount;
        }
        Ok(next)
    }

    /// Signed credit. Refuses amounts that are not finite or that would
    /// leave the balance negative.
    pub fn credit(&self, resource: Resource, amount: f64) -> Result<Self, Rejection> {
        let next_balance = self.balance(resource) + amount;
        if !amount.is_finite() || next_balance < 0.0 {
            return Err(Rejection::InvalidAmount { resource, amount });
        }
        let mut next = self.clone();
        next.0.insert(resource, next_balance);
        Ok(next)
    }

    /// Adds every increment in one pass.
    pub fn accrue(&self, increments: &BTreeMap<Resource, f64>) -> Self {
        let mut next = self.clone();
        for (resource, increment) in increments {
            *next.0.entry(*resource).or_insert(0.0) += increment;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(wood: f64, food: f64, metals: f64) -> Ledger {
        Ledger::from_balances(
            &Cost::new()
                .with(Resource::Wood, wood)
                .with(Resource::Food, food)
                .with(Resource::Metals, metals),
        )
    }

    #[test]
    fn can_afford_checks_every_line_item() {
        let ledger = ledger(25.0, 0.0, 2.0);
        let tenement = Cost::new()
            .with(Resource::Wood, 20.0)
            .with(Resource::Metals, 5.0);
        assert!(!ledger.can_afford(&tenement));
        assert!(ledger.can_afford(&Cost::new().with(Resource::Wood, 25.0)));
        assert!(ledger.can_afford(&Cost::new()));
    }

    #[test]
    fn debit_is_all_or_nothing() {
        let ledger = ledger(25.0, 0.0, 2.0);
        let tenement = Cost::new()
            .with(Resource::Wood, 20.0)
            .with(Resource::Metals, 5.0);
        let err = ledger.debit(&tenement).unwrap_err();
        assert_eq!(
            err,
            Rejection::InsufficientResources {
                cost: tenement,
                shortfall: Cost::new().with(Resource::Metals, 3.0),
            }
        );
        assert_eq!(ledger.balance(Resource::Wood), 25.0);
    }

    #[test]
    fn debit_subtracts_each_line_item() {
        let ledger = ledger(25.0, 4.0, 6.0);
        let next = ledger
            .debit(
                &Cost::new()
                    .with(Resource::Wood, 20.0)
                    .with(Resource::Metals, 5.0),
            )
            .unwrap();
        assert_eq!(next.balance(Resource::Wood), 5.0);
        assert_eq!(next.balance(Resource::Metals), 1.0);
        assert_eq!(next.balance(Resource::Food), 4.0);
    }

    #[test]
    fn credit_refuses_overdraft_and_nan() {
        let ledger = ledger(1.0, 0.0, 0.0);
        assert!(ledger.credit(Resource::Wood, -2.0).is_err());
        assert!(ledger.credit(Resource::Wood, f64::NAN).is_err());
        let next = ledger.credit(Resource::Wood, -1.0).unwrap();
        assert_eq!(next.balance(Resource::Wood), 0.0);
    }
}
