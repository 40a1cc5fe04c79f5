//! 50/30/20 allocation of monthly income

use crate::models::{Money, MonthlyBudget};

/// Split income into needs (50%), wants (30%) and savings (the rest)
///
/// Needs and wants are floored to whole currency units; savings takes the
/// remainder so the three parts always add up to `income` exactly.
pub fn allocate(income: Money) -> MonthlyBudget {
    let needs = income.share_floor(1, 2);
    let wants = income.share_floor(3, 10);
    let savings = income - needs - wants;

    MonthlyBudget {
        needs,
        wants,
        savings,
        total: income,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_round_income() {
        let budget = allocate(Money::from_units(3000));
        assert_eq!(budget.needs, Money::from_units(1500));
        assert_eq!(budget.wants, Money::from_units(900));
        assert_eq!(budget.savings, Money::from_units(600));
        assert_eq!(budget.total, Money::from_units(3000));
    }

    #[test]
    fn test_savings_absorbs_rounding() {
        let budget = allocate(Money::from_units(1001));
        assert_eq!(budget.needs, Money::from_units(500));
        assert_eq!(budget.wants, Money::from_units(300));
        assert_eq!(budget.savings, Money::from_units(201));
    }

    #[test]
    fn test_fractional_income() {
        let budget = allocate(Money::from_cents(250_075));
        assert_eq!(budget.needs, Money::from_units(1250));
        assert_eq!(budget.wants, Money::from_units(750));
        assert_eq!(budget.savings, Money::from_cents(50_075));
    }

    #[test]
    fn test_zero_income() {
        let budget = allocate(Money::zero());
        assert!(budget.needs.is_zero());
        assert!(budget.wants.is_zero());
        assert!(budget.savings.is_zero());
    }

    #[test]
    fn test_parts_sum_to_income_and_match_floor() {
        for cents in (0..2_000_000).step_by(777) {
            let income = Money::from_cents(cents);
            let budget = allocate(income);

            assert_eq!(budget.needs + budget.wants + budget.savings, income);
            assert_eq!(budget.needs.units(), cents / 200);
            assert_eq!(budget.wants.units(), cents * 3 / 1000);
            assert_eq!(budget.needs.cents_part(), 0);
            assert_eq!(budget.wants.cents_part(), 0);
        }
    }
}
