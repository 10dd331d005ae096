//! Per-day spending allowance.
//!
//! `remaining` is the balance after every expense, today's included. Today's
//! share is split from the balance as it stood when the day began
//! (`remaining + todays_expenses`), so spending during the day lowers what is
//! left of today's share without shrinking the share itself. Tomorrow's figure
//! re-splits the current `remaining` over the days after today.

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    pub daily_allowance: Decimal,
    /// Never negative
    pub today_allowance: Decimal,
    pub tomorrow_allowance: Decimal,
    pub is_over_budget: bool,
    pub is_today_depleted: bool,
}

pub fn allowance(remaining: Decimal, days_remaining: u32, todays_expenses: Decimal) -> Allowance {
    let start_of_day_balance = remaining + todays_expenses;

    // On the last day the whole balance is today's
    let daily_allowance = if days_remaining <= 1 {
        start_of_day_balance
    } else {
        start_of_day_balance / Decimal::from(days_remaining)
    };

    let today_allowance = (daily_allowance - todays_expenses).max(Decimal::ZERO);

    let tomorrow_allowance = if days_remaining > 1 {
        remaining / Decimal::from((days_remaining - 1).max(1))
    } else {
        Decimal::ZERO
    };

    Allowance {
        daily_allowance,
        today_allowance,
        tomorrow_allowance,
        is_over_budget: remaining < Decimal::ZERO,
        is_today_depleted: todays_expenses >= daily_allowance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_last_day_gets_the_whole_balance() {
        let result = allowance(dec!(500), 1, Decimal::ZERO);
        assert_eq!(result.daily_allowance, dec!(500));
        assert_eq!(result.today_allowance, dec!(500));
        assert_eq!(result.tomorrow_allowance, Decimal::ZERO);
        assert!(!result.is_over_budget);
        assert!(!result.is_today_depleted);
    }

    #[test]
    fn test_last_day_spend_leaves_remaining_for_today() {
        let result = allowance(dec!(500), 1, dec!(100));
        assert_eq!(result.daily_allowance, dec!(600));
        assert_eq!(result.today_allowance, dec!(500));
    }

    #[test]
    fn test_even_split_with_spend_today() {
        // 3000 over 3 days, 400 spent today
        let result = allowance(dec!(2600), 3, dec!(400));
        assert_eq!(result.daily_allowance, dec!(1000));
        assert_eq!(result.today_allowance, dec!(600));
        assert_eq!(result.tomorrow_allowance, dec!(1300));
        assert!(!result.is_today_depleted);
    }

    #[test]
    fn test_spending_exactly_todays_share_depletes_it() {
        let result = allowance(dec!(2000), 3, dec!(1000));
        assert_eq!(result.daily_allowance, dec!(1000));
        assert_eq!(result.today_allowance, Decimal::ZERO);
        assert!(result.is_today_depleted);
        assert!(!result.is_over_budget);
        assert_eq!(result.tomorrow_allowance, dec!(1000));
    }

    #[test]
    fn test_overspend_today_floors_at_zero() {
        let result = allowance(dec!(1500), 3, dec!(1500));
        assert_eq!(result.daily_allowance, dec!(1000));
        assert_eq!(result.today_allowance, Decimal::ZERO);
        assert!(result.is_today_depleted);
        assert_eq!(result.tomorrow_allowance, dec!(750));
    }

    #[test]
    fn test_over_budget() {
        let result = allowance(dec!(-300), 2, Decimal::ZERO);
        assert!(result.is_over_budget);
        assert_eq!(result.today_allowance, Decimal::ZERO);
        assert_eq!(result.daily_allowance, dec!(-150));
        assert!(result.is_today_depleted);
    }

    #[test]
    fn test_zero_days_remaining_behaves_like_last_day() {
        let result = allowance(dec!(120), 0, Decimal::ZERO);
        assert_eq!(result.daily_allowance, dec!(120));
        assert_eq!(result.tomorrow_allowance, Decimal::ZERO);
    }
}
