use crate::domain::commands::transactions::TransactionDay;
use crate::domain::{StandardProgress, SurvivalReadout};
use shared::{
    StandardGoalProgress, SurvivalGoalReadout, TransactionDay as SharedTransactionDay,
};

use super::TransactionMapper;

/// Flattens engine readouts into the UI's display records
pub struct ReadoutMapper;

impl ReadoutMapper {
    pub fn survival_to_dto(readout: SurvivalReadout) -> SurvivalGoalReadout {
        SurvivalGoalReadout {
            goal_id: readout.goal_id,
            title: readout.title,
            period_start: readout.period_start,
            period_end: readout.period_end,
            total_days: readout.period.total_days,
            days_elapsed: readout.period.days_elapsed,
            days_remaining: readout.period.days_remaining,
            ceiling: readout.balance.ceiling,
            spent: readout.balance.spent,
            remaining: readout.balance.remaining,
            todays_expenses: readout.todays_expenses,
            daily_allowance: readout.allowance.daily_allowance,
            today_allowance: readout.allowance.today_allowance,
            tomorrow_allowance: readout.allowance.tomorrow_allowance,
            is_over_budget: readout.allowance.is_over_budget,
            is_today_depleted: readout.allowance.is_today_depleted,
        }
    }

    pub fn progress_to_dto(progress: StandardProgress) -> StandardGoalProgress {
        StandardGoalProgress {
            goal_id: progress.goal_id,
            title: progress.title,
            current_amount: progress.current_amount,
            amount: progress.amount,
            percent_complete: progress.percent_complete,
            remaining: progress.remaining,
            days_until_deadline: progress.days_until_deadline,
            is_due_today: progress.is_due_today,
            is_past_due: progress.is_past_due,
        }
    }

    pub fn day_to_dto(day: TransactionDay) -> SharedTransactionDay {
        SharedTransactionDay {
            date: day.date,
            transactions: day
                .transactions
                .into_iter()
                .map(TransactionMapper::to_dto)
                .collect(),
        }
    }
}
