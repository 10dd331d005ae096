use crate::domain::models::DomainGoal;
use shared::Goal as SharedGoal;

pub struct GoalMapper;

impl GoalMapper {
    pub fn to_domain(dto: SharedGoal) -> DomainGoal {
        DomainGoal {
            id: dto.id,
            title: dto.title,
            amount: dto.amount,
            current_amount: dto.current_amount,
            deadline: dto.deadline,
            created_at: dto.created_at,
            category: dto.category,
            color: dto.color,
            hidden: dto.hidden.unwrap_or(false),
            goal_type: dto.goal_type.unwrap_or_default(),
            period_start: dto.period_start,
            period_end: dto.period_end,
            daily_allowance: dto.daily_allowance,
        }
    }

    pub fn to_dto(domain: DomainGoal) -> SharedGoal {
        SharedGoal {
            id: domain.id,
            title: domain.title,
            amount: domain.amount,
            current_amount: domain.current_amount,
            deadline: domain.deadline,
            created_at: domain.created_at,
            category: domain.category,
            color: domain.color,
            hidden: Some(domain.hidden),
            goal_type: Some(domain.goal_type),
            period_start: domain.period_start,
            period_end: domain.period_end,
            daily_allowance: domain.daily_allowance,
        }
    }
}
