use rust_decimal::Decimal;

use crate::domain::errors::ValidationError;
use crate::domain::models::{DomainTransaction, EntryKind};
use shared::Transaction as SharedTransaction;

/// Converts between the store's signed encoding and the tagged domain entry
pub struct TransactionMapper;

impl TransactionMapper {
    /// Zero amounts carry no kind and are rejected here, before the engine sees them
    pub fn to_domain(dto: SharedTransaction) -> Result<DomainTransaction, ValidationError> {
        let kind = if dto.amount > Decimal::ZERO {
            EntryKind::Expense
        } else if dto.amount < Decimal::ZERO {
            EntryKind::Income
        } else {
            return Err(ValidationError::ZeroTransactionAmount);
        };

        Ok(DomainTransaction {
            id: dto.id,
            goal_id: dto.goal_id,
            kind,
            amount: dto.amount.abs(),
            description: dto.description,
            date: dto.date,
        })
    }

    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        let amount = domain.signed_amount();
        SharedTransaction {
            id: domain.id,
            goal_id: domain.goal_id,
            amount,
            description: domain.description,
            date: domain.date,
        }
    }
}
