//! Budget fitting.
//!
//! Selects the longest run of most-recent turns whose cumulative cost stays
//! within the budget. Turns are atomic: each one is either included whole or
//! dropped, and everything older than the first turn that does not fit is
//! dropped as well.

use crate::budget::counter::TokenCounter;
use crate::error::{BudgetError, FitError};
use crate::turn::Turn;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Result of fitting a turn sequence to a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitResult {
    /// Trailing turns that fit, oldest first.
    pub additions: Vec<Turn>,
    /// Number of leading turns excluded to satisfy the budget.
    pub dropped: usize,
    /// Summed cost of `additions`; `None` when no budget was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<u64>,
}

impl FitResult {
    fn unbounded(turns: &[Turn]) -> Self {
        Self {
            additions: turns.to_vec(),
            dropped: 0,
            total_cost: None,
        }
    }

    /// Whether any turn was excluded.
    pub fn truncation_occurred(&self) -> bool {
        self.dropped > 0
    }
}

/// Fit `turns` into `budget` using an infallible cost oracle.
///
/// With no budget every turn is returned and the oracle is never called.
pub fn fit<F>(turns: &[Turn], budget: Option<i64>, mut cost: F) -> Result<FitResult, BudgetError>
where
    F: FnMut(&Turn) -> u32,
{
    try_fit(turns, budget, |turn| Ok::<u32, Infallible>(cost(turn))).map_err(|err| match err {
        FitError::Budget(err) => err,
        FitError::Oracle(never) => match never {},
    })
}

/// Fit `turns` into `budget` using a fallible cost oracle.
///
/// The first oracle error stops the scan and is returned as
/// [`FitError::Oracle`] without translation.
pub fn try_fit<F, E>(
    turns: &[Turn],
    budget: Option<i64>,
    mut cost: F,
) -> Result<FitResult, FitError<E>>
where
    F: FnMut(&Turn) -> Result<u32, E>,
{
    let Some(budget) = budget else {
        return Ok(FitResult::unbounded(turns));
    };

    if budget < 0 {
        return Err(BudgetError::InvalidArgument { budget }.into());
    }
    let limit = budget as u64;

    let mut start = turns.len();
    let mut total: u64 = 0;

    for (index, turn) in turns.iter().enumerate().rev() {
        let turn_cost = u64::from(cost(turn).map_err(FitError::Oracle)?);
        let next_total = total.saturating_add(turn_cost);

        if next_total > limit {
            tracing::debug!(
                index,
                cost = turn_cost,
                total,
                budget = limit,
                "sample chat turn exceeds remaining budget, dropping it and older turns"
            );
            break;
        }

        total = next_total;
        start = index;
    }

    Ok(FitResult {
        additions: turns[start..].to_vec(),
        dropped: start,
        total_cost: Some(total),
    })
}

/// Fit `turns` into `budget` using a [`TokenCounter`] as the cost oracle.
pub fn fit_with_counter(
    turns: &[Turn],
    budget: Option<i64>,
    counter: &dyn TokenCounter,
) -> Result<FitResult, BudgetError> {
    fit(turns, budget, |turn| counter.count_turn(turn))
}
