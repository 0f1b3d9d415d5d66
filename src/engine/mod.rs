//! Commission computation engine.
//!
//! Prices each transaction record against the fee schedule: deposits are
//! capped, corporate withdrawals are floored, and individual withdrawals
//! consume a weekly fee-free allowance aggregated over the full record
//! set per ISO calendar week.

use chrono::{NaiveDate, Weekday};
use tracing::info;

use crate::Amount;
use crate::model::{HolderCategory, HolderId, Kind, Record};

mod schedule;
pub use schedule::{
    CorporateWithdrawalFee, DepositFee, FeeRule, FeeSchedule, IndividualWithdrawalFee,
};

mod error;
pub use error::PipelineError;

/// The commission calculation engine.
///
/// Holds the immutable fee schedule; every computation is a pure function
/// of the schedule and the supplied record set, so repeated calls over
/// the same records always agree.
pub struct Engine {
    schedule: FeeSchedule,
}

impl Engine {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    /// Price every record, in input order.
    ///
    /// Returns exactly one fixed 2-decimal fee string per input record.
    /// An empty slice yields an empty vector.
    pub fn process(&self, records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|record| {
                let fee = self.commission(records, record);
                info!(
                    holder = record.holder_id,
                    kind = ?record.kind,
                    date = %record.date,
                    amount = %record.operation.amount,
                    fee = %fee,
                    "commission computed"
                );
                fee.to_string()
            })
            .collect()
    }

    /// Compute the fee for one record against the full record set.
    ///
    /// The record set is only read, never copied or mutated, so the same
    /// slice and record always produce the same fee.
    pub fn commission(&self, records: &[Record], record: &Record) -> Amount {
        let amount = record.operation.amount;
        let fee = match self.schedule.resolve(record.kind, record.holder_category) {
            FeeRule::Deposit(rule) => amount.apply_rate(rule.rate).min(rule.cap),
            FeeRule::IndividualWithdrawal(rule) => {
                // The window sum includes the record being priced, so the
                // allowance check sees the week total after this withdrawal.
                let week_total =
                    weekly_withdrawal_volume(records, record.holder_id, record.date);
                let fee = if week_total <= rule.weekly_free_allowance {
                    Amount::ZERO
                } else if amount > rule.weekly_free_allowance {
                    (amount - rule.weekly_free_allowance).apply_rate(rule.rate)
                } else {
                    // Once the week total is past the allowance, the whole
                    // current amount is charged, not just the excess.
                    amount.apply_rate(rule.rate)
                };
                fee.max(Amount::ZERO)
            }
            FeeRule::CorporateWithdrawal(rule) => amount.apply_rate(rule.rate).max(rule.floor),
        };
        fee.round_cents()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(FeeSchedule::default())
    }
}

/// The Monday on or before `date`, per the ISO-8601 week definition.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Total withdrawal volume of one individual holder within the ISO week
/// ending on `as_of`, inclusive of `as_of` itself.
///
/// Recomputed from the complete record set on every call. Records dated
/// after `as_of` fall outside the window even when present in the batch.
pub fn weekly_withdrawal_volume(
    records: &[Record],
    holder: HolderId,
    as_of: NaiveDate,
) -> Amount {
    let start = week_start(as_of);
    records
        .iter()
        .filter(|r| {
            r.kind == Kind::Withdrawal
                && r.holder_category == HolderCategory::Individual
                && r.holder_id == holder
                && r.date >= start
                && r.date <= as_of
        })
        .fold(Amount::ZERO, |total, r| total + r.operation.amount)
}
