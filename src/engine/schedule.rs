use serde::Deserialize;

use crate::model::{HolderCategory, Kind};
use crate::{Amount, Rate};

/// Fee rule for deposits: a flat rate with an absolute fee ceiling.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DepositFee {
    pub rate: Rate,
    pub cap: Amount,
}

/// Fee rule for individual withdrawals: a flat rate with a weekly
/// fee-free volume allowance.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IndividualWithdrawalFee {
    pub rate: Rate,
    pub weekly_free_allowance: Amount,
}

/// Fee rule for corporate withdrawals: a flat rate with an absolute
/// minimum fee.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CorporateWithdrawalFee {
    pub rate: Rate,
    pub floor: Amount,
}

/// The three fee rule sets, fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeSchedule {
    pub deposit: DepositFee,
    pub individual_withdrawal: IndividualWithdrawalFee,
    pub corporate_withdrawal: CorporateWithdrawalFee,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            deposit: DepositFee {
                rate: Rate::from_ppm(300), // 0.03%
                cap: Amount::from_scaled(50_000),
            },
            individual_withdrawal: IndividualWithdrawalFee {
                rate: Rate::from_ppm(3_000), // 0.3%
                weekly_free_allowance: Amount::from_scaled(10_000_000),
            },
            corporate_withdrawal: CorporateWithdrawalFee {
                rate: Rate::from_ppm(3_000), // 0.3%
                floor: Amount::from_scaled(5_000),
            },
        }
    }
}

/// The rule selected for one record.
#[derive(Debug, Clone, Copy)]
pub enum FeeRule {
    Deposit(DepositFee),
    IndividualWithdrawal(IndividualWithdrawalFee),
    CorporateWithdrawal(CorporateWithdrawalFee),
}

impl FeeSchedule {
    /// Select the applicable fee configuration for a record.
    ///
    /// Total over its input domain: deposits ignore the holder category,
    /// and any non-individual withdrawal takes the corporate rule.
    pub fn resolve(&self, kind: Kind, category: HolderCategory) -> FeeRule {
        match (kind, category) {
            (Kind::Deposit, _) => FeeRule::Deposit(self.deposit),
            (Kind::Withdrawal, HolderCategory::Individual) => {
                FeeRule::IndividualWithdrawal(self.individual_withdrawal)
            }
            (Kind::Withdrawal, HolderCategory::Other) => {
                FeeRule::CorporateWithdrawal(self.corporate_withdrawal)
            }
        }
    }
}
