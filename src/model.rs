//! Core domain types for the commission engine.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::Amount;

/// Account holder identifier.
pub type HolderId = u64;

/// Account holder category.
///
/// Anything other than the literal `individual` takes the corporate fee
/// rules, so the fallthrough is explicit at the type level instead of an
/// open string match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderCategory {
    /// A natural person; withdrawals carry the weekly free allowance.
    Individual,
    /// Corporate holders and any unrecognized category.
    Other,
}

impl<'de> Deserialize<'de> for HolderCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "individual" => HolderCategory::Individual,
            _ => HolderCategory::Other,
        })
    }
}

/// Transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Deposit,
    /// Any non-deposit kind is priced as a withdrawal.
    Withdrawal,
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "deposit" => Kind::Deposit,
            _ => Kind::Withdrawal,
        })
    }
}

/// One financial event supplied by the record source.
///
/// Records are read-only for the whole run; the weekly aggregator only
/// filters and sums over a borrowed view of the full set.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Calendar date of the operation (no time component).
    pub date: NaiveDate,
    pub holder_id: HolderId,
    pub holder_category: HolderCategory,
    pub kind: Kind,
    pub operation: Operation,
}

/// The monetary payload of a record.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub amount: Amount,
    /// Carried through but never used in fee computation.
    #[serde(default)]
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let record: Record = serde_json::from_str(
            r#"{
                "date": "2016-01-05",
                "holder_id": 1,
                "holder_category": "individual",
                "kind": "deposit",
                "operation": { "amount": 200.00, "currency": "EUR" }
            }"#,
        )
        .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2016, 1, 5).unwrap());
        assert_eq!(record.holder_id, 1);
        assert_eq!(record.holder_category, HolderCategory::Individual);
        assert_eq!(record.kind, Kind::Deposit);
        assert_eq!(record.operation.amount, Amount::from_float(200.0));
        assert_eq!(record.operation.currency, "EUR");
    }

    #[test]
    fn corporate_category_maps_to_other() {
        let category: HolderCategory = serde_json::from_str(r#""corporate""#).unwrap();
        assert_eq!(category, HolderCategory::Other);
    }

    #[test]
    fn unrecognized_category_maps_to_other() {
        let category: HolderCategory = serde_json::from_str(r#""llc""#).unwrap();
        assert_eq!(category, HolderCategory::Other);
    }

    #[test]
    fn unrecognized_kind_maps_to_withdrawal() {
        let kind: Kind = serde_json::from_str(r#""transfer""#).unwrap();
        assert_eq!(kind, Kind::Withdrawal);

        let kind: Kind = serde_json::from_str(r#""withdrawal""#).unwrap();
        assert_eq!(kind, Kind::Withdrawal);
    }

    #[test]
    fn missing_nested_amount_is_an_error() {
        let result: Result<Record, _> = serde_json::from_str(
            r#"{
                "date": "2016-01-05",
                "holder_id": 1,
                "holder_category": "individual",
                "kind": "deposit",
                "operation": { "currency": "EUR" }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_date_is_an_error() {
        let result: Result<Record, _> = serde_json::from_str(
            r#"{
                "date": "not-a-date",
                "holder_id": 1,
                "holder_category": "individual",
                "kind": "deposit",
                "operation": { "amount": 1.0, "currency": "EUR" }
            }"#,
        );
        assert!(result.is_err());
    }
}
