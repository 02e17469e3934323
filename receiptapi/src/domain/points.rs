use super::receipts::Receipt;
use chrono::{Datelike, Timelike};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;
use thiserror::Error;

/// Everything in a retailer name that does not earn a point.
///
/// ASCII only: accented letters are stripped like punctuation.
pub const RETAILER_FILTER: &str = "[^a-zA-Z0-9]+";

static RETAILER_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(RETAILER_FILTER));

const ROUND_TOTAL_POINTS: i64 = 50;
const QUARTER_TOTAL_POINTS: i64 = 25;
const ITEM_PAIR_POINTS: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;

/// Errors raised while scoring a receipt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("retailer filter pattern is invalid: {0}")]
    Pattern(String),

    #[error("amount out of range: {0}")]
    Overflow(String),
}

/// Points earned by a receipt, rule by rule.
///
/// Each field is evaluated independently against the same receipt, and the
/// score is their sum.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    /// One point per ASCII alphanumeric character of the retailer name.
    pub retailer: i64,
    /// Positive total with no cents.
    pub round_total: i64,
    /// Positive total that is a multiple of 0.25.
    pub quarter_total: i64,
    /// Five points per two items.
    pub item_pairs: i64,
    /// `ceil(price * 0.2)` for each item whose trimmed description length
    /// is a multiple of 3.
    pub descriptions: i64,
    /// Purchase day of month is odd.
    pub odd_day: i64,
    /// Purchase time strictly between 14:00 and 16:00.
    pub afternoon: i64,
}

impl PointsBreakdown {
    /// Scores every rule against the receipt.
    ///
    /// Fails only if the retailer filter cannot be built or an item price is
    /// too large to turn into points.
    ///
    pub fn from_receipt(receipt: &Receipt) -> Result<Self, ScoringError> {
        Ok(Self {
            retailer: retailer_points(&receipt.retailer)?,
            round_total: round_total_points(receipt.total),
            quarter_total: quarter_total_points(receipt.total),
            item_pairs: item_pair_points(receipt.items.len()),
            descriptions: description_points(receipt)?,
            odd_day: odd_day_points(receipt),
            afternoon: afternoon_points(receipt),
        })
    }

    pub fn total(&self) -> i64 {
        [
            self.retailer,
            self.round_total,
            self.quarter_total,
            self.item_pairs,
            self.descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0i64, i64::saturating_add)
    }
}

/// Computes the reward points for a receipt.
///
/// Pure and deterministic: equal receipts always score the same.
///
pub fn compute_points(receipt: &Receipt) -> Result<i64, ScoringError> {
    PointsBreakdown::from_receipt(receipt).map(|breakdown| breakdown.total())
}

fn retailer_points(retailer: &str) -> Result<i64, ScoringError> {
    let filter = RETAILER_REGEX
        .as_ref()
        .map_err(|e| ScoringError::Pattern(e.to_string()))?;

    // only ASCII survives the filter, so bytes == chars
    let kept = filter.replace_all(retailer, "");
    Ok(kept.len() as i64)
}

fn round_total_points(total: Decimal) -> i64 {
    if total > Decimal::ZERO && (total % Decimal::ONE).is_zero() {
        ROUND_TOTAL_POINTS
    } else {
        0
    }
}

fn quarter_total_points(total: Decimal) -> i64 {
    let quarter = Decimal::new(25, 2);
    if total > Decimal::ZERO && (total % quarter).is_zero() {
        QUARTER_TOTAL_POINTS
    } else {
        0
    }
}

fn item_pair_points(item_count: usize) -> i64 {
    (item_count / 2) as i64 * ITEM_PAIR_POINTS
}

fn description_points(receipt: &Receipt) -> Result<i64, ScoringError> {
    let rate = Decimal::new(2, 1);

    receipt
        .items
        .iter()
        // length in bytes, an empty description counts
        .filter(|item| item.short_description.trim().len() % 3 == 0)
        .try_fold(0i64, |acc, item| {
            let points = item
                .price
                .checked_mul(rate)
                .map(|scaled| scaled.ceil())
                .and_then(|scaled| i64::try_from(scaled).ok())
                .ok_or_else(|| ScoringError::Overflow(item.price.to_string()))?;

            acc.checked_add(points)
                .ok_or_else(|| ScoringError::Overflow(item.price.to_string()))
        })
}

fn odd_day_points(receipt: &Receipt) -> i64 {
    match receipt.purchase_date() {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

fn afternoon_points(receipt: &Receipt) -> i64 {
    let Some(time) = receipt.purchase_time() else {
        return 0;
    };

    // 14:00 itself does not count
    let clock = (time.hour(), time.minute());
    if clock > (14, 0) && clock < (16, 0) {
        AFTERNOON_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipts::PurchaseItem;

    fn item(description: &str, price: &str) -> PurchaseItem {
        PurchaseItem {
            short_description: description.to_string(),
            price: price.parse().unwrap(),
        }
    }

    fn receipt_with_total(total: &str) -> Receipt {
        Receipt {
            total: total.parse().unwrap(),
            ..Default::default()
        }
    }

    fn receipt_at(date: Option<&str>, time: Option<&str>) -> Receipt {
        Receipt {
            purchase_date: date.map(str::to_string),
            purchase_time: time.map(str::to_string),
            ..Default::default()
        }
    }

    fn target_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: Some("2022-01-01".to_string()),
            purchase_time: Some("13:01".to_string()),
            items: vec![
                item("Mountain Dew 12PK", "6.49"),
                item("Emils Cheese Pizza", "12.25"),
                item("Knorr Creamy Chicken", "1.26"),
                item("Doritos Nacho Cheese", "3.35"),
                item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            total: "35.35".parse().unwrap(),
        }
    }

    fn corner_market_receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: Some("2022-03-20".to_string()),
            purchase_time: Some("14:33".to_string()),
            items: vec![item("Gatorade", "2.25"); 4],
            total: "9.00".parse().unwrap(),
        }
    }

    #[test]
    fn retailer_counts_ascii_alphanumerics() {
        assert_eq!(retailer_points("Target"), Ok(6));
        assert_eq!(retailer_points("M&M Corner Market"), Ok(14));
        assert_eq!(retailer_points("  -- & --  "), Ok(0));
        assert_eq!(retailer_points(""), Ok(0));
    }

    #[test]
    fn retailer_ignores_accented_letters() {
        assert_eq!(retailer_points("Café"), Ok(3));
        assert_eq!(retailer_points("Ñandú 7"), Ok(4));
    }

    #[test]
    fn round_total_bonuses() {
        let whole = PointsBreakdown::from_receipt(&receipt_with_total("100.00")).unwrap();
        assert_eq!(whole.round_total + whole.quarter_total, 75);

        let cents = PointsBreakdown::from_receipt(&receipt_with_total("35.35")).unwrap();
        assert_eq!(cents.round_total + cents.quarter_total, 0);

        let quarter = PointsBreakdown::from_receipt(&receipt_with_total("12.75")).unwrap();
        assert_eq!(quarter.round_total, 0);
        assert_eq!(quarter.quarter_total, 25);
    }

    #[test]
    fn zero_and_negative_totals_earn_nothing() {
        for total in ["0", "0.00", "-1.00", "-0.25"] {
            let breakdown = PointsBreakdown::from_receipt(&receipt_with_total(total)).unwrap();
            assert_eq!(breakdown.round_total, 0, "total {total}");
            assert_eq!(breakdown.quarter_total, 0, "total {total}");
        }
    }

    #[test]
    fn quarter_check_is_exact() {
        assert_eq!(quarter_total_points("0.2500000001".parse().unwrap()), 0);
        assert_eq!(round_total_points("1.0000000001".parse().unwrap()), 0);
    }

    #[test]
    fn item_pairs() {
        assert_eq!(item_pair_points(0), 0);
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(3), 5);
        assert_eq!(item_pair_points(4), 10);
    }

    #[test]
    fn description_bonus_rounds_up() {
        let receipt = Receipt {
            items: vec![item("Emils Cheese Pizza", "12.25")],
            ..Default::default()
        };
        assert_eq!(description_points(&receipt), Ok(3));
    }

    #[test]
    fn description_bonus_trims_and_counts_empty() {
        let receipt = Receipt {
            items: vec![
                item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
                item("   ", "1.00"),
                item("Gatorade", "100.00"),
            ],
            ..Default::default()
        };
        // 3 (24 chars) + 1 (empty) + nothing for 8 chars
        assert_eq!(description_points(&receipt), Ok(4));
    }

    #[test]
    fn description_bonus_is_not_clamped() {
        let receipt = Receipt {
            items: vec![item("abc", "0.00"), item("def", "-10.00")],
            ..Default::default()
        };
        assert_eq!(description_points(&receipt), Ok(-2));
    }

    #[test]
    fn odd_day() {
        assert_eq!(odd_day_points(&receipt_at(Some("2022-01-01"), None)), 6);
        assert_eq!(odd_day_points(&receipt_at(Some("2022-01-02"), None)), 0);
        assert_eq!(odd_day_points(&receipt_at(Some("2022-13-01"), None)), 0);
        assert_eq!(odd_day_points(&receipt_at(None, None)), 0);
    }

    #[test]
    fn afternoon_window() {
        assert_eq!(afternoon_points(&receipt_at(None, Some("14:33"))), 10);
        assert_eq!(afternoon_points(&receipt_at(None, Some("14:01"))), 10);
        assert_eq!(afternoon_points(&receipt_at(None, Some("15:00"))), 10);
        assert_eq!(afternoon_points(&receipt_at(None, Some("15:59"))), 10);
        assert_eq!(afternoon_points(&receipt_at(None, Some("14:00"))), 0);
        assert_eq!(afternoon_points(&receipt_at(None, Some("16:00"))), 0);
        assert_eq!(afternoon_points(&receipt_at(None, Some("13:59"))), 0);
        assert_eq!(afternoon_points(&receipt_at(None, Some("noon"))), 0);
        assert_eq!(afternoon_points(&receipt_at(None, None)), 0);
    }

    #[test]
    fn unpadded_date_and_time_earn_nothing() {
        let receipt = receipt_at(Some("2022-1-1"), Some("14:5"));
        assert_eq!(odd_day_points(&receipt), 0);
        assert_eq!(afternoon_points(&receipt), 0);
        assert_eq!(compute_points(&receipt), Ok(0));
    }

    #[test]
    fn date_and_time_are_independent() {
        let breakdown =
            PointsBreakdown::from_receipt(&receipt_at(Some("2022-01-01"), Some("bad"))).unwrap();
        assert_eq!(breakdown.odd_day, 6);
        assert_eq!(breakdown.afternoon, 0);

        let breakdown =
            PointsBreakdown::from_receipt(&receipt_at(Some("bad"), Some("15:30"))).unwrap();
        assert_eq!(breakdown.odd_day, 0);
        assert_eq!(breakdown.afternoon, 10);
    }

    #[test]
    fn target_receipt_scores_28() {
        let breakdown = PointsBreakdown::from_receipt(&target_receipt()).unwrap();
        assert_eq!(
            breakdown,
            PointsBreakdown {
                retailer: 6,
                round_total: 0,
                quarter_total: 0,
                item_pairs: 10,
                descriptions: 6,
                odd_day: 6,
                afternoon: 0,
            }
        );
        assert_eq!(compute_points(&target_receipt()), Ok(28));
    }

    #[test]
    fn corner_market_receipt_scores_109() {
        assert_eq!(compute_points(&corner_market_receipt()), Ok(109));
    }

    #[test]
    fn scoring_is_deterministic() {
        let receipt = corner_market_receipt();
        assert_eq!(compute_points(&receipt), compute_points(&receipt.clone()));
    }

    #[test]
    fn empty_receipt_scores_zero() {
        assert_eq!(compute_points(&Receipt::default()), Ok(0));
    }

    #[test]
    fn huge_price_is_an_error() {
        let receipt = Receipt {
            items: vec![item("abc", "79228162514264337593543950335")],
            ..Default::default()
        };
        assert!(matches!(
            compute_points(&receipt),
            Err(ScoringError::Overflow(_))
        ));
    }
}
