use super::super::domain::{Item, Points, Receipt};
use super::{PointsComponent, ScoringRule};

const ROUND_DOLLAR_BONUS: Points = 50;
const QUARTER_MULTIPLE_BONUS: Points = 25;
const ITEM_PAIR_BONUS: Points = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_BONUS: Points = 6;
const AFTERNOON_BONUS: Points = 10;
/// Largest bonus an `f64` product still represents as an exact integer (2^53).
const MAX_EXACT_BONUS: f64 = 9_007_199_254_740_992.0;

/// Returns `None` when a contribution does not fit in [`Points`].
pub(crate) fn score_receipt(receipt: &Receipt) -> Option<Vec<PointsComponent>> {
    Some(vec![
        retailer_name(&receipt.retailer),
        round_total(&receipt.total),
        item_pairs(receipt.items.len())?,
        description_length(&receipt.items)?,
        odd_day(&receipt.purchase_date),
        afternoon_window(&receipt.purchase_time),
    ])
}

fn retailer_name(retailer: &str) -> PointsComponent {
    let alphanumeric = retailer.chars().filter(|c| c.is_alphanumeric()).count();
    PointsComponent {
        rule: ScoringRule::RetailerName,
        points: alphanumeric as Points,
        notes: format!("{alphanumeric} alphanumeric characters in '{retailer}'"),
    }
}

/// Cents are read from the final two characters so money never goes through a float.
fn round_total(total: &str) -> PointsComponent {
    let cents = total
        .len()
        .checked_sub(2)
        .and_then(|start| total.get(start..))
        .unwrap_or_default();

    let mut points = 0;
    let mut reasons = Vec::new();
    if cents == "00" {
        points += ROUND_DOLLAR_BONUS;
        reasons.push("round dollar amount");
    }
    if cents.parse::<u32>().is_ok_and(|value| value % 25 == 0) {
        points += QUARTER_MULTIPLE_BONUS;
        reasons.push("multiple of 0.25");
    }

    let notes = if reasons.is_empty() {
        format!("total {total} is neither a round dollar amount nor a multiple of 0.25")
    } else {
        format!("total {total} is a {}", reasons.join(" and a "))
    };

    PointsComponent {
        rule: ScoringRule::RoundTotal,
        points,
        notes,
    }
}

fn item_pairs(item_count: usize) -> Option<PointsComponent> {
    let pairs = Points::try_from(item_count / 2).ok()?;
    Some(PointsComponent {
        rule: ScoringRule::ItemPairs,
        points: pairs.checked_mul(ITEM_PAIR_BONUS)?,
        notes: format!("{pairs} pairs across {item_count} items"),
    })
}

fn item_bonus(item: &Item) -> Option<Points> {
    let bonus = (item.price * DESCRIPTION_PRICE_MULTIPLIER).ceil();
    (bonus.is_finite() && (0.0..=MAX_EXACT_BONUS).contains(&bonus)).then(|| bonus as Points)
}

/// A description that trims to nothing still satisfies `0 % 3 == 0`.
fn description_length(items: &[Item]) -> Option<PointsComponent> {
    let qualifying: Vec<&Item> = items
        .iter()
        .filter(|item| item.trimmed_description_len() % 3 == 0)
        .collect();
    let points = qualifying.iter().try_fold(0 as Points, |total, item| {
        total.checked_add(item_bonus(item)?)
    })?;

    Some(PointsComponent {
        rule: ScoringRule::DescriptionLength,
        points,
        notes: format!(
            "{} of {} descriptions have a length divisible by 3",
            qualifying.len(),
            items.len()
        ),
    })
}

fn odd_day(purchase_date: &str) -> PointsComponent {
    let ones_digit = purchase_date.chars().last().and_then(|c| c.to_digit(10));
    let odd = ones_digit.is_some_and(|digit| digit % 2 == 1);
    PointsComponent {
        rule: ScoringRule::OddDay,
        points: if odd { ODD_DAY_BONUS } else { 0 },
        notes: if odd {
            format!("purchase date {purchase_date} falls on an odd day")
        } else {
            format!("purchase date {purchase_date} falls on an even day")
        },
    }
}

/// Qualifying window is strictly after 14:00 and strictly before 16:00.
fn afternoon_window(purchase_time: &str) -> PointsComponent {
    let hour = purchase_time.get(0..2);
    let minute = purchase_time.get(3..5);
    let inside = matches!((hour, minute), (Some("14"), Some(m)) if m != "00") || hour == Some("15");

    PointsComponent {
        rule: ScoringRule::AfternoonWindow,
        points: if inside { AFTERNOON_BONUS } else { 0 },
        notes: if inside {
            format!("purchased at {purchase_time}, between 14:00 and 16:00")
        } else {
            format!("purchased at {purchase_time}, outside 14:00-16:00")
        },
    }
}
