use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::amount::Amount;
use crate::state::receipts::{Item, Receipt};

/// Purchases in `[AFTERNOON_START, AFTERNOON_END)` earn the afternoon bonus.
const AFTERNOON_START: u32 = 14;
const AFTERNOON_END: u32 = 16;

/// Compute the loyalty points for a receipt.
///
/// Pure and total: every rule is evaluated independently and summed.
/// Fields that fail to parse score as zero (see `Amount::parse_or_zero`,
/// `purchase_day`, `purchase_hour`) rather than rejecting the receipt.
pub fn calculate_points(receipt: &Receipt) -> i64 {
    let total = Amount::parse_or_zero(&receipt.total);

    // Summed wide and clamped once, so huge prices cannot overflow.
    let mut points = retailer_points(&receipt.retailer);

    // 50 points for a round dollar total.
    if total.is_whole() {
        points += 50;
    }

    // 25 points if the total is a multiple of 0.25.
    if total.is_multiple_of_quarter() {
        points += 25;
    }

    points += item_pair_points(receipt.items.len());

    for item in &receipt.items {
        points += i128::from(description_points(item));
    }

    if purchase_day(&receipt.purchase_date) % 2 == 1 {
        points += 6;
    }

    if (AFTERNOON_START..AFTERNOON_END).contains(&purchase_hour(&receipt.purchase_time)) {
        points += 10;
    }

    points.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// One point per letter (L*) or decimal digit (Nd) in the retailer name.
/// Other numerics such as `²` or `Ⅻ` and combining marks do not count.
fn retailer_points(retailer: &str) -> i128 {
    retailer
        .chars()
        .filter(|c| {
            matches!(
                get_general_category(*c),
                GeneralCategory::UppercaseLetter
                    | GeneralCategory::LowercaseLetter
                    | GeneralCategory::TitlecaseLetter
                    | GeneralCategory::ModifierLetter
                    | GeneralCategory::OtherLetter
                    | GeneralCategory::DecimalNumber
            )
        })
        .count() as i128
}

/// 5 points for every two items.
fn item_pair_points(count: usize) -> i128 {
    (count / 2) as i128 * 5
}

/// `ceil(price * 0.2)` when the trimmed description length is a multiple
/// of 3 (an empty description counts).
fn description_points(item: &Item) -> i64 {
    if item.short_description.trim().chars().count() % 3 != 0 {
        return 0;
    }
    Amount::parse_or_zero(&item.price).fifth_rounded_up()
}

/// Day of month from a `YYYY-MM-DD` date.
///
/// Calendar-invalid dates such as `2022-02-31` still yield the last
/// `-`-separated segment (31). Anything else is day 0.
fn purchase_day(date: &str) -> u32 {
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return d.day();
    }

    date.rsplit('-').next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        tracing::debug!(value = date, "unparseable purchase date, using day 0");
        0
    })
}

/// Hour of a 24-hour `HH:MM` (or `HH:MM:SS`) time.
///
/// Falls back to the text before the first `:`; anything else is hour 0.
fn purchase_hour(time: &str) -> u32 {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"));
    if let Ok(t) = parsed {
        return t.hour();
    }

    time.split(':').next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        tracing::debug!(value = time, "unparseable purchase time, using hour 0");
        0
    })
}
