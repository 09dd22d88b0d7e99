//! Sales rollup domain types: day/month buckets and their derived figures.

use chrono::{DateTime, Months, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Retained daily buckets (sliding window, oldest evicted).
pub const DAILY_WINDOW: usize = 7;

/// Retained monthly buckets (sliding window, oldest evicted).
pub const MONTHLY_WINDOW: usize = 6;

/// Day bucket key, e.g. `2026-08-08`.
#[must_use]
pub fn day_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Month bucket key, e.g. `August 2026`.
#[must_use]
pub fn month_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %Y").to_string()
}

/// Which rollup view the dashboard is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesTab {
    Daily,
    Monthly,
}

/// Aggregated order-count/revenue totals for one day or one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBucket {
    /// Period key: a date string for daily buckets, "Month Year" for monthly.
    pub period: String,
    pub orders: u64,
    pub revenue: Money,
    /// Derived period-over-period change, stored for display.
    pub change: String,
}

impl SalesBucket {
    fn zeroed(period: String) -> Self {
        Self {
            period,
            orders: 0,
            revenue: Money::ZERO,
            change: "0%".to_string(),
        }
    }

    /// Average order value for this bucket, rounded to the nearest unit.
    #[must_use]
    pub fn average_order_value(&self) -> Money {
        if self.orders == 0 {
            Money::ZERO
        } else {
            round_unit(self.revenue / Decimal::from(self.orders))
        }
    }
}

/// The full set of retained daily and monthly buckets, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRollup {
    pub daily: Vec<SalesBucket>,
    pub monthly: Vec<SalesBucket>,
}

impl SalesRollup {
    /// Seed a zeroed rollup: today back 6 days, this month back 5 months.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let daily = (0..DAILY_WINDOW as i64)
            .map(|i| SalesBucket::zeroed(day_key(&(now - chrono::Duration::days(i)))))
            .collect();
        let monthly = (0..MONTHLY_WINDOW as u32)
            .map(|i| {
                let month = now
                    .checked_sub_months(Months::new(i))
                    .unwrap_or(now);
                SalesBucket::zeroed(month_key(&month))
            })
            .collect();
        Self { daily, monthly }
    }

    /// Fold one completed order into the day and month buckets.
    ///
    /// Existing buckets are incremented in place; missing ones are inserted
    /// at the front and the window truncated, evicting the oldest. Stored
    /// change strings are recomputed afterwards.
    pub fn record(&mut self, placed_at: &DateTime<Utc>, total: Money) {
        record_into(&mut self.daily, day_key(placed_at), total, DAILY_WINDOW);
        record_into(&mut self.monthly, month_key(placed_at), total, MONTHLY_WINDOW);
        recompute_changes(&mut self.daily);
        recompute_changes(&mut self.monthly);
    }

    /// Buckets for the selected tab, most recent first.
    #[must_use]
    pub fn buckets(&self, tab: SalesTab) -> &[SalesBucket] {
        match tab {
            SalesTab::Daily => &self.daily,
            SalesTab::Monthly => &self.monthly,
        }
    }

    /// Dashboard stat-card figures for the selected tab.
    #[must_use]
    pub fn summary(&self, tab: SalesTab) -> PeriodSummary {
        let buckets = self.buckets(tab);
        let orders: u64 = buckets.iter().map(|b| b.orders).sum();
        let revenue: Money = buckets.iter().map(|b| b.revenue).sum();
        let average_order_value = if orders == 0 {
            Money::ZERO
        } else {
            round_unit(revenue / Decimal::from(orders))
        };

        // Change figures compare against the previous period's bucket.
        let previous = buckets.get(1);
        let previous_revenue = previous.map_or(Money::ZERO, |b| b.revenue);
        let previous_orders = previous.map_or(0, |b| b.orders);
        let previous_average = previous.map_or(Money::ZERO, SalesBucket::average_order_value);

        PeriodSummary {
            orders,
            revenue,
            average_order_value,
            revenue_change: change_percent(revenue, previous_revenue),
            orders_change: change_percent(Decimal::from(orders), Decimal::from(previous_orders)),
            average_change: change_percent(average_order_value, previous_average),
        }
    }
}

/// Derived totals for one dashboard tab.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub orders: u64,
    pub revenue: Money,
    pub average_order_value: Money,
    pub revenue_change: String,
    pub orders_change: String,
    pub average_change: String,
}

/// Period-over-period change as a display string.
///
/// A zero previous value yields `+100%` when current is positive and `0%`
/// otherwise, avoiding division by zero.
#[must_use]
pub fn change_percent(current: Decimal, previous: Decimal) -> String {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            "+100%".to_string()
        } else {
            "0%".to_string()
        };
    }
    let percent = (current - previous) * Decimal::from(100) / previous;
    if percent >= Decimal::ZERO {
        format!("+{percent:.1}%")
    } else {
        format!("{percent:.1}%")
    }
}

fn record_into(buckets: &mut Vec<SalesBucket>, period: String, total: Money, window: usize) {
    if let Some(bucket) = buckets.iter_mut().find(|b| b.period == period) {
        bucket.orders += 1;
        bucket.revenue += total;
    } else {
        buckets.insert(
            0,
            SalesBucket {
                period,
                orders: 1,
                revenue: total,
                change: "0%".to_string(),
            },
        );
        buckets.truncate(window);
    }
}

/// Refresh stored change strings against each bucket's predecessor. The
/// oldest retained bucket has no predecessor and is compared against zero.
fn recompute_changes(buckets: &mut [SalesBucket]) {
    for i in 0..buckets.len() {
        let previous = buckets
            .get(i + 1)
            .map_or(Money::ZERO, |b| b.revenue);
        buckets[i].change = change_percent(buckets[i].revenue, previous);
    }
}

fn round_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
