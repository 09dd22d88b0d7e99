//! Sales dashboard rendering: stat cards and the bucket table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{SalesBucket, SalesRollup, SalesTab};

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Orders")]
    orders: u64,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Avg/Order")]
    average: String,
    #[tabled(rename = "Growth")]
    growth: String,
}

impl From<&SalesBucket> for BucketRow {
    fn from(bucket: &SalesBucket) -> Self {
        Self {
            period: bucket.period.clone(),
            orders: bucket.orders,
            revenue: format!("PKR {}", bucket.revenue),
            average: format!("PKR {}", bucket.average_order_value()),
            growth: bucket.change.clone(),
        }
    }
}

/// Render the dashboard for one tab to stdout.
pub fn print_dashboard(rollup: &SalesRollup, tab: SalesTab) {
    let summary = rollup.summary(tab);
    let label = match tab {
        SalesTab::Daily => "Daily Sales",
        SalesTab::Monthly => "Monthly Sales",
    };

    output::section(label);
    output::field(
        "Total Revenue",
        format!("PKR {} ({} from last period)", summary.revenue, summary.revenue_change),
    );
    output::field(
        "Total Orders",
        format!("{} ({} from last period)", summary.orders, summary.orders_change),
    );
    output::field(
        "Average Order Value",
        format!(
            "PKR {} ({} from last period)",
            summary.average_order_value, summary.average_change
        ),
    );
    println!();

    let rows: Vec<BucketRow> = rollup.buckets(tab).iter().map(BucketRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}
