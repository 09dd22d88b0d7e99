//! Checkout form: customer info from flags or interactive prompts.

use dialoguer::{Input, Select};

use crate::domain::{CustomerInfo, OrderType};
use crate::error::Result;

/// Checkout flags; any field left unset is prompted for.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckoutArgs {
    /// Customer full name
    #[arg(long)]
    pub name: Option<String>,

    /// Customer phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Order type [dine-in, delivery, takeout]
    #[arg(long, value_name = "TYPE")]
    pub order_type: Option<OrderType>,

    /// Table number (dine-in orders)
    #[arg(long)]
    pub table: Option<String>,
}

const ORDER_TYPES: [OrderType; 3] = [OrderType::DineIn, OrderType::Delivery, OrderType::Takeout];

/// Assemble customer info, prompting for anything the flags left out.
///
/// The resulting structure is re-validated by order finalization regardless
/// of how it was collected.
pub fn gather_customer_info(args: &CheckoutArgs) -> Result<CustomerInfo> {
    let full_name = match &args.name {
        Some(name) => name.clone(),
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let phone_number = match &args.phone {
        Some(phone) => phone.clone(),
        None => Input::new().with_prompt("Phone number").interact_text()?,
    };

    let order_type = match args.order_type {
        Some(order_type) => order_type,
        None => {
            let labels: Vec<&str> = ORDER_TYPES.iter().map(|t| t.label()).collect();
            let selected = Select::new()
                .with_prompt("Order type")
                .items(&labels)
                .default(0)
                .interact()?;
            ORDER_TYPES[selected]
        }
    };

    let table_number = match (&args.table, order_type) {
        (Some(table), _) => Some(table.clone()),
        (None, OrderType::DineIn) => {
            let table: String = Input::new().with_prompt("Table number").interact_text()?;
            Some(table)
        }
        (None, _) => None,
    };

    Ok(CustomerInfo {
        full_name,
        phone_number,
        order_type,
        table_number,
    })
}
