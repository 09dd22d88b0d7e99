//! Static menu data and rendering.
//!
//! The menu is presentation data consumed by the cart store; the ordering
//! core itself never depends on it.

use rust_decimal_macros::dec;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{ItemId, Money};

/// One orderable menu entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: &'static str,
    pub category: &'static str,
    pub price: Money,
    pub description: &'static str,
}

/// The full menu.
#[must_use]
pub fn all() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: ItemId::new(1),
            name: "Classic Burger",
            category: "Burgers",
            price: dec!(12.99),
            description: "Juicy beef patty with fresh lettuce, tomato, and special sauce",
        },
        MenuItem {
            id: ItemId::new(2),
            name: "Margherita Pizza",
            category: "Pizza",
            price: dec!(15.99),
            description: "Fresh mozzarella, tomato sauce, and basil on thin crust",
        },
        MenuItem {
            id: ItemId::new(3),
            name: "Caesar Salad",
            category: "Salads",
            price: dec!(9.99),
            description: "Crisp romaine lettuce with parmesan cheese and croutons",
        },
        MenuItem {
            id: ItemId::new(4),
            name: "Fresh Orange Juice",
            category: "Beverages",
            price: dec!(4.99),
            description: "Freshly squeezed orange juice, no added sugar",
        },
        MenuItem {
            id: ItemId::new(5),
            name: "Chocolate Cake",
            category: "Desserts",
            price: dec!(6.99),
            description: "Rich chocolate cake with vanilla ice cream",
        },
        MenuItem {
            id: ItemId::new(6),
            name: "Grilled Salmon",
            category: "Main Courses",
            price: dec!(18.99),
            description: "Fresh Atlantic salmon with herbs and lemon butter",
        },
        MenuItem {
            id: ItemId::new(7),
            name: "Chicken Wings",
            category: "Appetizers",
            price: dec!(8.99),
            description: "Spicy buffalo wings with blue cheese dip",
        },
        MenuItem {
            id: ItemId::new(8),
            name: "Iced Coffee",
            category: "Beverages",
            price: dec!(3.99),
            description: "Cold brew coffee with a hint of vanilla",
        },
    ]
}

/// Look up a menu item by id.
#[must_use]
pub fn find(id: ItemId) -> Option<MenuItem> {
    all().into_iter().find(|item| item.id == id)
}

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// Render the menu table to stdout.
pub fn print_menu() {
    let rows: Vec<MenuRow> = all()
        .into_iter()
        .map(|item| MenuRow {
            id: item.id.value(),
            name: item.name,
            category: item.category,
            price: format!("PKR {}", item.price),
            description: item.description,
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
}
