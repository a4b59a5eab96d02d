//! Plain-text order summary for manual submission (copied into a chat app).

use rust_decimal::Decimal;

use crate::cart::{self, CartItem, CartStore};
use crate::format::money;
use crate::storage::CartStorage;

pub const ORDER_HEADER: &str = "🛒 ORDER FORM – 2FLY.GALLERIA";

/// Contact details typed into the checkout form. Fields are trimmed on
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

impl ContactInfo {
    #[must_use]
    pub fn new(name: &str, phone: &str, address: &str, notes: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            notes: notes.trim().to_string(),
        }
    }
}

/// Contact details plus a snapshot of the cart, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    contact: ContactInfo,
    items: Vec<CartItem>,
    subtotal: Decimal,
    total_quantity: u64,
}

impl OrderDraft {
    #[must_use]
    pub fn new(contact: ContactInfo, items: &[CartItem]) -> Self {
        Self {
            subtotal: cart::subtotal(items),
            total_quantity: cart::total_quantity(items),
            items: items.to_vec(),
            contact,
        }
    }

    #[must_use]
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    #[must_use]
    pub fn render(&self) -> String {
        let c = &self.contact;
        let mut lines = vec![
            ORDER_HEADER.to_string(),
            String::new(),
            format!("Name: {}", c.name),
            format!("Phone: {}", c.phone),
            format!("Address: {}", c.address),
        ];
        if !c.notes.is_empty() {
            lines.push(format!("Notes: {}", c.notes));
        }
        lines.push(String::new());
        lines.push("Order List:".to_string());

        lines.extend(self.items.iter().map(|it| {
            let code_part = if it.code.is_empty() {
                String::new()
            } else {
                format!(" – {}", it.code)
            };
            format!(
                "• {}{code_part} – x{} ({} each)",
                it.name,
                it.quantity,
                money(it.price)
            )
        }));

        lines.push(String::new());
        lines.push(format!("Total Amount: {}", money(self.subtotal)));
        lines.push(format!("Total Quantity: {}", self.total_quantity));
        lines.join("\n")
    }
}

/// Render the order text for `contact` and `items` in one step.
#[must_use]
pub fn compose_order_text(contact: &ContactInfo, items: &[CartItem]) -> String {
    OrderDraft::new(contact.clone(), items).render()
}

impl<S: CartStorage> CartStore<S> {
    /// Draft an order from the current cart; `None` when the cart is empty.
    #[must_use]
    pub fn checkout(&self, contact: ContactInfo) -> Option<OrderDraft> {
        (!self.is_empty()).then(|| OrderDraft::new(contact, self.items()))
    }
}
