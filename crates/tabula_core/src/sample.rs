use tabula_docs::{FieldKind, FieldValue, Money, Record, Schema};

/// A stocked product, the record type the `tabula` binary exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl Record for Product {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Product")
            .field("Id", FieldKind::Integer, |p| FieldValue::Integer(p.id))
            .field("Name", FieldKind::Text, |p| FieldValue::Text(p.name.clone()))
            .field("Price", FieldKind::Currency, |p| FieldValue::Currency(p.price))
            .field("Stock", FieldKind::Quantity, |p| FieldValue::Quantity(p.stock))
    }
}

/// Products `1..=count`: `Product i`, priced `100 + i`, with `i` in stock.
pub fn sample_products(count: usize) -> Vec<Product> {
    (1..=count as i64)
        .map(|i| Product {
            id: i,
            name: format!("Product {i}"),
            price: Money::from_major(100 + i),
            stock: i,
        })
        .collect()
}
