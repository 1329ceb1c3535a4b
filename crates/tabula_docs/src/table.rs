use crate::error::RenderError;
use crate::schema::{FieldKind, FieldValue, Schema};

/// A column header: field name plus its semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: FieldKind,
}

/// One table built from a record sequence: a column per declared field, a
/// row per record, both in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<FieldValue>>,
}

impl Table {
    /// Tabulate `records` under `schema`.
    ///
    /// Fails when the schema has no fields or there are no records; neither
    /// produces a usable sheet.
    pub fn from_records<R>(schema: &Schema<R>, records: &[R]) -> Result<Self, RenderError> {
        if schema.is_empty() {
            return Err(RenderError::EmptySchema {
                type_name: schema.type_name().to_string(),
            });
        }
        if records.is_empty() {
            return Err(RenderError::EmptyInput {
                type_name: schema.type_name().to_string(),
            });
        }

        let columns = schema
            .fields()
            .iter()
            .map(|f| Column {
                name: f.name().to_string(),
                kind: f.kind(),
            })
            .collect();
        let rows = records.iter().map(|r| schema.values(r)).collect();

        Ok(Self {
            name: schema.type_name().to_string(),
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Money;

    struct Item {
        id: i64,
        price: Money,
    }

    fn schema() -> Schema<Item> {
        Schema::<Item>::new("Item")
            .field("Id", FieldKind::Integer, |i| FieldValue::Integer(i.id))
            .field("Price", FieldKind::Currency, |i| FieldValue::Currency(i.price))
    }

    #[test]
    fn test_table_shape_matches_input() {
        let items: Vec<Item> = (1..=5)
            .map(|id| Item {
                id,
                price: Money::from_major(id * 2),
            })
            .collect();
        let table = Table::from_records(&schema(), &items).unwrap();
        assert_eq!(table.name(), "Item");
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns()[1].kind, FieldKind::Currency);
        assert_eq!(
            table.rows()[4],
            vec![
                FieldValue::Integer(5),
                FieldValue::Currency(Money::from_major(10))
            ]
        );
    }

    #[test]
    fn test_table_rejects_empty_input() {
        let err = Table::from_records(&schema(), &[]).unwrap_err();
        assert!(matches!(err, RenderError::EmptyInput { ref type_name } if type_name == "Item"));
    }

    #[test]
    fn test_table_rejects_empty_schema() {
        let items = vec![Item {
            id: 1,
            price: Money::default(),
        }];
        let err = Table::from_records(&Schema::<Item>::new("Item"), &items).unwrap_err();
        assert!(matches!(err, RenderError::EmptySchema { .. }));
    }
}
