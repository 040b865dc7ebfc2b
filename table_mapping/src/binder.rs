//! Record binder
//!
//! Pairs the columns of a [`TableSchema`] with the field slots a [`Record`]
//! exposes. Bindings borrow both sides and live for one operation only.

use crate::catalog::{ColumnSpec, TableSchema};
use crate::errors::MappingError;
use crate::traits::{Record, Row};
use std::collections::HashMap;
use type_mapping::{FieldSlot, SqlValue};

/// Read access to one bound field
pub struct Binding<'a> {
    pub column: &'a ColumnSpec,
    slot: &'a dyn FieldSlot,
}

impl Binding<'_> {
    pub fn value(&self) -> SqlValue {
        self.slot.to_value()
    }

    pub fn is_zero(&self) -> bool {
        self.slot.is_zero()
    }

    pub fn is_primary_key(&self) -> bool {
        self.column.is_primary_key
    }
}

/// Write access to one bound field
pub struct BindingMut<'a> {
    pub column: &'a ColumnSpec,
    slot: &'a mut dyn FieldSlot,
}

impl BindingMut<'_> {
    pub fn value(&self) -> SqlValue {
        self.slot.to_value()
    }

    pub fn is_zero(&self) -> bool {
        self.slot.is_zero()
    }

    pub fn is_primary_key(&self) -> bool {
        self.column.is_primary_key
    }

    /// Decode a column value into the field
    pub fn set(&mut self, value: SqlValue) -> Result<(), MappingError> {
        self.slot
            .set_value(value)
            .map_err(|e| MappingError::column_decode(&self.column.column_name, e))
    }

    pub fn set_generated_id(&mut self, id: i64) -> bool {
        self.slot.set_generated_id(id)
    }
}

/// Bindings for every schema column the record has a field for, in column order
pub fn bind<'a, R>(schema: &'a TableSchema, record: &'a R) -> Vec<Binding<'a>>
where
    R: Record + ?Sized,
{
    let slots: HashMap<&'static str, &'a dyn FieldSlot> = record.field_slots().into_iter().collect();

    schema
        .columns
        .iter()
        .filter_map(|column| {
            slots
                .get(column.field_name.as_str())
                .map(|slot| Binding { column, slot: *slot })
        })
        .collect()
}

/// Writable bindings, same selection and order as [`bind`]
pub fn bind_mut<'a, R>(schema: &'a TableSchema, record: &'a mut R) -> Vec<BindingMut<'a>>
where
    R: Record + ?Sized,
{
    let mut slots: HashMap<&'static str, &'a mut dyn FieldSlot> =
        record.field_slots_mut().into_iter().collect();

    schema
        .columns
        .iter()
        .filter_map(|column| {
            slots
                .remove(column.field_name.as_str())
                .map(|slot| BindingMut { column, slot })
        })
        .collect()
}

/// Scan one result row into bindings positionally
pub fn scan_row(bindings: &mut [BindingMut<'_>], row: Row) -> Result<(), MappingError> {
    if row.len() != bindings.len() {
        return Err(MappingError::Execution(sqlx::Error::ColumnIndexOutOfBounds {
            index: bindings.len(),
            len: row.len(),
        }));
    }
    for (binding, value) in bindings.iter_mut().zip(row) {
        binding.set(value)?;
    }
    Ok(())
}
