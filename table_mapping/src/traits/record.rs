//! Record trait
//!
//! Records declare their field bindings statically instead of being
//! inspected at runtime. Each field is exposed under its field-convention
//! name (`UserId` for a `user_id` column) as a [`FieldSlot`].

use type_mapping::FieldSlot;

/// A structured value that can be mapped onto table rows.
///
/// Usually derived:
/// ```ignore
/// use tablehaus::prelude::*;
///
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     pub id: i64,
///     pub name: String,
///     #[field(skip)]
///     pub cached_greeting: String,
/// }
/// ```
///
/// Implementing it by hand only requires listing the fields twice, once
/// shared and once mutable:
/// ```ignore
/// impl Record for User {
///     fn field_slots(&self) -> Vec<(&'static str, &dyn FieldSlot)> {
///         vec![("Id", &self.id), ("Name", &self.name)]
///     }
///
///     fn field_slots_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldSlot)> {
///         vec![("Id", &mut self.id), ("Name", &mut self.name)]
///     }
/// }
/// ```
pub trait Record: Send + Sync {
    /// Default table for this record type, if it declares one
    fn table_name() -> Option<&'static str>
    where
        Self: Sized,
    {
        None
    }

    /// Readable slots keyed by field name
    fn field_slots(&self) -> Vec<(&'static str, &dyn FieldSlot)>;

    /// Writable slots keyed by field name
    fn field_slots_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldSlot)>;
}

impl<T: Record> Record for Box<T> {
    fn table_name() -> Option<&'static str> {
        T::table_name()
    }

    fn field_slots(&self) -> Vec<(&'static str, &dyn FieldSlot)> {
        (**self).field_slots()
    }

    fn field_slots_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldSlot)> {
        (**self).field_slots_mut()
    }
}
