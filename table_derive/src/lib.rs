//! Procedural macros for mapping structs onto table rows
//!
//! This crate provides the `#[model]` macro and the `Record` derive, which
//! generate the static field bindings `table_mapping::Record` asks for.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod model_macro;
mod parsing;
mod record_impl;

use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};
use record_impl::generate_record_impl;

/// Derive macro for the `Record` trait
///
/// Every named field is bound under its field-convention name, so `user_id`
/// maps to the `user_id` column. Use `#[field(column = "...")]` to bind a
/// field to a differently named column and `#[field(skip)]` to leave it out.
///
/// ```ignore
/// #[derive(Debug, Default, Record)]
/// #[table(name = "users")]
/// pub struct User {
///     pub id: i64,
///     #[field(column = "name")]
///     pub login: String,
///     #[field(skip)]
///     pub session_token: Option<String>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(table, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let table_info = match parse_table_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let fields = match parse_field_attributes(&input.data) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_record_impl(&input, &table_info, &fields))
}

/// Convenience attribute macro that adds all necessary derives for a model
///
/// Expands to `#[derive(Debug, Clone, Default, PartialEq, Record)]`, so
/// `Record` must be in scope (the tablehaus prelude exports it).
///
/// ```ignore
/// use tablehaus::prelude::*;
///
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     pub id: i64,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
