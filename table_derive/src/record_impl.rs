//! Code generation for `Record` implementations
//!
//! Emits `field_slots` / `field_slots_mut` listing every bound field under its
//! field-convention name, plus `table_name` when the struct declares one.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parsing::{FieldBinding, TableInfo};

pub fn generate_record_impl(
    input: &DeriveInput,
    table_info: &TableInfo,
    fields: &[FieldBinding],
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table_name_fn = table_info.name.as_ref().map(|table| {
        quote! {
            fn table_name() -> ::std::option::Option<&'static str> {
                ::std::option::Option::Some(#table)
            }
        }
    });

    let shared = fields.iter().map(|field| {
        let ident = &field.ident;
        let field_name = &field.field_name;
        quote! { (#field_name, &self.#ident as &dyn type_mapping::FieldSlot) }
    });

    let exclusive = fields.iter().map(|field| {
        let ident = &field.ident;
        let field_name = &field.field_name;
        quote! { (#field_name, &mut self.#ident as &mut dyn type_mapping::FieldSlot) }
    });

    quote! {
        impl #impl_generics table_mapping::Record for #name #ty_generics #where_clause {
            #table_name_fn

            fn field_slots(&self) -> ::std::vec::Vec<(&'static str, &dyn type_mapping::FieldSlot)> {
                ::std::vec![#(#shared),*]
            }

            fn field_slots_mut(
                &mut self,
            ) -> ::std::vec::Vec<(&'static str, &mut dyn type_mapping::FieldSlot)> {
                ::std::vec![#(#exclusive),*]
            }
        }
    }
}
