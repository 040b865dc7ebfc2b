//! Parsing utilities for table and field attributes
//!
//! This module handles the parsing of `#[table]` and `#[field]` attributes
//! and validation of table and column names.

use syn::{
    parse::Parse, parse::ParseStream, Attribute, Data, Error, Fields, Ident, LitStr, Meta, Result,
    Token,
};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_column_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid column name '{}': {}", name, e)))
}

/// Mirrors table_mapping::validation so compile-time and runtime checks agree.
/// Names are always double-quoted in SQL, only empty names and NUL are unusable.
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if name.contains('\0') {
        return Err("Name contains a NUL character".to_string());
    }

    Ok(())
}

/// Mirrors table_mapping::naming::to_field_convention
pub fn to_field_convention(column_name: &str) -> String {
    let mut camel = String::with_capacity(column_name.len());
    let mut chars = column_name.chars();

    while let Some(c) = chars.next() {
        if c != '_' {
            camel.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => camel.extend(next.to_uppercase()),
            None => camel.push('_'),
        }
    }

    let mut rest = camel.chars();
    match rest.next() {
        Some(first) => first.to_uppercase().chain(rest).collect(),
        None => camel,
    }
}

/// Contents of `#[field(...)]`: bare flags or `key = "value"` pairs
#[derive(Debug, Default)]
struct FieldOptions {
    skip: bool,
    column: Option<LitStr>,
}

impl Parse for FieldOptions {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut options = FieldOptions::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            match key.to_string().as_str() {
                "skip" => options.skip = true,
                "column" => {
                    let _: Token![=] = input.parse()?;
                    options.column = Some(input.parse()?);
                }
                other => {
                    return Err(Error::new(
                        key.span(),
                        format!(
                            "unknown field option '{}', expected `skip` or `column = \"...\"`",
                            other
                        ),
                    ))
                }
            }

            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            }
        }

        Ok(options)
    }
}

#[derive(Debug)]
pub struct TableInfo {
    /// `#[table(name = "...")]`, optional for records used with explicit table names
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct FieldBinding {
    pub ident: Ident,
    /// Name the record exposes the field under, in field convention
    pub field_name: String,
}

pub fn parse_table_attributes(attrs: &[Attribute]) -> Result<TableInfo> {
    let mut table_name = None;

    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        let Meta::List(meta_list) = &attr.meta else {
            return Err(Error::new_spanned(
                attr,
                "expected #[table(name = \"table_name\")]",
            ));
        };

        // Parse nested tokens manually: name = "..."
        let mut tokens = meta_list.tokens.clone().into_iter().peekable();
        while let Some(token) = tokens.next() {
            let proc_macro2::TokenTree::Ident(key) = token else {
                continue;
            };

            if let Some(proc_macro2::TokenTree::Punct(punct)) = tokens.peek() {
                if punct.as_char() == '=' {
                    tokens.next(); // consume '='

                    if let Some(proc_macro2::TokenTree::Literal(lit)) = tokens.next() {
                        let value: LitStr = syn::parse2(proc_macro2::TokenTree::Literal(lit).into())?;
                        if key == "name" {
                            validate_table_name_syn(&value.value(), value.span())?;
                            table_name = Some(value.value());
                        }
                    }
                }
            }
        }

        if table_name.is_none() {
            return Err(Error::new_spanned(
                attr,
                "table attribute requires a name: #[table(name = \"table_name\")]",
            ));
        }
    }

    Ok(TableInfo { name: table_name })
}

pub fn parse_field_attributes(data: &Data) -> Result<Vec<FieldBinding>> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Record can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Record can only be derived for structs with named fields",
        ));
    };

    let mut bindings: Vec<FieldBinding> = Vec::new();

    for field in &fields_named.named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        let field_name = match &options.column {
            Some(column) => {
                validate_column_name_syn(&column.value(), column.span())?;
                to_field_convention(&column.value())
            }
            None => {
                let raw = ident.to_string();
                to_field_convention(raw.strip_prefix("r#").unwrap_or(&raw))
            }
        };

        if let Some(existing) = bindings.iter().find(|b| b.field_name == field_name) {
            return Err(Error::new(
                ident.span(),
                format!(
                    "field '{}' maps to the same column as '{}'",
                    ident, existing.ident
                ),
            ));
        }

        bindings.push(FieldBinding { ident, field_name });
    }

    Ok(bindings)
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    if !has_attribute(attrs, "field") {
        return Ok(FieldOptions::default());
    }

    let mut merged = FieldOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
        let options = match &attr.meta {
            Meta::List(meta_list) => meta_list.parse_args::<FieldOptions>()?,
            // #[field] without arguments keeps the default binding
            Meta::Path(_) => FieldOptions::default(),
            Meta::NameValue(_) => {
                return Err(Error::new_spanned(
                    attr,
                    "expected #[field(skip)] or #[field(column = \"...\")]",
                ))
            }
        };
        merged.skip |= options.skip;
        if options.column.is_some() {
            merged.column = options.column;
        }
    }

    Ok(merged)
}
