//! Derive macros for shopdesk.
//!
//! This crate provides `#[derive(Record)]`, which implements the
//! `shopdesk::Record` trait from field attributes so list views can search,
//! sort and filter a record type without hand-written glue.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopdesk::{Record, RecordStatus};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Record)]
//! #[record(resource = "veiculos")]
//! struct Vehicle {
//!     #[record(id)]
//!     id: u64,
//!     #[record(search, sort)]
//!     placa: String,
//!     #[record(search, sort)]
//!     modelo: String,
//!     #[record(sort)]
//!     ano: u16,
//!     #[record(status)]
//!     status: RecordStatus,
//! }
//! ```
//!
//! ## Attributes
//!
//! - `#[record(resource = "...")]` on the struct: required, the REST path segment.
//! - `#[record(id)]`: required on one field, any `Into<RecordId>`-compatible
//!   value with `Display`.
//! - `#[record(search)]`: field takes part in free-text search.
//! - `#[record(sort)]`: field can be sorted on; the sort name is the field name.
//! - `#[record(status)]`: field holds the active/inactive status
//!   (`RecordStatus` or `bool`).
//!
//! Flags combine: `#[record(id, sort)]`, `#[record(status, sort)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result, parse_macro_input};

/// Derive macro for implementing the `Record` trait.
///
/// ## Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, Record)]
/// #[record(resource = "bandeiras-cartao")]
/// struct CardBrand {
///     #[record(id, sort)]
///     id: u64,
///     #[record(search, sort)]
///     descricao: String,
///     #[record(status)]
///     status: RecordStatus,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_record_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Markers collected from the `#[record(...)]` attributes of one field.
#[derive(Default)]
struct FieldFlags {
    id: bool,
    search: bool,
    sort: bool,
    status: bool,
}

fn derive_record_impl(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let resource = parse_resource_attr(&input)?.ok_or_else(|| {
        Error::new_spanned(&input, "missing #[record(resource = \"...\")] attribute")
    })?;

    let mut id_field: Option<Ident> = None;
    let mut status_field: Option<Ident> = None;
    let mut search_fields = Vec::new();
    let mut sort_fields = Vec::new();

    for field in named_fields(&input.data)? {
        let flags = parse_field_flags(field)?;
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "expected named field"))?;

        if flags.id {
            if id_field.is_some() {
                return Err(Error::new_spanned(field, "duplicate #[record(id)] field"));
            }
            id_field = Some(ident.clone());
        }
        if flags.status {
            if status_field.is_some() {
                return Err(Error::new_spanned(field, "duplicate #[record(status)] field"));
            }
            status_field = Some(ident.clone());
        }
        if flags.search {
            search_fields.push(ident.clone());
        }
        if flags.sort {
            sort_fields.push(ident);
        }
    }

    let id_field = id_field.ok_or_else(|| {
        Error::new(proc_macro2::Span::call_site(), "no field marked with #[record(id)]")
    })?;

    let sort_names: Vec<String> = sort_fields.iter().map(|f| f.to_string()).collect();

    let status_impl = status_field.map(|field| {
        quote! {
            fn status(&self) -> ::core::option::Option<::shopdesk::RecordStatus> {
                ::core::option::Option::Some(
                    ::shopdesk::types::StatusField::get_status(&self.#field),
                )
            }

            fn set_status(&mut self, status: ::shopdesk::RecordStatus) {
                ::shopdesk::types::StatusField::put_status(&mut self.#field, status);
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::shopdesk::Record for #name #ty_generics #where_clause {
            const RESOURCE: &'static str = #resource;

            const SORTABLE_FIELDS: &'static [&'static str] = &[#(#sort_names),*];

            fn id(&self) -> ::shopdesk::RecordId {
                ::shopdesk::RecordId::new(::std::string::ToString::to_string(&self.#id_field))
            }

            #[allow(unused_variables)]
            fn matches_search(&self, needle: &str) -> bool {
                let needle = needle.to_lowercase();
                false #(|| ::shopdesk::types::SearchField::contains_lowercase(&self.#search_fields, &needle))*
            }

            fn sort_key(&self, field: &str) -> ::core::option::Option<::shopdesk::SortKey> {
                match field {
                    #(#sort_names => ::core::option::Option::Some(
                        ::shopdesk::types::IntoSortKey::sort_key(&self.#sort_fields),
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }

            #status_impl
        }
    })
}

/// Parse the `resource = "..."` value from the struct's `#[record(...)]` attributes.
fn parse_resource_attr(input: &DeriveInput) -> Result<Option<String>> {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut resource = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("resource") {
                let value: LitStr = meta.value()?.parse()?;
                resource = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `resource`"))
            }
        })?;

        if resource.is_some() {
            return Ok(resource);
        }
    }
    Ok(None)
}

fn parse_field_flags(field: &Field) -> Result<FieldFlags> {
    let mut flags = FieldFlags::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                flags.id = true;
            } else if meta.path.is_ident("search") {
                flags.search = true;
            } else if meta.path.is_ident("sort") {
                flags.sort = true;
            } else if meta.path.is_ident("status") {
                flags.status = true;
            } else {
                return Err(meta.error(
                    "unsupported record field attribute, expected `id`, `search`, `sort` or `status`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(flags)
}

fn named_fields(data: &Data) -> Result<&syn::punctuated::Punctuated<Field, syn::token::Comma>> {
    match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            Fields::Unnamed(_) => Err(Error::new(
                proc_macro2::Span::call_site(),
                "tuple structs are not supported",
            )),
            Fields::Unit => Err(Error::new(
                proc_macro2::Span::call_site(),
                "unit structs are not supported",
            )),
        },
        Data::Enum(_) => Err(Error::new(proc_macro2::Span::call_site(), "enums are not supported")),
        Data::Union(_) => {
            Err(Error::new(proc_macro2::Span::call_site(), "unions are not supported"))
        },
    }
}
