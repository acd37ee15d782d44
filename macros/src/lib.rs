//! Derive macros for the composable todo architecture
//!
//! `#[derive(Action)]` sorts the variants of an action enum into commands
//! and events:
//!
//! ```ignore
//! use composable_todo_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTodo { text: String },
//!
//!     #[event]
//!     TodoAdded { id: u64, text: String },
//! }
//!
//! assert!(TodoAction::AddTodo { text: "x".into() }.is_command());
//! assert_eq!(TodoAction::TodoAdded { id: 1, text: "x".into() }.name(), "TodoAdded");
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Variant, parse_macro_input};

/// Derive macro for action enums
///
/// Every variant must carry exactly one of `#[command]` or `#[event]`.
/// Generates:
/// - `is_command()` / `is_event()`
/// - `name()`, the variant name, for logging
///
/// Misuse is reported as a compile error on the offending item.
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Command,
    Event,
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut command_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data.variants {
        let role = role_of(variant)?;
        let pattern = pattern_for(variant);
        let name = variant.ident.to_string();

        let is_command = role == Role::Command;
        command_arms.push(quote! { #pattern => #is_command, });
        name_arms.push(quote! { #pattern => #name, });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            /// Returns `true` for commands
            #[must_use]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                }
            }

            /// Returns `true` for events
            #[must_use]
            pub const fn is_event(&self) -> bool {
                !self.is_command()
            }

            /// Variant name
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    })
}

fn role_of(variant: &Variant) -> syn::Result<Role> {
    let command = has_marker(&variant.attrs, "command");
    let event = has_marker(&variant.attrs, "event");

    match (command, event) {
        (true, false) => Ok(Role::Command),
        (false, true) => Ok(Role::Event),
        (true, true) => Err(syn::Error::new_spanned(
            variant,
            "variant cannot be both #[command] and #[event]",
        )),
        (false, false) => Err(syn::Error::new_spanned(
            variant,
            "variant needs #[command] or #[event]",
        )),
    }
}

fn pattern_for(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

fn has_marker(attrs: &[Attribute], marker: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(marker))
}
