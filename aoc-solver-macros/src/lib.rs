//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, Ident, LitInt, LitStr, parse_macro_input};

/// Derive `Solver` from a set of `PartSolver<N>` impls
///
/// `#[aoc_solver(max_parts = N)]` is required. The generated `solve_part`
/// forwards part `k` in `1..=N` to `<Self as PartSolver<k>>::solve` and
/// returns `SolveError::PartNotImplemented` for anything else.
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Day18;
///
/// impl PartSolver<1> for Day18 { /* ... */ }
/// impl PartSolver<2> for Day18 { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc_solver"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "AocSolver requires #[aoc_solver(max_parts = N)]")
        })?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let lit: LitInt = meta.value()?.parse()?;
            max_parts = Some(lit.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver attribute"))
        }
    })?;

    let max_parts =
        max_parts.ok_or_else(|| syn::Error::new_spanned(attr, "missing `max_parts`"))?;
    if max_parts == 0 {
        return Err(syn::Error::new_spanned(attr, "`max_parts` must be at least 1"));
    }

    let arms = (1..=max_parts).map(|part| {
        quote! {
            #part => <Self as ::aoc_solver::PartSolver<#part>>::solve(shared),
        }
    });

    Ok(quote! {
        impl ::aoc_solver::Solver for #name {
            const PARTS: u8 = #max_parts;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::aoc_solver::SolveError::PartNotImplemented(part),
                    ),
                }
            }
        }
    })
}

/// Register a solver with the plugin system
///
/// # Attributes
///
/// - `year`: required, the Advent of Code year
/// - `day`: required, 1-25
/// - `tags`: optional list of string literals used for filtering
///
/// The type must implement `Solver`; the generated code checks this so a
/// missing impl is reported against the struct rather than deep inside
/// `inventory`.
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2017, day = 18, tags = ["vm"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "AutoRegisterSolver requires #[aoc(year = .., day = ..)]")
        })?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<LitStr> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            let value: u8 = lit.base10_parse()?;
            if !(1..=25).contains(&value) {
                return Err(syn::Error::new_spanned(lit, "day must be in 1..=25"));
            }
            day = Some(value);
        } else if meta.path.is_ident("tags") {
            let content;
            let _ = meta.value()?;
            syn::bracketed!(content in meta.input);
            while !content.is_empty() {
                tags.push(content.parse()?);
                if content.is_empty() {
                    break;
                }
                content.parse::<syn::Token![,]>()?;
            }
        } else {
            return Err(meta.error("unsupported aoc attribute"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(attr, "missing `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(attr, "missing `day`"))?;
    let check = Ident::new(&format!("__MustImplementSolver{}", name), Span::call_site());

    Ok(quote! {
        const _: () = {
            trait #check: ::aoc_solver::Solver {}
            impl #check for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}
