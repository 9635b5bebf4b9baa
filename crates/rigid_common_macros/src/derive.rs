use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Expr, Ident, Lit, LitStr, Variant};

/// Parse the derive input and make sure it's an enum, on failure the returned `Err` contains the tokens to emit
fn parse_enum(item: TokenStream) -> Result<(Ident, DataEnum), TokenStream> {
    let input_parsed = match syn::parse2::<DeriveInput>(item) {
        Ok(derived_input) => derived_input,
        Err(err) => return Err(err.to_compile_error()),
    };

    match input_parsed.data {
        Data::Enum(body) => Ok((input_parsed.ident, body)),
        _ => Err(quote!( compile_error!("Not an enum"); )),
    }
}

/// Get the string used for a variant, either from the `#[attr_name("...")]` attribute, or the variant's identifier
fn variant_name(variant: &Variant, attr_name: &str) -> TokenStream {
    variant.attrs.iter()
        .filter(|attr| attr.path().get_ident().map_or(false, |ident| ident == attr_name))
        .map(|attr| attr.parse_args::<LitStr>().map_or_else(|err| err.to_compile_error(), |parsed| {
            let val = parsed.value();
            quote!(#val)
        }))
        .next()
        .unwrap_or_else(|| {
            let val = variant.ident.to_string();
            quote!(#val)
        })
}

/// Get the index of a variant from its discriminant, or `next` when it has none
fn variant_index(variant: &Variant, next: usize) -> Result<usize, TokenStream> {
    let expr = match &variant.discriminant {
        Some((_, expr)) => expr,
        None => return Ok(next),
    };

    let int = match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int,
            _ => return Err(quote!(compile_error!("Only integer descriminants are supported by EnumFromIndex"))),
        },
        _ => return Err(quote!(compile_error!("Only integer descriminants are supported by EnumFromIndex"))),
    };

    match int.base10_parse::<usize>() {
        Ok(idx) => Ok(idx),
        Err(err) => {
            let msg = err.to_string();
            Err(quote!(compile_error!(#msg);))
        }
    }
}

pub fn enum_count(item: TokenStream) -> TokenStream {
    let (ident, body) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };
    let count = body.variants.len();

    quote!{
        impl rigid_base::EnumCountT for #ident {
            const COUNT: usize = #count;
        }
    }
}

pub fn enum_from_index(item: TokenStream) -> TokenStream {
    let (ident, body) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let mut variants = Vec::with_capacity(body.variants.len());
    let mut indices = Vec::with_capacity(body.variants.len());
    let mut next = 0;
    for variant in &body.variants {
        let idx = match variant_index(variant, next) {
            Ok(idx) => idx,
            Err(err) => return err,
        };

        variants.push(variant.ident.clone());
        indices.push(idx);
        next = idx + 1;
    }

    quote!{
        impl rigid_base::EnumFromIndexT for #ident {
            fn from_idx(idx: usize) -> Option<Self> {
                match idx {
                    #(#indices => Some(Self::#variants),)*
                    _ => None,
                }
            }

            fn from_idx_or(idx: usize, default: Self) -> Self {
                match idx {
                    #(#indices => Self::#variants,)*
                    _ => default,
                }
            }

            unsafe fn from_idx_unchecked(idx: usize) -> Self {
                match idx {
                    #(#indices => Self::#variants,)*
                    _ => unreachable!(),
                }
            }
        }
    }
}

pub fn enum_display(item: TokenStream) -> TokenStream {
    let (ident, body) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let members: Vec<_> = body.variants.iter().map(|variant| variant.ident.clone()).collect();
    let names: Vec<_> = body.variants.iter().map(|variant| variant_name(variant, "display")).collect();

    quote!{
        impl core::fmt::Display for #ident {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    #(#ident::#members => f.write_str(#names),)*
                }
            }
        }
    }
}

pub fn enum_from_name(item: TokenStream) -> TokenStream {
    let (ident, body) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let members: Vec<_> = body.variants.iter().map(|variant| variant.ident.clone()).collect();
    let names: Vec<_> = body.variants.iter().map(|variant| variant_name(variant, "parse_name")).collect();

    quote!{
        impl rigid_base::EnumFromNameT for #ident {
            fn parse(s: &str) -> Option<Self> {
                match s {
                    #(#names => Some(Self::#members),)*
                    _ => None,
                }
            }
        }
    }
}
