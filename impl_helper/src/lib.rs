use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Field, Fields};

#[derive(Default)]
struct Helpers {
    get: bool,
    get_copy: bool,
    get_mut: bool,
    set: bool,
    upd: bool,
}

impl Helpers {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut helpers = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("helper")) {
            attr.parse_nested_meta(|meta| {
                let name = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.to_string())
                    .unwrap_or_default();

                match name.as_str() {
                    "get" => helpers.get = true,
                    "get_copy" => helpers.get_copy = true,
                    "get_mut" => helpers.get_mut = true,
                    "set" => helpers.set = true,
                    "upd" => helpers.upd = true,
                    "all" => {
                        helpers.get = true;
                        helpers.get_mut = true;
                        helpers.set = true;
                        helpers.upd = true;
                    }
                    _ => {
                        return Err(meta.error(
                            "Expected one of: get, get_copy, get_mut, set, upd or all",
                        ))
                    }
                }

                Ok(())
            })?;
        }

        if helpers.get && helpers.get_copy {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`get` and `get_copy` generate the same method name",
            ));
        }

        Ok(helpers)
    }

    fn methods(&self, field: &Field) -> Vec<proc_macro2::TokenStream> {
        let mut methods = Vec::default();

        let Some(field_name) = field.ident.as_ref() else {
            return methods;
        };
        let field_type = &field.ty;
        let suffixed = |suffix: &str| {
            syn::Ident::new(&format!("{}_{}", field_name, suffix), field_name.span())
        };

        if self.get {
            methods.push(quote! {
                pub fn #field_name(&self) -> &#field_type {
                    &self.#field_name
                }
            });
        }

        if self.get_copy {
            methods.push(quote! {
                pub fn #field_name(&self) -> #field_type {
                    self.#field_name
                }
            });
        }

        if self.get_mut {
            let fn_name = suffixed("mut");

            methods.push(quote! {
                pub fn #fn_name(&mut self) -> &mut #field_type {
                    &mut self.#field_name
                }
            });
        }

        if self.set {
            let fn_name = suffixed("set");

            methods.push(quote! {
                #[must_use = "method moves the value of self and returns the modified value"]
                pub fn #fn_name(mut self, value: #field_type) -> Self {
                    self.#field_name = value;
                    self
                }
            });
        }

        if self.upd {
            let fn_name = suffixed("update");

            methods.push(quote! {
                pub fn #fn_name(&mut self, value: #field_type) -> &mut Self {
                    self.#field_name = value;
                    self
                }
            });
        }

        methods
    }
}

/// Generates accessors for named fields marked with `#[helper(..)]`:
/// `get` (by reference), `get_copy` (by value), `get_mut` (`<field>_mut`),
/// `set` (`<field>_set`, builder style), `upd` (`<field>_update`) and `all`.
#[proc_macro_derive(ImplHelper, attributes(helper))]
pub fn impl_helper(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data_struct) = input.data else {
        return syn::Error::new(name.span(), "ImplHelper supports structs only")
            .to_compile_error()
            .into();
    };

    let mut methods = Vec::default();

    if let Fields::Named(fields) = data_struct.fields {
        for field in fields.named.iter() {
            match Helpers::parse(&field.attrs) {
                Ok(helpers) => methods.extend(helpers.methods(field)),
                Err(err) => return err.to_compile_error().into(),
            }
        }
    }

    TokenStream::from(quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#methods)*
        }
    })
}
