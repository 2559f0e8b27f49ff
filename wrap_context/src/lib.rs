use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parse_macro_input, punctuated::Punctuated, token::Comma, Expr,
    Member::{Named, Unnamed},
};

/// Prefixes a message with the caller location: `[file:line:column] message`.
fn located(message: proc_macro2::TokenStream) -> proc_macro2::TokenStream {
    quote! {
        {
            let loc = std::panic::Location::caller();

            format!(
                "[{}:{}:{}] {}",
                loc.file(),
                loc.line(),
                loc.column(),
                #message
            )
        }
    }
}

fn with_located_context(expr: &Expr, print_args: bool) -> proc_macro2::TokenStream {
    let message = located(describe_expr(expr, print_args));

    quote! {
        {
            use anyhow::Context;

            #expr.with_context(|| #message)
        }
    }
}

fn tokens_to_string<T: ToTokens>(tokens: &T) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(" . ", ".")
}

/// Use this instead of `anyhow::anyhow!()`
#[proc_macro]
pub fn wohyna(input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(input);
    let message = located(quote!(format!(#args)));

    let output = quote! {
        {
            use anyhow::anyhow;

            anyhow!(#message)
        }
    };

    output.into()
}

/// Use this instead of `anyhow::bail!()`
#[proc_macro]
pub fn liab(input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(input);
    let message = located(quote!(format!(#args)));

    let output = quote! {
        {
            use anyhow::bail;

            bail!(#message)
        }
    };

    output.into()
}

/// Attaches `[location] call(arg, ..)` context, rendering every argument with
/// `crate::utils::describe_arg`. Arguments are evaluated again when the error
/// is built, so they must not be moved by the call.
#[proc_macro]
pub fn arg_context(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    with_located_context(&expr, true).into()
}

/// Attaches `[location] call(?)` context without touching the arguments.
#[proc_macro]
pub fn raw_context(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    with_located_context(&expr, false).into()
}

fn describe_args(args: &Punctuated<Expr, Comma>, print_args: bool) -> proc_macro2::TokenStream {
    if !print_args {
        return quote!(String::from("?"));
    }

    let arg_to_string_iter = args
        .iter()
        .map(|arg| quote!(crate::utils::describe_arg(&#arg)));

    quote! {
        <Vec<String>>::from([#(#arg_to_string_iter),*]).join(", ")
    }
}

fn describe_expr(expr: &Expr, print_args: bool) -> proc_macro2::TokenStream {
    match expr {
        Expr::Call(call) => {
            let func_name = describe_expr(&call.func, print_args);
            let args_list = describe_args(&call.args, print_args);

            quote!(format!("{}({})", #func_name, #args_list))
        }
        Expr::MethodCall(method) => {
            let receiver_name = describe_expr(&method.receiver, print_args);
            let method_name = method.method.to_string();
            let args_list = describe_args(&method.args, print_args);

            quote!(format!("{}.{}({})", #receiver_name, #method_name, #args_list))
        }
        Expr::Path(path) => {
            let path = tokens_to_string(path);
            quote!(format!("{}", #path))
        }
        Expr::Field(field) => {
            let base_name = describe_expr(&field.base, print_args);
            let member_name = match &field.member {
                Named(ident) => ident.to_string(),
                Unnamed(index) => index.index.to_string(),
            };

            quote!(format!("{}.{}", #base_name, #member_name))
        }
        Expr::Index(index) => {
            let base_name = describe_expr(&index.expr, print_args);
            let index = tokens_to_string(&index.index);

            quote!(format!("{}[{}]", #base_name, #index))
        }
        Expr::Reference(reference) => {
            let inner = describe_expr(&reference.expr, print_args);
            let prefix = if reference.mutability.is_some() {
                "&mut "
            } else {
                "&"
            };

            quote!(format!("{}{}", #prefix, #inner))
        }
        Expr::Paren(paren) => {
            let inner = describe_expr(&paren.expr, print_args);

            quote!(format!("({})", #inner))
        }
        Expr::Await(aw) => {
            let base_name = describe_expr(&aw.base, print_args);

            quote!(format!("{}.await", #base_name))
        }
        Expr::Macro(ma) => {
            let path = tokens_to_string(&ma.mac.path);
            let tokens = ma.mac.tokens.to_string();

            quote!(format!("{}!({})", #path, #tokens))
        }
        Expr::Try(tr) => describe_expr(&tr.expr, print_args),
        _ => syn::Error::new_spanned(expr, format!("Unexpected expression in macro: {:#?}", expr))
            .to_compile_error(),
    }
}
