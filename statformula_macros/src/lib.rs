use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

fn missing_arg_error_msg(arg_name: &str, arg_pos: usize, fn_name: &str) -> String {
    format!(
        "missing argument {} ('{}') in call to {}",
        arg_pos, arg_name, fn_name
    )
}

/// Rewrites a typed numeric function into the registry signature.
///
/// ```ignore
/// #[formula_fn]
/// fn min(a: f64, b: f64) -> Result<f64, String> {
///     Ok(a.min(b))
/// }
/// ```
///
/// becomes `fn min(args: &[f64]) -> Result<f64, String>` where each declared
/// parameter is pulled from `args` by position, erroring when the slice is
/// too short. Extra values in `args` are ignored.
#[proc_macro_attribute]
pub fn formula_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut arg_extractions = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        if let FnArg::Typed(PatType { pat, ty, .. }) = arg {
            let arg_name = match **pat {
                syn::Pat::Ident(ref ident) => &ident.ident,
                _ => panic!("Unsupported pattern"),
            };

            let err_msg = missing_arg_error_msg(&arg_name.to_string(), i, &fn_name.to_string());

            let extract_code = match **ty {
                Type::Path(ref type_path) => {
                    let type_ident = &type_path.path.segments.last().unwrap().ident;
                    match type_ident.to_string().as_str() {
                        "f64" => quote! {
                            let #arg_name = match args.get(#i) {
                                Some(value) => *value,
                                None => return Err(#err_msg.to_string()),
                            };
                        },
                        _ => panic!("Unsupported type {}", type_ident),
                    }
                }
                _ => panic!("Unsupported argument type"),
            };

            arg_extractions.push(extract_code);
        } else {
            panic!("Unsupported receiver argument");
        }
    }

    let expanded = quote! {
        #fn_vis fn #fn_name(args: &[f64]) #fn_output {
            #(#arg_extractions)*
            #fn_body
        }
    };

    TokenStream::from(expanded)
}
