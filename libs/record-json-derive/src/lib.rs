use proc_macro::TokenStream;
use quote::quote;
use syn::{
    FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, PathArguments, ReturnType, Type,
    Visibility, parse_macro_input,
};

/// Attribute macro enumerating the public methods of an inherent `impl`
/// block and implementing `record_json::Record` from them.
///
/// Every `pub fn` is listed. Those shaped like property accessors also get
/// an invoker:
///
/// - `pub fn get_*(&self) -> T` / `pub fn is_*(&self) -> T`, with
///   `T: ToValue` (or `Result<T, E>`, `E: Display`)
/// - `pub fn set_*(&mut self, value: T)`, with an owned `T: FromValue`
///   (the return value is ignored; an `Err` counts as a failure)
///
/// A `pub fn new() -> Self` (or `-> Result<Self, E>`) becomes the
/// constructor used by `from_json`.
///
/// Options:
///
/// - `type_name = "..."`: identity written as the type tag
/// - `default`: construct through `Default` instead of `new`
/// - `extends = Base, via = field`: inherit the methods of the embedded
///   record `Base` stored in `self.field`
///
/// Methods marked `#[record(skip)]` are not enumerated, which is needed for
/// accessor-named methods whose types cannot be converted.
///
/// # Example
///
/// ```ignore
/// #[record(type_name = "geometry.Point", default)]
/// impl Point {
///     pub fn get_x(&self) -> i32 { self.x }
///     pub fn set_x(&mut self, x: i32) { self.x = x; }
/// }
/// ```
#[proc_macro_attribute]
pub fn record(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut opts = RecordArgs::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("type_name") {
            opts.type_name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("default") {
            opts.default = true;
        } else if meta.path.is_ident("extends") {
            opts.extends = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("via") {
            opts.via = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unknown record option (expected type_name, default, extends, via)"));
        }
        Ok(())
    });
    parse_macro_input!(args with parser);

    let item = parse_macro_input!(input as ItemImpl);
    match record_impl(opts, item) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

#[derive(Default)]
struct RecordArgs {
    type_name: Option<LitStr>,
    default: bool,
    extends: Option<Type>,
    via: Option<Ident>,
}

fn record_impl(opts: RecordArgs, mut item: ItemImpl) -> Result<TokenStream, syn::Error> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[record] only supports inherent impl blocks",
        ));
    }

    let self_ident = type_ident_name(&item.self_ty);
    let mut method_tokens = Vec::new();
    let mut constructor = None;

    for impl_item in &mut item.items {
        let ImplItem::Fn(func) = impl_item else {
            continue;
        };
        let skip = take_skip_attr(func)?;
        if skip || !matches!(func.vis, Visibility::Public(_)) {
            continue;
        }
        if func.sig.ident == "new" && func.sig.receiver().is_none() && func.sig.inputs.is_empty() {
            constructor = constructor_kind(&func.sig.output, self_ident.as_deref());
        }
        method_tokens.push(method_info(func));
    }

    let inherit = match (&opts.extends, &opts.via) {
        (Some(base), Some(field)) => quote! {
            __table.inherit(
                <#base as ::record_json::Record>::methods(),
                |r: &Self| &r.#field,
                |r: &mut Self| &mut r.#field,
            );
        },
        (None, None) => quote! {},
        (Some(base), None) => {
            return Err(syn::Error::new_spanned(
                base,
                "extends requires via = <field holding the base record>",
            ));
        }
        (None, Some(field)) => {
            return Err(syn::Error::new_spanned(field, "via requires extends = <base record>"));
        }
    };

    let type_name_fn = opts.type_name.map(|name| {
        quote! {
            fn type_name() -> &'static str {
                #name
            }
        }
    });

    let instantiate_fn = if opts.default {
        Some(quote! {
            fn instantiate() -> Result<Self, ::record_json::ConvertError> {
                Ok(<Self as ::core::default::Default>::default())
            }
        })
    } else {
        match constructor {
            Some(Constructor::Plain) => Some(quote! {
                fn instantiate() -> Result<Self, ::record_json::ConvertError> {
                    Ok(Self::new())
                }
            }),
            Some(Constructor::Fallible) => Some(quote! {
                fn instantiate() -> Result<Self, ::record_json::ConvertError> {
                    Self::new().map_err(|e| ::record_json::ConvertError::Instantiate {
                        record: <Self as ::record_json::Record>::type_name().to_string(),
                        reason: e.to_string(),
                    })
                }
            }),
            None => None,
        }
    };

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let expanded = quote! {
        #item

        impl #impl_generics ::record_json::Record for #self_ty #where_clause {
            #type_name_fn

            fn methods() -> ::record_json::MethodTable<Self> {
                let mut __table: ::record_json::MethodTable<Self> = ::record_json::MethodTable::new();
                #inherit
                #(__table.push(#method_tokens);)*
                __table
            }

            #instantiate_fn
        }
    };

    Ok(TokenStream::from(expanded))
}

enum Constructor {
    Plain,
    Fallible,
}

/// Removes `#[record(...)]` from a method, reporting whether it asked to be skipped.
fn take_skip_attr(func: &mut ImplItemFn) -> Result<bool, syn::Error> {
    let mut skip = false;
    for attr in &func.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown method option (expected skip)"))
            }
        })?;
    }
    func.attrs.retain(|attr| !attr.path().is_ident("record"));
    Ok(skip)
}

fn method_info(func: &ImplItemFn) -> proc_macro2::TokenStream {
    let ident = &func.sig.ident;
    let name = ident.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name).to_string();

    let receiver = match func.sig.receiver() {
        None => quote! { ::record_json::Receiver::Static },
        Some(r) => match &*r.ty {
            Type::Reference(reference) if reference.mutability.is_some() => {
                quote! { ::record_json::Receiver::Mut }
            }
            Type::Reference(_) => quote! { ::record_json::Receiver::Ref },
            _ => quote! { ::record_json::Receiver::Owned },
        },
    };
    let params: Vec<&Type> = func
        .sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat) => Some(&*pat.ty),
            FnArg::Receiver(_) => None,
        })
        .collect();
    let arity = params.len();
    let returns = match &func.sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => !is_unit(ty),
    };

    let plain = func.sig.asyncness.is_none()
        && func.sig.unsafety.is_none()
        && func.sig.generics.params.is_empty();
    let fallible = matches!(&func.sig.output, ReturnType::Type(_, ty) if is_result(ty));

    let is_getter = plain
        && arity == 0
        && returns
        && matches!(func.sig.receiver(), Some(r) if is_ref_receiver(&r.ty, false))
        && (name.starts_with("get") || name.starts_with("is"));
    let is_setter = plain
        && arity == 1
        && matches!(func.sig.receiver(), Some(r) if is_ref_receiver(&r.ty, true))
        && name.starts_with("set")
        && is_owned(params[0]);

    if is_getter {
        if fallible {
            quote! {
                ::record_json::MethodInfo::fallible_getter(#name, |r: &Self| {
                    r.#ident().map(|v| ::record_json::ToValue::to_value(&v))
                })
            }
        } else {
            quote! {
                ::record_json::MethodInfo::getter(#name, |r: &Self| {
                    ::record_json::ToValue::to_value(&r.#ident())
                })
            }
        }
    } else if is_setter {
        let param = params[0];
        if fallible {
            quote! {
                ::record_json::MethodInfo::fallible_setter(#name, |r: &mut Self, v: #param| {
                    r.#ident(v)
                })
            }
        } else {
            quote! {
                ::record_json::MethodInfo::setter(#name, |r: &mut Self, v: #param| {
                    r.#ident(v);
                })
            }
        }
    } else {
        quote! {
            ::record_json::MethodInfo::opaque(#name, #receiver, #arity, #returns)
        }
    }
}

fn constructor_kind(output: &ReturnType, self_ident: Option<&str>) -> Option<Constructor> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };
    if is_self(ty, self_ident) {
        return Some(Constructor::Plain);
    }
    let Type::Path(type_path) = &**ty else {
        return None;
    };
    let last = type_path.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first() {
        Some(syn::GenericArgument::Type(ok)) if is_self(ok, self_ident) => Some(Constructor::Fallible),
        _ => None,
    }
}

fn is_self(ty: &Type, self_ident: Option<&str>) -> bool {
    match type_ident_name(ty) {
        Some(name) => name == "Self" || Some(name.as_str()) == self_ident,
        None => false,
    }
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn is_result(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.path.segments.last().is_some_and(|seg| {
            seg.ident == "Result" && matches!(seg.arguments, PathArguments::AngleBracketed(_))
        }),
        _ => false,
    }
}

fn is_ref_receiver(ty: &Type, mutable: bool) -> bool {
    matches!(ty, Type::Reference(r) if r.mutability.is_some() == mutable)
}

/// Setter parameters must be owned so they can be built from a JSON value.
fn is_owned(ty: &Type) -> bool {
    !matches!(
        ty,
        Type::Reference(_) | Type::ImplTrait(_) | Type::TraitObject(_) | Type::Ptr(_)
    )
}

/// Extract the last path segment ident name from a type (e.g. `Point`, `Self`).
fn type_ident_name(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .map(|seg| seg.ident.to_string())
    } else {
        None
    }
}
