use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Expr, ExprLit, FnArg, Ident, ItemTrait, Lit, LitInt, LitStr, MetaNameValue, PathArguments,
    ReturnType, Token, TraitItem, Type, TypeParamBound,
};

pub struct ActorInterface {
    item_trait: ItemTrait,
    attrs: ActorInterfaceAttrs,
    methods: Vec<InterfaceMethod>,
}

#[derive(Default)]
pub struct ActorInterfaceAttrs {
    id: Option<LitInt>,
    name: Option<LitStr>,
}

struct InterfaceMethod {
    name: String,
    id: Option<LitInt>,
    params: Vec<Type>,
    returns: MethodReturn,
}

enum MethodReturn {
    Deferred(Option<Type>),
    Direct(Option<Type>),
}

impl ActorInterface {
    pub fn new(attrs: ActorInterfaceAttrs, mut item_trait: ItemTrait) -> syn::Result<Self> {
        if !item_trait.generics.params.is_empty() {
            return Err(syn::Error::new(
                item_trait.generics.span(),
                "generic traits cannot be declared as actor interfaces",
            ));
        }

        let mut errors: Vec<syn::Error> = Vec::new();
        let mut methods = Vec::new();
        for item in &mut item_trait.items {
            let TraitItem::Fn(item_fn) = item else {
                continue;
            };
            match InterfaceMethod::extract(item_fn) {
                Ok(method) => methods.push(method),
                Err(err) => errors.push(err),
            }
        }

        if let Err(err) = check_method_ids(&methods, &item_trait.ident) {
            errors.push(err);
        }

        match errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        }) {
            Some(err) => Err(err),
            None => Ok(ActorInterface {
                item_trait,
                attrs,
                methods,
            }),
        }
    }
}

impl ToTokens for ActorInterface {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self {
            item_trait,
            attrs,
            methods,
        } = self;
        let vis = &item_trait.vis;
        let trait_ident = &item_trait.ident;
        let interface_ident = format_ident!("{}Interface", trait_ident);
        let doc = format!("Actor interface declaration for [`{trait_ident}`].");

        let name = match &attrs.name {
            Some(name) => quote! { #name },
            None => quote! {
                ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#trait_ident))
            },
        };
        let id = match &attrs.id {
            Some(id) => quote! { ::actor_interfaces::InterfaceId::new(#id) },
            None => quote! {
                ::actor_interfaces::InterfaceId::from_name(
                    <Self as ::actor_interfaces::ActorInterface>::NAME
                )
            },
        };
        let methods = methods.iter().map(InterfaceMethod::descriptor_tokens);

        tokens.extend(quote! {
            #[allow(async_fn_in_trait)]
            #item_trait

            #[doc = #doc]
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            #vis struct #interface_ident;

            #[automatically_derived]
            impl ::actor_interfaces::ActorInterface for #interface_ident {
                const ID: ::actor_interfaces::InterfaceId = #id;
                const NAME: &'static str = #name;

                fn descriptor() -> ::actor_interfaces::InterfaceDescriptor {
                    ::actor_interfaces::InterfaceDescriptor::new(
                        <Self as ::actor_interfaces::ActorInterface>::ID,
                        ::actor_interfaces::TypeDescriptor::named(
                            <Self as ::actor_interfaces::ActorInterface>::NAME
                        ),
                    )
                    #( .method(#methods) )*
                }
            }

            const _: () = {
                #[::actor_interfaces::interface::_internal::linkme::distributed_slice(
                    ::actor_interfaces::interface::_internal::ACTOR_INTERFACES
                )]
                #[linkme(crate = ::actor_interfaces::interface::_internal::linkme)]
                static REG: ::actor_interfaces::interface::_internal::LinkedInterface =
                    ::actor_interfaces::interface::_internal::LinkedInterface {
                        id: <#interface_ident as ::actor_interfaces::ActorInterface>::ID,
                        name: <#interface_ident as ::actor_interfaces::ActorInterface>::NAME,
                        descriptor:
                            <#interface_ident as ::actor_interfaces::ActorInterface>::descriptor,
                    };
            };
        });
    }
}

impl Parse for ActorInterfaceAttrs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut attrs = ActorInterfaceAttrs::default();
        for meta in Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)? {
            if meta.path.is_ident("id") {
                attrs.id = Some(expect_int(&meta.value)?);
            } else if meta.path.is_ident("name") {
                attrs.name = Some(expect_str(&meta.value)?);
            } else {
                return Err(syn::Error::new(meta.path.span(), "expected `id` or `name`"));
            }
        }

        Ok(attrs)
    }
}

impl InterfaceMethod {
    fn extract(item_fn: &mut syn::TraitItemFn) -> syn::Result<Self> {
        let mut id = None;
        let mut attr_error = None;
        item_fn.attrs.retain(|attr| {
            if !attr.path().is_ident("method") {
                return true;
            }
            match attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated) {
                Ok(metas) => {
                    for meta in metas {
                        if meta.path.is_ident("id") {
                            match expect_int(&meta.value) {
                                Ok(lit) => id = Some(lit),
                                Err(err) => attr_error = Some(err),
                            }
                        } else {
                            attr_error = Some(syn::Error::new(meta.path.span(), "expected `id`"));
                        }
                    }
                }
                Err(err) => attr_error = Some(err),
            }
            false
        });
        if let Some(err) = attr_error {
            return Err(err);
        }

        let sig = &item_fn.sig;
        if !sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                sig.generics.span(),
                "actor interface methods cannot be generic",
            ));
        }
        match sig.inputs.first() {
            Some(FnArg::Receiver(_)) => {}
            _ => {
                return Err(syn::Error::new(
                    sig.span(),
                    "actor interface methods must take &self or &mut self",
                ))
            }
        }

        let params = sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                FnArg::Receiver(_) => None,
                FnArg::Typed(pat_type) => Some(pat_type.ty.as_ref()),
            })
            .map(|ty| match ty {
                Type::Reference(_) | Type::ImplTrait(_) => Err(syn::Error::new(
                    ty.span(),
                    "actor interface parameters must be owned, nameable types",
                )),
                ty => Ok(ty.clone()),
            })
            .collect::<syn::Result<_>>()?;

        let output = match &sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) if is_unit(ty) => None,
            ReturnType::Type(_, ty) => Some(ty.as_ref()),
        };
        let returns = if sig.asyncness.is_some() {
            MethodReturn::Deferred(output.cloned())
        } else {
            match output {
                Some(Type::ImplTrait(impl_trait)) => {
                    let future_output = impl_trait.bounds.iter().find_map(future_output);
                    match future_output {
                        Some(output) => MethodReturn::Deferred(output.filter(|ty| !is_unit(ty))),
                        None => {
                            return Err(syn::Error::new(
                                impl_trait.span(),
                                "only `impl Future<Output = T>` is supported as an opaque return type",
                            ))
                        }
                    }
                }
                output => MethodReturn::Direct(output.cloned()),
            }
        };

        Ok(InterfaceMethod {
            name: sig.ident.unraw().to_string(),
            id,
            params,
            returns,
        })
    }

    fn descriptor_tokens(&self) -> TokenStream {
        let Self {
            name,
            id,
            params,
            returns,
        } = self;
        let id = match id {
            Some(id) => quote! { ::actor_interfaces::MethodId::new(#id) },
            None => quote! { ::actor_interfaces::MethodId::from_name(#name) },
        };
        let returns = match returns {
            MethodReturn::Deferred(Some(ty)) => quote! {
                ::actor_interfaces::TypeDescriptor::deferred(::std::option::Option::Some(
                    ::actor_interfaces::TypeDescriptor::of::<#ty>()
                ))
            },
            MethodReturn::Deferred(None) => quote! {
                ::actor_interfaces::TypeDescriptor::deferred(::std::option::Option::None)
            },
            MethodReturn::Direct(Some(ty)) => quote! {
                ::actor_interfaces::TypeDescriptor::of::<#ty>()
            },
            MethodReturn::Direct(None) => quote! {
                ::actor_interfaces::TypeDescriptor::unit()
            },
        };

        quote! {
            ::actor_interfaces::MethodDescriptor::new(#name, #id)
                #( .param(::actor_interfaces::TypeDescriptor::of::<#params>()) )*
                .returns(#returns)
        }
    }

    /// The id this method will be registered under, for collision checks.
    fn resolved_id(&self) -> syn::Result<u32> {
        match &self.id {
            Some(lit) => lit.base10_parse(),
            None => Ok(fnv1a(self.name.as_bytes()) as u32),
        }
    }
}

fn check_method_ids(methods: &[InterfaceMethod], trait_ident: &Ident) -> syn::Result<()> {
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for method in methods {
        let id = method.resolved_id()?;
        if let Some(first) = seen.insert(id, &method.name) {
            let span = method
                .id
                .as_ref()
                .map(|lit| lit.span())
                .unwrap_or_else(|| trait_ident.span());
            return Err(syn::Error::new(
                span,
                format!(
                    "methods `{first}` and `{}` resolve to the same method id {id}",
                    method.name
                ),
            ));
        }
    }

    Ok(())
}

/// Extracts `T` from a `Future<Output = T>` bound. `Some(None)` means a future
/// bound without an `Output` binding.
fn future_output(bound: &TypeParamBound) -> Option<Option<Type>> {
    let TypeParamBound::Trait(trait_bound) = bound else {
        return None;
    };
    let segment = trait_bound.path.segments.last()?;
    if segment.ident != "Future" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Some(None);
    };
    Some(args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::AssocType(assoc) if assoc.ident == "Output" => Some(assoc.ty.clone()),
        _ => None,
    }))
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn expect_int(expr: &Expr) -> syn::Result<LitInt> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => Ok(lit.clone()),
        _ => Err(syn::Error::new(expr.span(), "expected an integer literal")),
    }
}

fn expect_str(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        _ => Err(syn::Error::new(expr.span(), "expected a string literal")),
    }
}

/// Mirrors `actor_interfaces::type_hash::compute_hash_fnv1a`.
fn fnv1a(bytes: &[u8]) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ *byte as u64).wrapping_mul(FNV_PRIME)
    })
}
