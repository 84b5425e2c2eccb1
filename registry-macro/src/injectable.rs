use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Error, Fields, Type};

pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    generate_injectable_impl(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn generate_injectable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::product_registry::Injectable for #struct_name #ty_generics #where_clause {
                        fn inject(
                            _container: &::product_registry::Container
                        ) -> ::product_registry::Result<Self> {
                            Ok(Self)
                        }
                    }
                });
            }
            other => {
                return Err(Error::new(
                    other.span(),
                    "#[derive(Injectable)] only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "#[derive(Injectable)] can only be applied to structs",
            ))
        }
    };

    let mut field_injections = Vec::with_capacity(fields.len());
    for field in fields {
        let field_name = &field.ident;
        let field_type = arc_inner_type(&field.ty).ok_or_else(|| {
            Error::new(
                field.ty.span(),
                "injectable fields must be `Arc<T>` or `Arc<dyn Trait>`",
            )
        })?;

        // `dyn Trait` goes through the container's trait bindings.
        let resolve_method = match field_type {
            Type::TraitObject(_) => quote!(resolve_trait),
            _ => quote!(resolve),
        };

        field_injections.push(quote! {
            #field_name: container.#resolve_method::<#field_type>()?
        });
    }

    Ok(quote! {
        impl #impl_generics ::product_registry::Injectable for #struct_name #ty_generics #where_clause {
            fn inject(
                container: &::product_registry::Container
            ) -> ::product_registry::Result<Self> {
                Ok(Self {
                    #(#field_injections),*
                })
            }
        }
    })
}

/// Extract `T` from `Arc<T>` (including `Arc<dyn Trait>`).
fn arc_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => match args.args.first()? {
            syn::GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}
