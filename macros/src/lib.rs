use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, Meta, Token, parse_macro_input};

/// Derive `envbind::Record` and `envbind::Bindable` for a struct with named fields
///
/// Fields take a `#[field(...)]` attribute:
/// - `env = "VAR"` binds the field to an environment variable
/// - `required` or `required = "yes"` fails the bind when the variable is absent
/// - `doc = "..."` describes the field (falls back to the field's doc comment)
/// - `nested` asserts at compile time that the field holds a record
/// - `skip` leaves the field out entirely, for types that cannot be bound
///
/// Record fields are always bound recursively, with or without an attribute.
/// Other fields without `env` are never touched.
#[proc_macro_derive(EnvRecord, attributes(field))]
pub fn derive_env_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let record_name = struct_name.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "EnvRecord does not support generic structs",
        ));
    }

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvRecord only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvRecord only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    let mut slot_arms = Vec::new();
    let mut nested_checks = Vec::new();

    for field in fields {
        let config = parse_field_config(&field.attrs)?;
        if config.skip {
            continue;
        }

        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_type = &field.ty;
        let name_str = field_name.to_string();
        let index = slot_arms.len();

        let env_call = config.env.as_ref().map(|env| quote! { .env(#env) });
        let required_call = config
            .required
            .as_ref()
            .map(|required| quote! { .required(#required) });
        let doc_call = config.doc.as_ref().map(|doc| quote! { .doc(#doc) });

        if config.nested {
            nested_checks.push(quote_spanned! {field_type.span()=>
                ::envbind::assert_nested::<#field_type>();
            });
        }

        descriptors.push(quote! {
            ::envbind::FieldDescriptor::new(
                #name_str,
                <#field_type as ::envbind::Bindable>::kind(),
            )
            #env_call
            #required_call
            #doc_call
        });

        slot_arms.push(quote! {
            #index => ::core::option::Option::Some(
                ::envbind::Bindable::slot(&mut self.#field_name)
            ),
        });
    }

    Ok(quote! {
        const _: fn() = || {
            #(#nested_checks)*
        };

        impl ::envbind::NestedRecord for #struct_name {}

        impl ::envbind::Record for #struct_name {
            fn shape(&self) -> &'static ::envbind::Shape {
                <Self as ::envbind::Record>::describe()
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::envbind::Slot<'_>> {
                match index {
                    #(#slot_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn describe() -> &'static ::envbind::Shape {
                static SHAPE: ::std::sync::OnceLock<::envbind::Shape> =
                    ::std::sync::OnceLock::new();
                SHAPE.get_or_init(|| {
                    ::envbind::Shape::new(#record_name, ::std::vec![#(#descriptors),*])
                })
            }
        }

        impl ::envbind::Bindable for #struct_name {
            fn kind() -> ::envbind::FieldKind {
                ::envbind::FieldKind::Record(<Self as ::envbind::Record>::describe())
            }

            fn slot(&mut self) -> ::envbind::Slot<'_> {
                ::envbind::Slot::Record(self)
            }
        }
    })
}

#[derive(Debug, Default)]
struct FieldConfig {
    env: Option<String>,
    required: Option<String>,
    doc: Option<String>,
    nested: bool,
    skip: bool,
}

/// Parse #[field(env = "X", required, doc = "Y", nested)] syntax
///
/// A field without the attribute gets the default config.
fn parse_field_config(attrs: &[Attribute]) -> syn::Result<FieldConfig> {
    let mut field_attrs = attrs.iter().filter(|attr| attr.path().is_ident("field"));
    let Some(field_attr) = field_attrs.next() else {
        return Ok(FieldConfig {
            doc: doc_comment(attrs),
            ..Default::default()
        });
    };
    if let Some(duplicate) = field_attrs.next() {
        return Err(syn::Error::new_spanned(
            duplicate,
            "duplicate field attribute, combine the options into one #[field(...)]",
        ));
    }

    let list = match &field_attr.meta {
        Meta::List(list) => list,
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field attribute must be a list: #[field(env = \"...\", ...)]",
            ));
        }
    };

    let mut config = FieldConfig::default();

    list.parse_nested_meta(|meta| {
        let key = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("expected identifier"))?
            .to_string();

        match key.as_str() {
            "env" => {
                let value: syn::LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(syn::Error::new_spanned(value, "env must not be empty"));
                }
                config.env = Some(value.value());
            }
            "doc" => {
                let value: syn::LitStr = meta.value()?.parse()?;
                config.doc = Some(value.value().trim().to_string());
            }
            "required" => {
                // The text is kept as written and validated when the field is bound
                config.required = if meta.input.peek(Token![=]) {
                    let expr: Expr = meta.value()?.parse()?;
                    Some(annotation_text(&expr)?)
                } else {
                    Some("true".to_string())
                };
            }
            "nested" => config.nested = true,
            "skip" => config.skip = true,
            _ => return Err(meta.error(format!("unknown field option `{}`", key))),
        }

        Ok(())
    })?;

    if config.skip {
        if config.env.is_some() || config.nested || config.required.is_some() {
            return Err(syn::Error::new_spanned(
                field_attr,
                "skip cannot be combined with other field options",
            ));
        }
        return Ok(config);
    }

    if config.nested && config.env.is_some() {
        return Err(syn::Error::new_spanned(
            field_attr,
            "nested fields are bound through their own fields and cannot take env",
        ));
    }

    if config.env.is_none() && !config.nested {
        return Err(syn::Error::new_spanned(
            field_attr,
            "field must have env = \"VAR_NAME\", be marked nested, or be skipped",
        ));
    }

    if config.doc.is_none() {
        config.doc = doc_comment(attrs);
    }

    Ok(config)
}

fn annotation_text(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            _ => Err(syn::Error::new_spanned(
                expr,
                "required must be a string or bool literal",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            expr,
            "required must be a string or bool literal",
        )),
    }
}

/// Joins `///` doc comment lines into one description
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(lit) => match &lit.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
