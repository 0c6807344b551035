//! Generic-type instantiation for Rust templates.
//!
//! A template declares a placeholder type, for example
//!
//! ```text
//! type T = u8;
//!
//! pub fn sum(values: &[T]) -> T {
//!     values.iter().fold(T::default(), |acc, v| acc + *v)
//! }
//! ```
//!
//! and every requested concrete type yields one copy of the file with the
//! declaration removed and `T` replaced. Items that declare their own generic
//! parameter named `T` keep it untouched.

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    Expr, ExprPath, GenericArgument, Generics, Ident, ImplItemFn, ImplItemType, Item, ItemEnum,
    ItemFn, ItemImpl, ItemStruct, ItemTrait, ItemType, ItemUnion, Path, PathArguments,
    PathSegment, ReturnType, Token, TraitItemFn, TraitItemType, Type, TypePath, parse_quote,
    punctuated::Punctuated,
    visit_mut::{self, VisitMut},
};
use tracing::debug;

use stencil_core::{
    application::ports::Transform,
    domain::{Diagnostic, GeneratedSource, GenerationResult, SourceDocument},
};

/// Placeholder identifier used when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "T";

/// Instantiates a placeholder type once per concrete type.
#[derive(Debug, Clone)]
pub struct Specialize {
    placeholder: String,
    types: Vec<String>,
}

impl Specialize {
    pub const NAME: &'static str = "specialize";

    pub fn new<I, S>(placeholder: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            placeholder: placeholder.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Specialize the default `T` placeholder.
    pub fn for_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DEFAULT_PLACEHOLDER, types)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Validate configuration against the template, collecting every problem.
    fn prepare(&self, file: &syn::File) -> Result<(Ident, Vec<(String, Type)>), Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();

        let placeholder = match syn::parse_str::<Ident>(&self.placeholder) {
            Ok(ident) => Some(ident),
            Err(_) => {
                diagnostics.push(Diagnostic::new(format!(
                    "placeholder `{}` is not a valid identifier",
                    self.placeholder
                )));
                None
            }
        };

        if self.types.is_empty() {
            diagnostics.push(
                Diagnostic::new("no concrete types requested")
                    .with_hint("Pass the types to instantiate, e.g. --types i32,f64"),
            );
        }

        let mut concrete: Vec<(String, Type)> = Vec::with_capacity(self.types.len());
        for raw in &self.types {
            match syn::parse_str::<Type>(raw) {
                Ok(ty) => {
                    let name = output_name(&ty);
                    let clash = concrete
                        .iter()
                        .find(|(other, other_ty)| other.eq_ignore_ascii_case(&name) && *other_ty != ty)
                        .map(|(_, other_ty)| other_ty.to_token_stream().to_string());
                    if name.is_empty() {
                        diagnostics.push(Diagnostic::new(format!(
                            "type `{raw}` has no identifier characters to name an output"
                        )));
                    } else if let Some(other_ty) = clash {
                        diagnostics.push(
                            Diagnostic::new(format!(
                                "types `{other_ty}` and `{raw}` would both be written as `{name}`"
                            ))
                            .with_hint("Specialize them in separate runs"),
                        );
                    } else {
                        concrete.push((name, ty));
                    }
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::new(format!("cannot parse type `{raw}`: {e}")))
                }
            }
        }

        if let Some(ident) = &placeholder {
            if !file.items.iter().any(|item| is_declaration(item, ident)) {
                diagnostics.push(
                    Diagnostic::new(format!("placeholder type `{ident}` is not declared"))
                        .with_hint(format!(
                            "Declare it in the template with `type {ident} = ...;` or `struct {ident};`"
                        )),
                );
            }
        }

        match placeholder {
            Some(ident) if diagnostics.is_empty() => Ok((ident, concrete)),
            _ => Err(diagnostics),
        }
    }
}

impl Transform<syn::File> for Specialize {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform(&self, document: SourceDocument<syn::File>) -> GenerationResult<syn::File> {
        let (placeholder, concrete) = match self.prepare(document.tree()) {
            Ok(prepared) => prepared,
            Err(diagnostics) => return GenerationResult::failure(diagnostics),
        };

        let outputs = concrete
            .into_iter()
            .map(|(name, ty)| {
                let mut tree = document.tree().clone();
                tree.items.retain(|item| !is_declaration(item, &placeholder));

                let mut substitute = Substitute {
                    placeholder: &placeholder,
                    concrete: &ty,
                    replaced: 0,
                    shadowed: 0,
                };
                substitute.visit_file_mut(&mut tree);
                debug!(
                    output = %name,
                    replaced = substitute.replaced,
                    shadowed = substitute.shadowed,
                    "Specialized template"
                );

                GeneratedSource::new(name, document.derive(tree))
            })
            .collect();

        GenerationResult::success(outputs)
    }
}

/// `type T = ...;` or `struct T;` without generics.
fn is_declaration(item: &Item, placeholder: &Ident) -> bool {
    match item {
        Item::Type(alias) => alias.ident == *placeholder && alias.generics.params.is_empty(),
        Item::Struct(unit) => {
            unit.ident == *placeholder
                && unit.generics.params.is_empty()
                && matches!(unit.fields, syn::Fields::Unit)
        }
        _ => false,
    }
}

/// Name an output after its type.
///
/// Paths concatenate their identifiers (`Vec<u8>` becomes `Vecu8`); other
/// shapes spell out their structure so distinct types stay distinct
/// (`&'static str` becomes `ref_str`, `[u8; 4]` becomes `array_u8_4`).
fn output_name(ty: &Type) -> String {
    match ty {
        Type::Path(TypePath { qself: None, path }) => path_name(path),
        Type::Reference(r) => {
            let prefix = if r.mutability.is_some() { "ref_mut" } else { "ref" };
            joined(prefix, [output_name(&r.elem)])
        }
        Type::Ptr(p) => {
            let prefix = if p.mutability.is_some() { "ptr_mut" } else { "ptr_const" };
            joined(prefix, [output_name(&p.elem)])
        }
        Type::Slice(slice) => joined("slice", [output_name(&slice.elem)]),
        Type::Array(array) => joined(
            "array",
            [output_name(&array.elem), ident_chars(&array.len.to_token_stream())],
        ),
        Type::Tuple(tuple) if tuple.elems.is_empty() => "unit".into(),
        Type::Tuple(tuple) => joined("tuple", tuple.elems.iter().map(output_name)),
        Type::Paren(inner) => output_name(&inner.elem),
        Type::Group(inner) => output_name(&inner.elem),
        other => ident_chars(&other.to_token_stream()),
    }
}

fn path_name(path: &Path) -> String {
    let mut name = String::new();
    for segment in &path.segments {
        name.push_str(&segment.ident.to_string());
        match &segment.arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(args) => {
                for arg in &args.args {
                    match arg {
                        GenericArgument::Type(ty) => name.push_str(&output_name(ty)),
                        GenericArgument::Lifetime(_) => {}
                        other => name.push_str(&ident_chars(&other.to_token_stream())),
                    }
                }
            }
            PathArguments::Parenthesized(args) => {
                for input in &args.inputs {
                    name.push_str(&output_name(input));
                }
                if let ReturnType::Type(_, ty) = &args.output {
                    name.push_str(&output_name(ty));
                }
            }
        }
    }
    name
}

/// `prefix_part_part`, skipping empty parts.
fn joined(prefix: &str, parts: impl IntoIterator<Item = String>) -> String {
    let mut name = prefix.to_owned();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        name.push('_');
        name.push_str(&part);
    }
    name
}

fn ident_chars(tokens: &TokenStream) -> String {
    tokens
        .to_string()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

struct Substitute<'a> {
    placeholder: &'a Ident,
    concrete: &'a Type,
    replaced: usize,
    /// Items left alone because they declare their own `T`.
    shadowed: usize,
}

impl Substitute<'_> {
    fn shadows(&mut self, generics: &Generics) -> bool {
        let shadows = generics
            .type_params()
            .any(|param| param.ident == *self.placeholder);
        if shadows {
            self.shadowed += 1;
        }
        shadows
    }

    /// For `T::rest`, the tokens of `rest`.
    fn associated_rest(&self, path: &Path) -> Option<TokenStream> {
        let first = path.segments.first()?;
        if path.leading_colon.is_some()
            || path.segments.len() < 2
            || first.ident != *self.placeholder
            || !first.arguments.is_none()
        {
            return None;
        }
        let rest: Punctuated<PathSegment, Token![::]> =
            path.segments.iter().skip(1).cloned().collect();
        Some(rest.into_token_stream())
    }
}

impl VisitMut for Substitute<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(TypePath { qself: None, path }) = ty {
            if path.is_ident(self.placeholder) {
                *ty = self.concrete.clone();
                self.replaced += 1;
                return;
            }
            if let Some(rest) = self.associated_rest(path) {
                let concrete = self.concrete;
                *ty = parse_quote!(<#concrete>::#rest);
                self.replaced += 1;
                return;
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }

    fn visit_item_fn_mut(&mut self, item: &mut ItemFn) {
        if !self.shadows(&item.sig.generics) {
            visit_mut::visit_item_fn_mut(self, item);
        }
    }

    fn visit_item_impl_mut(&mut self, item: &mut ItemImpl) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_item_impl_mut(self, item);
        }
    }

    fn visit_item_struct_mut(&mut self, item: &mut ItemStruct) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_item_struct_mut(self, item);
        }
    }

    fn visit_item_enum_mut(&mut self, item: &mut ItemEnum) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_item_enum_mut(self, item);
        }
    }

    fn visit_item_union_mut(&mut self, item: &mut ItemUnion) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_item_union_mut(self, item);
        }
    }

    fn visit_item_trait_mut(&mut self, item: &mut ItemTrait) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_item_trait_mut(self, item);
        }
    }

    fn visit_item_type_mut(&mut self, item: &mut ItemType) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_item_type_mut(self, item);
        }
    }

    fn visit_impl_item_fn_mut(&mut self, item: &mut ImplItemFn) {
        if !self.shadows(&item.sig.generics) {
            visit_mut::visit_impl_item_fn_mut(self, item);
        }
    }

    fn visit_impl_item_type_mut(&mut self, item: &mut ImplItemType) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_impl_item_type_mut(self, item);
        }
    }

    fn visit_trait_item_fn_mut(&mut self, item: &mut TraitItemFn) {
        if !self.shadows(&item.sig.generics) {
            visit_mut::visit_trait_item_fn_mut(self, item);
        }
    }

    fn visit_trait_item_type_mut(&mut self, item: &mut TraitItemType) {
        if !self.shadows(&item.generics) {
            visit_mut::visit_trait_item_type_mut(self, item);
        }
    }

    fn visit_expr_path_mut(&mut self, expr: &mut ExprPath) {
        if expr.qself.is_none() {
            if let Some(rest) = self.associated_rest(&expr.path) {
                let concrete = self.concrete;
                let replacement: Expr = parse_quote!(<#concrete>::#rest);
                if let Expr::Path(path) = replacement {
                    expr.qself = path.qself;
                    expr.path = path.path;
                    self.replaced += 1;
                    return;
                }
            }
        }
        visit_mut::visit_expr_path_mut(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"
type T = u8;

pub fn sum(values: &[T]) -> T {
    values.iter().fold(T::default(), |acc, v| acc + *v)
}

pub struct Stack {
    items: Vec<T>,
}
"#;

    fn document(source: &str) -> SourceDocument<syn::File> {
        SourceDocument::new(syn::parse_file(source).unwrap(), "gen/sum.rs")
    }

    fn render(source: &GeneratedSource<syn::File>) -> String {
        prettyplease::unparse(source.document.tree())
    }

    #[test]
    fn one_output_per_type() {
        let result = Specialize::for_types(["i32", "f64"]).transform(document(TEMPLATE));

        assert!(result.succeeded());
        let names: Vec<_> = result.outputs().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["i32", "f64"]);
    }

    #[test]
    fn replaces_every_use_and_drops_declaration() {
        let result = Specialize::for_types(["i32"]).transform(document(TEMPLATE));
        let text = render(&result.outputs()[0]);

        assert!(!text.contains("type T"));
        assert!(text.contains("pub fn sum(values: &[i32]) -> i32"));
        assert!(text.contains("<i32>::default()"));
        assert!(text.contains("items: Vec<i32>"));
        assert!(!text.contains(" T"));
    }

    #[test]
    fn output_keeps_origin_path() {
        let result = Specialize::for_types(["i32"]).transform(document(TEMPLATE));

        assert_eq!(
            result.outputs()[0].document.origin_path(),
            std::path::Path::new("gen/sum.rs")
        );
    }

    #[test]
    fn path_type_names_concatenate_identifiers() {
        let result = Specialize::for_types(["Vec<u8>"]).transform(document(TEMPLATE));

        assert_eq!(result.outputs()[0].name, "Vecu8");
        assert!(render(&result.outputs()[0]).contains("Vec<Vec<u8>>"));
    }

    #[test]
    fn items_with_their_own_placeholder_param_are_untouched() {
        let source = r#"
type T = u8;
pub fn keep(v: T) -> T { v }
pub fn wrap<T: Clone>(x: T) -> T { x.clone() }
pub struct Boxed<T>(T);
impl<T> Boxed<T> {
    pub fn get(&self) -> &T { &self.0 }
}
impl Boxed<T> {
    pub fn raw(&self) -> T { self.0 }
}
"#;
        let result = Specialize::for_types(["i32"]).transform(document(source));
        let text = render(&result.outputs()[0]);

        assert!(text.contains("pub fn keep(v: i32) -> i32"));
        assert!(text.contains("pub fn wrap<T: Clone>(x: T) -> T"));
        assert!(text.contains("pub struct Boxed<T>(T);"));
        assert!(text.contains("pub fn get(&self) -> &T"));
        assert!(text.contains("impl Boxed<i32>"));
        assert!(text.contains("pub fn raw(&self) -> i32"));
    }

    #[test]
    fn structural_names_keep_distinct_types_apart() {
        let names: Vec<_> = ["&'static str", "[u8; 4]", "[u8]", "(i32, f64)", "&mut Vec<u8>", "()"]
            .iter()
            .map(|raw| output_name(&syn::parse_str(raw).unwrap()))
            .collect();

        assert_eq!(
            names,
            ["ref_str", "array_u8_4", "slice_u8", "tuple_i32_f64", "ref_mut_Vecu8", "unit"]
        );
    }

    #[test]
    fn types_sharing_a_name_are_a_diagnostic() {
        let result = Specialize::for_types(["Vec<u8>", "Vecu8"]).transform(document(TEMPLATE));

        assert!(!result.succeeded());
        assert_eq!(result.diagnostics().len(), 1);
        assert!(result.diagnostics()[0].message.contains("`Vecu8`"));
    }

    #[test]
    fn repeated_type_is_left_to_the_collision_policy() {
        let result = Specialize::for_types(["i32", "i32"]).transform(document(TEMPLATE));

        assert!(result.succeeded());
        assert_eq!(result.outputs().len(), 2);
    }

    #[test]
    fn unit_struct_placeholder() {
        let source = "struct Elem;\nfn first(v: &[Elem]) -> Option<&Elem> { v.first() }\n";
        let result = Specialize::new("Elem", ["String"]).transform(document(source));

        let text = render(&result.outputs()[0]);
        assert!(!text.contains("struct Elem"));
        assert!(text.contains("fn first(v: &[String]) -> Option<&String>"));
    }

    #[test]
    fn no_types_is_a_diagnostic() {
        let result = Specialize::for_types(Vec::<String>::new()).transform(document(TEMPLATE));

        assert!(!result.succeeded());
        assert_eq!(result.diagnostics().len(), 1);
        assert!(result.diagnostics()[0].hint.is_some());
    }

    #[test]
    fn every_bad_type_is_reported() {
        let result = Specialize::for_types(["i32", "Vec<", "&&&"]).transform(document(TEMPLATE));

        assert!(!result.succeeded());
        assert!(result.outputs().is_empty());
        assert_eq!(result.diagnostics().len(), 2);
        assert!(result.diagnostics()[0].message.contains("`Vec<`"));
    }

    #[test]
    fn undeclared_placeholder_is_a_diagnostic() {
        let result = Specialize::new("U", ["i32"]).transform(document(TEMPLATE));

        assert!(!result.succeeded());
        assert!(result.diagnostics()[0].message.contains("`U` is not declared"));
    }

    #[test]
    fn invalid_placeholder_is_a_diagnostic() {
        let result = Specialize::new("not an ident", ["i32"]).transform(document(TEMPLATE));

        assert!(!result.succeeded());
        assert!(result.diagnostics()[0].message.contains("not a valid identifier"));
    }
}
