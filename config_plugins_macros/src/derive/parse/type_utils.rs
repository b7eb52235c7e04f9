//! Type introspection helpers.

use syn::{GenericArgument, PathArguments, Type};

/// Returns the inner type if `ty` is `Option<T>`.
///
/// The check is shallow and only inspects the final path segment, so
/// `std::option::Option<T>` matches while `Option<Option<T>>` yields
/// `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
