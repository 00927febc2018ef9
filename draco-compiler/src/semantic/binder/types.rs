use super::Binder;
use crate::semantic::bound::Type;
use crate::syntax::ast::{self, AstNode};

impl Binder<'_> {
    pub(super) fn ty(&mut self, ty: &ast::Type) -> Type {
        match ty {
            ast::Type::NameType(name) => {
                let Some(token) = name.name().filter(|token| !token.is_missing()) else {
                    return Type::Error;
                };

                let at = token.span();
                let Some(id) = self.lookup(token.text()) else {
                    let _ = self.diagnostics.binding_error(at).undefined_reference(token.text());
                    return Type::Error;
                };

                let kind = self.compilation().symbols().get(id).kind;
                if !kind.is_type() {
                    let _ = self.diagnostics.binding_error(at).not_a_type(token.text());
                    return Type::Error;
                }

                self.resolutions.references.insert(name.syntax().clone(), id);
                Type::Named(id)
            }

            // Modules have no nested types yet.
            ast::Type::MemberType(member) => {
                if let Some(receiver) = member.receiver() {
                    let _ = self.ty(&receiver);
                }

                if let Some(token) = member.member().filter(|token| !token.is_missing()) {
                    let mut errors = self.diagnostics.binding_error(token.span());
                    let _ = errors.undefined_reference(token.text());
                }

                Type::Error
            }

            ast::Type::GenericType(generic) => {
                let instantiated = generic.instantiated().map(|ty| self.ty(&ty));
                let arguments = generic.arguments().and_then(|list| list.arguments());
                let arguments: Vec<_> =
                    arguments.iter().flat_map(|list| list.iter()).map(|ty| self.ty(&ty)).collect();

                match instantiated {
                    Some(Type::Named(id)) => Type::Generic(id, arguments.into()),
                    _ => Type::Error,
                }
            }

            ast::Type::UnexpectedType(_) => Type::Error,
        }
    }
}
