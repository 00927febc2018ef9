use super::{name_of, Binder};
use crate::semantic::bound::{BoundStatement, Type};
use crate::semantic::symbols::{Bound, Details, FunctionDetails, SymbolKind, VariableDetails};
use crate::syntax::ast::{self, AstNode};

impl Binder<'_> {
    pub(super) fn statements(
        &mut self,
        statements: impl Iterator<Item = ast::Statement>,
    ) -> Box<[BoundStatement]> {
        statements.filter_map(|statement| self.statement(&statement)).collect()
    }

    fn statement(&mut self, statement: &ast::Statement) -> Option<BoundStatement> {
        match statement {
            ast::Statement::EmptyStatement(_) | ast::Statement::UnexpectedStatement(_) => None,

            ast::Statement::ExpressionStatement(statement) => {
                let expr = self.expr_or_error(statement.expression(), statement.syntax().span());
                Some(BoundStatement::Expression(expr))
            }

            ast::Statement::DeclarationStatement(statement) => {
                self.declaration(&statement.declaration()?)
            }
        }
    }

    fn declaration(&mut self, declaration: &ast::Declaration) -> Option<BoundStatement> {
        match declaration {
            ast::Declaration::VariableDeclaration(variable) => {
                // The initializer can't see the variable it initializes.
                let value = variable.value().map(|value| {
                    self.expr_or_error(value.value(), value.syntax().span())
                });

                let ty = match variable.type_specifier().map(|specifier| specifier.ty()) {
                    Some(Some(ty)) => self.ty(&ty),
                    Some(None) => Type::Error,
                    None => Type::Unknown,
                };

                let details = Details::Variable(VariableDetails {
                    mutable: !variable.is_immutable(),
                    variadic: false,
                    ty: Bound::new(ty).into(),
                    ..Default::default()
                });

                let (name, _) = name_of(variable.name().as_ref(), variable.syntax());
                let kind = SymbolKind::Local;
                let local = self.add_symbol(name.clone(), kind, Some(variable.syntax()), details);
                self.locals.push(local);
                self.declare(name, local);

                Some(BoundStatement::Local { local, value, span: variable.syntax().span() })
            }

            // Nested functions are bound lazily like any other function.
            ast::Declaration::FunctionDeclaration(function) => {
                let (name, _) = name_of(function.name().as_ref(), function.syntax());
                let details = Details::Function(FunctionDetails::default());
                let kind = SymbolKind::Function;
                let id = self.add_symbol(name.clone(), kind, Some(function.syntax()), details);
                self.functions.push(id);
                self.declare(name, id);

                Some(BoundStatement::Function(id))
            }

            ast::Declaration::LabelDeclaration(label) => {
                let id = self.label_declarations.get(label.syntax()).copied()?;
                Some(BoundStatement::Label(id, label.syntax().span()))
            }

            ast::Declaration::UnexpectedDeclaration(_) => None,
        }
    }
}
