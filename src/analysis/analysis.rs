use crate::ast::{
    BinaryOp, Declaration, ExprKind, Expression, Function, LhsIdentifier, LhsKind, Module,
    Statement, StmtKind, SwitchSection, TypeSpecifier, TypeSpecifierKind, UnaryOp,
};
use crate::errors::CompilationError;
use crate::types::Type;
use crate::SourceLocation;

use super::const_eval;
use super::decorations::{DeclId, DeclarationInfo, Decorations};
use super::environment::{FunctionSignature, ModuleEnvironment, RecordElementInfo, RecordInfo};
use super::scope::ScopeStack;

/// The contextual analysis pass: identification and type checking.
///
/// One instance analyzes exactly one module. The walk is a single
/// depth-first pass over the tree; the first rule violation aborts the
/// whole run with one structured error. Record types are registered
/// before function signatures, and all signatures before any body, so
/// forward and mutually recursive references resolve.
pub struct ContextualAnalysis {
    decorations: Decorations,
    scope: ScopeStack,
    next_offset: usize,
}

impl ContextualAnalysis {
    /// Analyzes a module against the given environment, which is extended
    /// with the module's own records and functions as a side effect.
    pub fn analyze(
        module: &Module,
        env: &mut ModuleEnvironment,
    ) -> Result<Decorations, CompilationError> {
        let mut analysis = ContextualAnalysis {
            decorations: Decorations::new(),
            scope: ScopeStack::new(),
            next_offset: 0,
        };

        analysis.register_records(module, env)?;
        analysis.register_signatures(module, env)?;
        for function in &module.functions {
            analysis.check_function(function, env)?;
        }
        check_main(env)?;

        Ok(analysis.decorations)
    }

    fn register_records(
        &mut self,
        module: &Module,
        env: &mut ModuleEnvironment,
    ) -> Result<(), CompilationError> {
        for record in &module.records {
            let mut elements: Vec<RecordElementInfo> = Vec::new();
            for element in &record.elements {
                if elements.iter().any(|seen| seen.name == element.name) {
                    return Err(CompilationError::RecordElement {
                        location: element.location,
                        record: record.name.clone(),
                        element: element.name.clone(),
                    });
                }
                let ty = self.resolve_type_specifier(&element.specifier, env)?;
                if !ty.is_member_type() {
                    return Err(CompilationError::InapplicableOperation {
                        location: element.location,
                        operation: "record element declaration".to_string(),
                        found: ty,
                    });
                }
                elements.push(RecordElementInfo {
                    name: element.name.clone(),
                    ty,
                    is_variable: element.is_variable,
                    location: element.location,
                });
            }
            env.declare_record(RecordInfo {
                name: record.name.clone(),
                location: record.location,
                elements,
            })?;
        }
        Ok(())
    }

    fn register_signatures(
        &mut self,
        module: &Module,
        env: &mut ModuleEnvironment,
    ) -> Result<(), CompilationError> {
        for function in &module.functions {
            let return_type = self.resolve_type_specifier(&function.return_specifier, env)?;
            let mut parameter_types = Vec::with_capacity(function.parameters.len());
            for parameter in &function.parameters {
                let ty = self.resolve_type_specifier(&parameter.specifier, env)?;
                if !ty.is_value_type() {
                    return Err(CompilationError::InapplicableOperation {
                        location: parameter.location,
                        operation: "formal parameter".to_string(),
                        found: ty,
                    });
                }
                parameter_types.push(ty);
            }
            env.declare_function(FunctionSignature {
                name: function.name.clone(),
                parameter_types,
                return_type,
                location: function.location,
            })?;
        }
        Ok(())
    }

    fn check_function(
        &mut self,
        function: &Function,
        env: &ModuleEnvironment,
    ) -> Result<(), CompilationError> {
        let signature = env
            .lookup_function(&function.name, function.location)?
            .clone();

        self.scope.open_scope();
        self.next_offset = 0;

        // Parameters are always mutable
        for (parameter, ty) in function.parameters.iter().zip(&signature.parameter_types) {
            self.declare_local(parameter, ty.clone(), true, env)?;
        }

        let returns_value = signature.return_type.is_value_type();
        let last = function.body.len().saturating_sub(1);
        for (index, statement) in function.body.iter().enumerate() {
            let allowed_return = if returns_value && index == last {
                Some(&signature.return_type)
            } else {
                None
            };
            self.check_statement(statement, env, allowed_return)?;
        }

        if returns_value {
            let ends_with_return = matches!(
                function.body.last().map(|statement| &statement.kind),
                Some(StmtKind::Return(_))
            );
            if !ends_with_return {
                return Err(CompilationError::MissingReturn {
                    location: function.location,
                    function: function.name.clone(),
                });
            }
        }

        self.scope.close_scope()
    }

    /// Inserts a declaration into the arena and the current scope and
    /// assigns its frame offset.
    fn declare_local(
        &mut self,
        node: &Declaration,
        ty: Type,
        is_variable: bool,
        env: &ModuleEnvironment,
    ) -> Result<DeclId, CompilationError> {
        let word_size = env.word_size(&ty)?;
        let id = self.decorations.declarations.insert(DeclarationInfo {
            name: node.name.clone(),
            ty,
            is_variable,
            location: node.location,
            local_offset: None,
        });
        self.scope
            .declare(&node.name, id, node.location, &self.decorations.declarations)?;
        self.decorations
            .declarations
            .set_local_offset(id, self.next_offset)?;
        self.next_offset += word_size;
        self.decorations.set_decl_ref(node.id, id)?;
        Ok(id)
    }

    fn check_statement(
        &mut self,
        statement: &Statement,
        env: &ModuleEnvironment,
        allowed_return: Option<&Type>,
    ) -> Result<(), CompilationError> {
        match &statement.kind {
            StmtKind::VariableDeclaration(declaration) => {
                let ty = self.resolve_type_specifier(&declaration.specifier, env)?;
                if !ty.is_value_type() {
                    return Err(CompilationError::InapplicableOperation {
                        location: declaration.location,
                        operation: "variable declaration".to_string(),
                        found: ty,
                    });
                }
                self.declare_local(declaration, ty, true, env)?;
            }
            StmtKind::ValueDefinition { declaration, value } => {
                let ty = self.resolve_type_specifier(&declaration.specifier, env)?;
                if !ty.is_value_type() {
                    return Err(CompilationError::InapplicableOperation {
                        location: declaration.location,
                        operation: "value definition".to_string(),
                        found: ty,
                    });
                }
                self.expect_type(value, &ty, env)?;
                self.declare_local(declaration, ty, false, env)?;
            }
            StmtKind::Assignment { target, value } => {
                let target_type = self.resolve_lhs(target, env)?;
                self.expect_type(value, &target_type, env)?;
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.expect_type(condition, &Type::Bool, env)?;
                self.scope.open_scope();
                self.check_statement(then_branch, env, None)?;
                self.scope.close_scope()?;
                if let Some(else_branch) = else_branch {
                    self.scope.open_scope();
                    self.check_statement(else_branch, env, None)?;
                    self.scope.close_scope()?;
                }
            }
            StmtKind::For {
                init_target,
                init_value,
                condition,
                incr_target,
                incr_value,
                body,
            } => {
                let init_type = self.resolve_lhs(init_target, env)?;
                self.expect_type(init_value, &init_type, env)?;
                self.expect_type(condition, &Type::Bool, env)?;
                let incr_type = self.resolve_lhs(incr_target, env)?;
                self.expect_type(incr_value, &incr_type, env)?;
                self.scope.open_scope();
                self.check_statement(body, env, None)?;
                self.scope.close_scope()?;
            }
            StmtKind::ForEach {
                iterator,
                source,
                body,
            } => {
                let source_type = self.check_expression(source, env)?;
                let element = match &source_type {
                    Type::Vector { element, .. } | Type::Matrix { element, .. } => {
                        Type::from(*element)
                    }
                    other => {
                        return Err(CompilationError::InapplicableOperation {
                            location: source.location,
                            operation: "foreach".to_string(),
                            found: other.clone(),
                        })
                    }
                };

                // The iterator lives in its own scope enclosing the body
                self.scope.open_scope();
                let iterator_type = self.resolve_type_specifier(&iterator.specifier, env)?;
                if iterator_type != element {
                    return Err(CompilationError::TypeMismatch {
                        location: iterator.location,
                        expected: element,
                        found: iterator_type,
                    });
                }
                if iterator.is_variable {
                    // A mutable iterator needs a mutable source to write back to
                    let mutable_source = matches!(&source.kind, ExprKind::IdentifierReference(_))
                        && self
                            .decorations
                            .declarations
                            .get(self.decorations.decl_ref_of(source.id)?)
                            .is_variable;
                    if !mutable_source {
                        return Err(CompilationError::ConstantAssignment {
                            location: source.location,
                            name: iterator.name.clone(),
                        });
                    }
                }
                self.declare_local(iterator, iterator_type, iterator.is_variable, env)?;

                self.scope.open_scope();
                self.check_statement(body, env, None)?;
                self.scope.close_scope()?;
                self.scope.close_scope()?;
            }
            StmtKind::Switch {
                condition,
                sections,
            } => {
                self.expect_type(condition, &Type::Int, env)?;
                self.check_switch_sections(sections, env)?;
            }
            StmtKind::Compound(statements) => {
                self.scope.open_scope();
                for statement in statements {
                    self.check_statement(statement, env, None)?;
                }
                self.scope.close_scope()?;
            }
            StmtKind::Return(value) => match allowed_return {
                Some(expected) => self.expect_type(value, expected, env)?,
                None => {
                    return Err(CompilationError::MisplacedReturn {
                        location: statement.location,
                    })
                }
            },
            StmtKind::Call(call) => {
                if !matches!(call.kind, ExprKind::Call { .. }) {
                    return Err(CompilationError::internal(
                        "call statement without a call payload",
                    ));
                }
                // A void result is fine in statement position
                self.check_expression(call, env)?;
            }
        }
        Ok(())
    }

    fn check_switch_sections(
        &mut self,
        sections: &[SwitchSection],
        env: &ModuleEnvironment,
    ) -> Result<(), CompilationError> {
        let mut seen_cases: Vec<(i64, SourceLocation)> = Vec::new();
        let mut seen_default: Option<SourceLocation> = None;

        for section in sections {
            match &section.label {
                Some(label) => {
                    let value = self.eval_const_int(label, env)?;
                    if let Some((_, first)) =
                        seen_cases.iter().find(|(seen, _)| *seen == value)
                    {
                        return Err(CompilationError::DuplicateCase {
                            is_default: false,
                            label: value,
                            first: *first,
                            second: section.location,
                        });
                    }
                    seen_cases.push((value, section.location));
                }
                None => {
                    if let Some(first) = seen_default {
                        return Err(CompilationError::DuplicateCase {
                            is_default: true,
                            label: 0,
                            first,
                            second: section.location,
                        });
                    }
                    seen_default = Some(section.location);
                }
            }

            self.scope.open_scope();
            for statement in &section.body {
                self.check_statement(statement, env, None)?;
            }
            self.scope.close_scope()?;
        }
        Ok(())
    }

    /// Resolves an assignment target: the named variable must exist and
    /// be mutable, index and element selectors must check out, and the
    /// assigned-through type is returned.
    fn resolve_lhs(
        &mut self,
        target: &LhsIdentifier,
        env: &ModuleEnvironment,
    ) -> Result<Type, CompilationError> {
        let decl_id = self.scope.resolve(target.name()).ok_or_else(|| {
            CompilationError::UndeclaredReference {
                location: target.location,
                name: target.name().to_string(),
            }
        })?;
        self.decorations.set_decl_ref(target.id, decl_id)?;

        let info = self.decorations.declarations.get(decl_id);
        if !info.is_variable {
            return Err(CompilationError::ConstantAssignment {
                location: target.location,
                name: info.name.clone(),
            });
        }
        let base_type = info.ty.clone();

        match &target.kind {
            LhsKind::Plain(_) => Ok(base_type),
            LhsKind::VectorElement { index, .. } => {
                let element = match &base_type {
                    Type::Vector { element, .. } => Type::from(*element),
                    other => {
                        return Err(CompilationError::InapplicableOperation {
                            location: target.location,
                            operation: "vector element assignment".to_string(),
                            found: other.clone(),
                        })
                    }
                };
                self.expect_type(index, &Type::Int, env)?;
                Ok(element)
            }
            LhsKind::MatrixElement {
                row_index,
                col_index,
                ..
            } => {
                let element = match &base_type {
                    Type::Matrix { element, .. } => Type::from(*element),
                    other => {
                        return Err(CompilationError::InapplicableOperation {
                            location: target.location,
                            operation: "matrix element assignment".to_string(),
                            found: other.clone(),
                        })
                    }
                };
                self.expect_type(row_index, &Type::Int, env)?;
                self.expect_type(col_index, &Type::Int, env)?;
                Ok(element)
            }
            LhsKind::RecordElement { element, .. } => {
                let record_name = match &base_type {
                    Type::Record(name) => name.clone(),
                    other => {
                        return Err(CompilationError::InapplicableOperation {
                            location: target.location,
                            operation: "record element assignment".to_string(),
                            found: other.clone(),
                        })
                    }
                };
                let record = env.lookup_record(&record_name, target.location)?;
                let declared = record.element(element).ok_or_else(|| {
                    CompilationError::RecordElement {
                        location: target.location,
                        record: record_name.clone(),
                        element: element.clone(),
                    }
                })?;
                if !declared.is_variable {
                    return Err(CompilationError::ConstantAssignment {
                        location: target.location,
                        name: element.clone(),
                    });
                }
                Ok(declared.ty.clone())
            }
        }
    }

    /// Type-checks an expression, records the result under the node's id
    /// and returns it.
    fn check_expression(
        &mut self,
        expr: &Expression,
        env: &ModuleEnvironment,
    ) -> Result<Type, CompilationError> {
        let ty = self.derive_type(expr, env)?;
        self.decorations.set_type(expr.id, ty.clone())?;
        Ok(ty)
    }

    fn expect_type(
        &mut self,
        expr: &Expression,
        expected: &Type,
        env: &ModuleEnvironment,
    ) -> Result<(), CompilationError> {
        let found = self.check_expression(expr, env)?;
        if found != *expected {
            return Err(CompilationError::TypeMismatch {
                location: expr.location,
                expected: expected.clone(),
                found,
            });
        }
        Ok(())
    }

    fn derive_type(
        &mut self,
        expr: &Expression,
        env: &ModuleEnvironment,
    ) -> Result<Type, CompilationError> {
        match &expr.kind {
            ExprKind::IntValue(_) => Ok(Type::Int),
            ExprKind::FloatValue(_) => Ok(Type::Float),
            ExprKind::BoolValue(_) => Ok(Type::Bool),
            ExprKind::StringValue(_) => Ok(Type::String),
            ExprKind::IdentifierReference(name) => {
                let decl_id = self.scope.resolve(name).ok_or_else(|| {
                    CompilationError::UndeclaredReference {
                        location: expr.location,
                        name: name.clone(),
                    }
                })?;
                self.decorations.set_decl_ref(expr.id, decl_id)?;
                Ok(self.decorations.declarations.get(decl_id).ty.clone())
            }
            ExprKind::Binary { op, left, right } => {
                let left_type = self.check_expression(left, env)?;
                let right_type = self.check_expression(right, env)?;
                self.combine_binary(expr, *op, left_type, right_type)
            }
            ExprKind::Compare {
                left,
                right,
                ..
            } => {
                let left_type = self.check_expression(left, env)?;
                let right_type = self.check_expression(right, env)?;
                if !left_type.is_numeric() {
                    return Err(inapplicable(expr.location, "comparison", left_type));
                }
                if !right_type.is_numeric() {
                    return Err(inapplicable(expr.location, "comparison", right_type));
                }
                if left_type != right_type {
                    return Err(CompilationError::TypeMismatch {
                        location: expr.location,
                        expected: left_type,
                        found: right_type,
                    });
                }
                Ok(Type::Bool)
            }
            ExprKind::Unary { op, operand } => {
                let operand_type = self.check_expression(operand, env)?;
                match op {
                    UnaryOp::Minus => {
                        if operand_type.element_type().is_none() {
                            return Err(inapplicable(expr.location, "unary minus", operand_type));
                        }
                        Ok(operand_type)
                    }
                    UnaryOp::Not => {
                        if operand_type != Type::Bool {
                            return Err(inapplicable(expr.location, "logical not", operand_type));
                        }
                        Ok(Type::Bool)
                    }
                    UnaryOp::Transpose => match operand_type {
                        Type::Matrix {
                            element,
                            rows,
                            cols,
                        } => Ok(Type::matrix(element, cols, rows)),
                        other => Err(inapplicable(expr.location, "matrix transpose", other)),
                    },
                }
            }
            ExprKind::VectorDimension(base) => {
                let base_type = self.check_expression(base, env)?;
                match base_type {
                    Type::Vector { .. } => Ok(Type::Int),
                    other => Err(inapplicable(expr.location, ".dimension", other)),
                }
            }
            ExprKind::MatrixRows(base) => {
                let base_type = self.check_expression(base, env)?;
                match base_type {
                    Type::Matrix { .. } => Ok(Type::Int),
                    other => Err(inapplicable(expr.location, ".rows", other)),
                }
            }
            ExprKind::MatrixCols(base) => {
                let base_type = self.check_expression(base, env)?;
                match base_type {
                    Type::Matrix { .. } => Ok(Type::Int),
                    other => Err(inapplicable(expr.location, ".cols", other)),
                }
            }
            ExprKind::Select {
                condition,
                true_case,
                false_case,
            } => {
                self.expect_type(condition, &Type::Bool, env)?;
                let true_type = self.check_expression(true_case, env)?;
                let false_type = self.check_expression(false_case, env)?;
                if true_type != false_type {
                    return Err(CompilationError::TypeMismatch {
                        location: false_case.location,
                        expected: true_type,
                        found: false_type,
                    });
                }
                Ok(true_type)
            }
            ExprKind::Call { name, arguments } => {
                let signature = env.lookup_function(name, expr.location)?.clone();
                if arguments.len() > signature.parameter_types.len() {
                    return Err(CompilationError::TooManyArguments {
                        location: expr.location,
                        name: name.clone(),
                        expected: signature.parameter_types.len(),
                        received: arguments.len(),
                    });
                }
                if arguments.len() < signature.parameter_types.len() {
                    return Err(CompilationError::TooFewArguments {
                        location: expr.location,
                        name: name.clone(),
                        expected: signature.parameter_types.len(),
                        received: arguments.len(),
                    });
                }
                for (argument, parameter_type) in
                    arguments.iter().zip(&signature.parameter_types)
                {
                    self.expect_type(argument, parameter_type, env)?;
                }
                Ok(signature.return_type)
            }
            ExprKind::ElementSelect { base, index } => {
                let base_type = self.check_expression(base, env)?;
                let result = match base_type {
                    Type::Vector { element, .. } => Type::from(element),
                    Type::Matrix { element, cols, .. } => Type::vector(element, cols),
                    other => return Err(inapplicable(expr.location, "element selection", other)),
                };
                self.expect_type(index, &Type::Int, env)?;
                Ok(result)
            }
            ExprKind::RecordElementSelect { base, element } => {
                let base_type = self.check_expression(base, env)?;
                let record_name = match base_type {
                    Type::Record(name) => name,
                    other => {
                        return Err(inapplicable(expr.location, "record element selection", other))
                    }
                };
                let record = env.lookup_record(&record_name, expr.location)?;
                let declared = record.element(element).ok_or_else(|| {
                    CompilationError::RecordElement {
                        location: expr.location,
                        record: record_name.clone(),
                        element: element.clone(),
                    }
                })?;
                Ok(declared.ty.clone())
            }
            ExprKind::SubVector {
                base,
                base_index,
                start_offset,
                end_offset,
            } => {
                let base_type = self.check_expression(base, env)?;
                let (element, dimension) = match base_type {
                    Type::Vector { element, dimension } => (element, dimension),
                    other => return Err(inapplicable(expr.location, "sub-vector", other)),
                };
                self.expect_type(base_index, &Type::Int, env)?;
                let span =
                    self.check_slice_span(start_offset, end_offset, dimension, env)?;
                Ok(Type::vector(element, span))
            }
            ExprKind::SubMatrix {
                base,
                row_base_index,
                row_start_offset,
                row_end_offset,
                col_base_index,
                col_start_offset,
                col_end_offset,
            } => {
                let base_type = self.check_expression(base, env)?;
                let (element, rows, cols) = match base_type {
                    Type::Matrix {
                        element,
                        rows,
                        cols,
                    } => (element, rows, cols),
                    other => return Err(inapplicable(expr.location, "sub-matrix", other)),
                };
                self.expect_type(row_base_index, &Type::Int, env)?;
                self.expect_type(col_base_index, &Type::Int, env)?;
                let row_span =
                    self.check_slice_span(row_start_offset, row_end_offset, rows, env)?;
                let col_span =
                    self.check_slice_span(col_start_offset, col_end_offset, cols, env)?;
                Ok(Type::matrix(element, row_span, col_span))
            }
            ExprKind::StructureInit(elements) => self.check_structure_init(expr, elements, env),
            ExprKind::RecordInit { name, elements } => {
                let record = env.lookup_record(name, expr.location)?.clone();
                if elements.len() != record.elements.len() {
                    return Err(CompilationError::StructureDimension {
                        location: expr.location,
                        message: format!(
                            "record {:?} has {} elements, initializer supplies {}",
                            name,
                            record.elements.len(),
                            elements.len()
                        ),
                    });
                }
                for (value, declared) in elements.iter().zip(&record.elements) {
                    self.expect_type(value, &declared.ty, env)?;
                }
                Ok(Type::Record(name.clone()))
            }
        }
    }

    /// The shared arithmetic broadcasting rule, parameterized per
    /// operator by which operand shapes admit an aggregate.
    fn combine_binary(
        &mut self,
        expr: &Expression,
        op: BinaryOp,
        left: Type,
        right: Type,
    ) -> Result<Type, CompilationError> {
        match op {
            BinaryOp::And | BinaryOp::Or => {
                if left != Type::Bool {
                    return Err(inapplicable(expr.location, op_name(op), left));
                }
                if right != Type::Bool {
                    return Err(inapplicable(expr.location, op_name(op), right));
                }
                Ok(Type::Bool)
            }
            BinaryOp::Add | BinaryOp::Sub => {
                self.arithmetic(expr, op, left, right, false, false, true)
            }
            BinaryOp::Mul => self.arithmetic(expr, op, left, right, true, true, true),
            BinaryOp::Div | BinaryOp::Exp => {
                self.arithmetic(expr, op, left, right, false, false, false)
            }
            BinaryOp::DotProduct => match (&left, &right) {
                (
                    Type::Vector {
                        element: left_element,
                        dimension: left_dimension,
                    },
                    Type::Vector {
                        element: right_element,
                        dimension: right_dimension,
                    },
                ) => {
                    if left_element != right_element {
                        return Err(CompilationError::TypeMismatch {
                            location: expr.location,
                            expected: left.clone(),
                            found: right.clone(),
                        });
                    }
                    if left_dimension != right_dimension {
                        return Err(CompilationError::StructureDimension {
                            location: expr.location,
                            message: format!(
                                "dot product of vectors with dimensions {} and {}",
                                left_dimension, right_dimension
                            ),
                        });
                    }
                    Ok(Type::from(*left_element))
                }
                (Type::Vector { .. }, other) | (other, _) => {
                    Err(inapplicable(expr.location, op_name(op), other.clone()))
                }
            },
            BinaryOp::MatMul => match (&left, &right) {
                (
                    Type::Matrix {
                        element: left_element,
                        rows: left_rows,
                        cols: left_cols,
                    },
                    Type::Matrix {
                        element: right_element,
                        rows: right_rows,
                        cols: right_cols,
                    },
                ) => {
                    if left_element != right_element {
                        return Err(CompilationError::TypeMismatch {
                            location: expr.location,
                            expected: left.clone(),
                            found: right.clone(),
                        });
                    }
                    if left_cols != right_rows {
                        return Err(CompilationError::StructureDimension {
                            location: expr.location,
                            message: format!(
                                "matrix multiplication of {}x{} by {}x{}",
                                left_rows, left_cols, right_rows, right_cols
                            ),
                        });
                    }
                    Ok(Type::matrix(*left_element, *left_rows, *right_cols))
                }
                (Type::Matrix { .. }, other) | (other, _) => {
                    Err(inapplicable(expr.location, op_name(op), other.clone()))
                }
            },
        }
    }

    fn arithmetic(
        &mut self,
        expr: &Expression,
        op: BinaryOp,
        left: Type,
        right: Type,
        allow_left_struct: bool,
        allow_right_struct: bool,
        allow_both_struct: bool,
    ) -> Result<Type, CompilationError> {
        let left_struct = left.is_structure();
        let right_struct = right.is_structure();

        if !left_struct && !right_struct {
            if !left.is_numeric() {
                return Err(inapplicable(expr.location, op_name(op), left));
            }
            if !right.is_numeric() {
                return Err(inapplicable(expr.location, op_name(op), right));
            }
            if left != right {
                return Err(CompilationError::TypeMismatch {
                    location: expr.location,
                    expected: left,
                    found: right,
                });
            }
            return Ok(left);
        }

        if left_struct && right_struct {
            if !allow_both_struct {
                return Err(inapplicable(expr.location, op_name(op), left));
            }
            if left != right {
                return Err(CompilationError::TypeMismatch {
                    location: expr.location,
                    expected: left,
                    found: right,
                });
            }
            return Ok(left);
        }

        // Exactly one aggregate operand: broadcast the scalar
        let (aggregate, scalar, allowed) = if left_struct {
            (left, right, allow_left_struct)
        } else {
            (right, left, allow_right_struct)
        };
        if !allowed {
            return Err(inapplicable(expr.location, op_name(op), aggregate));
        }
        let element = match aggregate.element_type() {
            Some(element) => Type::from(element),
            None => return Err(inapplicable(expr.location, op_name(op), aggregate)),
        };
        if scalar != element {
            return Err(CompilationError::TypeMismatch {
                location: expr.location,
                expected: element,
                found: scalar,
            });
        }
        Ok(aggregate)
    }

    fn check_structure_init(
        &mut self,
        expr: &Expression,
        elements: &[Expression],
        env: &ModuleEnvironment,
    ) -> Result<Type, CompilationError> {
        let first = match elements.first() {
            Some(first) => first,
            None => {
                return Err(CompilationError::StructureDimension {
                    location: expr.location,
                    message: "structure initializer must not be empty".to_string(),
                })
            }
        };
        let first_type = self.check_expression(first, env)?;

        match first_type {
            // Rows of vectors make a matrix
            Type::Vector { element, dimension } => {
                for row in &elements[1..] {
                    self.expect_type(row, &Type::vector(element, dimension), env)?;
                }
                Ok(Type::matrix(element, elements.len(), dimension))
            }
            Type::Int | Type::Float => {
                for value in &elements[1..] {
                    self.expect_type(value, &first_type, env)?;
                }
                let element = match first_type.as_numeric() {
                    Some(element) => element,
                    None => {
                        return Err(CompilationError::internal(
                            "numeric scalar without a numeric variant",
                        ))
                    }
                };
                Ok(Type::vector(element, elements.len()))
            }
            other => Err(inapplicable(
                first.location,
                "structure initializer element",
                other,
            )),
        }
    }

    /// Validates one slice dimension: both offsets are constant `int`
    /// expressions, the end is not before the start, and the span fits
    /// the source aggregate. Returns the span length.
    fn check_slice_span(
        &mut self,
        start_offset: &Expression,
        end_offset: &Expression,
        source_size: usize,
        env: &ModuleEnvironment,
    ) -> Result<usize, CompilationError> {
        let start = self.eval_const_int(start_offset, env)?;
        let end = self.eval_const_int(end_offset, env)?;
        if end < start {
            return Err(CompilationError::StructureDimension {
                location: end_offset.location,
                message: format!("slice end offset {} lies before start offset {}", end, start),
            });
        }
        let span = (end - start + 1) as usize;
        if span > source_size {
            return Err(CompilationError::StructureDimension {
                location: start_offset.location,
                message: format!(
                    "slice of {} elements exceeds the source size {}",
                    span, source_size
                ),
            });
        }
        Ok(span)
    }

    /// Full type check followed by constant reduction; the value is also
    /// recorded under the expression's node id.
    fn eval_const_int(
        &mut self,
        expr: &Expression,
        env: &ModuleEnvironment,
    ) -> Result<i64, CompilationError> {
        self.expect_type(expr, &Type::Int, env)?;
        let value = const_eval::evaluate(expr)?;
        self.decorations.set_constant(expr.id, value)?;
        Ok(value)
    }

    /// Resolves a syntactic type to a `Type` value, constant-evaluating
    /// vector and matrix dimensions. The result is also recorded under
    /// the specifier's node id.
    fn resolve_type_specifier(
        &mut self,
        specifier: &TypeSpecifier,
        env: &ModuleEnvironment,
    ) -> Result<Type, CompilationError> {
        let ty = match &specifier.kind {
            TypeSpecifierKind::Int => Type::Int,
            TypeSpecifierKind::Float => Type::Float,
            TypeSpecifierKind::Bool => Type::Bool,
            TypeSpecifierKind::String => Type::String,
            TypeSpecifierKind::Void => Type::Void,
            TypeSpecifierKind::Record(name) => {
                env.lookup_record(name, specifier.location)?;
                Type::Record(name.clone())
            }
            TypeSpecifierKind::Vector { element, dimension } => {
                let element = self.resolve_element_specifier(element, env)?;
                let dimension = self.resolve_dimension(dimension, env)?;
                Type::vector(element, dimension)
            }
            TypeSpecifierKind::Matrix {
                element,
                rows,
                cols,
            } => {
                let element = self.resolve_element_specifier(element, env)?;
                let rows = self.resolve_dimension(rows, env)?;
                let cols = self.resolve_dimension(cols, env)?;
                Type::matrix(element, rows, cols)
            }
        };
        self.decorations.set_type(specifier.id, ty.clone())?;
        Ok(ty)
    }

    fn resolve_element_specifier(
        &mut self,
        specifier: &TypeSpecifier,
        env: &ModuleEnvironment,
    ) -> Result<crate::types::NumericType, CompilationError> {
        let ty = self.resolve_type_specifier(specifier, env)?;
        ty.as_numeric().ok_or_else(|| {
            CompilationError::InapplicableOperation {
                location: specifier.location,
                operation: "structure element type".to_string(),
                found: ty,
            }
        })
    }

    fn resolve_dimension(
        &mut self,
        dimension: &Expression,
        env: &ModuleEnvironment,
    ) -> Result<usize, CompilationError> {
        let value = self.eval_const_int(dimension, env)?;
        if value <= 0 {
            return Err(CompilationError::StructureDimension {
                location: dimension.location,
                message: format!("dimension must be positive, got {}", value),
            });
        }
        Ok(value as usize)
    }
}

fn check_main(env: &ModuleEnvironment) -> Result<(), CompilationError> {
    let main = env
        .lookup_function("main", SourceLocation::UNKNOWN)
        .map_err(|_| CompilationError::MissingMain)?;
    if main.return_type != Type::Void || !main.parameter_types.is_empty() {
        return Err(CompilationError::MissingMain);
    }
    Ok(())
}

fn inapplicable(location: SourceLocation, operation: &str, found: Type) -> CompilationError {
    CompilationError::InapplicableOperation {
        location,
        operation: operation.to_string(),
        found,
    }
}

fn op_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Exp => "^",
        BinaryOp::MatMul => "#",
        BinaryOp::DotProduct => ".*",
        BinaryOp::And => "&",
        BinaryOp::Or => "|",
    }
}
