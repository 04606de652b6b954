//! Enumerates the formal parameters of a callable declaration.
//!
//! Functions, function blocks and programs declare parameters in
//! variable declaration blocks. Callers bind arguments against one
//! logical ordered sequence of parameters: the declared input, output,
//! in-out and external declarations in source order, followed by the
//! implicit `EN` and `ENO` parameters that every callable has even
//! though they never appear in source text.
//!
//! The iterator re-walks the declaration blocks on every advance and
//! returns the parameter whose position matches the target index. The
//! walk is linear in the declaration size, which is small in practice,
//! and keeps the iterator free of any cached flattened copy of the
//! declarations.

use ferroplc_dsl::common::{
    ConstantKind, ElementaryTypeName, FunctionBlockDeclaration, FunctionDeclaration,
    HasVariableBlocks, ProgramDeclaration, TypeDescriptor, VarDeclBlock, VariableType,
};
use ferroplc_dsl::core::{Id, Located, SourceSpan};
use ferroplc_dsl::diagnostic::{Diagnostic, Label};
use ferroplc_problems::Problem;

use crate::result::ResolutionResult;

/// How data flows between a parameter and the calling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDirection {
    Input,
    Output,
    InOut,
    /// A reference to a global variable rather than a value parameter.
    External,
}

/// Tracks one of the implicit parameters across walks of the
/// declaration blocks.
///
/// The standard permits certain function block forms to declare `EN`
/// or `ENO` explicitly, in which case the iterator enumerates the
/// explicit declaration and must not synthesize the implicit one. An
/// explicit declaration first seen after the implicit parameter was
/// already synthesized means the declaration blocks changed under the
/// iterator, which is a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImplicitParam {
    Undeclared,
    Explicit,
    Synthesized,
}

/// Snapshot of one formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: Id,
    pub direction: ParamDirection,
    pub param_type: TypeDescriptor,
    pub default_value: Option<ConstantKind>,
}

/// Iterator over the formal parameters of one callable declaration.
///
/// Each call site resolution owns its own iterator instance. The
/// iterator borrows the declaration and never mutates it.
pub struct ParamIterator<'decl> {
    blocks: &'decl [VarDeclBlock],
    /// 1-based index of the parameter to find on the next advance.
    next_param: usize,
    /// Count of parameters visited during the current walk.
    param_count: usize,
    en: ImplicitParam,
    eno: ImplicitParam,
    current: Option<ParameterDescriptor>,
}

impl<'decl> ParamIterator<'decl> {
    pub fn function(declaration: &'decl FunctionDeclaration) -> Self {
        Self::new(declaration)
    }

    pub fn function_block(declaration: &'decl FunctionBlockDeclaration) -> Self {
        Self::new(declaration)
    }

    pub fn program(declaration: &'decl ProgramDeclaration) -> Self {
        Self::new(declaration)
    }

    pub fn new(declaration: &'decl impl HasVariableBlocks) -> Self {
        Self {
            blocks: declaration.variable_blocks(),
            next_param: 0,
            param_count: 0,
            en: ImplicitParam::Undeclared,
            eno: ImplicitParam::Undeclared,
            current: None,
        }
    }

    /// Advances to the next formal parameter and returns its name, or
    /// `Ok(None)` when the parameters are exhausted. The first call
    /// after construction or reset returns the first parameter.
    pub fn next(&mut self) -> ResolutionResult<Option<Id>> {
        self.param_count = 0;
        self.next_param += 1;
        log::trace!("searching for parameter {}", self.next_param);

        for block in self.blocks {
            let direction = match block.var_type {
                VariableType::Input => ParamDirection::Input,
                VariableType::Output => ParamDirection::Output,
                VariableType::InOut => ParamDirection::InOut,
                VariableType::External => ParamDirection::External,
                // Local variables are not formal parameters.
                VariableType::Var | VariableType::VarTemp => continue,
            };

            for declaration in &block.declarations {
                for name in declaration.names() {
                    self.note_implicit_declaration(name)?;
                    self.param_count += 1;
                    if self.param_count == self.next_param {
                        log::trace!("found parameter {name}");
                        self.current = Some(ParameterDescriptor {
                            name: name.clone(),
                            direction,
                            param_type: declaration.declared_type(),
                            default_value: declaration.initial_value(),
                        });
                        return Ok(Some(name.clone()));
                    }
                }
            }
        }

        if self.en == ImplicitParam::Undeclared {
            self.en = ImplicitParam::Synthesized;
            return Ok(Some(self.synthesize(
                "EN",
                ParamDirection::Input,
                Some(ConstantKind::boolean_true()),
            )));
        }

        if self.eno == ImplicitParam::Undeclared {
            self.eno = ImplicitParam::Synthesized;
            return Ok(Some(self.synthesize("ENO", ParamDirection::Output, None)));
        }

        self.current = None;
        Ok(None)
    }

    /// Advances and returns the full descriptor instead of the name.
    pub fn next_descriptor(&mut self) -> ResolutionResult<Option<ParameterDescriptor>> {
        Ok(self.next()?.and(self.current.clone()))
    }

    /// Adapts the iterator to the standard iterator protocol, yielding
    /// descriptors. The adapter yields nothing further after the first
    /// fatal diagnostic.
    pub fn descriptors(self) -> Descriptors<'decl> {
        Descriptors {
            inner: self,
            done: false,
        }
    }

    /// The descriptor of the most recently returned parameter. `None`
    /// before the first advance and after exhaustion.
    pub fn current(&self) -> Option<&ParameterDescriptor> {
        self.current.as_ref()
    }

    /// The declared type of the most recently returned parameter.
    pub fn param_type(&self) -> Option<TypeDescriptor> {
        self.current
            .as_ref()
            .map(|descriptor| descriptor.param_type.clone())
    }

    /// The default value of the most recently returned parameter.
    pub fn default_value(&self) -> Option<ConstantKind> {
        self.current
            .as_ref()
            .and_then(|descriptor| descriptor.default_value.clone())
    }

    /// The direction of the most recently returned parameter.
    pub fn param_direction(&self) -> Option<ParamDirection> {
        self.current.as_ref().map(|descriptor| descriptor.direction)
    }

    /// Returns the iterator to the state before the first parameter.
    /// A subsequent sequence of advances reproduces the original
    /// enumeration.
    pub fn reset(&mut self) {
        self.next_param = 0;
        self.param_count = 0;
        self.en = ImplicitParam::Undeclared;
        self.eno = ImplicitParam::Undeclared;
        self.current = None;
    }

    fn synthesize(
        &mut self,
        name: &str,
        direction: ParamDirection,
        default_value: Option<ConstantKind>,
    ) -> Id {
        log::trace!("synthesized implicit parameter {name}");
        let name = Id::from(name).with_span(SourceSpan::builtin());
        self.current = Some(ParameterDescriptor {
            name: name.clone(),
            direction,
            param_type: TypeDescriptor::Elementary(ElementaryTypeName::BOOL),
            default_value,
        });
        name
    }

    /// Records an explicit declaration of `EN` or `ENO`. An explicit
    /// declaration that shows up only after the implicit parameter was
    /// synthesized is a contract violation.
    fn note_implicit_declaration(&mut self, name: &Id) -> ResolutionResult<()> {
        match name.lower_case().as_str() {
            "en" => {
                if self.en == ImplicitParam::Synthesized {
                    return Err(Self::redeclaration(Problem::EnParamRedeclared, name));
                }
                self.en = ImplicitParam::Explicit;
                Ok(())
            }
            "eno" => {
                if self.eno == ImplicitParam::Synthesized {
                    return Err(Self::redeclaration(Problem::EnoParamRedeclared, name));
                }
                self.eno = ImplicitParam::Explicit;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn redeclaration(problem: Problem, name: &Id) -> Diagnostic {
        Diagnostic::problem(problem, Label::span(name.span(), "Explicit declaration"))
            .with_context_id("parameter", name)
            .with_context("detected", concat!(file!(), ":", line!()))
            .with_secondary(Label::span(
                SourceSpan::builtin(),
                "Implicit declaration",
            ))
    }
}

/// Standard iterator adapter over a parameter iterator. Fuses after
/// the first fatal diagnostic.
pub struct Descriptors<'decl> {
    inner: ParamIterator<'decl>,
    done: bool,
}

impl Iterator for Descriptors<'_> {
    type Item = ResolutionResult<ParameterDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next_descriptor() {
            Ok(Some(descriptor)) => Some(Ok(descriptor)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(diagnostic) => {
                self.done = true;
                Some(Err(diagnostic))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferroplc_dsl::common::{
        ArrayVarDecl, CharacterStringLiteral, DerivedTypeDecl, DerivedTypeKind, StringType,
        StringVarDecl, StructuredVarDecl, VarDeclKind,
    };

    fn function(variables: Vec<VarDeclBlock>) -> FunctionDeclaration {
        FunctionDeclaration {
            name: Id::from("Calc"),
            return_type: TypeDescriptor::Elementary(ElementaryTypeName::INT),
            variables,
        }
    }

    fn names_of(iterator: &mut ParamIterator) -> Vec<String> {
        let mut names = vec![];
        while let Some(name) = iterator.next().unwrap() {
            names.push(name.to_string());
        }
        names
    }

    #[test]
    fn next_when_input_and_output_then_declared_params_before_implicit() {
        let declaration = function(vec![
            VarDeclBlock::inputs(vec![VarDeclKind::simple("a", ElementaryTypeName::INT)]),
            VarDeclBlock::outputs(vec![VarDeclKind::simple("b", ElementaryTypeName::BOOL)]),
        ]);
        let mut iterator = ParamIterator::function(&declaration);

        assert_eq!(iterator.next().unwrap(), Some(Id::from("a")));
        assert_eq!(iterator.param_direction(), Some(ParamDirection::Input));
        assert_eq!(
            iterator.param_type(),
            Some(TypeDescriptor::Elementary(ElementaryTypeName::INT))
        );
        assert_eq!(iterator.default_value(), None);

        assert_eq!(iterator.next().unwrap(), Some(Id::from("b")));
        assert_eq!(iterator.param_direction(), Some(ParamDirection::Output));

        assert_eq!(iterator.next().unwrap(), Some(Id::from("EN")));
        assert_eq!(iterator.param_direction(), Some(ParamDirection::Input));
        assert_eq!(
            iterator.param_type(),
            Some(TypeDescriptor::Elementary(ElementaryTypeName::BOOL))
        );
        assert_eq!(iterator.default_value(), Some(ConstantKind::boolean_true()));

        assert_eq!(iterator.next().unwrap(), Some(Id::from("ENO")));
        assert_eq!(iterator.param_direction(), Some(ParamDirection::Output));
        assert_eq!(iterator.default_value(), None);

        assert_eq!(iterator.next().unwrap(), None);
        assert!(iterator.current().is_none());
    }

    #[test]
    fn next_when_no_declared_params_then_exactly_en_and_eno() {
        let declaration = function(vec![]);
        let mut iterator = ParamIterator::function(&declaration);
        assert_eq!(names_of(&mut iterator), vec!["EN", "ENO"]);
    }

    #[test]
    fn next_when_implicit_params_then_builtin_span() {
        let declaration = function(vec![]);
        let mut iterator = ParamIterator::function(&declaration);
        iterator.next().unwrap();
        let en = iterator.current().unwrap();
        assert!(en.name.span().is_builtin());
    }

    #[test]
    fn next_when_grouped_names_then_flattened_in_order_with_shared_type() {
        let declaration = function(vec![VarDeclBlock::inputs(vec![VarDeclKind::group(
            &["a", "b", "c"],
            ElementaryTypeName::INT,
        )])]);
        let mut iterator = ParamIterator::function(&declaration);

        for expected in ["a", "b", "c"] {
            assert_eq!(iterator.next().unwrap(), Some(Id::from(expected)));
            assert_eq!(
                iterator.param_type(),
                Some(TypeDescriptor::Elementary(ElementaryTypeName::INT))
            );
            assert_eq!(iterator.param_direction(), Some(ParamDirection::Input));
        }
    }

    #[test]
    fn next_when_local_blocks_then_skipped_without_counting() {
        let declaration = function(vec![
            VarDeclBlock::locals(vec![VarDeclKind::simple("scratch", ElementaryTypeName::INT)]),
            VarDeclBlock::inputs(vec![VarDeclKind::simple("a", ElementaryTypeName::INT)]),
            VarDeclBlock::temps(vec![VarDeclKind::simple("tmp", ElementaryTypeName::BOOL)]),
        ]);
        let mut iterator = ParamIterator::function(&declaration);
        assert_eq!(names_of(&mut iterator), vec!["a", "EN", "ENO"]);
    }

    #[test]
    fn next_when_external_block_then_external_direction() {
        let declaration = function(vec![VarDeclBlock::externals(vec![VarDeclKind::external(
            "limit",
            ElementaryTypeName::REAL,
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        assert_eq!(iterator.next().unwrap(), Some(Id::from("limit")));
        assert_eq!(iterator.param_direction(), Some(ParamDirection::External));
    }

    #[test]
    fn next_when_default_value_then_cached_with_param() {
        let declaration = function(vec![VarDeclBlock::inputs(vec![VarDeclKind::initialized(
            "a",
            ElementaryTypeName::INT,
            ConstantKind::integer_literal("42").unwrap(),
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        iterator.next().unwrap();
        assert_eq!(
            iterator.default_value(),
            Some(ConstantKind::integer_literal("42").unwrap())
        );
    }

    #[test]
    fn next_when_array_param_then_type_is_declaration_instance() {
        let spec = DerivedTypeDecl::new("POINTS", DerivedTypeKind::Array);
        let declaration = function(vec![VarDeclBlock::inputs(vec![VarDeclKind::Array(
            ArrayVarDecl {
                names: vec![Id::from("samples")],
                spec: spec.clone(),
            },
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        iterator.next().unwrap();
        assert_eq!(iterator.param_type(), Some(TypeDescriptor::derived(&spec)));
    }

    #[test]
    fn next_when_structured_in_out_param_then_in_out_direction_and_declaration_type() {
        let point = DerivedTypeDecl::new("POINT", DerivedTypeKind::Structure);
        let declaration = function(vec![VarDeclBlock::in_outs(vec![VarDeclKind::Structured(
            StructuredVarDecl {
                names: vec![Id::from("target")],
                type_decl: point.clone(),
            },
        )])]);
        let mut iterator = ParamIterator::function(&declaration);

        assert_eq!(iterator.next().unwrap(), Some(Id::from("target")));
        assert_eq!(iterator.param_direction(), Some(ParamDirection::InOut));
        assert_eq!(iterator.param_type(), Some(TypeDescriptor::derived(&point)));
        assert_eq!(iterator.default_value(), None);
        assert_eq!(names_of(&mut iterator), vec!["EN", "ENO"]);
    }

    #[test]
    fn next_when_string_param_then_string_type_and_default() {
        let declaration = function(vec![VarDeclBlock::inputs(vec![VarDeclKind::String(
            StringVarDecl {
                names: vec![Id::from("msg")],
                width: StringType::String,
                length: None,
                initial_value: Some(CharacterStringLiteral::of("idle")),
            },
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        iterator.next().unwrap();
        assert_eq!(
            iterator.param_type(),
            Some(TypeDescriptor::Elementary(ElementaryTypeName::STRING))
        );
        assert_eq!(
            iterator.default_value(),
            Some(ConstantKind::CharacterString(CharacterStringLiteral::of(
                "idle"
            )))
        );
    }

    #[test]
    fn next_when_explicit_en_declared_then_enumerated_not_synthesized() {
        let declaration = FunctionBlockDeclaration {
            name: Id::from("Gate"),
            variables: vec![VarDeclBlock::inputs(vec![
                VarDeclKind::simple("EN", ElementaryTypeName::BOOL),
                VarDeclKind::simple("a", ElementaryTypeName::INT),
            ])],
            span: SourceSpan::default(),
        };
        let mut iterator = ParamIterator::function_block(&declaration);
        // EN appears once, from the declaration, and repeated walks over
        // the explicit declaration are not an error.
        assert_eq!(names_of(&mut iterator), vec!["EN", "a", "ENO"]);
    }

    #[test]
    fn next_when_en_declared_after_synthesis_then_fatal() {
        let declaration = function(vec![VarDeclBlock::inputs(vec![VarDeclKind::simple(
            "EN",
            ElementaryTypeName::BOOL,
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        // Force the state that arises when the declaration blocks gain
        // an explicit EN after the implicit one was synthesized.
        iterator.en = ImplicitParam::Synthesized;
        let diagnostic = iterator.next().unwrap_err();
        assert_eq!(diagnostic.code, "P0001");
        assert!(diagnostic.secondary[0].file_id.is_builtin());
    }

    #[test]
    fn next_when_eno_declared_after_synthesis_then_fatal() {
        let declaration = function(vec![VarDeclBlock::outputs(vec![VarDeclKind::simple(
            "eno",
            ElementaryTypeName::BOOL,
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        iterator.eno = ImplicitParam::Synthesized;
        let diagnostic = iterator.next().unwrap_err();
        assert_eq!(diagnostic.code, "P0002");
    }

    #[test]
    fn reset_when_enumerated_again_then_same_sequence() {
        let declaration = function(vec![VarDeclBlock::inputs(vec![VarDeclKind::group(
            &["a", "b"],
            ElementaryTypeName::DINT,
        )])]);
        let mut iterator = ParamIterator::function(&declaration);
        let first = names_of(&mut iterator);
        iterator.reset();
        let second = names_of(&mut iterator);
        assert_eq!(first, second);
        assert_eq!(first, vec!["a", "b", "EN", "ENO"]);
    }

    #[test]
    fn descriptors_when_collected_then_full_sequence() {
        let declaration = ProgramDeclaration {
            name: Id::from("Main"),
            variables: vec![VarDeclBlock::inputs(vec![VarDeclKind::simple(
                "run",
                ElementaryTypeName::BOOL,
            )])],
        };
        let descriptors: Vec<ParameterDescriptor> = ParamIterator::program(&declaration)
            .descriptors()
            .collect::<Result<_, _>>()
            .unwrap();
        let names: Vec<String> = descriptors
            .iter()
            .map(|descriptor| descriptor.name.to_string())
            .collect();
        assert_eq!(names, vec!["run", "EN", "ENO"]);
        assert_eq!(
            descriptors[1].default_value,
            Some(ConstantKind::boolean_true())
        );
    }
}
