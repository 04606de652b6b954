//! Provides definitions of objects from IEC 61131-3 common elements.
//!
//! See section 2.
use std::fmt;
use std::sync::Arc;

use crate::core::{Id, Located, SourceSpan};
use crate::time::*;

/// Container for elementary constants.
///
/// See section 2.2.
#[derive(PartialEq, Clone, Debug)]
pub enum ConstantKind {
    IntegerLiteral(IntegerLiteral),
    RealLiteral(RealLiteral),
    Boolean(BooleanLiteral),
    CharacterString(CharacterStringLiteral),
    Duration(DurationLiteral),
    TimeOfDay(TimeOfDayLiteral),
    Date(DateLiteral),
    DateAndTime(DateAndTimeLiteral),
    BitStringLiteral(BitStringLiteral),
}

impl ConstantKind {
    pub fn integer_literal(value: &str) -> Result<Self, &'static str> {
        Ok(Self::IntegerLiteral(IntegerLiteral {
            value: SignedInteger::new(value, SourceSpan::default())?,
            data_type: None,
        }))
    }

    /// Creates the boolean literal `TRUE`.
    pub fn boolean_true() -> Self {
        Self::Boolean(BooleanLiteral::new(Boolean::True))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Boolean {
    True,
    False,
}

// Numeric literals declared by 2.2.1. Numeric literals define
// how data is expressed and are distinct from but associated with
// data types.

/// Integer literal. The representation is of the largest possible integer
/// and later bound to smaller types depending on context.
#[derive(Debug, Clone, PartialEq)]
pub struct Integer {
    pub span: SourceSpan,
    /// The value in the maximum possible size. An integer is inherently
    /// an unsigned value.
    pub value: u128,
}

impl Integer {
    pub fn new(a: &str, span: SourceSpan) -> Result<Self, &'static str> {
        // IEC 61131 allows underscores in numbers so remove those before
        // we try to parse.
        let without_underscore: String = a.chars().filter(|c| c.is_ascii_digit()).collect();
        without_underscore
            .as_str()
            .parse::<u128>()
            .map(|value| Integer { span, value })
            .map_err(|_e| "dec")
    }
}

impl Located for Integer {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}", self.value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedInteger {
    pub value: Integer,
    pub is_neg: bool,
}

impl SignedInteger {
    pub fn new(a: &str, span: SourceSpan) -> Result<Self, &'static str> {
        match a.chars().next() {
            Some('+') => {
                let whole = a.get(1..).ok_or("int")?;
                Ok(Self {
                    value: Integer::new(whole, span)?,
                    is_neg: false,
                })
            }
            Some('-') => {
                let whole = a.get(1..).ok_or("int")?;
                Ok(Self {
                    value: Integer::new(whole, span)?,
                    is_neg: true,
                })
            }
            _ => Ok(Self {
                value: Integer::new(a, span)?,
                is_neg: false,
            }),
        }
    }

    pub fn positive(a: &str) -> Result<Self, &'static str> {
        Ok(Self {
            value: Integer::new(a, SourceSpan::default())?,
            is_neg: false,
        })
    }

    pub fn negative(a: &str) -> Result<Self, &'static str> {
        Ok(Self {
            value: Integer::new(a, SourceSpan::default())?,
            is_neg: true,
        })
    }
}

impl fmt::Display for SignedInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neg {
            f.write_fmt(format_args!("-{}", self.value))
        } else {
            f.write_fmt(format_args!("{}", self.value))
        }
    }
}

/// A signed integer literal with an optional type name.
///
/// See section 2.2.1.
#[derive(Debug, PartialEq, Clone)]
pub struct IntegerLiteral {
    pub value: SignedInteger,
    pub data_type: Option<ElementaryTypeName>,
}

/// The fixed point structure represents a fixed point number.
///
/// The structure keeps the whole and decimal parts as integers so that
/// we do not lose precision with floating point rounding.
#[derive(Debug, PartialEq, Clone)]
pub struct FixedPoint {
    pub span: SourceSpan,
    pub whole: u64,
    pub femptos: u64,
}

impl FixedPoint {
    pub const FRACTIONAL_UNITS: u64 = 1_000_000_000_000_000;

    pub fn parse(input: &str) -> Result<FixedPoint, &'static str> {
        // IEC 61131 allows underscores in numbers so remove those before we try to parse.
        let value: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        match value.split_once('.') {
            Some((whole, decimal)) => {
                let whole = whole
                    .parse::<u64>()
                    .map_err(|_e| "fixed point whole not valid")?;

                // We keep 15 digits of precision in the decimal part so
                // that values fit a u64 without wrapping. Post-fix zeros
                // bring shorter inputs up to that precision.
                if decimal.len() > 15 {
                    return Err("fixed point decimal excessive precision");
                }

                let mut decimal = decimal.to_owned();
                let number_of_zeros_to_add = 15 - decimal.len();
                decimal.push_str("0".repeat(number_of_zeros_to_add).as_str());

                let decimal = decimal
                    .parse::<u64>()
                    .map_err(|_e| "fixed point decimal not valid")?;

                Ok(FixedPoint {
                    span: SourceSpan::default(),
                    whole,
                    femptos: decimal,
                })
            }
            None => {
                // There is no decimal point so this is essentially a whole number
                Ok(FixedPoint {
                    span: SourceSpan::default(),
                    whole: value.parse::<u64>().map_err(|_e| "u64")?,
                    femptos: 0,
                })
            }
        }
    }
}

/// A real (floating point) literal with an optional type name.
///
/// See section 2.2.1.
#[derive(Debug, PartialEq, Clone)]
pub struct RealLiteral {
    pub value: f64,
    pub data_type: Option<ElementaryTypeName>,
}

impl RealLiteral {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            data_type: None,
        }
    }
}

// See section 2.2.2
#[derive(Debug, PartialEq, Clone)]
pub struct BooleanLiteral {
    pub value: Boolean,
}

impl BooleanLiteral {
    pub fn new(value: Boolean) -> Self {
        Self { value }
    }
}

// See section 2.2.2
#[derive(Debug, PartialEq, Clone)]
pub struct CharacterStringLiteral {
    pub value: Vec<char>,
}

impl CharacterStringLiteral {
    pub fn new(value: Vec<char>) -> Self {
        Self { value }
    }

    pub fn of(value: &str) -> Self {
        Self {
            value: value.chars().collect(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct BitStringLiteral {
    pub value: Integer,
    pub data_type: Option<ElementaryTypeName>,
}

/// The elementary type names defined by the standard, together with the
/// parallel SAFE family defined by the PLCopen safety profile for
/// safety-certified program sections.
///
/// See section 2.3.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum ElementaryTypeName {
    BOOL,
    SINT,
    INT,
    DINT,
    LINT,
    USINT,
    UINT,
    UDINT,
    ULINT,
    REAL,
    LREAL,
    TIME,
    DATE,
    TimeOfDay,
    DateAndTime,
    STRING,
    WSTRING,
    BYTE,
    WORD,
    DWORD,
    LWORD,
    SAFEBOOL,
    SAFESINT,
    SAFEINT,
    SAFEDINT,
    SAFELINT,
    SAFEUSINT,
    SAFEUINT,
    SAFEUDINT,
    SAFEULINT,
    SAFEREAL,
    SAFELREAL,
    SAFETIME,
    SAFEDATE,
    SafeTimeOfDay,
    SafeDateAndTime,
    SAFESTRING,
    SAFEWSTRING,
    SAFEBYTE,
    SAFEWORD,
    SAFEDWORD,
    SAFELWORD,
}

impl ElementaryTypeName {
    /// Returns the keyword for the type as written in source.
    pub fn name(&self) -> &'static str {
        match self {
            ElementaryTypeName::BOOL => "BOOL",
            ElementaryTypeName::SINT => "SINT",
            ElementaryTypeName::INT => "INT",
            ElementaryTypeName::DINT => "DINT",
            ElementaryTypeName::LINT => "LINT",
            ElementaryTypeName::USINT => "USINT",
            ElementaryTypeName::UINT => "UINT",
            ElementaryTypeName::UDINT => "UDINT",
            ElementaryTypeName::ULINT => "ULINT",
            ElementaryTypeName::REAL => "REAL",
            ElementaryTypeName::LREAL => "LREAL",
            ElementaryTypeName::TIME => "TIME",
            ElementaryTypeName::DATE => "DATE",
            ElementaryTypeName::TimeOfDay => "TIME_OF_DAY",
            ElementaryTypeName::DateAndTime => "DATE_AND_TIME",
            ElementaryTypeName::STRING => "STRING",
            ElementaryTypeName::WSTRING => "WSTRING",
            ElementaryTypeName::BYTE => "BYTE",
            ElementaryTypeName::WORD => "WORD",
            ElementaryTypeName::DWORD => "DWORD",
            ElementaryTypeName::LWORD => "LWORD",
            ElementaryTypeName::SAFEBOOL => "SAFEBOOL",
            ElementaryTypeName::SAFESINT => "SAFESINT",
            ElementaryTypeName::SAFEINT => "SAFEINT",
            ElementaryTypeName::SAFEDINT => "SAFEDINT",
            ElementaryTypeName::SAFELINT => "SAFELINT",
            ElementaryTypeName::SAFEUSINT => "SAFEUSINT",
            ElementaryTypeName::SAFEUINT => "SAFEUINT",
            ElementaryTypeName::SAFEUDINT => "SAFEUDINT",
            ElementaryTypeName::SAFEULINT => "SAFEULINT",
            ElementaryTypeName::SAFEREAL => "SAFEREAL",
            ElementaryTypeName::SAFELREAL => "SAFELREAL",
            ElementaryTypeName::SAFETIME => "SAFETIME",
            ElementaryTypeName::SAFEDATE => "SAFEDATE",
            ElementaryTypeName::SafeTimeOfDay => "SAFETIME_OF_DAY",
            ElementaryTypeName::SafeDateAndTime => "SAFEDATE_AND_TIME",
            ElementaryTypeName::SAFESTRING => "SAFESTRING",
            ElementaryTypeName::SAFEWSTRING => "SAFEWSTRING",
            ElementaryTypeName::SAFEBYTE => "SAFEBYTE",
            ElementaryTypeName::SAFEWORD => "SAFEWORD",
            ElementaryTypeName::SAFEDWORD => "SAFEDWORD",
            ElementaryTypeName::SAFELWORD => "SAFELWORD",
        }
    }

    pub fn as_id(&self) -> Id {
        Id::from(self.name())
    }
}

impl fmt::Display for ElementaryTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ways a derived (user defined) type can be introduced.
///
/// See section 2.3.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedTypeKind {
    Enumeration,
    Subrange,
    Structure,
    Array,
    Alias,
    FunctionBlock,
}

/// Declaration of a derived type.
///
/// Derived type declarations are shared through `Arc` handles so that a
/// type use can refer back to the declaration that introduced the type.
/// Two declarations are the same type only when they are the same
/// declaration instance - structurally identical declarations with
/// different names (or the same name in different scopes) are distinct
/// types.
#[derive(Debug)]
pub struct DerivedTypeDecl {
    pub name: Id,
    pub kind: DerivedTypeKind,
    pub span: SourceSpan,
}

impl DerivedTypeDecl {
    pub fn new(name: &str, kind: DerivedTypeKind) -> Arc<Self> {
        Arc::new(Self {
            name: Id::from(name),
            kind,
            span: SourceSpan::default(),
        })
    }
}

impl Located for DerivedTypeDecl {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

/// A resolved reference to exactly one type.
///
/// See section 2.3.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// One of the built-in elementary types.
    Elementary(ElementaryTypeName),
    /// A derived type, identified by the declaration that introduced it.
    Derived(Arc<DerivedTypeDecl>),
}

impl TypeDescriptor {
    pub fn derived(decl: &Arc<DerivedTypeDecl>) -> Self {
        TypeDescriptor::Derived(Arc::clone(decl))
    }
}

impl PartialEq for TypeDescriptor {
    /// Two elementary types are equal when they have the same type name.
    /// Two derived types are equal only when they originate from the
    /// same declaration instance. An elementary type never equals a
    /// derived type, even one that aliases it.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeDescriptor::Elementary(a), TypeDescriptor::Elementary(b)) => a == b,
            (TypeDescriptor::Derived(a), TypeDescriptor::Derived(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
impl Eq for TypeDescriptor {}

impl From<ElementaryTypeName> for TypeDescriptor {
    fn from(value: ElementaryTypeName) -> Self {
        TypeDescriptor::Elementary(value)
    }
}

impl From<Arc<DerivedTypeDecl>> for TypeDescriptor {
    fn from(value: Arc<DerivedTypeDecl>) -> Self {
        TypeDescriptor::Derived(value)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Elementary(name) => f.write_str(name.name()),
            TypeDescriptor::Derived(decl) => write!(f, "{}", decl.name),
        }
    }
}

/// Width of a character string type.
///
/// See section 2.3.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringType {
    /// Single-byte characters.
    String,
    /// Double-byte characters.
    WString,
}

impl StringType {
    pub fn type_name(&self) -> ElementaryTypeName {
        match self {
            StringType::String => ElementaryTypeName::STRING,
            StringType::WString => ElementaryTypeName::WSTRING,
        }
    }
}

/// Kinds of variable declaration blocks.
///
/// See section 2.4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Local to a POU.
    Var,
    /// Local to a POU. Does not need to be maintained
    /// between calls to a POU.
    VarTemp,
    /// Variable that is visible to a calling POU as an input.
    Input,
    /// Variable that is visible to a calling POU and can only
    /// be read from the calling POU. It can be written to
    /// by the POU that defines the variable.
    Output,
    /// Variable that is visible to a calling POU and is readable and
    /// writeable by the calling POU.
    InOut,
    /// Enables a POU to read and (possibly) write to a global
    /// variable.
    External,
}

/// See section 2.4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationQualifier {
    Unspecified,
    Constant,
    /// Stored so that the value is retained through power loss.
    Retain,
    /// Stored so that the value is NOT retained through power loss.
    NonRetain,
}

/// Declaration of one group of variables with a simple specification,
/// for example `a, b, c : INT := 1;`.
///
/// See section 2.4.3.
#[derive(Debug, Clone)]
pub struct SimpleVarDecl {
    pub names: Vec<Id>,
    pub declared_type: TypeDescriptor,
    pub initial_value: Option<ConstantKind>,
}

/// Declaration of one group of variables with an array specification.
/// The array specification is a derived type declaration; anonymous
/// inline specifications are lifted to unnamed declarations before this
/// tree is built.
#[derive(Debug, Clone)]
pub struct ArrayVarDecl {
    pub names: Vec<Id>,
    pub spec: Arc<DerivedTypeDecl>,
}

/// Declaration of one group of variables with a structured type.
#[derive(Debug, Clone)]
pub struct StructuredVarDecl {
    pub names: Vec<Id>,
    pub type_decl: Arc<DerivedTypeDecl>,
}

/// Declaration of one group of string variables, possibly with a
/// length restriction and an initial value.
#[derive(Debug, Clone)]
pub struct StringVarDecl {
    pub names: Vec<Id>,
    pub width: StringType,
    pub length: Option<Integer>,
    pub initial_value: Option<CharacterStringLiteral>,
}

/// Declaration of one external variable. External declarations name a
/// single global variable along with its specification.
#[derive(Debug, Clone)]
pub struct ExternalVarDecl {
    pub name: Id,
    pub declared_type: TypeDescriptor,
}

/// The closed set of variable declaration shapes that can appear inside
/// a declaration block.
///
/// See section 2.4.3.
#[derive(Debug, Clone)]
pub enum VarDeclKind {
    Simple(SimpleVarDecl),
    Array(ArrayVarDecl),
    Structured(StructuredVarDecl),
    String(StringVarDecl),
    External(ExternalVarDecl),
}

impl VarDeclKind {
    /// Creates a declaration of a single variable with no initial value.
    pub fn simple(name: &str, declared_type: impl Into<TypeDescriptor>) -> Self {
        Self::group(&[name], declared_type)
    }

    /// Creates a declaration of a group of variables that share one
    /// specification, such as `a, b, c : INT;`.
    pub fn group(names: &[&str], declared_type: impl Into<TypeDescriptor>) -> Self {
        VarDeclKind::Simple(SimpleVarDecl {
            names: names.iter().map(|name| Id::from(name)).collect(),
            declared_type: declared_type.into(),
            initial_value: None,
        })
    }

    /// Creates a declaration of a single variable with an initial value.
    pub fn initialized(
        name: &str,
        declared_type: impl Into<TypeDescriptor>,
        initial_value: ConstantKind,
    ) -> Self {
        VarDeclKind::Simple(SimpleVarDecl {
            names: vec![Id::from(name)],
            declared_type: declared_type.into(),
            initial_value: Some(initial_value),
        })
    }

    /// Creates an external reference to a global variable.
    pub fn external(name: &str, declared_type: impl Into<TypeDescriptor>) -> Self {
        VarDeclKind::External(ExternalVarDecl {
            name: Id::from(name),
            declared_type: declared_type.into(),
        })
    }

    /// The names introduced by this declaration, in source order.
    pub fn names(&self) -> &[Id] {
        match self {
            VarDeclKind::Simple(decl) => &decl.names,
            VarDeclKind::Array(decl) => &decl.names,
            VarDeclKind::Structured(decl) => &decl.names,
            VarDeclKind::String(decl) => &decl.names,
            VarDeclKind::External(decl) => std::slice::from_ref(&decl.name),
        }
    }

    /// The specification half of the declaration: the type that every
    /// name in the group is declared with.
    pub fn declared_type(&self) -> TypeDescriptor {
        match self {
            VarDeclKind::Simple(decl) => decl.declared_type.clone(),
            VarDeclKind::Array(decl) => TypeDescriptor::derived(&decl.spec),
            VarDeclKind::Structured(decl) => TypeDescriptor::derived(&decl.type_decl),
            VarDeclKind::String(decl) => TypeDescriptor::Elementary(decl.width.type_name()),
            VarDeclKind::External(decl) => decl.declared_type.clone(),
        }
    }

    /// The initializer half of the declaration, when one is present.
    pub fn initial_value(&self) -> Option<ConstantKind> {
        match self {
            VarDeclKind::Simple(decl) => decl.initial_value.clone(),
            VarDeclKind::String(decl) => decl
                .initial_value
                .clone()
                .map(ConstantKind::CharacterString),
            VarDeclKind::Array(_) | VarDeclKind::Structured(_) | VarDeclKind::External(_) => None,
        }
    }
}

/// A block of variable declarations, for example everything between
/// `VAR_INPUT` and `END_VAR`.
///
/// See section 2.4.3.
#[derive(Debug, Clone)]
pub struct VarDeclBlock {
    pub var_type: VariableType,
    pub qualifier: DeclarationQualifier,
    pub declarations: Vec<VarDeclKind>,
}

impl VarDeclBlock {
    pub fn new(var_type: VariableType, declarations: Vec<VarDeclKind>) -> Self {
        Self {
            var_type,
            qualifier: DeclarationQualifier::Unspecified,
            declarations,
        }
    }

    /// Creates a `VAR_INPUT` block.
    pub fn inputs(declarations: Vec<VarDeclKind>) -> Self {
        Self::new(VariableType::Input, declarations)
    }

    /// Creates a `VAR_OUTPUT` block.
    pub fn outputs(declarations: Vec<VarDeclKind>) -> Self {
        Self::new(VariableType::Output, declarations)
    }

    /// Creates a `VAR_IN_OUT` block.
    pub fn in_outs(declarations: Vec<VarDeclKind>) -> Self {
        Self::new(VariableType::InOut, declarations)
    }

    /// Creates a `VAR_EXTERNAL` block.
    pub fn externals(declarations: Vec<VarDeclKind>) -> Self {
        Self::new(VariableType::External, declarations)
    }

    /// Creates a `VAR` block.
    pub fn locals(declarations: Vec<VarDeclKind>) -> Self {
        Self::new(VariableType::Var, declarations)
    }

    /// Creates a `VAR_TEMP` block.
    pub fn temps(declarations: Vec<VarDeclKind>) -> Self {
        Self::new(VariableType::VarTemp, declarations)
    }
}

/// Defines a program organization unit that declares variables in
/// blocks.
pub trait HasVariableBlocks {
    /// The declaration blocks in source order.
    fn variable_blocks(&self) -> &[VarDeclBlock];
}

/// Function Program Organization Unit Declaration
///
/// A function declares a calculation that has only a result value
/// and no internal state.
///
/// See section 2.5.1.
#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    pub name: Id,
    pub return_type: TypeDescriptor,
    pub variables: Vec<VarDeclBlock>,
}

impl HasVariableBlocks for FunctionDeclaration {
    fn variable_blocks(&self) -> &[VarDeclBlock] {
        &self.variables
    }
}

/// Function Block Program Organization Unit Declaration
///
/// A function block declaration (as distinct from a particular
/// instance of a function block). The function block instance is stateful
/// and variables retain values between invocations.
///
/// See section 2.5.2.
#[derive(Debug, Clone)]
pub struct FunctionBlockDeclaration {
    pub name: Id,
    pub variables: Vec<VarDeclBlock>,
    pub span: SourceSpan,
}

impl HasVariableBlocks for FunctionBlockDeclaration {
    fn variable_blocks(&self) -> &[VarDeclBlock] {
        &self.variables
    }
}

impl Located for FunctionBlockDeclaration {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

/// "Program" Program Organization Unit Declaration
///
/// Programs assemble the units into a whole that embodies a measurement
/// or control objective.
///
/// See section 2.5.3.
#[derive(Debug, Clone)]
pub struct ProgramDeclaration {
    pub name: Id,
    pub variables: Vec<VarDeclBlock>,
}

impl HasVariableBlocks for ProgramDeclaration {
    fn variable_blocks(&self) -> &[VarDeclBlock] {
        &self.variables
    }
}
