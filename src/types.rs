use serde::{Deserialize, Serialize};

/// Sentinel type used when no annotation exists and nothing can be inferred.
pub const ANY_TYPE: &str = "any";

/// A line/column position. Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Source span of an extracted construct plus the file it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub file_path: String,
}

/// Flavor of a comment attached to a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "block")]
    Block,
    #[serde(rename = "jsdoc")]
    JsDoc,
}

impl CommentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentKind::Line => "line",
            CommentKind::Block => "block",
            CommentKind::JsDoc => "jsdoc",
        }
    }
}

/// A `@tag {type} name description` line from a JSDoc block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDocTag {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub description: String,
}

/// A comment immediately preceding a construct, with markers stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentInfo {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: CommentKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<JsDocTag>,
}

/// A function or method parameter.
///
/// For destructuring patterns `name` holds the pattern text for display while
/// `parameters` carries the names that are actually bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub default_value: Option<String>,
    pub is_optional: bool,
    pub is_rest: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_destructured: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl Parameter {
    /// Creates an untyped, required, non-rest parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: ANY_TYPE.to_string(),
            default_value: None,
            is_optional: false,
            is_rest: false,
            is_destructured: false,
            parameters: Vec::new(),
        }
    }
}

/// A free-standing function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_exported: bool,
    pub location: SourceLocation,
    pub comments: Vec<CommentInfo>,
}

/// How a static or dynamic import binds names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
    SideEffect,
    Dynamic,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Default => "default",
            ImportKind::Named => "named",
            ImportKind::Namespace => "namespace",
            ImportKind::SideEffect => "side-effect",
            ImportKind::Dynamic => "dynamic",
        }
    }
}

/// One name bound by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub is_type: bool,
}

/// An import statement or dynamic `import()` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    pub source: String,
    pub imports: Vec<ImportedItem>,
    #[serde(rename = "type")]
    pub kind: ImportKind,
    pub is_type_only: bool,
}

/// What an export statement exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Variable,
    Default,
    Type,
    Interface,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Function => "function",
            ExportKind::Class => "class",
            ExportKind::Variable => "variable",
            ExportKind::Default => "default",
            ExportKind::Type => "type",
            ExportKind::Interface => "interface",
        }
    }
}

/// One exported binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExportKind,
    pub is_re_export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub name: String,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub is_static: bool,
    pub is_private: bool,
    pub is_protected: bool,
    pub is_async: bool,
    pub is_abstract: bool,
    pub location: SourceLocation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CommentInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorInfo {
    pub parameters: Vec<Parameter>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub is_static: bool,
    pub is_private: bool,
    pub is_protected: bool,
    pub is_readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub location: SourceLocation,
}

/// A class declaration with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<MethodInfo>,
    pub properties: Vec<PropertyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<ConstructorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implements: Option<Vec<String>>,
    pub is_exported: bool,
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_types: Option<Vec<String>>,
    pub location: SourceLocation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CommentInfo>,
}

/// Keyword a variable was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Var => "var",
        }
    }
}

/// One declarator of a module-level (or nested) variable declaration.
///
/// `name` is a display string (`[a, ...rest]`, `{ a, b: c }` for patterns);
/// `bindings` lists the identifiers the declarator actually binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub name: String,
    pub bindings: Vec<String>,
    pub declaration_kind: DeclarationKind,
    pub is_exported: bool,
    pub value_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_optional: bool,
    pub is_readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub name: String,
    pub properties: Vec<InterfaceProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
    pub is_exported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_types: Option<Vec<String>>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub is_exported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_types: Option<Vec<String>>,
    pub location: SourceLocation,
}

/// Everything extracted from one file, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFileResult {
    pub functions: Vec<FunctionInfo>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub classes: Vec<ClassInfo>,
    pub variables: Vec<VariableInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    #[serde(rename = "types")]
    pub type_aliases: Vec<TypeAliasInfo>,
}

impl ParsedFileResult {
    /// Returns `true` if no construct of any kind was extracted.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.imports.is_empty()
            && self.exports.is_empty()
            && self.classes.is_empty()
            && self.variables.is_empty()
            && self.interfaces.is_empty()
            && self.type_aliases.is_empty()
    }
}
