//! Type, field and argument definitions
//!
//! Every definition that can carry annotations implements [`HasDirectives`],
//! which is the single seam the schema's metadata lookup goes through.

use crate::directive::Directive;
use crate::type_ref::TypeRef;
use crate::value::InputValue;
use indexmap::IndexMap;

/// Schema element carrying directive metadata
pub trait HasDirectives {
    /// Directives in declaration order
    fn directives(&self) -> &[Directive];

    /// Short human-readable location for diagnostics
    fn describe(&self) -> String;
}

/// Named type definition
///
/// Closed set of kinds, resolved once when the schema is built.
#[derive(Debug, Clone)]
pub enum TypeDef {
    /// Leaf scalar (`String`, `Int`, custom scalars)
    Scalar(String),
    /// Leaf enumeration
    Enum { name: String, values: Vec<String> },
    /// Structured record usable as an argument type
    InputObject(InputObjectType),
    /// Output object with resolvable fields
    Object(ObjectType),
}

impl TypeDef {
    /// Type name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(name) | Self::Enum { name, .. } => name,
            Self::InputObject(ty) => ty.name(),
            Self::Object(ty) => ty.name(),
        }
    }

    /// Check if usable in argument position
    #[inline]
    #[must_use]
    pub fn is_input(&self) -> bool {
        !matches!(self, Self::Object(_))
    }

    /// Check if usable as a field's output type
    #[inline]
    #[must_use]
    pub fn is_output(&self) -> bool {
        !matches!(self, Self::InputObject(_))
    }
}

/// Output object type
#[derive(Debug, Clone)]
pub struct ObjectType {
    name: String,
    fields: IndexMap<String, FieldDef>,
}

impl ObjectType {
    /// Create empty object type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field, returning the updated type
    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub(crate) fn insert_field(&mut self, field: FieldDef) -> bool {
        self.fields.insert(field.name.clone(), field).is_none()
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut FieldDef> {
        self.fields.values_mut()
    }

    /// Type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field definition
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }
}

/// Output field definition
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    ty: TypeRef,
    args: Vec<ArgumentDef>,
    directives: Vec<Directive>,
    owner: String,
}

impl FieldDef {
    /// Create field definition
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            args: Vec::new(),
            directives: Vec::new(),
            owner: String::new(),
        }
    }

    /// Add an argument
    #[must_use]
    pub fn with_arg(mut self, arg: ArgumentDef) -> Self {
        self.args.push(arg);
        self
    }

    /// Attach a directive
    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
        let location = format!("{owner}.{}", self.name);
        for arg in &mut self.args {
            arg.set_owner(location.clone());
        }
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared output type
    #[inline]
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Arguments in declaration order
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[ArgumentDef] {
        &self.args
    }

    /// Look up an argument by name
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&ArgumentDef> {
        self.args.iter().find(|a| a.name == name)
    }
}

impl HasDirectives for FieldDef {
    fn directives(&self) -> &[Directive] {
        &self.directives
    }

    fn describe(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }
}

/// Argument definition
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    name: String,
    ty: TypeRef,
    default_value: Option<InputValue>,
    directives: Vec<Directive>,
    owner: String,
}

impl ArgumentDef {
    /// Create argument definition without default
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
            directives: Vec::new(),
            owner: String::new(),
        }
    }

    /// Declare a default value
    #[must_use]
    pub fn with_default(mut self, value: impl Into<InputValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attach a directive
    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub(crate) fn set_owner(&mut self, owner: String) {
        self.owner = owner;
    }

    /// Argument name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    #[inline]
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Declared default value
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&InputValue> {
        self.default_value.as_ref()
    }
}

impl HasDirectives for ArgumentDef {
    fn directives(&self) -> &[Directive] {
        &self.directives
    }

    fn describe(&self) -> String {
        format!("{}({})", self.owner, self.name)
    }
}

/// Structured record type usable in argument position
#[derive(Debug, Clone)]
pub struct InputObjectType {
    name: String,
    fields: IndexMap<String, InputFieldDef>,
}

impl InputObjectType {
    /// Create empty input object type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field, returning the updated type
    #[must_use]
    pub fn with_field(mut self, field: InputFieldDef) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub(crate) fn insert_field(&mut self, field: InputFieldDef) -> bool {
        self.fields.insert(field.name.clone(), field).is_none()
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut InputFieldDef> {
        self.fields.values_mut()
    }

    /// Type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field definition
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&InputFieldDef> {
        self.fields.get(name)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &InputFieldDef> {
        self.fields.values()
    }
}

/// Field of a structured record type
#[derive(Debug, Clone)]
pub struct InputFieldDef {
    name: String,
    ty: TypeRef,
    default_value: Option<InputValue>,
    directives: Vec<Directive>,
    owner: String,
}

impl InputFieldDef {
    /// Create input field definition without default
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
            directives: Vec::new(),
            owner: String::new(),
        }
    }

    /// Declare a default value
    #[must_use]
    pub fn with_default(mut self, value: impl Into<InputValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attach a directive
    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    #[inline]
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Declared default value
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&InputValue> {
        self.default_value.as_ref()
    }
}

impl HasDirectives for InputFieldDef {
    fn directives(&self) -> &[Directive] {
        &self.directives
    }

    fn describe(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }
}
