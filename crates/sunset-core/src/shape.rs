//! Type-shape classification
//!
//! Answers the structural questions the walker asks of a declared type
//! without looking at runtime values.

use sunset_schema::{InputObjectType, Schema, TypeDef, TypeRef};

/// Structural kind of a type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Non-null wrapper
    Required,
    /// List wrapper
    List,
    /// Named input object
    StructuredRecord,
    /// Scalar, enum, or anything else without inner structure
    Leaf,
}

/// Classify the outermost layer of `ty`
#[must_use]
pub fn classify(schema: &Schema, ty: &TypeRef) -> TypeKind {
    match ty {
        TypeRef::NonNull(_) => TypeKind::Required,
        TypeRef::List(_) => TypeKind::List,
        TypeRef::Named(_) => match schema.resolve(ty) {
            Some(TypeDef::InputObject(_)) => TypeKind::StructuredRecord,
            _ => TypeKind::Leaf,
        },
    }
}

/// Strip every level of non-null wrapping
#[must_use]
pub fn unwrap_required(ty: &TypeRef) -> &TypeRef {
    let mut current = ty;
    while let TypeRef::NonNull(inner) = current {
        current = inner.as_ref();
    }
    current
}

/// List type, ignoring non-null wrapping
#[must_use]
pub fn is_list(ty: &TypeRef) -> bool {
    matches!(unwrap_required(ty), TypeRef::List(_))
}

/// Structured record type, ignoring non-null wrapping
#[must_use]
pub fn is_structured_record(schema: &Schema, ty: &TypeRef) -> bool {
    structured_record(schema, ty).is_some()
}

/// Element type of a list, ignoring non-null wrapping on the list
#[must_use]
pub fn list_item(ty: &TypeRef) -> Option<&TypeRef> {
    match unwrap_required(ty) {
        TypeRef::List(item) => Some(item.as_ref()),
        _ => None,
    }
}

/// Record definition behind `ty`, ignoring non-null wrapping
#[must_use]
pub fn structured_record<'s>(schema: &'s Schema, ty: &TypeRef) -> Option<&'s InputObjectType> {
    match unwrap_required(ty) {
        named @ TypeRef::Named(_) => match schema.resolve(named) {
            Some(TypeDef::InputObject(record)) => Some(record),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunset_schema::{InputFieldDef, ObjectType};

    fn schema() -> Schema {
        Schema::builder()
            .object(ObjectType::new("Query"))
            .input_object(
                InputObjectType::new("PostInput")
                    .with_field(InputFieldDef::new("title", TypeRef::named("String"))),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn classifies_each_layer() {
        let schema = schema();
        let ty: TypeRef = "[[PostInput!]!]!".parse().unwrap();

        assert_eq!(classify(&schema, &ty), TypeKind::Required);
        let ty = unwrap_required(&ty);
        assert_eq!(classify(&schema, ty), TypeKind::List);

        let inner = list_item(ty).unwrap();
        assert_eq!(classify(&schema, inner), TypeKind::Required);
        assert!(is_list(inner));

        let record = list_item(list_item(ty).unwrap()).unwrap();
        assert!(is_structured_record(&schema, record));
        assert_eq!(classify(&schema, unwrap_required(record)), TypeKind::StructuredRecord);
        assert_eq!(structured_record(&schema, record).unwrap().name(), "PostInput");
    }

    #[test]
    fn scalars_and_unknown_names_are_leaves() {
        let schema = schema();
        assert_eq!(classify(&schema, &TypeRef::named("String")), TypeKind::Leaf);
        assert_eq!(classify(&schema, &TypeRef::named("Missing")), TypeKind::Leaf);
        assert!(!is_structured_record(&schema, &TypeRef::named("String").non_null()));
        assert!(list_item(&TypeRef::named("String")).is_none());
    }

    #[test]
    fn unwrap_required_strips_only_non_null() {
        let ty = TypeRef::named("String").list().non_null();
        assert_eq!(unwrap_required(&ty), &TypeRef::named("String").list());
        assert!(is_list(&ty));
    }
}
