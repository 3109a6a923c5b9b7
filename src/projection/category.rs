//! Type categories and the category-driven traits of a type definition.
//!
//! The category of a `TypeDef` is derived from its interface flag and its base type. Every other
//! trait in this module (exclusive-to interfaces, flags enums, static classes, ...) is a
//! combination of the category with flags, generic parameters or well-known attributes.

use strum::{Display, EnumCount, EnumIter};

use crate::{
    metadata::{
        customattributes::{
            EXCLUSIVE_TO_ATTRIBUTE, FLAGS_ATTRIBUTE, PLATFORM_METADATA_NAMESPACE, SYSTEM_NAMESPACE,
        },
        store::MetadataStore,
        tables::{CustomAttribute, CustomAttributeRc, TypeDef, TypeDefOrRef, TypeDefRow},
    },
    Result,
};

/// Namespace of the structs with hand-written conversions
const FOUNDATION_NAMESPACE: &str = "Windows.Foundation";

/// Structs in [`FOUNDATION_NAMESPACE`] that the projection converts by hand
const CUSTOMIZED_STRUCTS: [&str; 4] = ["DateTime", "EventRegistrationToken", "HResult", "TimeSpan"];

/// The five kinds of type a definition can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TypeCategory {
    /// Interface flag set
    Interface,
    /// Runtime class, the fallback when no other rule applies
    Class,
    /// Derives from `System.ValueType`
    Struct,
    /// Derives from `System.Enum`
    Enum,
    /// Derives from `System.MulticastDelegate`
    Delegate,
}

/// Category of a type definition
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if the type or its base has no row.
pub fn type_category(store: &dyn MetadataStore, type_def: TypeDef) -> Result<TypeCategory> {
    category_of(store, &*store.type_def(type_def)?)
}

/// Category of an already loaded type definition row
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if the base type has no row.
pub fn category_of(store: &dyn MetadataStore, row: &TypeDefRow) -> Result<TypeCategory> {
    if row.is_interface() {
        return Ok(TypeCategory::Interface);
    }

    let base = match row.extends {
        Some(TypeDefOrRef::TypeRef(type_ref)) => {
            let base = store.type_ref(type_ref)?;
            (base.namespace.clone(), base.name.clone())
        }
        Some(TypeDefOrRef::TypeDef(type_def)) => {
            let base = store.type_def(type_def)?;
            (base.namespace.clone(), base.name.clone())
        }
        Some(TypeDefOrRef::TypeSpec(_)) | None => return Ok(TypeCategory::Class),
    };

    if base.0 != SYSTEM_NAMESPACE {
        return Ok(TypeCategory::Class);
    }

    Ok(match base.1.as_str() {
        "Enum" => TypeCategory::Enum,
        "ValueType" => TypeCategory::Struct,
        "MulticastDelegate" => TypeCategory::Delegate,
        _ => TypeCategory::Class,
    })
}

/// First attribute of the given type among `attributes`
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if an attribute handle has no row.
pub fn get_attribute(
    store: &dyn MetadataStore,
    attributes: &[CustomAttribute],
    namespace: &str,
    name: &str,
) -> Result<Option<CustomAttributeRc>> {
    for &attribute in attributes {
        let row = store.custom_attribute(attribute)?;
        if row.is(namespace, name) {
            return Ok(Some(row));
        }
    }
    Ok(None)
}

/// Interface carrying `ExclusiveToAttribute`
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if a row is missing.
pub fn is_exclusive_to(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    let row = store.type_def(type_def)?;
    Ok(category_of(store, &row)? == TypeCategory::Interface
        && get_attribute(
            store,
            &row.custom_attributes,
            PLATFORM_METADATA_NAMESPACE,
            EXCLUSIVE_TO_ATTRIBUTE,
        )?
        .is_some())
}

/// Enum carrying `System.FlagsAttribute`
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if a row is missing.
pub fn is_flags_enum(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    let row = store.type_def(type_def)?;
    Ok(category_of(store, &row)? == TypeCategory::Enum
        && get_attribute(store, &row.custom_attributes, SYSTEM_NAMESPACE, FLAGS_ATTRIBUTE)?
            .is_some())
}

/// Type declares generic parameters
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if the type has no row.
pub fn is_parameterized(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    Ok(store.type_def(type_def)?.is_generic())
}

/// Abstract runtime class, which can only have static members
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if a row is missing.
pub fn is_static_class(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    let row = store.type_def(type_def)?;
    Ok(category_of(store, &row)? == TypeCategory::Class && row.is_abstract())
}

/// One of the foundation structs with a hand-written projection
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if the type has no row.
pub fn is_customized_struct(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    let row = store.type_def(type_def)?;
    Ok(row.namespace == FOUNDATION_NAMESPACE && CUSTOMIZED_STRUCTS.contains(&row.name.as_str()))
}

/// One of the foundation structs converted by hand-written code
///
/// Currently the same set as [`is_customized_struct`].
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if the type has no row.
pub fn has_custom_conversion(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    is_customized_struct(store, type_def)
}

/// Instances of the type own a resource that must be released
///
/// True for structs, interfaces and instantiable (non-static) classes.
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if a row is missing.
pub fn has_dealloc(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    let row = store.type_def(type_def)?;
    Ok(match category_of(store, &row)? {
        TypeCategory::Struct | TypeCategory::Interface => true,
        TypeCategory::Class => !row.is_abstract(),
        TypeCategory::Enum | TypeCategory::Delegate => false,
    })
}

/// Class with a parameterless constructor
///
/// # Errors
/// Returns [`crate::Error::RowNotFound`] if a row is missing.
pub fn is_default_constructable(store: &dyn MetadataStore, type_def: TypeDef) -> Result<bool> {
    let row = store.type_def(type_def)?;
    if category_of(store, &row)? != TypeCategory::Class {
        return Ok(false);
    }

    for &method in &row.methods {
        let method = store.method_def(method)?;
        if method.is_constructor() && method.params.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Splits a namespace into its dotted segments
///
/// The global namespace yields a single empty segment.
#[must_use]
pub fn dotted_name_segments(namespace: &str) -> Vec<&str> {
    namespace.split('.').collect()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::metadata::{
        customattributes::CustomAttributeValue,
        store::{InMemoryStore, TypeDefBuilder},
    };

    #[test]
    fn category_from_flags_and_base() {
        let store = InMemoryStore::new();
        let interface = TypeDefBuilder::new("Demo", "IThing")
            .interface()
            .build(&store)
            .unwrap();
        let class = TypeDefBuilder::new("Demo", "Thing").class().build(&store).unwrap();
        let structure = TypeDefBuilder::new("Demo", "Point")
            .structure()
            .build(&store)
            .unwrap();
        let enumeration = TypeDefBuilder::new("Demo", "Color")
            .enumeration()
            .build(&store)
            .unwrap();
        let delegate = TypeDefBuilder::new("Demo", "Handler")
            .delegate()
            .build(&store)
            .unwrap();
        let derived = TypeDefBuilder::new("Demo", "Derived")
            .extends(class)
            .build(&store)
            .unwrap();

        let expect = [
            (interface, TypeCategory::Interface),
            (class, TypeCategory::Class),
            (structure, TypeCategory::Struct),
            (enumeration, TypeCategory::Enum),
            (delegate, TypeCategory::Delegate),
            (derived, TypeCategory::Class),
        ];
        for (type_def, category) in expect {
            assert_eq!(type_category(&store, type_def).unwrap(), category);
        }
    }

    #[test]
    fn non_system_base_is_class() {
        let store = InMemoryStore::new();
        let fake_enum = store.add_type_ref("Other", "Enum");
        let type_def = TypeDefBuilder::new("Demo", "NotAnEnum")
            .extends(fake_enum)
            .build(&store)
            .unwrap();
        assert_eq!(
            type_category(&store, type_def).unwrap(),
            TypeCategory::Class
        );
    }

    #[test]
    fn category_display_is_lowercase() {
        let names: Vec<String> = TypeCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["interface", "class", "struct", "enum", "delegate"]);
    }

    #[test]
    fn attribute_driven_traits() {
        let store = InMemoryStore::new();
        let flags = TypeDefBuilder::new("Demo", "Options")
            .enumeration()
            .attribute(SYSTEM_NAMESPACE, FLAGS_ATTRIBUTE, CustomAttributeValue::default())
            .build(&store)
            .unwrap();
        let plain = TypeDefBuilder::new("Demo", "Mode")
            .enumeration()
            .build(&store)
            .unwrap();
        let exclusive = TypeDefBuilder::new("Demo", "IWidgetStatics")
            .interface()
            .attribute(
                PLATFORM_METADATA_NAMESPACE,
                EXCLUSIVE_TO_ATTRIBUTE,
                CustomAttributeValue::default(),
            )
            .build(&store)
            .unwrap();
        // Flags on a non-enum do not make a flags enum
        let flagged_class = TypeDefBuilder::new("Demo", "Flagged")
            .class()
            .attribute(SYSTEM_NAMESPACE, FLAGS_ATTRIBUTE, CustomAttributeValue::default())
            .build(&store)
            .unwrap();

        assert!(is_flags_enum(&store, flags).unwrap());
        assert!(!is_flags_enum(&store, plain).unwrap());
        assert!(!is_flags_enum(&store, flagged_class).unwrap());
        assert!(is_exclusive_to(&store, exclusive).unwrap());
        assert!(!is_exclusive_to(&store, flags).unwrap());
    }

    #[test]
    fn class_traits() {
        let store = InMemoryStore::new();
        let statics = TypeDefBuilder::new("Demo", "Launcher")
            .class()
            .abstract_type()
            .build(&store)
            .unwrap();
        let activatable = TypeDefBuilder::new("Demo", "Widget")
            .class()
            .constructor(|c| c)
            .build(&store)
            .unwrap();
        let factory_only = TypeDefBuilder::new("Demo", "Gadget")
            .class()
            .constructor(|c| c.param("name", crate::metadata::signatures::TypeSignature::String))
            .build(&store)
            .unwrap();
        let structure = TypeDefBuilder::new("Demo", "Size")
            .structure()
            .build(&store)
            .unwrap();

        assert!(is_static_class(&store, statics).unwrap());
        assert!(!is_static_class(&store, activatable).unwrap());
        assert!(!has_dealloc(&store, statics).unwrap());
        assert!(has_dealloc(&store, activatable).unwrap());
        assert!(has_dealloc(&store, structure).unwrap());

        assert!(is_default_constructable(&store, activatable).unwrap());
        assert!(!is_default_constructable(&store, factory_only).unwrap());
        assert!(!is_default_constructable(&store, structure).unwrap());
    }

    #[test]
    fn foundation_customized_structs() {
        let store = InMemoryStore::new();
        let date_time = TypeDefBuilder::new("Windows.Foundation", "DateTime")
            .structure()
            .build(&store)
            .unwrap();
        let point = TypeDefBuilder::new("Windows.Foundation", "Point")
            .structure()
            .build(&store)
            .unwrap();
        let elsewhere = TypeDefBuilder::new("Demo", "TimeSpan")
            .structure()
            .build(&store)
            .unwrap();

        assert!(is_customized_struct(&store, date_time).unwrap());
        assert!(has_custom_conversion(&store, date_time).unwrap());
        assert!(!is_customized_struct(&store, point).unwrap());
        assert!(!is_customized_struct(&store, elsewhere).unwrap());
    }

    #[test]
    fn parameterized_types() {
        let store = InMemoryStore::new();
        let generic = TypeDefBuilder::new("Demo", "IBox`1")
            .interface()
            .generic_param("T")
            .build(&store)
            .unwrap();
        let plain = TypeDefBuilder::new("Demo", "IPlain")
            .interface()
            .build(&store)
            .unwrap();
        assert!(is_parameterized(&store, generic).unwrap());
        assert!(!is_parameterized(&store, plain).unwrap());
    }

    #[test]
    fn namespace_segments() {
        assert_eq!(
            dotted_name_segments("Windows.Foundation.Collections"),
            vec!["Windows", "Foundation", "Collections"]
        );
        assert_eq!(dotted_name_segments("Demo"), vec!["Demo"]);
        assert_eq!(dotted_name_segments(""), vec![""]);
    }
}
