//! Member classification of a type definition.
//!
//! [`classify_members`] splits the members of a `TypeDef` into disjoint groups: constructors,
//! plain methods, properties paired with their accessors, events paired with their accessors,
//! and fields. Accessor pairing validates the shape rules:
//!
//! - a property has exactly one getter and at most one setter, and nothing else
//! - an event has exactly one adder and one remover, and nothing else
//! - paired accessors agree on static-ness
//!
//! The free predicates (`is_getter`, `is_setter`, ...) classify accessor methods by their
//! special-name prefix, independent of any property or event link.

use std::collections::HashSet;

use crate::{
    metadata::{
        customattributes::{OVERLOAD_ATTRIBUTE, PLATFORM_METADATA_NAMESPACE},
        store::MetadataStore,
        tables::{Event, FieldRc, MethodDef, MethodDefRc, MethodDefRow, Property, TypeDef},
    },
    projection::{
        category::{category_of, get_attribute, is_flags_enum, type_category, TypeCategory},
        resolver::TypeResolver,
        semantics::{FundamentalType, TypeSemantics},
    },
    Error::{InconsistentAccessorStaticness, MalformedEvent, MalformedProperty},
    Result,
};

/// Name of a delegate's invocation method
pub const DELEGATE_INVOKE_NAME: &str = "Invoke";

/// A property with its accessor methods
#[derive(Debug, Clone)]
pub struct PropertyAccessors {
    /// The property
    pub property: Property,
    /// Name of the property
    pub name: String,
    /// The getter
    pub getter: MethodDefRc,
    /// The setter, for writable properties
    pub setter: Option<MethodDefRc>,
}

impl PropertyAccessors {
    /// Property is static (both accessors agree)
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.getter.is_static()
    }

    /// Property has a setter
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

/// An event with its accessor methods
#[derive(Debug, Clone)]
pub struct EventAccessors {
    /// The event
    pub event: Event,
    /// Name of the event
    pub name: String,
    /// The add method
    pub adder: MethodDefRc,
    /// The remove method
    pub remover: MethodDefRc,
}

impl EventAccessors {
    /// Event is static (both accessors agree)
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.adder.is_static()
    }
}

/// Members of a type, split into disjoint groups in declaration order
#[derive(Debug, Clone, Default)]
pub struct TypeMembers {
    /// Instance constructors
    pub constructors: Vec<MethodDefRc>,
    /// Methods that are neither constructors nor linked accessors
    pub methods: Vec<MethodDefRc>,
    /// Properties with their accessors
    pub properties: Vec<PropertyAccessors>,
    /// Events with their accessors
    pub events: Vec<EventAccessors>,
    /// Fields
    pub fields: Vec<FieldRc>,
}

/// Runtime-reserved `.ctor`
#[must_use]
pub fn is_constructor(method: &MethodDefRow) -> bool {
    method.is_constructor()
}

/// Special-name method starting with `get_`
#[must_use]
pub fn is_getter(method: &MethodDefRow) -> bool {
    method.is_special_name() && method.name.starts_with("get_")
}

/// Special-name method starting with `put_`
#[must_use]
pub fn is_setter(method: &MethodDefRow) -> bool {
    method.is_special_name() && method.name.starts_with("put_")
}

/// Special-name method starting with `add_`
#[must_use]
pub fn is_adder(method: &MethodDefRow) -> bool {
    method.is_special_name() && method.name.starts_with("add_")
}

/// Special-name method starting with `remove_`
#[must_use]
pub fn is_remover(method: &MethodDefRow) -> bool {
    method.is_special_name() && method.name.starts_with("remove_")
}

/// The getter and optional setter of a property
///
/// # Errors
/// Returns [`crate::Error::MalformedProperty`] if the property has no getter, more than one
/// getter or setter, or a link of another kind, and
/// [`crate::Error::InconsistentAccessorStaticness`] if getter and setter disagree on
/// static-ness.
pub fn property_accessors(store: &dyn MetadataStore, property: Property) -> Result<PropertyAccessors> {
    let row = store.property(property)?;
    let malformed = |reason: &str| MalformedProperty {
        name: row.name.clone(),
        reason: reason.to_string(),
    };

    let mut getter: Option<MethodDef> = None;
    let mut setter: Option<MethodDef> = None;
    for link in &row.semantics {
        if link.is_getter() {
            if getter.replace(link.method).is_some() {
                return Err(malformed("more than one getter"));
            }
        } else if link.is_setter() {
            if setter.replace(link.method).is_some() {
                return Err(malformed("more than one setter"));
            }
        } else {
            return Err(malformed("properties can only have get and set methods"));
        }
    }

    let getter = store.method_def(getter.ok_or_else(|| malformed("missing getter"))?)?;
    let setter = setter.map(|setter| store.method_def(setter)).transpose()?;

    if let Some(setter) = &setter {
        if setter.is_static() != getter.is_static() {
            return Err(InconsistentAccessorStaticness(row.name.clone()));
        }
    }

    Ok(PropertyAccessors {
        property,
        name: row.name.clone(),
        getter,
        setter,
    })
}

/// The add and remove methods of an event
///
/// # Errors
/// Returns [`crate::Error::MalformedEvent`] if an accessor is missing or duplicated, or a link
/// of another kind is present, and [`crate::Error::InconsistentAccessorStaticness`] if adder
/// and remover disagree on static-ness.
pub fn event_accessors(store: &dyn MetadataStore, event: Event) -> Result<EventAccessors> {
    let row = store.event(event)?;
    let malformed = |reason: &str| MalformedEvent {
        name: row.name.clone(),
        reason: reason.to_string(),
    };

    let mut adder: Option<MethodDef> = None;
    let mut remover: Option<MethodDef> = None;
    for link in &row.semantics {
        if link.is_add_on() {
            if adder.replace(link.method).is_some() {
                return Err(malformed("more than one add method"));
            }
        } else if link.is_remove_on() {
            if remover.replace(link.method).is_some() {
                return Err(malformed("more than one remove method"));
            }
        } else {
            return Err(malformed("events can only have add and remove methods"));
        }
    }

    let adder = store.method_def(adder.ok_or_else(|| malformed("missing add method"))?)?;
    let remover = store.method_def(remover.ok_or_else(|| malformed("missing remove method"))?)?;

    if adder.is_static() != remover.is_static() {
        return Err(InconsistentAccessorStaticness(row.name.clone()));
    }

    Ok(EventAccessors {
        event,
        name: row.name.clone(),
        adder,
        remover,
    })
}

/// Split the members of a type into disjoint groups
///
/// # Errors
/// Returns the first pairing error of [`property_accessors`] or [`event_accessors`], or
/// [`crate::Error::RowNotFound`] if a member row is missing.
pub fn classify_members(store: &dyn MetadataStore, type_def: TypeDef) -> Result<TypeMembers> {
    let row = store.type_def(type_def)?;
    let mut members = TypeMembers::default();
    let mut accessors = HashSet::new();

    for &property in &row.properties {
        let paired = property_accessors(store, property)?;
        accessors.insert(paired.getter.handle());
        if let Some(setter) = &paired.setter {
            accessors.insert(setter.handle());
        }
        members.properties.push(paired);
    }

    for &event in &row.events {
        let paired = event_accessors(store, event)?;
        accessors.insert(paired.adder.handle());
        accessors.insert(paired.remover.handle());
        members.events.push(paired);
    }

    for &method in &row.methods {
        let method = store.method_def(method)?;
        if method.is_constructor() {
            members.constructors.push(method);
        } else if !accessors.contains(&method.handle()) {
            members.methods.push(method);
        }
    }

    for &field in &row.fields {
        members.fields.push(store.field(field)?);
    }

    log::trace!(
        "{}: ctors={} methods={} properties={} events={} fields={}",
        row.fullname(),
        members.constructors.len(),
        members.methods.len(),
        members.properties.len(),
        members.events.len(),
        members.fields.len()
    );

    Ok(members)
}

/// Semantics of a struct field
///
/// Enum fields are lowered to their underlying type when `convert_enum` is set (`UInt32` for
/// flags enums, `Int32` otherwise). A `Windows.Foundation.IReference`1` instance is unwrapped
/// one level to its argument. Every other semantics is returned unchanged.
///
/// # Errors
/// Returns [`crate::Error::InvalidMetadata`] if the field's type is a definition other than an
/// enum or struct, or an `IReference`1` without exactly one argument, plus every resolution
/// error.
pub fn field_semantics(
    resolver: &TypeResolver<'_>,
    field: &FieldRc,
    convert_enum: bool,
) -> Result<TypeSemantics> {
    let store = resolver.store();

    match resolver.resolve(&field.signature.base)? {
        TypeSemantics::TypeDefinition(type_def) => match type_category(store, type_def)? {
            TypeCategory::Enum if convert_enum => {
                if is_flags_enum(store, type_def)? {
                    Ok(FundamentalType::UInt32.into())
                } else {
                    Ok(FundamentalType::Int32.into())
                }
            }
            TypeCategory::Enum | TypeCategory::Struct => Ok(TypeSemantics::TypeDefinition(type_def)),
            other => Err(malformed_error!(
                "Field {} has {} type {}, expected enum or struct",
                field.name,
                other,
                store.type_def(type_def)?.fullname()
            )),
        },
        TypeSemantics::GenericTypeInstance {
            generic_type,
            mut generic_args,
        } if store
            .type_def(generic_type)?
            .is_named("Windows.Foundation", "IReference`1") =>
        {
            if generic_args.len() != 1 {
                return Err(malformed_error!(
                    "Field {} is an IReference`1 with {} arguments",
                    field.name,
                    generic_args.len()
                ));
            }
            Ok(generic_args.remove(0))
        }
        other => Ok(other),
    }
}

/// The `Invoke` method of a delegate
///
/// # Errors
/// Returns [`crate::Error::InvalidMetadata`] if the type is not a delegate or has no special-name
/// `Invoke` method.
pub fn delegate_invoke(store: &dyn MetadataStore, type_def: TypeDef) -> Result<MethodDefRc> {
    let row = store.type_def(type_def)?;
    if category_of(store, &row)? != TypeCategory::Delegate {
        return Err(malformed_error!("{} is not a delegate", row.fullname()));
    }

    for &method in &row.methods {
        let method = store.method_def(method)?;
        if method.is_special_name() && method.name == DELEGATE_INVOKE_NAME {
            return Ok(method);
        }
    }

    Err(malformed_error!(
        "Invoke method not found on {}",
        row.fullname()
    ))
}

/// Name of a method as overloads are told apart: the `OverloadAttribute` name if present
///
/// # Errors
/// Returns [`crate::Error::InvalidMetadata`] if the attribute's first argument is not a string.
pub fn member_name(store: &dyn MetadataStore, method: &MethodDefRow) -> Result<String> {
    match get_attribute(
        store,
        &method.custom_attributes,
        PLATFORM_METADATA_NAMESPACE,
        OVERLOAD_ATTRIBUTE,
    )? {
        Some(attribute) => attribute
            .value
            .fixed_args
            .first()
            .and_then(|arg| arg.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                malformed_error!(
                    "OverloadAttribute on {} has no string argument",
                    method.name
                )
            }),
        None => Ok(method.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            customattributes::{
                CustomAttributeArgument, CustomAttributeValue, FLAGS_ATTRIBUTE, SYSTEM_NAMESPACE,
            },
            signatures::TypeSignature,
            store::{InMemoryStore, TypeDefBuilder},
            tables::MethodSemanticsAttributes,
        },
        Error,
    };

    #[test]
    fn members_are_disjoint() {
        let store = InMemoryStore::new();
        let handler = TypeDefBuilder::new("Demo", "ClickHandler")
            .delegate()
            .build(&store)
            .unwrap();
        let widget = TypeDefBuilder::new("Demo", "Widget")
            .class()
            .constructor(|c| c)
            .simple_property("Title", TypeSignature::String, true)
            .simple_property("Id", TypeSignature::I4, false)
            .simple_event("Clicked", handler)
            .method("Draw", |m| m)
            .field("raw", TypeSignature::I4)
            .build(&store)
            .unwrap();

        let members = classify_members(&store, widget).unwrap();
        assert_eq!(members.constructors.len(), 1);
        assert_eq!(
            members.methods.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["Draw"]
        );
        assert_eq!(members.properties.len(), 2);
        assert!(members.properties[0].is_writable());
        assert!(!members.properties[1].is_writable());
        assert_eq!(members.properties[1].getter.name, "get_Id");
        assert_eq!(members.events.len(), 1);
        assert_eq!(members.events[0].adder.name, "add_Clicked");
        assert_eq!(members.events[0].remover.name, "remove_Clicked");
        assert_eq!(members.fields.len(), 1);
    }

    #[test]
    fn property_with_two_getters_is_malformed() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "IBad")
            .interface()
            .method("get_A", |m| m.special_name().returns(TypeSignature::I4))
            .method("get_B", |m| m.special_name().returns(TypeSignature::I4))
            .property("A", |p| p.getter("get_A").getter("get_B"))
            .build(&store)
            .unwrap();

        assert!(matches!(
            classify_members(&store, type_def),
            Err(Error::MalformedProperty { name, .. }) if name == "A"
        ));
    }

    #[test]
    fn property_shape_errors() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "IShapes")
            .interface()
            .method("get_X", |m| m.special_name().returns(TypeSignature::I4))
            .method("put_X", |m| {
                m.special_name().static_method().param("v", TypeSignature::I4)
            })
            .method("other_X", |m| m.special_name())
            .property("SetterOnly", |p| p.setter("put_X"))
            .property("Other", |p| {
                p.getter("get_X")
                    .link(MethodSemanticsAttributes::OTHER, "other_X")
            })
            .property("Mixed", |p| p.getter("get_X").setter("put_X"))
            .build(&store)
            .unwrap();
        let row = store.type_def(type_def).unwrap();

        assert!(matches!(
            property_accessors(&store, row.properties[0]),
            Err(Error::MalformedProperty { .. })
        ));
        assert!(matches!(
            property_accessors(&store, row.properties[1]),
            Err(Error::MalformedProperty { .. })
        ));
        assert_eq!(
            property_accessors(&store, row.properties[2]).unwrap_err(),
            Error::InconsistentAccessorStaticness("Mixed".to_string())
        );
    }

    #[test]
    fn event_shape_errors() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "IEvents")
            .interface()
            .method("add_E", |m| m.special_name().param("h", TypeSignature::Object))
            .method("remove_E", |m| {
                m.special_name().static_method().param("t", TypeSignature::I8)
            })
            .event("AddOnly", |e| e.adder("add_E"))
            .event("Mixed", |e| e.adder("add_E").remover("remove_E"))
            .event("Fire", |e| {
                e.adder("add_E")
                    .link(MethodSemanticsAttributes::FIRE, "remove_E")
            })
            .build(&store)
            .unwrap();
        let row = store.type_def(type_def).unwrap();

        assert!(matches!(
            event_accessors(&store, row.events[0]),
            Err(Error::MalformedEvent { .. })
        ));
        assert_eq!(
            event_accessors(&store, row.events[1]).unwrap_err(),
            Error::InconsistentAccessorStaticness("Mixed".to_string())
        );
        assert!(matches!(
            event_accessors(&store, row.events[2]),
            Err(Error::MalformedEvent { .. })
        ));
    }

    #[test]
    fn enum_fields_lower_to_underlying() {
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
        let holder = TypeDefBuilder::new("Demo", "Holder")
            .structure()
            .field("options", TypeSignature::ValueType(flags.token()))
            .field("mode", TypeSignature::ValueType(plain.token()))
            .build(&store)
            .unwrap();
        let resolver = TypeResolver::new(&store);
        let fields = classify_members(&store, holder).unwrap().fields;

        assert_eq!(
            field_semantics(&resolver, &fields[0], true).unwrap(),
            FundamentalType::UInt32.into()
        );
        assert_eq!(
            field_semantics(&resolver, &fields[1], true).unwrap(),
            FundamentalType::Int32.into()
        );
        assert_eq!(
            field_semantics(&resolver, &fields[0], false).unwrap(),
            TypeSemantics::TypeDefinition(flags)
        );
    }

    #[test]
    fn reference_fields_unwrap_once() {
        let store = InMemoryStore::new();
        let reference = TypeDefBuilder::new("Windows.Foundation", "IReference`1")
            .interface()
            .generic_param("T")
            .build(&store)
            .unwrap();
        let other = TypeDefBuilder::new("Demo", "IBox`1")
            .interface()
            .generic_param("T")
            .build(&store)
            .unwrap();
        let class = TypeDefBuilder::new("Demo", "Thing").class().build(&store).unwrap();
        let holder = TypeDefBuilder::new("Demo", "Holder")
            .structure()
            .field(
                "maybe",
                TypeSignature::generic_class(
                    reference.token(),
                    vec![TypeSignature::generic_class(
                        reference.token(),
                        vec![TypeSignature::R8],
                    )],
                ),
            )
            .field(
                "boxed",
                TypeSignature::generic_class(other.token(), vec![TypeSignature::R8]),
            )
            .field("count", TypeSignature::U4)
            .field("thing", TypeSignature::Class(class.token()))
            .build(&store)
            .unwrap();
        let resolver = TypeResolver::new(&store);
        let fields = classify_members(&store, holder).unwrap().fields;

        assert_eq!(
            field_semantics(&resolver, &fields[0], true).unwrap(),
            TypeSemantics::GenericTypeInstance {
                generic_type: reference,
                generic_args: vec![FundamentalType::Double.into()],
            }
        );
        assert_eq!(
            field_semantics(&resolver, &fields[1], true).unwrap(),
            TypeSemantics::GenericTypeInstance {
                generic_type: other,
                generic_args: vec![FundamentalType::Double.into()],
            }
        );
        assert_eq!(
            field_semantics(&resolver, &fields[2], true).unwrap(),
            FundamentalType::UInt32.into()
        );
        assert!(matches!(
            field_semantics(&resolver, &fields[3], true),
            Err(Error::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn delegate_invoke_lookup() {
        let store = InMemoryStore::new();
        let handler = TypeDefBuilder::new("Demo", "Handler")
            .delegate()
            .method("Invoke", |m| {
                m.special_name().param("sender", TypeSignature::Object)
            })
            .build(&store)
            .unwrap();
        let empty = TypeDefBuilder::new("Demo", "Empty")
            .delegate()
            .build(&store)
            .unwrap();
        let class = TypeDefBuilder::new("Demo", "Thing").class().build(&store).unwrap();

        assert_eq!(delegate_invoke(&store, handler).unwrap().name, "Invoke");
        assert!(delegate_invoke(&store, empty).is_err());
        assert!(delegate_invoke(&store, class).is_err());
    }

    #[test]
    fn member_names_follow_overload_attribute() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "IFormat")
            .interface()
            .method("Format", |m| m.param("value", TypeSignature::I4))
            .method("Format", |m| {
                m.param("value", TypeSignature::String)
                    .overload("FormatString")
            })
            .method("Broken", |m| {
                m.attribute(
                    PLATFORM_METADATA_NAMESPACE,
                    OVERLOAD_ATTRIBUTE,
                    CustomAttributeValue::fixed(vec![CustomAttributeArgument::I4(1)]),
                )
            })
            .build(&store)
            .unwrap();
        let methods: Vec<MethodDefRc> = store
            .type_def(type_def)
            .unwrap()
            .methods
            .iter()
            .map(|&m| store.method_def(m).unwrap())
            .collect();

        assert_eq!(member_name(&store, &methods[0]).unwrap(), "Format");
        assert_eq!(member_name(&store, &methods[1]).unwrap(), "FormatString");
        assert!(matches!(
            member_name(&store, &methods[2]),
            Err(Error::InvalidMetadata { .. })
        ));
    }
}
