//! Fluent builders that add type definitions and their members to an [`InMemoryStore`].
//!
//! A [`TypeDefBuilder`] collects a complete type declaration (category, generic parameters,
//! implemented interfaces, attributes, methods, properties, events and fields) and writes all
//! rows in one [`TypeDefBuilder::build`] call. Property and event accessors refer to methods of
//! the same builder by name.
//!
//! ```rust
//! use projscope::metadata::{signatures::TypeSignature, store::{InMemoryStore, TypeDefBuilder}};
//!
//! let store = InMemoryStore::new();
//! let stringable = TypeDefBuilder::new("Windows.Foundation", "IStringable")
//!     .interface()
//!     .method("ToString", |method| method.returns(TypeSignature::String))
//!     .build(&store)?;
//!
//! let uri = TypeDefBuilder::new("Windows.Foundation", "Uri")
//!     .class()
//!     .sealed()
//!     .implements(stringable)
//!     .simple_property("AbsoluteUri", TypeSignature::String, false)
//!     .build(&store)?;
//! # let _ = uri;
//! # Ok::<(), projscope::Error>(())
//! ```

use std::collections::HashMap;

use crate::{
    metadata::{
        customattributes::{
            CustomAttributeArgument, CustomAttributeValue, OVERLOAD_ATTRIBUTE,
            PLATFORM_METADATA_NAMESPACE,
        },
        signatures::{SignatureField, SignatureMethod, SignatureParameter, TypeSignature},
        store::InMemoryStore,
        tables::{
            EventRow, FieldRow, MethodDef, MethodDefRow, MethodModifiers, MethodSemanticsAttributes,
            MethodSemanticsLink, ParamAttributes, PropertyRow, TypeAttributes, TypeDef,
            TypeDefOrRef, TypeDefRow, CONSTRUCTOR_NAME,
        },
        token::{TableId, Token},
    },
    Result,
};

/// Method attributes every builder-created method carries (`public | hidebysig`)
const DEFAULT_METHOD_FLAGS: u32 = 0x0006 | 0x0080;

struct AttributeSpec {
    namespace: String,
    name: String,
    value: CustomAttributeValue,
}

impl AttributeSpec {
    fn write(self, store: &InMemoryStore, parent: Token) -> crate::metadata::tables::CustomAttribute {
        store.insert_custom_attribute(parent, &self.namespace, &self.name, self.value)
    }
}

#[derive(Clone, Copy)]
enum BaseKind {
    Interface,
    Class,
    Struct,
    Enum,
    Delegate,
}

impl BaseKind {
    fn system_base(self) -> Option<&'static str> {
        match self {
            BaseKind::Interface => None,
            BaseKind::Class => Some("Object"),
            BaseKind::Struct => Some("ValueType"),
            BaseKind::Enum => Some("Enum"),
            BaseKind::Delegate => Some("MulticastDelegate"),
        }
    }
}

/// Builder for a method row with its parameters and attributes
pub struct MethodBuilder {
    name: String,
    flags: u32,
    params: Vec<(String, u32, SignatureParameter)>,
    return_type: TypeSignature,
    return_name: Option<String>,
    attributes: Vec<AttributeSpec>,
}

impl MethodBuilder {
    /// A public instance method returning `void`
    #[must_use]
    pub fn new(name: &str) -> Self {
        MethodBuilder {
            name: name.to_string(),
            flags: DEFAULT_METHOD_FLAGS,
            params: Vec::new(),
            return_type: TypeSignature::Void,
            return_name: None,
            attributes: Vec::new(),
        }
    }

    /// Marks the method static
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.flags |= MethodModifiers::STATIC.bits();
        self
    }

    /// Marks the method special-name (accessors)
    #[must_use]
    pub fn special_name(mut self) -> Self {
        self.flags |= MethodModifiers::SPECIAL_NAME.bits();
        self
    }

    /// Replaces the raw `MethodAttributes`
    #[must_use]
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Appends an `In` parameter passed by value
    #[must_use]
    pub fn param(self, name: &str, base: TypeSignature) -> Self {
        self.param_with(name, ParamAttributes::IN, SignatureParameter::value(base))
    }

    /// Appends an `Out` parameter passed by reference
    #[must_use]
    pub fn out_param(self, name: &str, base: TypeSignature) -> Self {
        self.param_with(name, ParamAttributes::OUT, SignatureParameter::by_ref(base))
    }

    /// Appends a parameter with explicit flags and signature
    #[must_use]
    pub fn param_with(mut self, name: &str, flags: u32, signature: SignatureParameter) -> Self {
        self.params.push((name.to_string(), flags, signature));
        self
    }

    /// Sets the return type
    #[must_use]
    pub fn returns(mut self, return_type: TypeSignature) -> Self {
        self.return_type = return_type;
        self
    }

    /// Emits a named return-slot `Param` row (sequence 0)
    #[must_use]
    pub fn return_name(mut self, name: &str) -> Self {
        self.return_name = Some(name.to_string());
        self
    }

    /// Attaches `OverloadAttribute` with the given ABI name
    #[must_use]
    pub fn overload(self, abi_name: &str) -> Self {
        self.attribute(
            PLATFORM_METADATA_NAMESPACE,
            OVERLOAD_ATTRIBUTE,
            CustomAttributeValue::fixed(vec![CustomAttributeArgument::String(
                abi_name.to_string(),
            )]),
        )
    }

    /// Attaches a custom attribute
    #[must_use]
    pub fn attribute(mut self, namespace: &str, name: &str, value: CustomAttributeValue) -> Self {
        self.attributes.push(AttributeSpec {
            namespace: namespace.to_string(),
            name: name.to_string(),
            value,
        });
        self
    }

    fn build(self, store: &InMemoryStore, parent: TypeDef) -> Result<MethodDef> {
        let token = store.reserve(TableId::METHOD_DEF);

        let mut params = Vec::with_capacity(self.params.len() + 1);
        if let Some(return_name) = &self.return_name {
            params.push(store.insert_param(return_name, 0, 0));
        }

        let mut signature_params = Vec::with_capacity(self.params.len());
        for (sequence, (name, flags, signature)) in (1u32..).zip(self.params) {
            params.push(store.insert_param(&name, flags, sequence));
            signature_params.push(signature);
        }

        let custom_attributes = self
            .attributes
            .into_iter()
            .map(|attribute| attribute.write(store, token))
            .collect();

        store.insert_method(MethodDefRow {
            token,
            parent: Some(parent),
            name: self.name,
            flags: self.flags,
            signature: SignatureMethod {
                has_this: self.flags & MethodModifiers::STATIC.bits() == 0,
                param_count_generic: 0,
                return_type: SignatureParameter::value(self.return_type),
                params: signature_params,
            },
            params,
            custom_attributes,
        })
    }
}

/// Builder for a property's method-semantics links
#[derive(Default)]
pub struct PropertyBuilder {
    links: Vec<(u32, String)>,
}

impl PropertyBuilder {
    /// Links the named method as getter
    #[must_use]
    pub fn getter(self, method: &str) -> Self {
        self.link(MethodSemanticsAttributes::GETTER, method)
    }

    /// Links the named method as setter
    #[must_use]
    pub fn setter(self, method: &str) -> Self {
        self.link(MethodSemanticsAttributes::SETTER, method)
    }

    /// Adds a link with arbitrary semantics
    #[must_use]
    pub fn link(mut self, semantics: u32, method: &str) -> Self {
        self.links.push((semantics, method.to_string()));
        self
    }
}

/// Builder for an event's method-semantics links
#[derive(Default)]
pub struct EventBuilder {
    event_type: Option<TypeDefOrRef>,
    links: Vec<(u32, String)>,
}

impl EventBuilder {
    /// Sets the handler delegate type
    #[must_use]
    pub fn handler(mut self, event_type: impl Into<TypeDefOrRef>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Links the named method as adder
    #[must_use]
    pub fn adder(self, method: &str) -> Self {
        self.link(MethodSemanticsAttributes::ADD_ON, method)
    }

    /// Links the named method as remover
    #[must_use]
    pub fn remover(self, method: &str) -> Self {
        self.link(MethodSemanticsAttributes::REMOVE_ON, method)
    }

    /// Adds a link with arbitrary semantics
    #[must_use]
    pub fn link(mut self, semantics: u32, method: &str) -> Self {
        self.links.push((semantics, method.to_string()));
        self
    }
}

/// Builder for a complete type definition
pub struct TypeDefBuilder {
    namespace: String,
    name: String,
    flags: u32,
    kind: BaseKind,
    extends: Option<TypeDefOrRef>,
    generic_params: Vec<String>,
    interfaces: Vec<TypeDefOrRef>,
    attributes: Vec<AttributeSpec>,
    methods: Vec<MethodBuilder>,
    properties: Vec<(String, PropertyBuilder)>,
    events: Vec<(String, EventBuilder)>,
    fields: Vec<(String, u32, TypeSignature)>,
}

impl TypeDefBuilder {
    /// A public class named `namespace.name`
    #[must_use]
    pub fn new(namespace: &str, name: &str) -> Self {
        TypeDefBuilder {
            namespace: namespace.to_string(),
            name: name.to_string(),
            flags: TypeAttributes::PUBLIC | TypeAttributes::WINDOWS_RUNTIME,
            kind: BaseKind::Class,
            extends: None,
            generic_params: Vec::new(),
            interfaces: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Declares an interface
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.kind = BaseKind::Interface;
        self.flags |= TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT;
        self
    }

    /// Declares a runtime class deriving from `System.Object`
    #[must_use]
    pub fn class(mut self) -> Self {
        self.kind = BaseKind::Class;
        self
    }

    /// Declares a struct deriving from `System.ValueType`
    #[must_use]
    pub fn structure(mut self) -> Self {
        self.kind = BaseKind::Struct;
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Declares an enum deriving from `System.Enum`
    #[must_use]
    pub fn enumeration(mut self) -> Self {
        self.kind = BaseKind::Enum;
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Declares a delegate deriving from `System.MulticastDelegate`
    #[must_use]
    pub fn delegate(mut self) -> Self {
        self.kind = BaseKind::Delegate;
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Marks the type abstract (a static class, for runtime classes)
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.flags |= TypeAttributes::ABSTRACT;
        self
    }

    /// Marks the type sealed
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Overrides the base type implied by the category
    #[must_use]
    pub fn extends(mut self, base: impl Into<TypeDefOrRef>) -> Self {
        self.extends = Some(base.into());
        self
    }

    /// Appends a generic parameter
    #[must_use]
    pub fn generic_param(mut self, name: &str) -> Self {
        self.generic_params.push(name.to_string());
        self
    }

    /// Appends an implemented (or required) interface
    #[must_use]
    pub fn implements(mut self, interface: impl Into<TypeDefOrRef>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Attaches a custom attribute
    #[must_use]
    pub fn attribute(mut self, namespace: &str, name: &str, value: CustomAttributeValue) -> Self {
        self.attributes.push(AttributeSpec {
            namespace: namespace.to_string(),
            name: name.to_string(),
            value,
        });
        self
    }

    /// Adds a method configured by `f`
    #[must_use]
    pub fn method<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.methods.push(f(MethodBuilder::new(name)));
        self
    }

    /// Adds an instance constructor configured by `f`
    #[must_use]
    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        let ctor = MethodBuilder::new(CONSTRUCTOR_NAME).flags(
            DEFAULT_METHOD_FLAGS
                | MethodModifiers::SPECIAL_NAME.bits()
                | MethodModifiers::RTSPECIAL_NAME.bits(),
        );
        self.methods.push(f(ctor));
        self
    }

    /// Adds a property whose links are configured by `f`
    #[must_use]
    pub fn property<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(PropertyBuilder) -> PropertyBuilder,
    {
        self.properties
            .push((name.to_string(), f(PropertyBuilder::default())));
        self
    }

    /// Adds a property together with its `get_` (and optionally `put_`) accessor methods
    #[must_use]
    pub fn simple_property(self, name: &str, property_type: TypeSignature, writable: bool) -> Self {
        let getter = format!("get_{name}");
        let setter = format!("put_{name}");

        let mut builder = self.method(&getter, |m| {
            m.special_name().returns(property_type.clone())
        });
        if writable {
            builder = builder.method(&setter, |m| {
                m.special_name().param("value", property_type.clone())
            });
        }

        builder.property(name, |p| {
            let p = p.getter(&getter);
            if writable {
                p.setter(&setter)
            } else {
                p
            }
        })
    }

    /// Adds an event whose links are configured by `f`
    #[must_use]
    pub fn event<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(EventBuilder) -> EventBuilder,
    {
        self.events.push((name.to_string(), f(EventBuilder::default())));
        self
    }

    /// Adds an event together with its `add_` and `remove_` accessor methods
    ///
    /// The registration token is modelled by its `Int64` payload.
    #[must_use]
    pub fn simple_event(self, name: &str, handler: impl Into<TypeDefOrRef>) -> Self {
        let handler = handler.into();
        let adder = format!("add_{name}");
        let remover = format!("remove_{name}");
        let token_type = TypeSignature::I8;

        self.method(&adder, |m| {
            m.special_name()
                .param("handler", TypeSignature::Class(handler.token()))
                .returns(token_type.clone())
        })
        .method(&remover, |m| m.special_name().param("token", token_type.clone()))
        .event(name, |e| e.handler(handler).adder(&adder).remover(&remover))
    }

    /// Adds an instance field
    #[must_use]
    pub fn field(mut self, name: &str, field_type: TypeSignature) -> Self {
        self.fields.push((name.to_string(), 0x0006, field_type));
        self
    }

    /// Adds a field with explicit `FieldAttributes`
    #[must_use]
    pub fn field_with(mut self, name: &str, flags: u32, field_type: TypeSignature) -> Self {
        self.fields.push((name.to_string(), flags, field_type));
        self
    }

    /// Writes the type and all its members into `store`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMetadata`] if an accessor names a method that was not added
    /// to this builder, or if a type with the same name already exists.
    pub fn build(self, store: &InMemoryStore) -> Result<TypeDef> {
        let token = store.reserve(TableId::TYPE_DEF);
        let handle = TypeDef::from_token(token)?;
        let fullname = format!("{}.{}", self.namespace, self.name);

        let extends = match (self.extends, self.kind.system_base()) {
            (Some(base), _) => Some(base),
            (None, Some(system_base)) => Some(store.add_type_ref("System", system_base).into()),
            (None, None) => None,
        };

        let custom_attributes = self
            .attributes
            .into_iter()
            .map(|attribute| attribute.write(store, token))
            .collect();

        let mut methods = Vec::with_capacity(self.methods.len());
        let mut methods_by_name: HashMap<String, MethodDef> = HashMap::new();
        for method in self.methods {
            let name = method.name.clone();
            let method = method.build(store, handle)?;
            methods_by_name.entry(name).or_insert(method);
            methods.push(method);
        }

        let link = |(semantics, method): (u32, String)| -> Result<MethodSemanticsLink> {
            methods_by_name
                .get(&method)
                .map(|&handle| MethodSemanticsLink::new(semantics, handle))
                .ok_or_else(|| {
                    malformed_error!("Accessor {} is not a method of {}", method, fullname)
                })
        };

        let mut properties = Vec::with_capacity(self.properties.len());
        for (name, property) in self.properties {
            let semantics = property
                .links
                .into_iter()
                .map(&link)
                .collect::<Result<Vec<_>>>()?;
            properties.push(store.insert_property(PropertyRow {
                token: store.reserve(TableId::PROPERTY),
                name,
                semantics,
            })?);
        }

        let mut events = Vec::with_capacity(self.events.len());
        for (name, event) in self.events {
            let semantics = event
                .links
                .into_iter()
                .map(&link)
                .collect::<Result<Vec<_>>>()?;
            events.push(store.insert_event(EventRow {
                token: store.reserve(TableId::EVENT),
                name,
                event_type: event.event_type,
                semantics,
            })?);
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, flags, field_type) in self.fields {
            fields.push(store.insert_field(FieldRow {
                token: store.reserve(TableId::FIELD),
                parent: Some(handle),
                name,
                flags,
                signature: SignatureField { base: field_type },
            })?);
        }

        store.insert_type_def(TypeDefRow {
            token,
            namespace: self.namespace,
            name: self.name,
            flags: self.flags,
            extends,
            generic_params: self.generic_params,
            interfaces: self.interfaces,
            methods,
            fields,
            properties,
            events,
            custom_attributes,
        })
    }
}
