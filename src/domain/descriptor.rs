// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declared type metadata.
//!
//! The capability-discovering strategies (type converters, conversion operators,
//! constructors, convert methods, binary codecs) and the emptiness model need to
//! know what a type offers. A host declares that on a [`TypeDescriptor`] and
//! registers it; the strategies then query the descriptor instead of inspecting
//! the type at runtime.
//!
//! # Examples
//!
//! ```
//! use convertex::domain::{TypeDescriptor, TypeKey};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Celsius(f64);
//!
//! let descriptor = TypeDescriptor::builder::<Celsius>()
//!     .value_type()
//!     .with_implicit_from(|v: &f64| Celsius(*v))
//!     .with_method("ToF64", |c: &Celsius| c.0)
//!     .build();
//!
//! assert_eq!(descriptor.key(), TypeKey::of::<Celsius>());
//! assert!(descriptor.is_value_type());
//! assert_eq!(descriptor.operators().len(), 1);
//! ```

use crate::domain::errors::BoxError;
use crate::domain::type_key::{PrimitiveKind, TypeKey};
use crate::domain::value::Value;
use crate::ports::{BinaryCodec, TypeConverter};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type Invoke = Arc<dyn Fn(&Value) -> std::result::Result<Value, BoxError> + Send + Sync>;

fn invoker<S, U, F>(f: F) -> Invoke
where
    S: Any,
    U: Any + Send + Sync,
    F: Fn(&S) -> std::result::Result<U, BoxError> + Send + Sync + 'static,
{
    Arc::new(move |value: &Value| {
        let argument = value.downcast_ref::<S>().ok_or_else(|| -> BoxError {
            format!(
                "expected argument of type {}, got {}",
                std::any::type_name::<S>(),
                value.type_name()
            )
            .into()
        })?;
        f(argument).map(Value::new)
    })
}

fn values_equal<T: Any + PartialEq>(a: &Value, b: &Value) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn display_value<T: Any + fmt::Display>(value: &Value) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}

/// Whether a conversion operator may be applied implicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    /// Applied without an explicit cast.
    Implicit,
    /// Requires an explicit cast.
    Explicit,
}

/// A declared conversion operator between two types.
#[derive(Clone)]
pub struct ConversionOperator {
    from: TypeKey,
    to: TypeKey,
    kind: OperatorKind,
    invoke: Invoke,
}

impl ConversionOperator {
    /// The operand type.
    pub fn from_type(&self) -> TypeKey {
        self.from
    }

    /// The result type.
    pub fn to_type(&self) -> TypeKey {
        self.to
    }

    /// Implicit or explicit.
    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// Applies the operator.
    pub fn invoke(&self, value: &Value) -> std::result::Result<Value, BoxError> {
        (self.invoke)(value)
    }
}

impl fmt::Debug for ConversionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOperator")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A declared single-argument constructor.
#[derive(Clone)]
pub struct Constructor {
    parameter: TypeKey,
    invoke: Invoke,
}

impl Constructor {
    /// The parameter type.
    pub fn parameter(&self) -> TypeKey {
        self.parameter
    }

    /// Runs the constructor.
    pub fn invoke(&self, argument: &Value) -> std::result::Result<Value, BoxError> {
        (self.invoke)(argument)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("parameter", &self.parameter)
            .finish()
    }
}

/// A declared argument-less instance method returning another type, by convention
/// named `ToXxx`.
#[derive(Clone)]
pub struct ConvertMethod {
    name: String,
    returns: TypeKey,
    invoke: Invoke,
}

impl ConvertMethod {
    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The return type.
    pub fn returns(&self) -> TypeKey {
        self.returns
    }

    /// Calls the method on `receiver`.
    pub fn invoke(&self, receiver: &Value) -> std::result::Result<Value, BoxError> {
        (self.invoke)(receiver)
    }
}

impl fmt::Debug for ConvertMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertMethod")
            .field("name", &self.name)
            .field("returns", &self.returns)
            .finish()
    }
}

/// A declared "is assignable to" relationship, e.g. a type implementing an
/// interface represented by another type.
#[derive(Clone)]
pub struct Upcast {
    target: TypeKey,
    invoke: Invoke,
}

impl Upcast {
    /// The type the value is assignable to.
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Produces the target view of `value`.
    pub fn invoke(&self, value: &Value) -> std::result::Result<Value, BoxError> {
        (self.invoke)(value)
    }
}

impl fmt::Debug for Upcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upcast").field("target", &self.target).finish()
    }
}

/// An enumeration whose members can be converted by name and underlying value.
///
/// `null` converts to the member whose underlying value is zero. Declare such a
/// member if the enum should take part in null-to-default conversions; without
/// one, converting `null` to the enum is an `InvalidConversion`.
///
/// # Examples
///
/// ```
/// use convertex::domain::EnumType;
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Level {
///     Low = 1,
///     High = 2,
/// }
///
/// impl EnumType for Level {
///     fn members() -> Vec<(&'static str, Self)> {
///         vec![("Low", Level::Low), ("High", Level::High)]
///     }
///
///     fn underlying(&self) -> i64 {
///         *self as i64
///     }
/// }
///
/// assert_eq!(Level::High.underlying(), 2);
/// ```
pub trait EnumType: Any + Send + Sync + Clone + PartialEq {
    /// All defined members with their names.
    fn members() -> Vec<(&'static str, Self)>;

    /// The member's underlying integer value.
    fn underlying(&self) -> i64;

    /// The primitive type holding the underlying value.
    fn underlying_kind() -> PrimitiveKind {
        PrimitiveKind::I32
    }
}

/// One defined enum member.
#[derive(Clone, Debug)]
pub struct EnumMember {
    name: &'static str,
    underlying: i64,
    value: Value,
}

impl EnumMember {
    /// The member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying integer value.
    pub fn underlying(&self) -> i64 {
        self.underlying
    }

    /// The member itself.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Type-erased enum metadata built from an [`EnumType`].
#[derive(Clone)]
pub struct EnumInfo {
    members: Vec<EnumMember>,
    underlying_kind: PrimitiveKind,
    underlying_of: fn(&Value) -> Option<i64>,
}

fn enum_underlying<T: EnumType>(value: &Value) -> Option<i64> {
    value.downcast_ref::<T>().map(T::underlying)
}

impl EnumInfo {
    /// Collects the metadata of `T`.
    pub fn of<T: EnumType>() -> Self {
        let members = T::members()
            .into_iter()
            .map(|(name, member)| EnumMember {
                name,
                underlying: member.underlying(),
                value: Value::new(member),
            })
            .collect();
        EnumInfo {
            members,
            underlying_kind: T::underlying_kind(),
            underlying_of: enum_underlying::<T>,
        }
    }

    /// All defined members.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// The primitive type holding the underlying values.
    pub fn underlying_kind(&self) -> PrimitiveKind {
        self.underlying_kind
    }

    /// Finds a member by name, ignoring case and surrounding whitespace.
    pub fn by_name(&self, name: &str) -> Option<&EnumMember> {
        let name = name.trim().to_lowercase();
        self.members
            .iter()
            .find(|member| member.name.to_lowercase() == name)
    }

    /// Finds the member with the given underlying value.
    pub fn by_underlying(&self, underlying: i64) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|member| member.underlying == underlying)
    }

    /// Returns the underlying value of an enum instance.
    pub fn underlying_of(&self, value: &Value) -> Option<i64> {
        (self.underlying_of)(value)
    }

    /// Returns the member an enum instance corresponds to.
    pub fn member_of(&self, value: &Value) -> Option<&EnumMember> {
        self.underlying_of(value)
            .and_then(|underlying| self.by_underlying(underlying))
    }

    /// Returns the zero-valued member, if one is defined.
    pub fn zero(&self) -> Option<&EnumMember> {
        self.by_underlying(0)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("members", &self.members)
            .field("underlying_kind", &self.underlying_kind)
            .finish()
    }
}

/// Declared metadata of one type.
#[derive(Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    value_type: bool,
    default_instance: Option<Value>,
    empty: Option<Value>,
    equals: fn(&Value, &Value) -> bool,
    display: Option<fn(&Value) -> Option<String>>,
    enumeration: Option<EnumInfo>,
    converter: Option<Arc<dyn TypeConverter>>,
    operators: Vec<ConversionOperator>,
    constructors: Vec<Constructor>,
    methods: Vec<ConvertMethod>,
    codec: Option<Arc<dyn BinaryCodec>>,
    upcasts: Vec<Upcast>,
}

impl TypeDescriptor {
    /// Starts describing `T`.
    pub fn builder<T: Any + Send + Sync + PartialEq>() -> DescriptorBuilder<T> {
        DescriptorBuilder::new()
    }

    /// Describes an [`EnumType`] in one call.
    pub fn for_enum<T: EnumType>() -> Self {
        Self::builder::<T>().with_enum().build()
    }

    /// The described type.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Whether the type has value semantics (a meaningful default instance).
    pub fn is_value_type(&self) -> bool {
        self.value_type
    }

    /// The default (zeroed) instance of a value type.
    pub fn default_instance(&self) -> Option<&Value> {
        self.default_instance.as_ref()
    }

    /// The declared `Empty` marker instance.
    pub fn empty_marker(&self) -> Option<&Value> {
        self.empty.as_ref()
    }

    /// Structural equality between two instances of the type.
    pub fn equals(&self, a: &Value, b: &Value) -> bool {
        (self.equals)(a, b)
    }

    /// Renders an instance, if the type declared a display form.
    pub fn display(&self, value: &Value) -> Option<String> {
        self.display.and_then(|display| display(value))
    }

    /// Enum metadata, if the type is an enum.
    pub fn enumeration(&self) -> Option<&EnumInfo> {
        self.enumeration.as_ref()
    }

    /// The associated type converter.
    pub fn converter(&self) -> Option<&dyn TypeConverter> {
        self.converter.as_deref()
    }

    /// Declared conversion operators.
    pub fn operators(&self) -> &[ConversionOperator] {
        &self.operators
    }

    /// Declared single-argument constructors.
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Declared convert methods.
    pub fn methods(&self) -> &[ConvertMethod] {
        &self.methods
    }

    /// The associated binary codec.
    pub fn codec(&self) -> Option<&dyn BinaryCodec> {
        self.codec.as_deref()
    }

    /// Declared assignability relationships.
    pub fn upcasts(&self) -> &[Upcast] {
        &self.upcasts
    }

    /// Returns the upcast to `target`, if declared.
    pub fn upcast_to(&self, target: &TypeKey) -> Option<&Upcast> {
        self.upcasts.iter().find(|u| u.target.same_type(target))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key)
            .field("value_type", &self.value_type)
            .field("enumeration", &self.enumeration)
            .field("has_converter", &self.converter.is_some())
            .field("operators", &self.operators)
            .field("constructors", &self.constructors)
            .field("methods", &self.methods)
            .field("has_codec", &self.codec.is_some())
            .field("upcasts", &self.upcasts)
            .finish()
    }
}

/// Fluent builder for a [`TypeDescriptor`].
pub struct DescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync + PartialEq> DescriptorBuilder<T> {
    fn new() -> Self {
        DescriptorBuilder {
            descriptor: TypeDescriptor {
                key: TypeKey::of::<T>(),
                value_type: false,
                default_instance: None,
                empty: None,
                equals: values_equal::<T>,
                display: None,
                enumeration: None,
                converter: None,
                operators: Vec::new(),
                constructors: Vec::new(),
                methods: Vec::new(),
                codec: None,
                upcasts: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Declares an `Empty` marker; instances equal to it are empty.
    pub fn with_empty(mut self, empty: T) -> Self {
        self.descriptor.empty = Some(Value::new(empty));
        self
    }

    /// Associates a type converter.
    pub fn with_converter<C: TypeConverter + 'static>(mut self, converter: C) -> Self {
        self.descriptor.converter = Some(Arc::new(converter));
        self
    }

    /// Declares an implicit conversion operator from `S`.
    pub fn with_implicit_from<S, F>(self, f: F) -> Self
    where
        S: Any + Send + Sync,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.operator_from::<S, F>(OperatorKind::Implicit, f)
    }

    /// Declares an explicit conversion operator from `S`.
    pub fn with_explicit_from<S, F>(self, f: F) -> Self
    where
        S: Any + Send + Sync,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.operator_from::<S, F>(OperatorKind::Explicit, f)
    }

    /// Declares an implicit conversion operator to `U`.
    pub fn with_implicit_to<U, F>(self, f: F) -> Self
    where
        U: Any + Send + Sync,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.operator_to::<U, F>(OperatorKind::Implicit, f)
    }

    /// Declares an explicit conversion operator to `U`.
    pub fn with_explicit_to<U, F>(self, f: F) -> Self
    where
        U: Any + Send + Sync,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.operator_to::<U, F>(OperatorKind::Explicit, f)
    }

    fn operator_from<S, F>(mut self, kind: OperatorKind, f: F) -> Self
    where
        S: Any + Send + Sync,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.descriptor.operators.push(ConversionOperator {
            from: TypeKey::of::<S>(),
            to: TypeKey::of::<T>(),
            kind,
            invoke: invoker(move |s: &S| Ok(f(s))),
        });
        self
    }

    fn operator_to<U, F>(mut self, kind: OperatorKind, f: F) -> Self
    where
        U: Any + Send + Sync,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.descriptor.operators.push(ConversionOperator {
            from: TypeKey::of::<T>(),
            to: TypeKey::of::<U>(),
            kind,
            invoke: invoker(move |t: &T| Ok(f(t))),
        });
        self
    }

    /// Declares a single-argument constructor taking `S`.
    pub fn with_constructor<S, F>(mut self, f: F) -> Self
    where
        S: Any + Send + Sync,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.descriptor.constructors.push(Constructor {
            parameter: TypeKey::of::<S>(),
            invoke: invoker(move |s: &S| Ok(f(s))),
        });
        self
    }

    /// Declares a single-argument constructor taking `S` that may fail.
    ///
    /// A failing constructor surfaces as a host failure, not as a decline.
    pub fn with_fallible_constructor<S, E, F>(mut self, f: F) -> Self
    where
        S: Any + Send + Sync,
        E: Into<BoxError>,
        F: Fn(&S) -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        self.descriptor.constructors.push(Constructor {
            parameter: TypeKey::of::<S>(),
            invoke: invoker(move |s: &S| f(s).map_err(Into::into)),
        });
        self
    }

    /// Declares a convert method returning `U`.
    pub fn with_method<U, F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        U: Any + Send + Sync,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.descriptor.methods.push(ConvertMethod {
            name: name.into(),
            returns: TypeKey::of::<U>(),
            invoke: invoker(move |t: &T| Ok(f(t))),
        });
        self
    }

    /// Associates a binary codec for byte array round-trips.
    pub fn with_codec<C: BinaryCodec + 'static>(mut self, codec: C) -> Self {
        self.descriptor.codec = Some(Arc::new(codec));
        self
    }

    /// Declares that instances are assignable to `U`.
    pub fn assignable_to<U, F>(mut self, f: F) -> Self
    where
        U: Any + Send + Sync,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.descriptor.upcasts.push(Upcast {
            target: TypeKey::of::<U>(),
            invoke: invoker(move |t: &T| Ok(f(t))),
        });
        self
    }

    /// Finishes the descriptor.
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

impl<T: Any + Send + Sync + PartialEq + Default> DescriptorBuilder<T> {
    /// Declares value semantics; `T::default()` becomes the default instance.
    pub fn value_type(mut self) -> Self {
        self.descriptor.value_type = true;
        self.descriptor.default_instance = Some(Value::new(T::default()));
        self
    }
}

impl<T: Any + Send + Sync + PartialEq + fmt::Display> DescriptorBuilder<T> {
    /// Uses `Display` to render instances in diagnostics.
    pub fn with_display(mut self) -> Self {
        self.descriptor.display = Some(display_value::<T>);
        self
    }
}

impl<T: EnumType> DescriptorBuilder<T> {
    /// Attaches the enum metadata of `T`; enums have value semantics.
    pub fn with_enum(mut self) -> Self {
        self.descriptor.value_type = true;
        self.descriptor.enumeration = Some(EnumInfo::of::<T>());
        self
    }
}

/// A set of descriptors keyed by type.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    descriptors: HashMap<TypeId, Arc<TypeDescriptor>>,
}

impl TypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the descriptor of a type; nullability is ignored.
    pub fn get(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.descriptors.get(&key.id()).map(Arc::as_ref)
    }

    /// Adds or replaces a descriptor, returning the replaced one.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        self.descriptors
            .insert(descriptor.key().id(), Arc::new(descriptor))
    }

    /// Removes a descriptor.
    pub fn remove(&mut self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.descriptors.remove(&key.id())
    }

    /// Returns `true` if the type is described.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.descriptors.contains_key(&key.id())
    }

    /// Number of described types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no type is described.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Shade {
        Clear = 0,
        Light = 1,
        Dark = 2,
    }

    impl EnumType for Shade {
        fn members() -> Vec<(&'static str, Self)> {
            vec![
                ("Clear", Shade::Clear),
                ("Light", Shade::Light),
                ("Dark", Shade::Dark),
            ]
        }

        fn underlying(&self) -> i64 {
            *self as i64
        }
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Meters(f64);

    impl fmt::Display for Meters {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}m", self.0)
        }
    }

    #[test]
    fn test_enum_info_lookup() {
        let info = EnumInfo::of::<Shade>();
        assert_eq!(info.members().len(), 3);
        assert_eq!(info.by_name(" DARK ").map(EnumMember::underlying), Some(2));
        assert!(info.by_name("Dim").is_none());
        assert_eq!(info.by_underlying(1).map(EnumMember::name), Some("Light"));
        assert!(info.by_underlying(7).is_none());
        assert_eq!(info.zero().map(EnumMember::name), Some("Clear"));
        assert_eq!(
            info.member_of(&Value::new(Shade::Dark)).map(EnumMember::name),
            Some("Dark")
        );
        assert_eq!(info.underlying_kind(), PrimitiveKind::I32);
    }

    #[test]
    fn test_for_enum_is_value_type() {
        let descriptor = TypeDescriptor::for_enum::<Shade>();
        assert!(descriptor.is_value_type());
        assert!(descriptor.enumeration().is_some());
    }

    #[test]
    fn test_value_type_default_instance() {
        let descriptor = TypeDescriptor::builder::<Meters>().value_type().build();
        let default = descriptor.default_instance().unwrap();
        assert_eq!(default.downcast_ref::<Meters>(), Some(&Meters(0.0)));
    }

    #[test]
    fn test_reference_type_has_no_default() {
        let descriptor = TypeDescriptor::builder::<Meters>().build();
        assert!(!descriptor.is_value_type());
        assert!(descriptor.default_instance().is_none());
    }

    #[test]
    fn test_equals_and_display() {
        let descriptor = TypeDescriptor::builder::<Meters>()
            .with_display()
            .with_empty(Meters(-1.0))
            .build();
        assert!(descriptor.equals(&Value::new(Meters(2.0)), &Value::new(Meters(2.0))));
        assert!(!descriptor.equals(&Value::new(Meters(2.0)), &Value::from(2.0)));
        assert_eq!(descriptor.display(&Value::new(Meters(2.5))), Some("2.5m".to_string()));
        assert!(descriptor.empty_marker().is_some());
    }

    #[test]
    fn test_invokers_check_argument_type() {
        let descriptor = TypeDescriptor::builder::<Meters>()
            .with_constructor(|v: &f64| Meters(*v))
            .build();
        let constructor = &descriptor.constructors()[0];
        assert_eq!(constructor.parameter(), TypeKey::of::<f64>());
        let built = constructor.invoke(&Value::from(3.0)).unwrap();
        assert_eq!(built.downcast_ref::<Meters>(), Some(&Meters(3.0)));
        assert!(constructor.invoke(&Value::from("3")).is_err());
    }

    #[test]
    fn test_fallible_constructor() {
        let descriptor = TypeDescriptor::builder::<Meters>()
            .with_fallible_constructor(|s: &String| s.parse::<f64>().map(Meters))
            .build();
        let constructor = &descriptor.constructors()[0];
        assert!(constructor.invoke(&Value::from("1.5")).is_ok());
        assert!(constructor.invoke(&Value::from("wide")).is_err());
    }

    #[test]
    fn test_operators_methods_and_upcasts() {
        let descriptor = TypeDescriptor::builder::<Meters>()
            .with_implicit_from(|v: &f64| Meters(*v))
            .with_explicit_to(|m: &Meters| m.0 as i64)
            .with_method("ToF64", |m: &Meters| m.0)
            .assignable_to(|m: &Meters| m.to_string())
            .build();
        assert_eq!(descriptor.operators()[0].kind(), OperatorKind::Implicit);
        assert_eq!(descriptor.operators()[0].from_type(), TypeKey::of::<f64>());
        assert_eq!(descriptor.operators()[1].to_type(), TypeKey::of::<i64>());
        assert_eq!(descriptor.methods()[0].name(), "ToF64");
        assert!(descriptor.upcast_to(&TypeKey::of::<String>()).is_some());
        assert!(descriptor.upcast_to(&TypeKey::of::<i32>()).is_none());
    }

    #[test]
    fn test_type_table() {
        let mut table = TypeTable::new();
        assert!(table.is_empty());
        table.insert(TypeDescriptor::for_enum::<Shade>());
        assert!(table.contains(&TypeKey::of::<Shade>()));
        assert!(table.get(&TypeKey::nullable::<Shade>()).is_some());
        assert_eq!(table.len(), 1);
        assert!(table.remove(&TypeKey::of::<Shade>()).is_some());
        assert!(table.get(&TypeKey::of::<Shade>()).is_none());
    }
}
