//! Component parameters
//!
//! A parameter is either assigned directly to the component under test or
//! supplied as a cascading (ambient) value through a provider wrapped around
//! it. Caller order is preserved; it decides attribute order for direct
//! parameters and provider nesting for cascading ones.

use crate::cascading::CascadingValue;
use crate::render::ComponentDescriptor;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Opaque parameter value
///
/// Remembers the concrete type it was created with, which is what a cascading
/// provider for it is instantiated over.
#[derive(Clone)]
pub struct ParameterValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    provider: fn() -> ComponentDescriptor,
}

impl ParameterValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
            provider: CascadingValue::<T>::descriptor,
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    pub fn is<T: 'static>(&self) -> bool {
        (*self.value).is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Provider component typed over this value's concrete type
    pub fn provider(&self) -> ComponentDescriptor {
        (self.provider)()
    }
}

impl PartialEq for ParameterValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParameterValue({})", self.type_name)
    }
}

/// A name/value pair supplied to a component under test
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Absent for unnamed cascading values
    pub name: Option<String>,
    /// Absent for a null value
    pub value: Option<ParameterValue>,
    pub is_cascading_value: bool,
}

impl Parameter {
    pub fn new(name: Option<String>, value: Option<ParameterValue>, is_cascading_value: bool) -> Self {
        Self {
            name,
            value,
            is_cascading_value,
        }
    }

    /// Parameter assigned directly to the component
    pub fn direct<T: Any + Send + Sync>(name: impl Into<String>, value: T) -> Self {
        Self::new(Some(name.into()), Some(ParameterValue::new(value)), false)
    }

    /// Direct parameter with a null value
    pub fn direct_null(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()), None, false)
    }

    /// Unnamed cascading value, matched by type
    pub fn cascading<T: Any + Send + Sync>(value: T) -> Self {
        Self::new(None, Some(ParameterValue::new(value)), true)
    }

    /// Named cascading value
    pub fn named_cascading<T: Any + Send + Sync>(name: impl Into<String>, value: T) -> Self {
        Self::new(Some(name.into()), Some(ParameterValue::new(value)), true)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
