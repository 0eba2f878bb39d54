use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::error::SceneError;
use crate::mask::{BoxMask, Mask};
use crate::scene::shapes::{BoxShape, CircleShape, Shape};

/// Builds a shape from its persisted parameters.
pub type ShapeCtor = Box<dyn Fn(&Value) -> Result<Box<dyn Shape>, SceneError>>;
/// Builds a mask from its persisted parameters.
pub type MaskCtor = Box<dyn Fn(&Value) -> Result<Rc<dyn Mask>, SceneError>>;

/// Maps persisted type names to constructors.
///
/// The registry is an explicit value handed to [`crate::scene::Scene::parse`];
/// there is no process-wide table. Registering a name twice replaces the
/// earlier constructor.
#[derive(Default)]
pub struct TypeRegistry {
    shapes: HashMap<String, ShapeCtor>,
    masks: HashMap<String, MaskCtor>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry knowing the built-in shapes and masks.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_shape(BoxShape::TYPE_NAME, |v| Ok(Box::new(BoxShape::from_value(v)?)));
        registry.register_shape(CircleShape::TYPE_NAME, |v| {
            Ok(Box::new(CircleShape::from_value(v)?))
        });
        registry.register_mask(BoxMask::TYPE_NAME, |v| Ok(Rc::new(BoxMask::from_value(v)?)));
        registry
    }

    pub fn register_shape(
        &mut self,
        name: impl Into<String>,
        ctor: impl Fn(&Value) -> Result<Box<dyn Shape>, SceneError> + 'static,
    ) {
        self.shapes.insert(name.into(), Box::new(ctor));
    }

    pub fn register_mask(
        &mut self,
        name: impl Into<String>,
        ctor: impl Fn(&Value) -> Result<Rc<dyn Mask>, SceneError> + 'static,
    ) {
        self.masks.insert(name.into(), Box::new(ctor));
    }

    #[inline]
    pub fn has_shape(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    #[inline]
    pub fn has_mask(&self, name: &str) -> bool {
        self.masks.contains_key(name)
    }

    pub fn build_shape(&self, name: &str, value: &Value) -> Result<Box<dyn Shape>, SceneError> {
        let ctor = self
            .shapes
            .get(name)
            .ok_or_else(|| SceneError::UnknownType(name.to_string()))?;
        ctor(value)
    }

    pub fn build_mask(&self, name: &str, value: &Value) -> Result<Rc<dyn Mask>, SceneError> {
        let ctor = self
            .masks
            .get(name)
            .ok_or_else(|| SceneError::UnknownType(name.to_string()))?;
        ctor(value)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shapes: Vec<_> = self.shapes.keys().collect();
        let mut masks: Vec<_> = self.masks.keys().collect();
        shapes.sort();
        masks.sort();
        f.debug_struct("TypeRegistry")
            .field("shapes", &shapes)
            .field("masks", &masks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_know_builtin_types() {
        let registry = TypeRegistry::with_defaults();
        assert!(registry.has_shape("box"));
        assert!(registry.has_shape("circle"));
        assert!(registry.has_mask("box_mask"));
        assert!(!TypeRegistry::new().has_shape("box"));
    }

    #[test]
    fn builds_registered_shape() {
        let registry = TypeRegistry::with_defaults();
        let shape = registry.build_shape("circle", &json!({ "radius": 4.0 })).unwrap();
        assert_eq!(shape.type_name(), "circle");
    }

    #[test]
    fn unknown_type_is_reported() {
        let registry = TypeRegistry::with_defaults();
        let err = registry.build_shape("star", &json!({})).unwrap_err();
        assert!(matches!(err, SceneError::UnknownType(name) if name == "star"));
    }

    #[test]
    fn custom_constructor_replaces_builtin() {
        let mut registry = TypeRegistry::with_defaults();
        registry.register_shape("circle", |_| Ok(Box::new(CircleShape::new(1.0))));
        let shape = registry.build_shape("circle", &json!({ "radius": 9.0 })).unwrap();
        assert_eq!(shape.bounds().max.x, 1.0);
    }
}
