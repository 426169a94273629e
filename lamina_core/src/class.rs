// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime layer classes.
//!
//! Every layer in a [`LayerStore`](crate::layer::LayerStore) carries a
//! [`ClassId`]. Classes form a single-rooted hierarchy under
//! [`ClassId::LAYER`]: each class except the root names exactly one
//! superclass, and [`ClassRegistry::is_kind_of`] answers "is this class the
//! given class or one of its subclasses" by walking the superclass chain.
//!
//! The registry is open. Applications register their own layer classes under
//! any existing class and query them exactly like the built-in ones.
//!
//! # Built-in classes
//!
//! ```text
//!   Layer
//!   ├── LayerGroup
//!   │   └── Drawing
//!   ├── ObjectOwnerLayer
//!   │   └── ObjectDrawingLayer
//!   ├── GridLayer
//!   ├── GuideLayer
//!   ├── ImageOverlayLayer
//!   └── DrawingInfoLayer
//! ```
//!
//! Only layers whose class is kind-of [`ClassId::GROUP`] may own children.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

/// A handle to a class in a [`ClassRegistry`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    /// The root class. Every class is kind-of `LAYER`.
    pub const LAYER: Self = Self(0);
    /// Layer groups: the only classes whose layers may own children.
    pub const GROUP: Self = Self(1);
    /// The root group of a [`Drawing`](crate::drawing::Drawing).
    pub const DRAWING: Self = Self(2);
    /// Layers that own drawable objects.
    pub const OBJECT_OWNER: Self = Self(3);
    /// The standard drawable-object layer.
    pub const OBJECT_DRAWING: Self = Self(4);
    /// Grid layers.
    pub const GRID: Self = Self(5);
    /// Guide layers.
    pub const GUIDE: Self = Self(6);
    /// Image overlay layers.
    pub const IMAGE_OVERLAY: Self = Self(7);
    /// Drawing info (title block) layers.
    pub const DRAWING_INFO: Self = Self(8);

    /// Returns the raw registry index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Descriptor for one registered class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    name: String,
    superclass: Option<ClassId>,
    activatable: bool,
    master_grid: bool,
}

impl ClassInfo {
    /// The registered class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direct superclass, or `None` for [`ClassId::LAYER`].
    #[must_use]
    pub fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    /// Whether layers of this class may become a drawing's active layer.
    #[must_use]
    pub fn activatable(&self) -> bool {
        self.activatable
    }

    /// Whether grid layers of this class may serve as a drawing's master
    /// grid. Set for [`ClassId::GRID`] and inherited by subclasses.
    #[must_use]
    pub fn master_grid(&self) -> bool {
        self.master_grid
    }
}

/// The set of known layer classes.
#[derive(Clone, Debug)]
pub struct ClassRegistry {
    classes: Vec<ClassInfo>,
    by_name: HashMap<String, ClassId>,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates a registry holding only the built-in classes.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            classes: Vec::new(),
            by_name: HashMap::new(),
        };
        // Order must match the `ClassId` constants.
        registry.push("Layer", None, true, false);
        registry.push("LayerGroup", Some(ClassId::LAYER), false, false);
        registry.push("Drawing", Some(ClassId::GROUP), false, false);
        registry.push("ObjectOwnerLayer", Some(ClassId::LAYER), true, false);
        registry.push("ObjectDrawingLayer", Some(ClassId::OBJECT_OWNER), true, false);
        registry.push("GridLayer", Some(ClassId::LAYER), false, true);
        registry.push("GuideLayer", Some(ClassId::LAYER), true, false);
        registry.push("ImageOverlayLayer", Some(ClassId::LAYER), true, false);
        registry.push("DrawingInfoLayer", Some(ClassId::LAYER), true, false);
        registry
    }

    /// Registers a new class under `superclass`.
    ///
    /// The new class inherits the superclass's
    /// [`activatable`](ClassInfo::activatable) and
    /// [`master_grid`](ClassInfo::master_grid) attributes.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered or `superclass` is unknown.
    pub fn register(&mut self, name: &str, superclass: ClassId) -> ClassId {
        let activatable = self
            .classes
            .get(superclass.0 as usize)
            .is_some_and(|info| info.activatable);
        self.register_with(name, superclass, activatable)
    }

    /// Registers a new class under `superclass` with an explicit
    /// `activatable` attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered or `superclass` is unknown.
    pub fn register_with(&mut self, name: &str, superclass: ClassId, activatable: bool) -> ClassId {
        assert!(
            self.contains(superclass),
            "unknown superclass {superclass:?} for class {name:?}"
        );
        assert!(
            !self.by_name.contains_key(name),
            "class {name:?} is already registered"
        );
        let master_grid = self.classes[superclass.0 as usize].master_grid;
        self.push(name, Some(superclass), activatable, master_grid)
    }

    /// Sets whether grid layers of `class` may serve as the master grid.
    ///
    /// Already registered subclasses keep their own setting.
    ///
    /// # Panics
    ///
    /// Panics if `class` is unknown.
    pub fn set_master_grid(&mut self, class: ClassId, master_grid: bool) {
        assert!(self.contains(class), "unknown {class:?}");
        self.classes[class.0 as usize].master_grid = master_grid;
    }

    /// Looks up a class by its registered name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Returns whether `class` was issued by this registry.
    #[must_use]
    pub fn contains(&self, class: ClassId) -> bool {
        (class.0 as usize) < self.classes.len()
    }

    /// Returns the descriptor for `class`.
    ///
    /// # Panics
    ///
    /// Panics if `class` is unknown.
    #[must_use]
    pub fn info(&self, class: ClassId) -> &ClassInfo {
        assert!(self.contains(class), "unknown {class:?}");
        &self.classes[class.0 as usize]
    }

    /// Returns whether `class` is `ancestor` or one of its subclasses.
    ///
    /// Unknown ids are never kind-of anything.
    #[must_use]
    pub fn is_kind_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        if !self.contains(ancestor) {
            return false;
        }
        let mut current = Some(class);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.classes.get(c.0 as usize).and_then(|info| info.superclass);
        }
        false
    }

    /// Number of registered classes, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always `false`: the built-in classes are present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn push(
        &mut self,
        name: &str,
        superclass: Option<ClassId>,
        activatable: bool,
        master_grid: bool,
    ) -> ClassId {
        let id = ClassId(
            u32::try_from(self.classes.len()).expect("class registry exceeds u32::MAX entries"),
        );
        self.classes.push(ClassInfo {
            name: name.to_string(),
            superclass,
            activatable,
            master_grid,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_match_constants() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.lookup("Layer"), Some(ClassId::LAYER));
        assert_eq!(registry.lookup("LayerGroup"), Some(ClassId::GROUP));
        assert_eq!(registry.lookup("Drawing"), Some(ClassId::DRAWING));
        assert_eq!(registry.lookup("ObjectOwnerLayer"), Some(ClassId::OBJECT_OWNER));
        assert_eq!(
            registry.lookup("ObjectDrawingLayer"),
            Some(ClassId::OBJECT_DRAWING)
        );
        assert_eq!(registry.lookup("GridLayer"), Some(ClassId::GRID));
        assert_eq!(registry.lookup("GuideLayer"), Some(ClassId::GUIDE));
        assert_eq!(registry.lookup("ImageOverlayLayer"), Some(ClassId::IMAGE_OVERLAY));
        assert_eq!(registry.lookup("DrawingInfoLayer"), Some(ClassId::DRAWING_INFO));
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn kind_of_walks_superclasses() {
        let registry = ClassRegistry::new();
        assert!(registry.is_kind_of(ClassId::DRAWING, ClassId::GROUP));
        assert!(registry.is_kind_of(ClassId::DRAWING, ClassId::LAYER));
        assert!(registry.is_kind_of(ClassId::OBJECT_DRAWING, ClassId::OBJECT_OWNER));
        assert!(registry.is_kind_of(ClassId::GRID, ClassId::GRID));
        assert!(!registry.is_kind_of(ClassId::GROUP, ClassId::DRAWING));
        assert!(!registry.is_kind_of(ClassId::GRID, ClassId::GROUP));
    }

    #[test]
    fn unknown_classes_match_nothing() {
        let registry = ClassRegistry::new();
        let bogus = ClassId(99);
        assert!(!registry.is_kind_of(bogus, ClassId::LAYER));
        assert!(!registry.is_kind_of(ClassId::LAYER, bogus));
        assert!(!registry.contains(bogus));
    }

    #[test]
    fn register_inherits_activatable() {
        let mut registry = ClassRegistry::new();
        let shapes = registry.register("ShapeLayer", ClassId::OBJECT_DRAWING);
        let overlay = registry.register("MeasureGrid", ClassId::GRID);
        assert!(registry.info(shapes).activatable());
        assert!(!registry.info(overlay).activatable());
        assert_eq!(registry.info(shapes).superclass(), Some(ClassId::OBJECT_DRAWING));
        assert_eq!(registry.info(shapes).name(), "ShapeLayer");
        assert!(registry.is_kind_of(shapes, ClassId::OBJECT_OWNER));
    }

    #[test]
    fn register_with_overrides_activatable() {
        let mut registry = ClassRegistry::new();
        let frozen = registry.register_with("Frozen", ClassId::OBJECT_DRAWING, false);
        assert!(!registry.info(frozen).activatable());
    }

    #[test]
    fn master_grid_is_inherited_and_overridable() {
        let mut registry = ClassRegistry::new();
        assert!(registry.info(ClassId::GRID).master_grid());
        assert!(!registry.info(ClassId::GUIDE).master_grid());

        let ruler = registry.register("RulerGrid", ClassId::GRID);
        assert!(registry.info(ruler).master_grid());
        registry.set_master_grid(ruler, false);
        assert!(!registry.info(ruler).master_grid());
        assert!(registry.info(ClassId::GRID).master_grid());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_name_panics() {
        let mut registry = ClassRegistry::new();
        registry.register("GridLayer", ClassId::LAYER);
    }

    #[test]
    #[should_panic(expected = "unknown superclass")]
    fn unknown_superclass_panics() {
        let mut registry = ClassRegistry::new();
        registry.register("Orphan", ClassId(42));
    }

    #[test]
    #[should_panic(expected = "unknown superclass")]
    fn unknown_superclass_panics_with_explicit_activatable() {
        let mut registry = ClassRegistry::new();
        registry.register_with("Orphan", ClassId(42), true);
    }
}
