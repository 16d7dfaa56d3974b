//! Item registry, item stacks and item behaviors.

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::serde::nbt::NbtCompound;

pub mod inv;
pub mod packer;


/// Identifier of the packer tool itself.
pub const PACKER: &str = "stackpack:packer";

/// Default namespace used when resolving identifiers without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Default maximum stack size for items.
pub const DEFAULT_MAX_STACK_SIZE: u16 = 64;


/// This structure describe an item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The namespaced identifier of the item, for example `minecraft:cobblestone`.
    pub name: ArcStr,
    /// Maximum stack size for this item.
    pub max_stack_size: u16,
}

impl Item {

    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            max_stack_size: DEFAULT_MAX_STACK_SIZE,
        }
    }

    pub fn with_max_stack_size(mut self, max_stack_size: u16) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

}


/// A registry of all known item types, keyed by their identifier. Items are kept in
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: IndexMap<ArcStr, Item>,
}

impl ItemRegistry {

    /// Create a registry with no item registered, not even the packer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with the packer and a small set of common items.
    pub fn new() -> Self {
        let mut reg = Self::empty();
        reg.register(Item::new(PACKER).with_max_stack_size(1));
        reg.register(Item::new("minecraft:cobblestone"));
        reg.register(Item::new("minecraft:dirt"));
        reg.register(Item::new("minecraft:sand"));
        reg.register(Item::new("minecraft:iron_ingot"));
        reg.register(Item::new("minecraft:diamond"));
        reg.register(Item::new("minecraft:egg").with_max_stack_size(16));
        reg.register(Item::new("minecraft:ender_pearl").with_max_stack_size(16));
        reg.register(Item::new("minecraft:snowball").with_max_stack_size(16));
        reg.register(Item::new("minecraft:diamond_sword").with_max_stack_size(1));
        reg
    }

    /// Register an item, replacing any previous item with the same identifier.
    pub fn register(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    /// Get an item from its exact identifier.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Get an item from its identifier, if the identifier has no namespace then the
    /// default namespace is tried.
    pub fn resolve(&self, name: &str) -> Option<&Item> {
        if name.contains(':') {
            self.get(name)
        } else {
            self.get(&format!("{DEFAULT_NAMESPACE}:{name}"))
        }
    }

    /// Return the maximum stack size of the given item, if registered.
    pub fn max_stack_size(&self, name: &str) -> Option<u16> {
        self.get(name).map(|item| item.max_stack_size)
    }

    /// Iterate over all items in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

}


/// An item stack defines the actual number of items and their optional extra data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStack {
    /// The item identifier, empty for an empty slot.
    pub id: ArcStr,
    /// The stack size.
    pub size: u16,
    /// Extra per-instance data attached to this stack.
    pub tag: Option<NbtCompound>,
}

impl ItemStack {

    /// Create a stack of a single item.
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self::new_sized(id, 1)
    }

    pub fn new_sized(id: impl Into<ArcStr>, size: u16) -> Self {
        Self {
            id: id.into(),
            size,
            tag: None,
        }
    }

    pub fn with_size(mut self, size: u16) -> ItemStack {
        self.size = size;
        self
    }

    pub fn with_tag(mut self, tag: NbtCompound) -> ItemStack {
        self.tag = Some(tag);
        self
    }

    /// Return true if this item stack represents an empty slot.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() || self.size == 0
    }

    /// Return true if this stack carries extra per-instance data.
    #[inline]
    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    /// Return true if this stack is not empty and of the given item.
    #[inline]
    pub fn is(&self, id: &str) -> bool {
        !self.is_empty() && self.id.as_str() == id
    }

    /// Get the extra data compound of this stack, creating an empty one if missing.
    pub fn tag_or_insert(&mut self) -> &mut NbtCompound {
        self.tag.get_or_insert_with(NbtCompound::new)
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn registry_defaults() {

        let reg = ItemRegistry::new();
        assert_eq!(reg.max_stack_size(PACKER), Some(1));
        assert_eq!(reg.max_stack_size("minecraft:cobblestone"), Some(64));
        assert_eq!(reg.max_stack_size("minecraft:ender_pearl"), Some(16));
        assert_eq!(reg.max_stack_size("minecraft:unknown"), None);
        assert_eq!(reg.iter().next().map(|item| item.name.as_str()), Some(PACKER));

        assert!(ItemRegistry::empty().is_empty());

    }

    #[test]
    fn registry_resolve() {

        let mut reg = ItemRegistry::new();
        assert_eq!(reg.resolve("dirt").map(|item| item.name.as_str()), Some("minecraft:dirt"));
        assert!(reg.resolve("packer").is_none());
        assert!(reg.resolve("stackpack:packer").is_some());

        let len = reg.len();
        reg.register(Item::new("minecraft:dirt").with_max_stack_size(8));
        assert_eq!(reg.len(), len);
        assert_eq!(reg.max_stack_size("minecraft:dirt"), Some(8));

    }

    #[test]
    fn stack_empty() {

        assert!(ItemStack::default().is_empty());
        assert!(ItemStack::new_sized("minecraft:dirt", 0).is_empty());
        assert!(!ItemStack::new("minecraft:dirt").is_empty());
        assert!(ItemStack::new("minecraft:dirt").is("minecraft:dirt"));
        assert!(!ItemStack::new_sized("minecraft:dirt", 0).is("minecraft:dirt"));
        assert_eq!(ItemStack::new("minecraft:dirt").with_size(0), ItemStack::new_sized("minecraft:dirt", 0));

    }

    #[test]
    fn stack_tag_or_insert() {

        let mut stack = ItemStack::new(PACKER);
        assert!(!stack.has_tag());
        stack.tag_or_insert().insert("mode", 1i32);
        assert!(stack.has_tag());
        assert_eq!(stack.tag.as_ref().and_then(|tag| tag.get_int("mode")), Some(1));

    }

}
