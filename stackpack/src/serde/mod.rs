//! Serialization and deserialization of items, inventories and packer state to NBT.

pub mod nbt;

pub mod item_stack_nbt;
pub mod slot_nbt;
pub mod packer_nbt;
