//! NBT serialization and deserialization for [`ItemStack`] type.

use crate::serde::nbt::{NbtParseError, NbtCompound, NbtCompoundParse};
use crate::item::ItemStack;

/// Create an item stack from a NBT compound.
pub fn from_nbt(comp: &NbtCompoundParse) -> Result<ItemStack, NbtParseError> {
    let id = comp.get_string("id")?;
    let size = comp.get_byte("Count")?.max(0) as u16;
    let tag = match comp.inner().get("tag") {
        Some(_) => Some(comp.get_compound("tag")?.inner().clone()),
        None => None,
    };
    Ok(ItemStack { id: id.into(), size, tag })
}

/// Encode an item stack into a NBT compound.
pub fn to_nbt<'a>(comp: &'a mut NbtCompound, stack: &ItemStack) -> &'a mut NbtCompound {
    comp.insert("id", stack.id.as_str());
    comp.insert("Count", stack.size.min(i8::MAX as _) as i8);
    if let Some(tag) = &stack.tag {
        comp.insert("tag", tag.clone());
    }
    comp
}


#[cfg(test)]
mod tests {

    use crate::serde::nbt::{Nbt, NbtParseExpected};

    use super::*;

    #[test]
    fn with_tag() {

        let mut tag = NbtCompound::new();
        tag.insert("size", 12i32);
        let stack = ItemStack::new_sized("stackpack:packer", 1).with_tag(tag);

        let mut comp = NbtCompound::new();
        to_nbt(&mut comp, &stack);

        let nbt = Nbt::Compound(comp);
        let read = from_nbt(&nbt.parse().as_compound().unwrap()).unwrap();
        assert_eq!(read, stack);

    }

    #[test]
    fn count_clamped() {

        let mut comp = NbtCompound::new();
        to_nbt(&mut comp, &ItemStack::new_sized("minecraft:dirt", 300));
        assert_eq!(comp.get("Count"), Some(&Nbt::Byte(127)));
        assert!(comp.get("tag").is_none());

        comp.insert("Count", -4i8);
        let nbt = Nbt::Compound(comp);
        assert!(from_nbt(&nbt.parse().as_compound().unwrap()).unwrap().is_empty());

    }

    #[test]
    fn bad_tag() {

        let mut comp = NbtCompound::new();
        comp.insert("id", "minecraft:dirt");
        comp.insert("Count", 1i8);
        comp.insert("tag", 3i32);

        let nbt = Nbt::Compound(comp);
        let err = from_nbt(&nbt.parse().as_compound().unwrap()).unwrap_err();
        assert_eq!(err.path, "/tag");
        assert_eq!(err.expected, NbtParseExpected::Compound);

    }

}
