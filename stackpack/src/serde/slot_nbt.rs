//! Common NBT serde functions for item slots.

use crate::serde::nbt::{NbtParseError, NbtCompoundParse, NbtCompound, NbtListParse, Nbt};
use crate::item::ItemStack;

use super::item_stack_nbt;

/// Create an slot and item stack from a NBT compound.
pub fn from_nbt(comp: &NbtCompoundParse) -> Result<(u8, ItemStack), NbtParseError> {
    let slot = comp.get_byte("Slot")? as u8;
    let stack = item_stack_nbt::from_nbt(comp)?;
    Ok((slot, stack))
}

/// Encode a slot and item stack into a NBT compound.
pub fn to_nbt<'a>(comp: &'a mut NbtCompound, slot: u8, stack: &ItemStack) -> &'a mut NbtCompound {
    comp.insert("Slot", slot as i8);
    item_stack_nbt::to_nbt(comp, stack)
}

/// Decode a list of slots into the given inventory, slots out of the inventory are
/// ignored and slots absent from the list are left untouched.
pub fn from_nbt_to_inv(list: &NbtListParse, inv: &mut [ItemStack]) -> Result<(), NbtParseError> {
    for item in list.iter() {
        let (slot, stack) = from_nbt(&item.as_compound()?)?;
        if (slot as usize) < inv.len() {
            inv[slot as usize] = stack;
        }
    }
    Ok(())
}

/// Encode all non-empty slots of the inventory into a list of compounds.
pub fn to_nbt_from_inv(inv: &[ItemStack]) -> Vec<Nbt> {
    let mut list = Vec::new();
    for (index, stack) in inv.iter().enumerate() {
        if index < 256 && !stack.is_empty() {
            let mut comp = NbtCompound::new();
            to_nbt(&mut comp, index as u8, stack);
            list.push(comp.into());
        }
    }
    list
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn inventory_list() {

        let mut inv = vec![ItemStack::default(); 40];
        inv[0] = ItemStack::new("stackpack:packer").with_tag(NbtCompound::new());
        inv[36] = ItemStack::new_sized("minecraft:dirt", 12);

        let list = to_nbt_from_inv(&inv);
        assert_eq!(list.len(), 2);

        let mut read = vec![ItemStack::default(); 40];
        let nbt = Nbt::List(list);
        from_nbt_to_inv(&nbt.parse().as_list().unwrap(), &mut read).unwrap();
        assert_eq!(read, inv);

    }

    #[test]
    fn slot_out_of_range() {

        let mut comp = NbtCompound::new();
        to_nbt(&mut comp, 200, &ItemStack::new("minecraft:dirt"));
        let nbt = Nbt::List(vec![comp.into()]);

        let mut read = vec![ItemStack::default(); 4];
        from_nbt_to_inv(&nbt.parse().as_list().unwrap(), &mut read).unwrap();
        assert!(read.iter().all(ItemStack::is_empty));

    }

}
