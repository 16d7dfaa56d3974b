//! Inventory handle over a slice of item stacks.

use std::iter::FusedIterator;

use super::ItemStack;


/// An inventory handle gives indexed access to a slice of item stacks. It also record
/// stack indices that have changed and therefore allows selective updates.
pub struct InventoryHandle<'a> {
    inv: &'a mut [ItemStack],
    changes: u64,
}

impl<'a> InventoryHandle<'a> {

    /// Construct a new inventory handle to a slice of item stacks. This functions panics
    /// if the given slice is bigger than 64 stacks.
    pub fn new(inv: &'a mut [ItemStack]) -> Self {
        assert!(inv.len() <= 64);
        Self {
            inv,
            changes: 0,
        }
    }

    /// Number of slots in this inventory.
    #[inline]
    pub fn len(&self) -> usize {
        self.inv.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inv.is_empty()
    }

    /// Get the item stack at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> &ItemStack {
        &self.inv[index]
    }

    /// Set the item stack at the given index.
    #[inline]
    pub fn set(&mut self, index: usize, stack: ItemStack) {
        if self.inv[index] != stack {
            self.inv[index] = stack;
            self.changes |= 1 << index;
        }
    }

    /// Set the size of the stack at the given index, the slot becomes empty when the
    /// size reaches zero.
    pub fn set_size(&mut self, index: usize, size: u16) {
        let slot = &mut self.inv[index];
        if slot.size != size {
            if size == 0 {
                *slot = ItemStack::default();
            } else {
                slot.size = size;
            }
            self.changes |= 1 << index;
        }
    }

    /// Add an item to the inventory, starting by the first slots. Items are first merged
    /// into existing stacks of the same item without extra data, then placed in empty
    /// slots.
    ///
    /// The given item stack is modified according to the amount of items actually added
    /// to the inventory, its size will be set to zero if fully consumed.
    pub fn push_front(&mut self, stack: &mut ItemStack, max_stack_size: u16) {

        if stack.is_empty() || max_stack_size == 0 {
            return;
        }

        // Only accumulate if stack size is greater than 1, stacks with extra data are
        // never merged.
        if max_stack_size > 1 && !stack.has_tag() {
            for (index, slot) in self.inv.iter_mut().enumerate() {
                if slot.is(&stack.id) && !slot.has_tag() && slot.size < max_stack_size {
                    let to_add = (max_stack_size - slot.size).min(stack.size);
                    slot.size += to_add;
                    stack.size -= to_add;
                    self.changes |= 1 << index;
                    if stack.size == 0 {
                        return;
                    }
                }
            }
        }

        // Remaining items fill empty slots, never above the maximum stack size.
        while let Some(index) = self.find_empty() {
            let to_add = max_stack_size.min(stack.size);
            self.inv[index] = stack.clone().with_size(to_add);
            stack.size -= to_add;
            self.changes |= 1 << index;
            if stack.size == 0 {
                return;
            }
        }

    }

    /// Find the index of the first empty slot.
    pub fn find_empty(&self) -> Option<usize> {
        self.inv.iter().position(ItemStack::is_empty)
    }

    /// Get an iterator for changes that happened in this inventory.
    pub fn iter_changes(&self) -> ChangesIter {
        ChangesIter {
            changes: self.changes,
            count: 0,
        }
    }

}


/// An iterator of changes that happened to an inventory.
pub struct ChangesIter {
    changes: u64,
    count: u8,
}

impl FusedIterator for ChangesIter {  }
impl Iterator for ChangesIter {

    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {

        while self.count < 64 {
            let ret = ((self.changes & 1) != 0).then_some(self.count as usize);
            self.changes >>= 1;
            self.count += 1;
            if let Some(ret) = ret {
                return Some(ret);
            }
        }

        None

    }

}
