//! Player-side collaborators used by item behaviors: hands, inventory and chat.

use crate::item::inv::InventoryHandle;
use crate::item::{ItemRegistry, ItemStack, DEFAULT_MAX_STACK_SIZE};


/// Number of slots in the main inventory, the first 9 being the hotbar.
pub const MAIN_INV_SIZE: usize = 36;
/// Number of hotbar slots that can be selected as the main hand.
pub const HOTBAR_SIZE: usize = 9;
/// Index of the off hand slot, right after the main inventory.
pub const OFF_HAND_SLOT: usize = MAIN_INV_SIZE;


/// A hand of the player, used to tell which stack is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

/// A channel of short messages sent to the player.
pub trait Chat {

    /// Send a chat message, messages may contain section sign color codes.
    fn send_chat(&mut self, message: String);

}

/// Buffering chat, mostly useful to collect messages before printing them.
impl Chat for Vec<String> {
    fn send_chat(&mut self, message: String) {
        self.push(message);
    }
}


/// The inventory of a player, the main inventory is followed by the off hand slot and
/// all slots are enumerated in this order.
#[derive(Debug, Clone)]
pub struct PlayerInventory {
    /// The main inventory and the off hand, see [`OFF_HAND_SLOT`].
    slots: Box<[ItemStack; MAIN_INV_SIZE + 1]>,
    /// The slot current selected for the main hand. Must be in range 0..9.
    hand_slot: u8,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {

    pub fn new() -> Self {
        Self {
            slots: Box::new(std::array::from_fn(|_| ItemStack::default())),
            hand_slot: 0,
        }
    }

    /// Total number of slots, including the off hand.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Get a slice of all stacks in this inventory.
    #[inline]
    pub fn stacks(&self) -> &[ItemStack] {
        &self.slots[..]
    }

    /// Get the stack at the given slot index, panics if out of range.
    #[inline]
    pub fn stack(&self, index: usize) -> &ItemStack {
        &self.slots[index]
    }

    #[inline]
    pub fn stack_mut(&mut self, index: usize) -> &mut ItemStack {
        &mut self.slots[index]
    }

    /// Set the stack at the given slot index, panics if out of range.
    pub fn set_stack(&mut self, index: usize, stack: ItemStack) {
        self.slots[index] = stack;
    }

    /// Return the selected hotbar slot.
    #[inline]
    pub fn hand_slot(&self) -> usize {
        self.hand_slot as usize
    }

    /// Select the hotbar slot of the main hand, returning false if out of range.
    pub fn set_hand_slot(&mut self, slot: usize) -> bool {
        if slot < HOTBAR_SIZE {
            self.hand_slot = slot as u8;
            true
        } else {
            false
        }
    }

    /// Return the slot index of the stack held in the given hand.
    #[inline]
    pub fn hand_index(&self, hand: Hand) -> usize {
        match hand {
            Hand::Main => self.hand_slot as usize,
            Hand::Off => OFF_HAND_SLOT,
        }
    }

    /// Get the stack held in the given hand.
    #[inline]
    pub fn hand_stack(&self, hand: Hand) -> &ItemStack {
        &self.slots[self.hand_index(hand)]
    }

    /// Get an inventory handle to all slots, including the off hand.
    #[inline]
    pub fn handle(&mut self) -> InventoryHandle<'_> {
        InventoryHandle::new(&mut self.slots[..])
    }

    /// Pick up a stack into the main inventory only, never in the off hand. The given
    /// stack size is decreased by the number of items picked up.
    pub fn pickup_stack(&mut self, registry: &ItemRegistry, stack: &mut ItemStack) {
        let max_stack_size = registry.max_stack_size(&stack.id)
            .unwrap_or(DEFAULT_MAX_STACK_SIZE);
        InventoryHandle::new(&mut self.slots[..MAIN_INV_SIZE])
            .push_front(stack, max_stack_size);
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn hands() {

        let mut inv = PlayerInventory::new();
        assert_eq!(inv.len(), 37);
        assert_eq!(inv.hand_index(Hand::Main), 0);
        assert_eq!(inv.hand_index(Hand::Off), OFF_HAND_SLOT);

        assert!(inv.set_hand_slot(8));
        assert!(!inv.set_hand_slot(9));
        assert_eq!(inv.hand_slot(), 8);

        inv.set_stack(8, ItemStack::new("minecraft:dirt"));
        assert!(inv.hand_stack(Hand::Main).is("minecraft:dirt"));
        assert!(inv.hand_stack(Hand::Off).is_empty());

    }

    #[test]
    fn pickup_skips_off_hand() {

        let reg = ItemRegistry::new();
        let mut inv = PlayerInventory::new();
        for index in 0..MAIN_INV_SIZE {
            inv.set_stack(index, ItemStack::new("minecraft:diamond_sword"));
        }

        let mut stack = ItemStack::new_sized("minecraft:dirt", 5);
        inv.pickup_stack(&reg, &mut stack);
        assert_eq!(stack.size, 5);
        assert!(inv.hand_stack(Hand::Off).is_empty());

        inv.set_stack(3, ItemStack::new_sized("minecraft:dirt", 62));
        inv.pickup_stack(&reg, &mut stack);
        assert_eq!(stack.size, 3);
        assert_eq!(inv.stack(3).size, 64);

    }

    #[test]
    fn chat_buffer() {
        let mut chat: Vec<String> = Vec::new();
        chat.send_chat("hello".to_string());
        assert_eq!(chat, ["hello"]);
    }

}
