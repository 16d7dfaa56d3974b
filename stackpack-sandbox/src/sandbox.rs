//! The sandbox state: a single offline player with its inventory, and the console chat
//! used to print messages sent to that player.

use stackpack::item::{ItemRegistry, ItemStack, PACKER};
use stackpack::player::{Chat, PlayerInventory};


/// The whole state of the sandbox.
#[derive(Debug)]
pub struct Sandbox {
    /// Registry of all known items.
    pub registry: ItemRegistry,
    /// Inventory of the single player.
    pub inv: PlayerInventory,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {

    pub fn new() -> Self {
        Self {
            registry: ItemRegistry::new(),
            inv: PlayerInventory::new(),
        }
    }

    /// Give the player a packer in the first hotbar slot and a few stacks to pack.
    pub fn give_starter_kit(&mut self) {
        self.inv.set_stack(0, ItemStack::new(PACKER));
        for size in [64, 64, 32] {
            let mut stack = ItemStack::new_sized("minecraft:cobblestone", size);
            self.inv.pickup_stack(&self.registry, &mut stack);
        }
    }

}


/// Chat printing every message on the standard output, without color codes.
#[derive(Debug, Default)]
pub struct ConsoleChat;

impl Chat for ConsoleChat {
    fn send_chat(&mut self, message: String) {
        println!("{}", strip_codes(&message));
    }
}

/// Remove all section sign color codes from a chat message.
pub fn strip_codes(message: &str) -> String {
    let mut ret = String::with_capacity(message.len());
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            ret.push(c);
        }
    }
    ret
}
