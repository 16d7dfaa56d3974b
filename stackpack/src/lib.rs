//! Stack packer tool for a block-based sandbox game.
//!
//! The [`item::packer`] module holds the tool itself, the other modules provide the
//! collaborators it needs: an item registry, inventories, player hands and chat, and
//! the NBT format used to persist the tool state with its stack.

pub mod io;

pub mod item;
pub mod player;
pub mod serde;
