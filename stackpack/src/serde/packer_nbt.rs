//! NBT serialization and deserialization for [`PackerState`].
//!
//! Decoding never fails, a malformed compound gives back a valid state: missing keys
//! take their default value, an unknown mode resets to configure and the size is
//! clamped to the allowed range.

use arcstr::ArcStr;
use tracing::warn;

use crate::item::packer::{PackerMode, PackerState, MAX_PACK_SIZE};
use crate::serde::nbt::NbtCompound;


const MODE: &str = "mode";
const ITEM: &str = "item";
const SIZE: &str = "size";


/// Create a packer state from a NBT compound.
pub fn from_nbt(comp: &NbtCompound) -> PackerState {

    let mode = PackerMode::from_value(comp.get_int(MODE).unwrap_or(0));
    let item = comp.get_string(ITEM).map(ArcStr::from);

    let raw_size = comp.get_int(SIZE).unwrap_or(0);
    let size = raw_size.clamp(0, MAX_PACK_SIZE as i32);
    if size != raw_size {
        warn!("packer size out of range: {raw_size}, clamped to {size}");
    }

    PackerState::from_parts(mode, item, size as u16)

}

/// Encode a packer state into a NBT compound.
pub fn to_nbt<'a>(comp: &'a mut NbtCompound, state: &PackerState) -> &'a mut NbtCompound {
    comp.insert(MODE, state.mode().value());
    comp.insert(ITEM, state.item().map(ArcStr::as_str).unwrap_or(""));
    comp.insert(SIZE, state.size() as i32);
    comp
}
