//! Saving and loading the player inventory to a gzip compressed NBT file.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use tracing::debug;

use stackpack::player::PlayerInventory;
use stackpack::serde::nbt::{self, Nbt, NbtCompound, NbtError, NbtParseError};
use stackpack::serde::slot_nbt;


/// Save the player inventory to the given file, replacing it.
pub fn save(path: &Path, inv: &PlayerInventory) -> Result<(), SessionError> {

    let mut comp = NbtCompound::new();
    comp.insert("Inventory", slot_nbt::to_nbt_from_inv(inv.stacks()));
    comp.insert("SelectedItemSlot", inv.hand_slot() as i32);

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GzEncoder::new(file, Compression::default());
    nbt::to_writer(&mut encoder, &Nbt::Compound(comp))?;
    encoder.finish()?.flush()?;

    debug!("saved session to {}", path.display());
    Ok(())

}

/// Load a player inventory from the given file.
pub fn load(path: &Path) -> Result<PlayerInventory, SessionError> {

    let file = BufReader::new(File::open(path)?);
    let root = nbt::from_reader(GzDecoder::new(file))?;
    let root = root.parse().as_compound()?;

    let mut inv = PlayerInventory::new();
    let mut stacks = inv.stacks().to_vec();
    slot_nbt::from_nbt_to_inv(&root.get_list("Inventory")?, &mut stacks)?;
    for (index, stack) in stacks.into_iter().enumerate() {
        inv.set_stack(index, stack);
    }

    // An invalid selected slot is not fatal, the first slot is selected.
    let hand_slot = root.inner().get_int("SelectedItemSlot").unwrap_or(0);
    inv.set_hand_slot(usize::try_from(hand_slot).unwrap_or(0));

    debug!("loaded session from {}", path.display());
    Ok(inv)

}


/// Error type returned when saving or loading a session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("nbt: {0}")]
    Nbt(#[from] NbtError),
    #[error("nbt parse: {0}")]
    NbtParse(#[from] NbtParseError),
}
