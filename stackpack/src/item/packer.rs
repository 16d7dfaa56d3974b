//! The packer tool, compressing many stacks of a single configured item into one counter
//! stored in the tool, and extracting it back into regular stacks.
//!
//! The tool cycles between three modes when used while sneaking, and each mode gives
//! access to exactly one operation when used normally:
//!
//! - [`PackerMode::Configure`] takes the item held in the off hand as the packed item,
//! - [`PackerMode::Pack`] moves all matching items of the inventory into the tool,
//! - [`PackerMode::Unpack`] extracts at most one stack into the first empty slot.

use std::fmt;

use arcstr::ArcStr;
use tracing::{debug, instrument, trace};

use crate::player::{Chat, Hand, PlayerInventory};
use crate::serde::packer_nbt;

use super::inv::InventoryHandle;
use super::{ItemRegistry, ItemStack, PACKER};


/// Maximum number of items that can be packed in a single tool.
pub const MAX_PACK_SIZE: u16 = 64 * 64;


/// Mode of a packer tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackerMode {
    #[default]
    Configure,
    Pack,
    Unpack,
}

impl PackerMode {

    /// Get a mode from its persisted value, any out of range value gives the default
    /// configure mode.
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Self::Pack,
            2 => Self::Unpack,
            _ => Self::Configure,
        }
    }

    /// Get the persisted value of this mode.
    pub fn value(self) -> i32 {
        match self {
            Self::Configure => 0,
            Self::Pack => 1,
            Self::Unpack => 2,
        }
    }

    /// Display name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Configure => "Configure",
            Self::Pack => "Pack",
            Self::Unpack => "Unpack",
        }
    }

    /// The mode following this one, rolling back to configure after unpack.
    pub fn next(self) -> Self {
        Self::from_value(self.value() + 1)
    }

}


/// Result of using an item, pass means that the use was not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Pass,
    Success,
}


/// Successful notifications sent to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackerNotice {
    /// The mode has been changed.
    SetMode(PackerMode),
    /// The packer has been configured to the given item.
    ConfiguredTo(ArcStr),
}

impl PackerNotice {

    /// Translation key of this notice.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SetMode(_) => "msg.stackpack.packer.setmode",
            Self::ConfiguredTo(_) => "msg.stackpack.packer.configuredto",
        }
    }

}

impl fmt::Display for PackerNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetMode(mode) => write!(f, "§aPacker mode:§r {}", mode.name()),
            Self::ConfiguredTo(item) => write!(f, "§aPacker configured to:§r {item}"),
        }
    }
}


/// Rejection of a packer operation, the message is sent to the player and the state of
/// the packer is left unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PackerError {
    #[error("§cThe packer must be held in the main hand")]
    InOffHand,
    #[error("§eHold the item to pack in your off hand, then use the packer to configure it")]
    ConfigureInfo,
    #[error("§cCannot configure items with extra data")]
    HasExtraData,
    #[error("§cThe packer must be emptied before reconfiguring")]
    NotEmpty,
    #[error("§cThe packer is not configured")]
    NotConfigured,
    #[error("§cUnknown packed item:§r {0}")]
    UnknownItem(ArcStr),
}

impl PackerError {

    /// Translation key of this error.
    pub fn key(&self) -> &'static str {
        match self {
            Self::InOffHand => "msg.stackpack.packer.error.inoffhand",
            Self::ConfigureInfo => "msg.stackpack.packer.configureinfo",
            Self::HasExtraData => "msg.stackpack.packer.error.hasnbt",
            Self::NotEmpty => "msg.stackpack.packer.error.notempty",
            Self::NotConfigured => "msg.stackpack.packer.error.notconfigured",
            Self::UnknownItem(_) => "msg.stackpack.packer.error.unknownitem",
        }
    }

}


/// The persistent state of a packer tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackerState {
    /// Current mode of the tool.
    mode: PackerMode,
    /// Identifier of the packed item, none if not configured.
    item: Option<ArcStr>,
    /// Number of items currently packed, never above [`MAX_PACK_SIZE`].
    size: u16,
}

impl PackerState {

    /// New unconfigured and empty state, in configure mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from its parts, typically when restoring it from storage. The
    /// size is clamped to [`MAX_PACK_SIZE`] and an empty item means not configured.
    pub fn from_parts(mode: PackerMode, item: Option<ArcStr>, size: u16) -> Self {
        Self {
            mode,
            item: item.filter(|item| !item.is_empty()),
            size: size.min(MAX_PACK_SIZE),
        }
    }

    #[inline]
    pub fn mode(&self) -> PackerMode {
        self.mode
    }

    #[inline]
    pub fn item(&self) -> Option<&ArcStr> {
        self.item.as_ref()
    }

    #[inline]
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Advance to the next mode and notify the player of the new mode.
    pub fn advance_mode(&mut self, chat: &mut (impl Chat + ?Sized)) {
        self.mode = self.mode.next();
        debug!("packer mode set to {:?}", self.mode);
        chat.send_chat(PackerNotice::SetMode(self.mode).to_string());
    }

    /// Configure the packed item from the stack held in the off hand, the packer must be
    /// used from the main hand and must be empty.
    pub fn configure(&mut self, hand: Hand, off_hand: &ItemStack, chat: &mut (impl Chat + ?Sized)) -> Result<(), PackerError> {

        if hand == Hand::Off {
            return Err(PackerError::InOffHand);
        } else if off_hand.is_empty() {
            return Err(PackerError::ConfigureInfo);
        } else if off_hand.has_tag() {
            return Err(PackerError::HasExtraData);
        } else if self.size > 0 {
            return Err(PackerError::NotEmpty);
        }

        debug!("packer configured to {}", off_hand.id);
        self.item = Some(off_hand.id.clone());
        chat.send_chat(PackerNotice::ConfiguredTo(off_hand.id.clone()).to_string());
        Ok(())

    }

    /// Pack every stack of the configured item without extra data, scanning the inventory
    /// in slot order until the packer is full. Return the number of items packed, that
    /// may be zero.
    pub fn pack(&mut self, hand: Hand, inv: &mut InventoryHandle) -> Result<u16, PackerError> {

        if hand == Hand::Off {
            return Err(PackerError::InOffHand);
        }

        let Some(item) = self.item.clone() else {
            return Err(PackerError::NotConfigured);
        };

        let mut packed = 0;

        for index in 0..inv.len() {

            let slot = inv.get(index);
            if !slot.is(&item) || slot.has_tag() {
                continue;
            }

            let slot_size = slot.size;
            let amount = slot_size.min(MAX_PACK_SIZE - self.size);
            if amount == 0 {
                continue;
            }

            inv.set_size(index, slot_size - amount);
            self.size += amount;
            packed += amount;
            trace!("packed {amount} from slot {index}");

        }

        debug!("packed {packed} {item}, now {}/{MAX_PACK_SIZE}", self.size);
        Ok(packed)

    }

    /// Unpack at most one stack of the configured item into the first empty slot of the
    /// inventory. If no slot is empty this does nothing and pass.
    pub fn unpack(&mut self, registry: &ItemRegistry, inv: &mut InventoryHandle) -> Result<Interaction, PackerError> {

        let Some(item) = self.item.clone() else {
            return Err(PackerError::NotConfigured);
        };

        let Some(index) = inv.find_empty() else {
            debug!("no empty slot to unpack {item}");
            return Ok(Interaction::Pass);
        };

        let max_stack_size = registry.max_stack_size(&item)
            .ok_or_else(|| PackerError::UnknownItem(item.clone()))?;

        let count = self.size.min(max_stack_size);
        if count != 0 {
            inv.set(index, ItemStack::new_sized(item.clone(), count));
            self.size -= count;
        }

        debug!("unpacked {count} {item} to slot {index}, now {}/{MAX_PACK_SIZE}", self.size);
        Ok(Interaction::Success)

    }

    /// Lines describing this packer, in order: mode, packed item and packed count.
    pub fn tooltip(&self) -> [String; 3] {
        [
            format!("Mode: {}", self.mode.name()),
            format!("Item: {}", self.item.as_deref().unwrap_or("")),
            format!("Count: {}/{MAX_PACK_SIZE}", self.size),
        ]
    }

}


/// Use the packer held in the given hand, the packer state is read from and written
/// back to the stack's extra data. If the held stack is not a packer, this pass.
///
/// Using while sneaking advances the mode (only from the main hand), otherwise the
/// current mode gives the operation to run. Rejections are sent in the chat.
#[instrument(level = "debug", skip(registry, inv, chat))]
pub fn use_packer(
    registry: &ItemRegistry,
    inv: &mut PlayerInventory,
    hand: Hand,
    sneaking: bool,
    chat: &mut (impl Chat + ?Sized),
) -> Interaction {

    let index = inv.hand_index(hand);
    if !inv.stack(index).is(PACKER) {
        return Interaction::Pass;
    }

    // The packer always carries its state, so it's never eligible for packing.
    let mut state = packer_nbt::from_nbt(inv.stack_mut(index).tag_or_insert());

    let res = if sneaking {
        if hand == Hand::Off {
            return Interaction::Pass;
        }
        state.advance_mode(chat);
        Ok(Interaction::Pass)
    } else {
        match state.mode() {
            PackerMode::Configure => {
                let off_hand = inv.hand_stack(Hand::Off).clone();
                state.configure(hand, &off_hand, chat).map(|()| Interaction::Success)
            }
            PackerMode::Pack => {
                state.pack(hand, &mut inv.handle()).map(|_| Interaction::Success)
            }
            PackerMode::Unpack => {
                state.unpack(registry, &mut inv.handle())
            }
        }
    };

    packer_nbt::to_nbt(inv.stack_mut(index).tag_or_insert(), &state);

    match res {
        Ok(interaction) => interaction,
        Err(err) => {
            debug!("packer rejected: {}", err.key());
            chat.send_chat(err.to_string());
            Interaction::Pass
        }
    }

}

/// Return the tooltip lines of the given stack if it's a packer.
pub fn tooltip(stack: &ItemStack) -> Option<[String; 3]> {
    if !stack.is(PACKER) {
        return None;
    }
    let state = stack.tag.as_ref()
        .map(packer_nbt::from_nbt)
        .unwrap_or_default();
    Some(state.tooltip())
}
