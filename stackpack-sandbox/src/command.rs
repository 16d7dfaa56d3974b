//! Module for command handlers.

use std::path::Path;

use stackpack::item::{ItemStack, PACKER};
use stackpack::item::packer::{self, Interaction};
use stackpack::player::{Chat, Hand, OFF_HAND_SLOT};

use crate::sandbox::Sandbox;
use crate::{config, session};


/// Describe all the context when a command is executed.
pub struct CommandContext<'a> {
    /// The command parts.
    pub parts: &'a [&'a str],
    /// The sandbox to run the command in.
    pub sandbox: &'a mut Sandbox,
    /// The chat where all messages to the player are sent.
    pub chat: &'a mut dyn Chat,
}

/// Handle a command and execute it.
pub fn handle_command(ctx: CommandContext) {

    let Some(&cmd_name) = ctx.parts.first() else {
        ctx.chat.send_chat(format!("§eNo command, type help!"));
        return;
    };

    for cmd in COMMANDS {
        if cmd.name == cmd_name {

            let res = (cmd.handler)(CommandContext {
                parts: &ctx.parts[1..],
                sandbox: &mut *ctx.sandbox,
                chat: &mut *ctx.chat,
            });

            match res {
                Err(Some(message)) =>
                    ctx.chat.send_chat(message),
                Err(None) =>
                    ctx.chat.send_chat(format!("§eUsage:§r {} {}", cmd.name, cmd.usage)),
                _ => {}
            }

            return;

        }
    }

    ctx.chat.send_chat(format!("§eUnknown command, type help!"));

}

/// The result of a command, if the result is ok, nothing is done, if the result is an
/// error, the optional message is printed, if no message is given the command usage
/// is displayed to the player.
type CommandResult = Result<(), Option<String>>;

/// Describe a command.
struct Command {
    /// The command name.
    name: &'static str,
    /// The command usage.
    usage: &'static str,
    /// The command description for help message.
    description: &'static str,
    /// The command handler to call when executing it.
    handler: fn(CommandContext) -> CommandResult,
}

/// Internal array of commands.
const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "",
        description: "Print all available commands",
        handler: cmd_help
    },
    Command {
        name: "items",
        usage: "",
        description: "List all registered items",
        handler: cmd_items
    },
    Command {
        name: "give",
        usage: "<item> [<size>]",
        description: "Give item to the player",
        handler: cmd_give
    },
    Command {
        name: "select",
        usage: "<0-8>",
        description: "Select the hotbar slot held in main hand",
        handler: cmd_select
    },
    Command {
        name: "swap",
        usage: "",
        description: "Swap the main hand and off hand stacks",
        handler: cmd_swap
    },
    Command {
        name: "use",
        usage: "[main|off]",
        description: "Use the item held in a hand",
        handler: cmd_use
    },
    Command {
        name: "sneak",
        usage: "[main|off]",
        description: "Use the item held in a hand while sneaking",
        handler: cmd_sneak
    },
    Command {
        name: "inv",
        usage: "",
        description: "Display the player inventory",
        handler: cmd_inv
    },
    Command {
        name: "tooltip",
        usage: "[main|off]",
        description: "Display the tooltip of the packer held in a hand",
        handler: cmd_tooltip
    },
    Command {
        name: "save",
        usage: "[<file>]",
        description: "Save the player inventory",
        handler: cmd_save
    },
    Command {
        name: "load",
        usage: "[<file>]",
        description: "Load the player inventory",
        handler: cmd_load
    },
];

fn cmd_help(ctx: CommandContext) -> CommandResult {

    ctx.chat.send_chat(format!("§8====================================================="));

    for cmd in COMMANDS {
        if cmd.usage.is_empty() {
            ctx.chat.send_chat(format!("§a{}:§r {}", cmd.name, cmd.description));
        } else {
            ctx.chat.send_chat(format!("§a{} {}:§r {}", cmd.name, cmd.usage, cmd.description));
        }
    }

    Ok(())

}

fn cmd_items(ctx: CommandContext) -> CommandResult {
    for item in ctx.sandbox.registry.iter() {
        ctx.chat.send_chat(format!("§a{}§r x{}", item.name, item.max_stack_size));
    }
    Ok(())
}

fn cmd_give(ctx: CommandContext) -> CommandResult {

    let (item_raw, size_raw) = match *ctx.parts {
        [item_raw] => (item_raw, None),
        [item_raw, size_raw] => (item_raw, Some(size_raw)),
        _ => return Err(None),
    };

    let Some(item) = ctx.sandbox.registry.resolve(item_raw) else {
        return Err(Some(format!("§cError: unknown item:§r {item_raw}")));
    };

    let mut stack = ItemStack::new_sized(item.name.clone(), item.max_stack_size);

    if let Some(size_raw) = size_raw {
        stack.size = size_raw.parse::<u16>()
            .ok()
            .filter(|size| (1..=item.max_stack_size).contains(size))
            .ok_or_else(|| format!("§cError: stack size must be 1 to {}:§r {size_raw}", item.max_stack_size))?;
    }

    ctx.chat.send_chat(format!("§aGiving §r{}§a x§r{}", stack.id, stack.size));
    ctx.sandbox.inv.pickup_stack(&ctx.sandbox.registry, &mut stack);

    if stack.size != 0 {
        ctx.chat.send_chat(format!("§eInventory full, dropped x§r{}", stack.size));
    }

    Ok(())

}

fn cmd_select(ctx: CommandContext) -> CommandResult {

    let [slot_raw] = *ctx.parts else {
        return Err(None);
    };

    let slot = slot_raw.parse::<usize>().map_err(|_| None)?;
    if !ctx.sandbox.inv.set_hand_slot(slot) {
        return Err(None);
    }

    ctx.chat.send_chat(format!("§aSelected slot:§r {slot}"));
    Ok(())

}

fn cmd_swap(ctx: CommandContext) -> CommandResult {

    let inv = &mut ctx.sandbox.inv;
    let main_index = inv.hand_slot();
    let main = inv.stack(main_index).clone();
    let off = inv.stack(OFF_HAND_SLOT).clone();
    inv.set_stack(main_index, off);
    inv.set_stack(OFF_HAND_SLOT, main);

    Ok(())

}

/// Parse the optional hand argument of a command, defaults to main hand.
fn parse_hand(parts: &[&str]) -> Result<Hand, Option<String>> {
    match *parts {
        [] | ["main"] => Ok(Hand::Main),
        ["off"] => Ok(Hand::Off),
        _ => Err(None),
    }
}

fn use_hand(ctx: CommandContext, sneaking: bool) -> CommandResult {

    let hand = parse_hand(ctx.parts)?;
    let sandbox = ctx.sandbox;

    let res = packer::use_packer(&sandbox.registry, &mut sandbox.inv, hand, sneaking, ctx.chat);
    if res == Interaction::Pass && !sandbox.inv.hand_stack(hand).is(PACKER) {
        return Err(Some(format!("§eNothing to use in {hand:?} hand")));
    }

    Ok(())

}

fn cmd_use(ctx: CommandContext) -> CommandResult {
    use_hand(ctx, false)
}

fn cmd_sneak(ctx: CommandContext) -> CommandResult {
    use_hand(ctx, true)
}

fn cmd_inv(ctx: CommandContext) -> CommandResult {

    ctx.chat.send_chat(format!("§8====================================================="));

    let inv = &ctx.sandbox.inv;
    for (index, stack) in inv.stacks().iter().enumerate() {

        if stack.is_empty() {
            continue;
        }

        let marker = if index == OFF_HAND_SLOT {
            " (off hand)"
        } else if index == inv.hand_slot() {
            " (main hand)"
        } else {
            ""
        };

        let extra = if stack.has_tag() { " +data" } else { "" };
        ctx.chat.send_chat(format!("§a{index:>2}:§r {} x{}{extra}{marker}", stack.id, stack.size));

    }

    Ok(())

}

fn cmd_tooltip(ctx: CommandContext) -> CommandResult {

    let hand = parse_hand(ctx.parts)?;
    let Some(lines) = packer::tooltip(ctx.sandbox.inv.hand_stack(hand)) else {
        return Err(Some(format!("§eNo packer in {hand:?} hand")));
    };

    for line in lines {
        ctx.chat.send_chat(line);
    }

    Ok(())

}

/// Parse the optional file argument of a command, defaults to the configured path.
fn parse_path<'a>(parts: &[&'a str]) -> Result<&'a Path, Option<String>> {
    match *parts {
        [] => Ok(config::save_path()),
        [path] => Ok(Path::new(path)),
        _ => Err(None),
    }
}

fn cmd_save(ctx: CommandContext) -> CommandResult {

    let path = parse_path(ctx.parts)?;
    session::save(path, &ctx.sandbox.inv)
        .map_err(|e| format!("§cError: failed to save {}:§r {e}", path.display()))?;

    ctx.chat.send_chat(format!("§aSaved to:§r {}", path.display()));
    Ok(())

}

fn cmd_load(ctx: CommandContext) -> CommandResult {

    let path = parse_path(ctx.parts)?;
    ctx.sandbox.inv = session::load(path)
        .map_err(|e| format!("§cError: failed to load {}:§r {e}", path.display()))?;

    ctx.chat.send_chat(format!("§aLoaded from:§r {}", path.display()));
    Ok(())

}


#[cfg(test)]
mod tests {

    use stackpack::item::packer::PackerError;

    use super::*;

    /// Run a command line and return all messages sent.
    fn run(sandbox: &mut Sandbox, line: &str) -> Vec<String> {
        let parts = line.split_whitespace().collect::<Vec<_>>();
        let mut chat: Vec<String> = Vec::new();
        handle_command(CommandContext { parts: &parts, sandbox, chat: &mut chat });
        chat
    }

    #[test]
    fn unknown_and_usage() {

        let mut sandbox = Sandbox::new();
        assert_eq!(run(&mut sandbox, ""), ["§eNo command, type help!"]);
        assert_eq!(run(&mut sandbox, "fly"), ["§eUnknown command, type help!"]);
        assert_eq!(run(&mut sandbox, "select 12"), ["§eUsage:§r select <0-8>"]);
        assert_eq!(run(&mut sandbox, "give"), ["§eUsage:§r give <item> [<size>]"]);
        assert_eq!(run(&mut sandbox, "give stone"), ["§cError: unknown item:§r stone"]);

        let help = run(&mut sandbox, "help");
        assert_eq!(help.len(), COMMANDS.len() + 1);

    }

    #[test]
    fn give() {

        let mut sandbox = Sandbox::new();
        run(&mut sandbox, "give dirt 10");
        run(&mut sandbox, "give minecraft:dirt");
        assert_eq!(sandbox.inv.stack(0), &ItemStack::new_sized("minecraft:dirt", 64));
        assert_eq!(sandbox.inv.stack(1), &ItemStack::new_sized("minecraft:dirt", 10));

        assert_eq!(run(&mut sandbox, "give dirt many"), ["§cError: stack size must be 1 to 64:§r many"]);
        assert_eq!(run(&mut sandbox, "give dirt 65"), ["§cError: stack size must be 1 to 64:§r 65"]);
        assert_eq!(run(&mut sandbox, "give dirt 0"), ["§cError: stack size must be 1 to 64:§r 0"]);
        assert_eq!(run(&mut sandbox, "give egg 17"), ["§cError: stack size must be 1 to 16:§r 17"]);
        assert_eq!(sandbox.inv.stack(2), &ItemStack::default());

    }

    #[test]
    fn packer_session() {

        let mut sandbox = Sandbox::new();
        run(&mut sandbox, "give stackpack:packer");
        run(&mut sandbox, "give cobblestone 20");
        run(&mut sandbox, "give cobblestone 30");

        assert_eq!(run(&mut sandbox, "use"), [PackerError::ConfigureInfo.to_string()]);

        // Move the cobblestone to the off hand to configure the packer.
        run(&mut sandbox, "select 1");
        run(&mut sandbox, "swap");
        run(&mut sandbox, "select 0");
        assert_eq!(run(&mut sandbox, "use"), ["§aPacker configured to:§r minecraft:cobblestone"]);

        assert_eq!(run(&mut sandbox, "sneak"), ["§aPacker mode:§r Pack"]);
        assert!(run(&mut sandbox, "use").is_empty());
        assert!(sandbox.inv.stacks().iter().all(|stack| !stack.is("minecraft:cobblestone")));

        assert_eq!(run(&mut sandbox, "tooltip"), [
            "Mode: Pack",
            "Item: minecraft:cobblestone",
            "Count: 50/4096",
        ]);

        run(&mut sandbox, "sneak");
        run(&mut sandbox, "use");
        assert_eq!(sandbox.inv.stack(1), &ItemStack::new_sized("minecraft:cobblestone", 50));
        assert!(sandbox.inv.stack(0).is(PACKER));

    }

    #[test]
    fn use_nothing() {
        let mut sandbox = Sandbox::new();
        assert_eq!(run(&mut sandbox, "use off"), ["§eNothing to use in Off hand"]);
        assert_eq!(run(&mut sandbox, "tooltip"), ["§eNo packer in Main hand"]);
        assert_eq!(run(&mut sandbox, "use both"), ["§eUsage:§r use [main|off]"]);
    }

    #[test]
    fn inv_listing() {

        let mut sandbox = Sandbox::new();
        sandbox.give_starter_kit();
        let lines = run(&mut sandbox, "inv");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "§a 0:§r stackpack:packer x1 (main hand)");
        assert_eq!(lines[2], "§a 1:§r minecraft:cobblestone x64");

    }

    #[test]
    fn save_and_load() {

        let path = std::env::temp_dir().join(format!("stackpack-{}-cmd.dat", std::process::id()));
        let path_str = path.to_str().unwrap();

        let mut sandbox = Sandbox::new();
        sandbox.give_starter_kit();
        run(&mut sandbox, "select 3");
        assert_eq!(run(&mut sandbox, &format!("save {path_str}")), [format!("§aSaved to:§r {path_str}")]);

        let mut loaded = Sandbox::new();
        assert_eq!(run(&mut loaded, &format!("load {path_str}")), [format!("§aLoaded from:§r {path_str}")]);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.inv.stacks(), sandbox.inv.stacks());
        assert_eq!(loaded.inv.hand_slot(), 3);

        let lines = run(&mut loaded, &format!("load {path_str}"));
        assert!(lines[0].starts_with("§cError: failed to load"));
        assert_eq!(run(&mut loaded, "save a b"), ["§eUsage:§r save [<file>]"]);

    }

    #[test]
    fn oversized_give_keeps_save_lossless() {

        let path = std::env::temp_dir().join(format!("stackpack-{}-oversized.dat", std::process::id()));
        let path_str = path.to_str().unwrap();

        let mut sandbox = Sandbox::new();
        assert_eq!(run(&mut sandbox, "give dirt 1000"), ["§cError: stack size must be 1 to 64:§r 1000"]);
        assert!(sandbox.inv.stacks().iter().all(ItemStack::is_empty));

        // Large pickups are split in stacks that fit in a saved slot.
        let mut stack = ItemStack::new_sized("minecraft:dirt", 1000);
        sandbox.inv.pickup_stack(&sandbox.registry, &mut stack);
        assert_eq!(stack.size, 0);
        assert!(sandbox.inv.stacks().iter().all(|stack| stack.size <= 64));

        run(&mut sandbox, &format!("save {path_str}"));
        let mut loaded = Sandbox::new();
        run(&mut loaded, &format!("load {path_str}"));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.inv.stacks(), sandbox.inv.stacks());
        let total = loaded.inv.stacks().iter().map(|stack| stack.size as u32).sum::<u32>();
        assert_eq!(total, 1000);

    }

}
