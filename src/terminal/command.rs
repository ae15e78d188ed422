//! Command table, lookup and completion.
//!
//! Every command is a row of [`COMMANDS`]: a name, an optional help line and a
//! handler. Handlers are pure functions of the visitor info and the window
//! state; `reboot` is the only one that touches anything, and it does so
//! through the [`WindowState`] collaborator.

use super::output::RenderedResponse;
use super::visitor::VisitorInfo;
use super::window::WindowState;

/// What the controller must do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Append this response to the output log
    Respond(RenderedResponse),
    /// Empty the output log, print nothing
    ClearOutput,
    /// Close the terminal if it is open, print nothing
    CloseTerminal,
}

/// Inputs a handler may consult
pub struct CommandContext<'a> {
    pub visitor: Option<&'a VisitorInfo>,
    pub window: &'a mut dyn WindowState,
}

pub type Handler = fn(&mut CommandContext<'_>) -> CommandOutcome;

/// Specification for a single command.
pub struct CommandSpec {
    pub name: &'static str,
    /// `help` line; commands without one are left out of the listing
    pub description: Option<&'static str>,
    pub handler: Handler,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// All commands, in completion order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        description: Some("Show this help message"),
        handler: help,
    },
    CommandSpec {
        name: "whoami",
        description: Some("Show your connection info"),
        handler: whoami,
    },
    CommandSpec {
        name: "about",
        description: Some("Who is Che-Lun?"),
        handler: about,
    },
    CommandSpec {
        name: "contact",
        description: Some("How to reach me"),
        handler: contact,
    },
    CommandSpec {
        name: "reboot",
        description: Some("Restore/Restart the profile window"),
        handler: reboot,
    },
    CommandSpec {
        name: "clear",
        description: Some("Clear terminal"),
        handler: clear,
    },
    CommandSpec {
        name: "exit",
        description: Some("Close terminal"),
        handler: exit,
    },
    CommandSpec {
        name: "sudo",
        description: None,
        handler: sudo,
    },
];

/// Extra names accepted at dispatch time. Not offered by completion.
pub const ALIASES: &[(&str, &str)] = &[("run", "reboot")];

pub const WHOAMI_UNAVAILABLE: &str = "Connection info unavailable.";
pub const ABOUT_TEXT: &str = "u don't know Che-lun ? he's a handsome guy.";
pub const CONTACT_TEXT: &str = "Email: me@chelunliang.com";
pub const REBOOT_RESTORED: &str =
    "System rebooting... Initializing CRT display... OK. Profile restored.";
pub const REBOOT_ALREADY_RUNNING: &str = "System is already running at PID 125. No reboot needed.";
pub const SUDO_DENIED: &str = "PermissionError: [Errno 13] Permission denied \n\nNice try! hahaha :))) 想幹嘛？你怎那麼壞呢寶？ ";

/// Trim surrounding whitespace and lowercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Exact lookup of a normalized command name, aliases included.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    let name = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, target)| *target)
        .unwrap_or(name);
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Run a normalized command. Unknown names produce an error response.
pub fn dispatch(name: &str, ctx: &mut CommandContext<'_>) -> CommandOutcome {
    match lookup(name) {
        Some(spec) => (spec.handler)(ctx),
        None => CommandOutcome::Respond(RenderedResponse::error(format!(
            "Command not found: {}. Type 'help' for list.",
            name
        ))),
    }
}

/// Command names starting with the normalized `input`, in table order.
/// Empty input has no candidates.
pub fn completions(input: &str) -> Vec<&'static str> {
    let prefix = normalize(input);
    if prefix.is_empty() {
        return Vec::new();
    }
    COMMANDS
        .iter()
        .map(|spec| spec.name)
        .filter(|name| name.starts_with(&prefix))
        .collect()
}

/// The `help` listing.
pub fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for (name, description) in COMMANDS
        .iter()
        .filter_map(|spec| spec.description.map(|description| (spec.name, description)))
    {
        text.push_str(&format!("\n  {:<10}- {}", name, description));
    }
    text
}

fn help(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::Respond(RenderedResponse::result(help_text()))
}

fn whoami(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let text = match ctx.visitor {
        Some(visitor) => format!(
            "IP Address: {}\nLocation:   {}\nConnection: Via Cloudflare Node [{}]",
            visitor.ip,
            visitor.location(),
            visitor.colo
        ),
        None => WHOAMI_UNAVAILABLE.to_string(),
    };
    CommandOutcome::Respond(RenderedResponse::result(text))
}

fn about(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::Respond(RenderedResponse::result(ABOUT_TEXT))
}

fn contact(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::Respond(RenderedResponse::result(CONTACT_TEXT))
}

fn reboot(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    if ctx.window.is_powered_off() || ctx.window.is_minimized() {
        ctx.window.restore();
        CommandOutcome::Respond(RenderedResponse::result(REBOOT_RESTORED))
    } else {
        CommandOutcome::Respond(RenderedResponse::result(REBOOT_ALREADY_RUNNING))
    }
}

fn clear(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::ClearOutput
}

fn exit(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::CloseTerminal
}

fn sudo(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::Respond(RenderedResponse::error(SUDO_DENIED))
}
