//! HAP command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

/// A parsed server-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Hap,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Decide a move for the JSON snapshot that follows the keyword.
    Turn { json: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "hap" => Some(Command::Hap),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),

        "setoption" => parse_setoption(rest),
        "turn" => parse_turn(rest),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses the arguments of `setoption name <id> [value <x>]`. The value is
/// sliced from the raw line, so inner whitespace survives.
fn parse_setoption(args: &str) -> Option<Command> {
    let rest = match args.split_once(char::is_whitespace) {
        Some(("name", rest)) => rest.trim_start(),
        _ => {
            tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
            return None;
        }
    };

    let (name, value) = match find_word(rest, "value") {
        Some(at) => {
            let value = rest[at + "value".len()..].trim();
            (&rest[..at], (!value.is_empty()).then(|| value.to_string()))
        }
        None => (rest, None),
    };

    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        tracing::warn!("malformed setoption: empty name");
        return None;
    }

    Some(Command::SetOption { name, value })
}

/// Byte offset of the first whitespace-delimited token equal to `word`.
fn find_word(s: &str, word: &str) -> Option<usize> {
    let mut offset = 0;
    for token in s.split_whitespace() {
        let at = offset + s[offset..].find(token)?;
        if token == word {
            return Some(at);
        }
        offset = at + token.len();
    }
    None
}

/// Parses `turn <json>`. The JSON may contain spaces, so everything after
/// the keyword is kept verbatim.
fn parse_turn(args: &str) -> Option<Command> {
    if args.is_empty() {
        tracing::warn!("malformed turn: expected 'turn <json>'");
        return None;
    }
    Some(Command::Turn {
        json: args.to_string(),
    })
}
