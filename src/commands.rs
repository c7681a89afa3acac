/// Available commands and autocomplete logic

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "invoices",
    aliases: &["i", "list", "home"],
    description: "Invoice list",
  },
  Command {
    name: "new",
    aliases: &["n", "create"],
    description: "Create an invoice",
  },
  Command {
    name: "open",
    aliases: &["o", "invoice"],
    description: "Open invoice by id (open <id>)",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit invoicer",
  },
];

/// A resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
  Invoices,
  NewInvoice,
  Open(i64),
  Quit,
}

/// Get autocomplete suggestions for the command word of `input`
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = command_word(input).to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = Vec::new();

  for cmd in COMMANDS {
    // Exact match on name
    if cmd.name == input_lower {
      matches.push((cmd, 0)); // Highest priority
      continue;
    }

    // Exact match on alias
    if cmd.aliases.contains(&input_lower.as_str()) {
      matches.push((cmd, 1));
      continue;
    }

    // Prefix match on name
    if cmd.name.starts_with(&input_lower) {
      matches.push((cmd, 2));
      continue;
    }

    // Prefix match on alias
    if cmd.aliases.iter().any(|a| a.starts_with(&input_lower)) {
      matches.push((cmd, 3));
      continue;
    }

    // Fuzzy match (contains)
    if cmd.name.contains(&input_lower) {
      matches.push((cmd, 4));
      continue;
    }

    // Fuzzy match on alias
    if cmd.aliases.iter().any(|a| a.contains(&input_lower)) {
      matches.push((cmd, 5));
    }
  }

  // Sort by priority
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Parse a submitted command line such as `open 7`
pub fn parse(line: &str) -> Result<CommandAction, String> {
  let mut parts = line.split_whitespace();
  let word = parts.next().unwrap_or_default().to_lowercase();
  let arg = parts.next();

  let name = COMMANDS
    .iter()
    .find(|c| c.name == word || c.aliases.contains(&word.as_str()))
    .map(|c| c.name)
    .ok_or_else(|| format!("Unknown command: {}", word))?;

  match name {
    "invoices" => Ok(CommandAction::Invoices),
    "new" => Ok(CommandAction::NewInvoice),
    "quit" => Ok(CommandAction::Quit),
    "open" => {
      let arg = arg.ok_or_else(|| "Usage: open <id>".to_string())?;
      arg
        .parse::<i64>()
        .map(CommandAction::Open)
        .map_err(|_| format!("Not an invoice id: {}", arg))
    }
    _ => Err(format!("Unknown command: {}", word)),
  }
}

fn command_word(input: &str) -> &str {
  input.split_whitespace().next().unwrap_or("")
}
