pub fn red(s: &str) -> String { format!("\x1b[31m{}\x1b[0m", s) }
pub fn yellow(s: &str) -> String { format!("\x1b[33m{}\x1b[0m", s) }
pub fn bold(s: &str) -> String { format!("\x1b[1m{}\x1b[0m", s) }

pub fn error_tag() -> String { bold(&red("error:")) }
pub fn help_tag() -> String { bold(&yellow("help:")) }
