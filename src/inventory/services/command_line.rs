use crate::inventory::domain::CommandLine;

/// Flag appended to every uninstall invocation to suppress installer UI
pub const QUIET_FLAG: &str = "/quiet";

const EXECUTABLE_EXTENSION: &str = ".exe";

/// Splits a registry uninstall string into program and arguments, then
/// appends [`QUIET_FLAG`].
///
/// Accepts the quoted form (`"C:\Program Files\App\uninstall.exe" /S`) and
/// the bare form (`C:\Program Files\App\uninstall.exe /S`). A bare path may
/// contain spaces, so it is cut right after its `.exe` extension; without
/// one, the first whitespace ends the program.
///
/// Returns `None` for a blank command or an empty program.
pub fn parse_uninstall_command(raw: &str) -> Option<CommandLine> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (program, arguments) = match raw.strip_prefix('"') {
        Some(rest) => match rest.find('"') {
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, ""),
        },
        None => split_bare(raw),
    };

    let program = program.trim();
    if program.is_empty() {
        return None;
    }

    Some(CommandLine::new(program, with_quiet_flag(arguments.trim())))
}

fn split_bare(raw: &str) -> (&str, &str) {
    let lower = raw.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(found) = lower[search_from..].find(EXECUTABLE_EXTENSION) {
        let end = search_from + found + EXECUTABLE_EXTENSION.len();
        let boundary = lower[end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if boundary {
            return (&raw[..end], &raw[end..]);
        }
        search_from = end;
    }

    match raw.find(char::is_whitespace) {
        Some(space) => (&raw[..space], &raw[space..]),
        None => (raw, ""),
    }
}

fn with_quiet_flag(arguments: &str) -> String {
    let already_quiet = arguments
        .split_whitespace()
        .any(|arg| arg.eq_ignore_ascii_case(QUIET_FLAG));

    match (arguments.is_empty(), already_quiet) {
        (true, _) => QUIET_FLAG.to_string(),
        (false, true) => arguments.to_string(),
        (false, false) => format!("{} {}", arguments, QUIET_FLAG),
    }
}
