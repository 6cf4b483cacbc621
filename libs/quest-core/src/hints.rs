//! Static hint tables and the feedback messages built from them.

/// Shown when the submission is blank.
pub const EMPTY_INPUT_HINT: &str = "Please enter a command.";

/// Shown when a lesson step has no accepted answers configured.
pub const CONFIGURATION_ERROR_HINT: &str =
    "A configuration error occurred: this step has no expected commands.";

/// Last-resort feedback when nothing more specific applies.
pub const GENERIC_HINT: &str = "Please enter a correct Linux command.";

/// Commands from other ecosystems (mostly Windows `cmd.exe`) mapped to the
/// Linux command the learner most likely meant.
const COMMON_MISTAKES: &[(&str, &str)] = &[
    ("dir", "ls"),
    ("cls", "clear"),
    ("type", "cat"),
    ("copy", "cp"),
    ("move", "mv"),
    ("del", "rm"),
    ("delete", "rm"),
    ("md", "mkdir"),
    ("rd", "rmdir"),
    ("cd..", "cd .."),
    ("cd.", "cd ."),
];

/// Topic hints keyed by a full expected answer or by a bare command name.
///
/// Compound answers come first so a whole `&&` chain gets its own message.
const COMMAND_HINTS: &[(&str, &str)] = &[
    (
        "mkdir project && touch project/README.md && ls -la project && date",
        "Chain the four commands with &&: mkdir -> touch -> ls -> date",
    ),
    (
        "mkdir project && touch project/README.md && ls -l project && date",
        "Chain the four commands with &&: mkdir -> touch -> ls -> date",
    ),
    ("pwd", "Think of the command that prints the current directory."),
    ("ls", "Think of the command that lists files."),
    ("touch", "Think of the command that creates a new file."),
    ("cat", "Think of the command that prints a file's contents."),
    ("mkdir", "Think of the command that creates a new directory."),
    ("rmdir", "Think of the command that removes a directory."),
    ("rm", "Think of the command that deletes files."),
    ("cp", "Think of the command that copies files."),
    ("mv", "Think of the command that moves or renames files."),
    ("date", "Think of the command that shows the current date and time."),
    ("whoami", "Think of the command that prints the current user name."),
    ("which", "Think of the command that locates a command."),
    ("grep", "Think of the command that searches text."),
    ("find", "Think of the command that searches for files."),
    ("head", "Think of the command that shows the beginning of a file."),
    ("tail", "Think of the command that shows the end of a file."),
    ("wc", "Think of the command that counts lines and characters."),
    ("sort", "Think of the command that sorts lines."),
    ("uniq", "Think of the command that removes duplicate lines."),
    ("chmod", "Think of the command that changes file permissions."),
    ("chown", "Think of the command that changes a file's owner."),
    ("sudo", "Think of the command that runs a command as administrator."),
    ("apt", "Think of the package manager command."),
    ("yum", "Think of the package manager command."),
    ("npm", "Think of the Node.js package manager command."),
    ("git", "Think of the version control command."),
    ("ssh", "Think of the command that opens a remote connection."),
    ("scp", "Think of the command that copies files securely."),
    ("tar", "Think of the command that works with archives."),
    ("ps", "Think of the command that lists processes."),
    ("top", "Think of the command that shows live system activity."),
    ("df", "Think of the command that shows disk usage."),
    ("du", "Think of the command that shows directory sizes."),
    ("free", "Think of the command that shows memory usage."),
    ("history", "Think of the command that shows your command history."),
    ("man", "Think of the command that opens a command's manual."),
];

/// Correct Linux command for a known foreign command name.
pub fn common_mistake(command: &str) -> Option<&'static str> {
    COMMON_MISTAKES
        .iter()
        .find(|(wrong, _)| *wrong == command)
        .map(|(_, right)| *right)
}

/// Topic hint for an expected answer or command name.
pub fn command_hint(key: &str) -> Option<&'static str> {
    COMMAND_HINTS
        .iter()
        .find(|(command, _)| *command == key)
        .map(|(_, hint)| *hint)
}

pub fn wrong_ecosystem_hint(correction: &str) -> String {
    format!(
        "That is not a Linux command. Try the Linux command \"{}\" instead.",
        correction
    )
}

pub fn typo_hint(candidate: &str) -> String {
    format!("That might be a typo. Try \"{}\".", candidate)
}

pub fn right_command_hint(candidate: &str) -> String {
    format!(
        "The command name is right! Try it in the form \"{}\".",
        candidate
    )
}
