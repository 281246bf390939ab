/// CLI subcommands
///
/// - `add`: create a task
/// - `list`: print a user's tasks

pub mod add;
pub mod list;
