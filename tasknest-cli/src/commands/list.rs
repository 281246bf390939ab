/// `tasknest list`: print a user's tasks, oldest first

use crate::error::CliError;
use crate::store::TaskStore;
use crate::validate;

pub async fn run(user: &str) -> Result<(), CliError> {
    validate::validate_user_id(user)?;

    let store = TaskStore::open_default().await?;
    let tasks = store.tasks_for_user(user).await?;

    if tasks.is_empty() {
        println!("No tasks for {}", user);
        return Ok(());
    }

    for task in tasks {
        let marker = if task.completed { "x" } else { " " };
        println!("[{}] {} {}", marker, task.id, task.title);
    }

    Ok(())
}
