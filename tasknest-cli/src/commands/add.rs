/// `tasknest add`: create a task
///
/// Validates the inputs before touching the database, so a bad title never
/// opens (or creates) the store.

use crate::error::CliError;
use crate::store::TaskStore;
use crate::validate;

pub async fn run(user: &str, title: &str) -> Result<(), CliError> {
    validate::validate_user_id(user)?;
    validate::validate_title(title)?;

    let store = TaskStore::open_default().await?;
    let task = store.create_task(user, title).await?;

    println!("✓ Task {} created: {}", task.id, task.title);
    Ok(())
}
