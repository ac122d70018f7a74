/// Menu loop and display formatting
///
/// The loop reads numbered menu choices from standard input until the exit
/// choice or end of input. Operation failures print a one-line message and
/// the loop continues; nothing here panics on bad input.
///
/// Display is pure formatting: `format_task` and friends build strings, the
/// loop prints them.
use crate::model::Task;
use crate::service::TaskService;
use std::io::{BufRead, Write};

/// The menu shown before every prompt
pub const MENU: &str = "\n=== Taskdeck Console ===\n\
1. Add Task\n\
2. View Tasks\n\
3. Update Task\n\
4. Delete Task\n\
5. Mark Complete/Incomplete\n\
6. Exit\n\
========================";

/// Formats one task as a display line
///
/// ```
/// use taskdeck_console::cli::format_task;
/// use taskdeck_console::model::Task;
///
/// let task = Task::new(1, "Buy milk".to_string(), Some("2 liters".to_string()));
/// assert_eq!(format_task(&task), "[ ] 1. Buy milk - 2 liters");
/// ```
pub fn format_task(task: &Task) -> String {
    let marker = if task.completed { "x" } else { " " };
    match &task.description {
        Some(description) => format!("[{}] {}. {} - {}", marker, task.id, task.title, description),
        None => format!("[{}] {}. {}", marker, task.id, task.title),
    }
}

/// Formats the full task list, or a hint when it is empty
pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found. Create a task to get started!".to_string();
    }

    let mut out = String::from("Tasks:");
    for task in tasks {
        out.push('\n');
        out.push_str(&format_task(task));
    }
    out
}

/// Runs the menu loop until the exit choice or end of input
///
/// Reads from `input` and writes to `output`, so tests can drive the loop
/// with scripted lines. The binary passes locked stdin/stdout.
pub fn run_loop<R: BufRead, W: Write>(
    service: &mut TaskService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    loop {
        writeln!(output, "{}", MENU)?;

        let Some(choice) = prompt(input, output, "Select option (1-6): ")? else {
            break;
        };

        match choice.trim() {
            "1" => handle_add(service, input, output)?,
            "2" => writeln!(output, "\n{}", format_task_list(service.list_tasks()))?,
            "3" => handle_update(service, input, output)?,
            "4" => handle_delete(service, input, output)?,
            "5" => handle_toggle(service, input, output)?,
            "6" => break,
            other => writeln!(output, "Invalid option '{}'. Please select 1-6.", other)?,
        }
    }

    writeln!(output, "Goodbye!")?;
    Ok(())
}

/// Prints a prompt and reads one line
///
/// Returns `None` at end of input, which the loop treats as exit.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> std::io::Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn handle_add<R: BufRead, W: Write>(
    service: &mut TaskService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "\n--- Add Task ---")?;

    let Some(title) = prompt(input, output, "Enter task title: ")? else {
        return Ok(());
    };
    let Some(description) =
        prompt(input, output, "Enter task description (optional): ")?
    else {
        return Ok(());
    };

    match service.add_task(&title, &description) {
        Ok(task) => writeln!(output, "Task created with ID: {}", task.id),
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn handle_update<R: BufRead, W: Write>(
    service: &mut TaskService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "\n--- Update Task ---")?;

    let Some(id_input) = prompt(input, output, "Enter task ID: ")? else {
        return Ok(());
    };
    let id = match crate::validate::parse_task_id(&id_input) {
        Ok(id) => id,
        Err(e) => return writeln!(output, "Error: {}", e),
    };

    let Some(title) = prompt(input, output, "New title (blank to keep): ")? else {
        return Ok(());
    };
    let Some(description) = prompt(input, output, "New description (blank to keep): ")? else {
        return Ok(());
    };

    // Blank input means "leave this field alone"
    let title = (!title.trim().is_empty()).then_some(title.as_str());
    let description = (!description.trim().is_empty()).then_some(description.as_str());

    if title.is_none() && description.is_none() {
        return writeln!(output, "Nothing to update.");
    }

    match service.update_task(id, title, description) {
        Ok(task) => writeln!(output, "Updated: {}", format_task(&task)),
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn handle_delete<R: BufRead, W: Write>(
    service: &mut TaskService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "\n--- Delete Task ---")?;

    let Some(id_input) = prompt(input, output, "Enter task ID: ")? else {
        return Ok(());
    };
    let id = match crate::validate::parse_task_id(&id_input) {
        Ok(id) => id,
        Err(e) => return writeln!(output, "Error: {}", e),
    };

    let Some(confirm) = prompt(input, output, "Delete this task? (y/n): ")? else {
        return Ok(());
    };
    let confirm = confirm.trim();
    if !confirm.eq_ignore_ascii_case("y") && !confirm.eq_ignore_ascii_case("yes") {
        return writeln!(output, "Deletion cancelled.");
    }

    match service.delete_task(id) {
        Ok(task) => writeln!(output, "Deleted task {}: {}", task.id, task.title),
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn handle_toggle<R: BufRead, W: Write>(
    service: &mut TaskService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "\n--- Toggle Completion ---")?;

    let Some(id_input) = prompt(input, output, "Enter task ID: ")? else {
        return Ok(());
    };
    let id = match crate::validate::parse_task_id(&id_input) {
        Ok(id) => id,
        Err(e) => return writeln!(output, "Error: {}", e),
    };

    match service.toggle_completion(id) {
        Ok(task) => {
            let state = if task.completed { "complete" } else { "incomplete" };
            writeln!(output, "Task {} marked {}.", task.id, state)
        }
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(lines: &str) -> (TaskService, String) {
        let mut service = TaskService::new();
        let mut input = Cursor::new(lines.to_string());
        let mut output = Vec::new();

        run_loop(&mut service, &mut input, &mut output).unwrap();
        (service, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_format_task_markers() {
        let mut task = Task::new(3, "Walk dog".to_string(), None);
        assert_eq!(format_task(&task), "[ ] 3. Walk dog");

        task.completed = true;
        assert_eq!(format_task(&task), "[x] 3. Walk dog");
    }

    #[test]
    fn test_format_task_list_empty() {
        assert!(format_task_list(&[]).contains("No tasks found"));
    }

    #[test]
    fn test_add_then_view_then_exit() {
        let (service, output) = run_script("1\nBuy milk\n2 liters\n2\n6\n");

        assert_eq!(service.list_tasks().len(), 1);
        assert!(output.contains("Task created with ID: 1"));
        assert!(output.contains("[ ] 1. Buy milk - 2 liters"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_empty_title_prints_error_and_continues() {
        let (service, output) = run_script("1\n   \n\n6\n");

        assert!(service.list_tasks().is_empty());
        assert!(output.contains("Task title cannot be empty"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (service, output) = run_script("1\nkeep me\n\n4\n1\nn\n6\n");

        assert_eq!(service.list_tasks().len(), 1);
        assert!(output.contains("Deletion cancelled."));
    }

    #[test]
    fn test_delete_confirmed_then_ids_not_reused() {
        let (service, output) = run_script("1\nfirst\n\n4\n1\ny\n1\nsecond\n\n6\n");

        assert!(output.contains("Deleted task 1: first"));
        assert_eq!(service.list_tasks().len(), 1);
        assert_eq!(service.list_tasks()[0].id, 2);
    }

    #[test]
    fn test_delete_accepts_yes_word() {
        let (service, output) = run_script("1\nspelled out\n\n4\n1\nYes\n6\n");

        assert!(service.list_tasks().is_empty());
        assert!(output.contains("Deleted task 1: spelled out"));
    }

    #[test]
    fn test_invalid_menu_choice() {
        let (_, output) = run_script("9\n6\n");
        assert!(output.contains("Invalid option '9'"));
    }

    #[test]
    fn test_invalid_task_id_input() {
        let (_, output) = run_script("5\nabc\n6\n");
        assert!(output.contains("Task ID must be a positive number"));
    }

    #[test]
    fn test_toggle_marks_complete() {
        let (service, output) = run_script("1\nflip\n\n5\n1\n6\n");

        assert!(service.list_tasks()[0].completed);
        assert!(output.contains("Task 1 marked complete."));
    }

    #[test]
    fn test_update_selective_fields() {
        let (service, output) = run_script("1\nOriginal\nKeep me\n3\n1\nRenamed\n\n6\n");

        let task = &service.list_tasks()[0];
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.description.as_deref(), Some("Keep me"));
        assert!(output.contains("Updated: [ ] 1. Renamed - Keep me"));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let (_, output) = run_script("");
        assert!(output.contains("Goodbye!"));
    }
}
