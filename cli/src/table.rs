use taskline_core::{Task, TaskDto};
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify};
use tabled::settings::object::Rows;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Type")]
    kind: char,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "When")]
    when: String,
}

pub fn show_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks added yet!");
        return;
    }
    println!("{}", render_table(tasks));
}

fn render_table(tasks: &[Task]) -> String {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let dto = TaskDto::from_entity(i + 1, task);
            TaskRow {
                number: dto.number,
                kind: task.type_tag(),
                done: if dto.done { "X" } else { "" },
                description: dto.description,
                when: dto.when,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_contains_rows() {
        let mut done = Task::todo("read book");
        done.mark_done();
        let rendered = render_table(&[done, Task::todo("buy milk")]);
        assert!(rendered.contains("Description"));
        assert!(rendered.contains("read book"));
        assert!(rendered.contains("buy milk"));
    }
}
