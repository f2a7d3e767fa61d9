//! Display formatting for CLI output

use crate::models::{Assignment, DashboardContents, Task};
use crate::util::format_time;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

/// Task row for table display
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Index")]
    index: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Item type")]
    item_type: String,
    #[tabled(rename = "Label type")]
    label_type: String,
    #[tabled(rename = "Handler")]
    handler: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        TaskRow {
            index: task.key_index(),
            items: task.items.len().to_string(),
            item_type: task.project_options.item_type.clone(),
            label_type: task.project_options.label_type.clone(),
            handler: task.project_options.handler_url().to_string(),
        }
    }
}

/// Display a list of tasks as a table
pub fn display_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        log::info!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(0..=1)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Display a project header followed by its task table
pub fn display_dashboard(contents: &DashboardContents) {
    let project = &contents.project;
    println!("Project:    {}", project.name);
    println!("Item type:  {}", project.options.item_type);
    println!("Label type: {}", project.options.label_type);
    println!("Task size:  {}", project.options.task_size);
    println!("Categories: {}", project.options.categories_or_default().len());
    println!("Attributes: {}", project.options.attributes_or_default().len());
    println!("Tasks:      {}", contents.tasks.len());

    if !project.options.vendor_id.is_empty() {
        println!("Vendor:     {}", project.options.vendor_id);
    }

    println!();
    display_task_list(&contents.tasks);
}

/// Display detailed task information
pub fn display_task_detail(task: &Task) {
    println!("Project:    {}", task.project_name);
    println!("Index:      {}", task.key_index());
    println!("Item type:  {}", task.project_options.item_type);
    println!("Label type: {}", task.project_options.label_type);
    println!("Items:      {}", task.items.len());

    for item in &task.items {
        println!("  [{}] {}", item.index, truncate(&item.url, 70));
    }
}

/// Display an assignment's resolved state
pub fn display_assignment(assignment: &Assignment) {
    println!("Project:  {}", assignment.task.project_name);
    println!("Task:     {}", assignment.task.key_index());
    println!("Worker:   {}", assignment.worker_id);
    println!("Started:  {}", format_time(assignment.start_time));

    if assignment.is_submitted() {
        println!("Submitted: {}", format_time(assignment.submit_time));
        println!("Labeled:   {} items", assignment.num_labeled_items);
        println!("Labels:    {}", assignment.labels.len());
        println!("Tracks:    {}", assignment.tracks.len());
        println!("Events:    {}", assignment.events.len());
        if !assignment.user_agent.is_empty() {
            println!("Agent:     {}", truncate(&assignment.user_agent, 60));
        }
    } else {
        println!("Submitted: never");
    }
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max - 3])
    }
}

/// Format for success messages
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}
