//! labelstore CLI - inspect dual-backend labeling storage

use anyhow::Result;
use clap::Parser;
use labelstore::cli::display::{
    display_assignment, display_dashboard, display_task_detail, display_task_list, error, success,
};
use labelstore::cli::{Cli, Commands};
use labelstore::{Config, LabelStore, StoreError};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = &result {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

/// Pick the backend configuration from flags, config file, or environment
fn resolve_config(cli: &Cli) -> Result<Config> {
    if cli.remote {
        let prefix = std::env::var("LABELSTORE_TABLE_PREFIX").unwrap_or_default();
        return Ok(Config::remote(prefix));
    }
    if let Some(data_dir) = &cli.data_dir {
        return Ok(Config::local(data_dir));
    }
    if let Some(path) = &cli.config {
        return Ok(Config::load(path)?);
    }
    Ok(Config::from_env())
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let store = LabelStore::open(&config).await;

    match cli.command {
        Commands::Dashboard { project } => {
            let contents = store.get_dashboard_contents(&project).await?;
            display_dashboard(&contents);
        }

        Commands::Tasks { project } => {
            let tasks = store.list_tasks(&project).await?;
            display_task_list(&tasks);
        }

        Commands::Task { project, index } => {
            let task = store.get_task(&project, &index).await?;
            display_task_detail(&task);
        }

        Commands::Assignment {
            project,
            task_index,
            worker,
        } => {
            let assignment = store.get_assignment(&project, &task_index, &worker).await?;
            display_assignment(&assignment);
        }

        Commands::Assign {
            project,
            task_index,
            worker,
            save,
        } => {
            let assignment = store.create_assignment(&project, &task_index, &worker).await?;

            if save {
                store.put_assignment(&assignment).await?;
                success(&format!(
                    "Saved assignment {}/{}/{}",
                    project, task_index, worker
                ));
            }

            display_assignment(&assignment);
        }

        Commands::CheckName { name } => match store.check_project_name(&name).await {
            Ok(available) => success(&format!("Available: {}", available)),
            Err(StoreError::DuplicateName(taken)) => {
                log::warn!("Project name \"{}\" already exists.", taken);
            }
            Err(e) => return Err(e.into()),
        },

        Commands::DeleteProject { name, force } => {
            if !force {
                print!("Delete project '{}'? [y/N] ", name);
                io::stdout().flush()?;

                let mut input = String::new();
                io::stdin().read_line(&mut input)?;

                if !input.trim().eq_ignore_ascii_case("y") {
                    log::info!("Cancelled.");
                    return Ok(());
                }
            }

            store.delete_project(&name).await?;
            success(&format!("Deleted project {}", name));
        }
    }

    Ok(())
}
