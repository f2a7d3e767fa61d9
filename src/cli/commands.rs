//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Worker ID used when none is given on the command line
pub const DEFAULT_WORKER: &str = "default_worker";

/// Inspect labeling projects, tasks, and assignments in a store
#[derive(Parser, Debug)]
#[command(name = "labelstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML config file selecting the backend
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the filesystem backend rooted at this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use the DynamoDB backend
    #[arg(long, global = true)]
    pub remote: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a project and all of its tasks
    Dashboard {
        /// Project name
        project: String,
    },

    /// List the tasks in a project
    Tasks {
        /// Project name
        project: String,
    },

    /// Show one task
    Task {
        /// Project name
        project: String,

        /// Zero-padded task index (e.g. 0007)
        index: String,
    },

    /// Resolve a worker's current assignment state
    Assignment {
        /// Project name
        project: String,

        /// Zero-padded task index
        task_index: String,

        /// Worker ID
        #[arg(default_value = DEFAULT_WORKER)]
        worker: String,
    },

    /// Build a fresh assignment for a worker, optionally persisting it
    Assign {
        /// Project name
        project: String,

        /// Zero-padded task index
        task_index: String,

        /// Worker ID
        #[arg(default_value = DEFAULT_WORKER)]
        worker: String,

        /// Persist the new assignment to the backend
        #[arg(short, long)]
        save: bool,
    },

    /// Check whether a project name is still available
    CheckName {
        /// Proposed project name (spaces are normalized to underscores)
        name: String,
    },

    /// Delete a project
    DeleteProject {
        /// Project name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}
