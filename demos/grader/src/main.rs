//! Command-line front end for the grader.
//!
//! `summary`, `compare`, and `grade` each load the instructor and student
//! projects, print a short status to stdout, and write their report to a
//! file. Log filtering comes from `RUST_LOG`.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use code_grader::chunker::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use code_grader::{Chunker, Grader, write_report};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "code-grader")]
#[command(about = "Grade a student todo-app project against an instructor reference")]
struct Cli {
    #[command(flatten)]
    projects: Projects,

    /// Maximum chunk length in characters
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, global = true)]
    chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP, global = true)]
    chunk_overlap: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Projects {
    /// Instructor reference project
    #[arg(long, value_name = "DIR", default_value = "./instructor_code", global = true)]
    instructor: PathBuf,

    /// Student project to grade
    #[arg(long, value_name = "DIR", default_value = "./student_code", global = true)]
    student: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count files and chunks in both projects
    Summary {
        /// Report destination
        #[arg(short, long, default_value = "chunk_summary.txt")]
        output: PathBuf,
    },

    /// Show the closest instructor chunks for the first student chunks
    Compare {
        /// Report destination
        #[arg(short, long, default_value = "similarity_results.txt")]
        output: PathBuf,

        /// Student chunks to preview
        #[arg(long, default_value_t = 5)]
        limit: usize,

        /// Instructor chunks per student chunk
        #[arg(long, default_value_t = 2)]
        matches: usize,
    },

    /// Score every student chunk against the rubric
    Grade {
        /// Report destination
        #[arg(short, long, default_value = "student_feedback.txt")]
        output: PathBuf,

        /// Write the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "code_grader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let chunker = Chunker::new(cli.chunk_size, cli.chunk_overlap)?;

    let grader = Grader::load_with(&cli.projects.instructor, &cli.projects.student, chunker)
        .context("failed to load projects")?;
    let summary = grader.summary();
    println!("Loaded {} instructor files.", summary.instructor_files);
    println!("Loaded {} student files.", summary.student_files);

    match cli.command {
        Command::Summary { output } => {
            write_report(&output, &summary)?;
            println!("Summary saved to {}", output.display());
        },
        Command::Compare {
            output,
            limit,
            matches,
        } => {
            write_report(&output, &grader.compare(limit, matches))?;
            println!("Similarity results saved to {}", output.display());
        },
        Command::Grade { output, json } => {
            let report = grader.grade();
            if json {
                let text = serde_json::to_string_pretty(&report)?;
                write_report(&output, &text)?;
            } else {
                write_report(&output, &report)?;
            }
            match report.final_score {
                Some(score) => println!("Final project score: {score}/{}", code_grader::rubric::MAX_SCORE),
                None => println!("No student code to grade"),
            }
            println!("Feedback saved to {}", output.display());
        },
    }

    Ok(())
}
