//! Command-line front end

pub mod context;
pub mod style;
pub mod sync;

use anstream::println;
use async_trait::async_trait;
use branch_sync::sync::ProgressCallback;
use branch_sync::types::{BranchOutcome, BranchReport};
use style::{Stylize, check};

/// Progress callback printing line-oriented status to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_branch_start(&self, branch: &str) {
        println!("Processing branch: {}", branch.accent());
    }

    async fn on_branch_done(&self, report: &BranchReport) {
        match &report.outcome {
            BranchOutcome::Pushed => println!("{} {report}", check()),
            BranchOutcome::Conflict(details) => {
                println!("{} {}", "⚠".warn(), report.to_string().warn());
                for line in details.lines().filter(|l| l.starts_with("CONFLICT")) {
                    println!("    {}", line.muted());
                }
            }
            BranchOutcome::PushFailed(_) | BranchOutcome::CheckoutFailed(_) => {
                println!("{} {}", "⚠".warn(), report.to_string().warn());
            }
        }
    }

    async fn on_warning(&self, message: &str) {
        println!("{} {}", "warning:".warn(), message);
    }

    async fn on_message(&self, message: &str) {
        println!("{}", message.emphasis());
    }
}
