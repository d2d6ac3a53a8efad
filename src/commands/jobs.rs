//! Jobs command - Search and inspect job posts.
//!
//! ## Usage
//!
//! ```bash
//! job-board jobs list --q golang --location 2 --skills 1,4
//! job-board jobs show 7
//! ```

use crate::cli::args::{JobSearchArgs, JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::search::JobPostFilter;
use crate::services::ServiceContainer;

use super::{print_json, services};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config, in_memory: bool) -> AppResult<()> {
    let services = services(&config, in_memory).await?;

    match args.action {
        JobsAction::List(search) => {
            let filter = JobPostFilter::from(search);
            let posts = services.job_posts().find_all(&filter).await?;
            tracing::info!(count = posts.len(), "Job posts listed");
            print_json(&posts)
        }
        JobsAction::Show { id } => {
            let post = services.job_posts().by_id(id).await?;
            print_json(&post)
        }
    }
}

impl From<JobSearchArgs> for JobPostFilter {
    fn from(args: JobSearchArgs) -> Self {
        JobPostFilter {
            title: args.q,
            user_id: args.user,
            location_id: args.location,
            category_id: args.category,
            skill_ids: args.skills,
            ..Default::default()
        }
    }
}
