use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use milestone_release::cli::{run_release_workflow, FetchSource, ReleaseWorkflowArgs};
use milestone_release::config::{self, Config};
use milestone_release::domain::RepositoryName;
use milestone_release::git::{AuthenticatedRemoteFetcher, AuthorIdentity, SystemGit, WorkingCopy};
use milestone_release::planner::{ReleaseOrdering, ReleasePlanner};
use milestone_release::publish::ConsolePublisher;
use milestone_release::ui;
use milestone_release::ReleaseError;

#[derive(Parser)]
#[command(
    name = "milestone-release",
    version,
    about = "Cut a release from a closed milestone"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More log output (-v, -vv)")]
    verbose: u8,

    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version, kind and target branch for a milestone title
    Plan {
        milestone: String,

        #[arg(long, help = "Working copy to look up existing branches in")]
        path: Option<PathBuf>,
    },

    /// Fetch all refs through an authenticated origin and set the author identity
    Fetch(FetchArgs),

    /// Fetch, plan and publish a release for a milestone
    Release {
        milestone: String,

        #[command(flatten)]
        fetch: FetchArgs,

        #[arg(long, help = "File holding the release notes body")]
        changelog_file: Option<PathBuf>,

        #[arg(long, help = "Plan and fetch without publishing")]
        dry_run: bool,

        #[arg(short, long, help = "Skip confirmation prompts")]
        force: bool,
    },
}

#[derive(Args)]
struct FetchArgs {
    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/name")]
    repository: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Token for the clone URI")]
    token: Option<String>,

    #[arg(long, help = "Fetch from this URI or path instead of the token URI")]
    source: Option<String>,

    #[arg(long, default_value = ".", help = "Working copy to fetch into")]
    path: PathBuf,

    #[arg(long, env = "GIT_AUTHOR_NAME")]
    author_name: Option<String>,

    #[arg(long, env = "GIT_AUTHOR_EMAIL")]
    author_email: Option<String>,
}

impl FetchArgs {
    fn author(&self, config: &Config) -> Result<AuthorIdentity> {
        let name = self
            .author_name
            .clone()
            .or_else(|| config.author.name.clone())
            .ok_or_else(|| anyhow!("no author name: pass --author-name or set GIT_AUTHOR_NAME"))?;
        let email = self
            .author_email
            .clone()
            .or_else(|| config.author.email.clone())
            .ok_or_else(|| anyhow!("no author email: pass --author-email or set GIT_AUTHOR_EMAIL"))?;
        Ok(AuthorIdentity::new(name, email))
    }

    fn source(&self) -> Result<FetchSource> {
        match (&self.source, &self.token) {
            (Some(source), _) => Ok(FetchSource::Raw(source.clone())),
            (None, Some(token)) => Ok(FetchSource::Token(token.clone())),
            (None, None) => Err(anyhow!("no token: pass --token or set GITHUB_TOKEN")),
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        if e
            .downcast_ref::<ReleaseError>()
            .is_some_and(ReleaseError::is_input_error)
        {
            ui::display_status("Nothing was changed in the working copy");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan { milestone, path } => {
            let planner = ReleasePlanner::new();
            match path {
                Some(path) => {
                    let working_copy = WorkingCopy::open(path)?;
                    let plan = planner.plan(&milestone, &working_copy)?;
                    ui::display_plan(&plan);
                    let tags = working_copy.tags()?;
                    if let Some(ordering) =
                        ReleaseOrdering::against_tags(&plan.version, tags.as_slice())?
                    {
                        ui::display_ordering(&plan.version, &ordering);
                    }
                }
                None => ui::display_plan(&planner.plan(&milestone, &[] as &[&str])?),
            }
        }
        Commands::Fetch(args) => {
            let repository = RepositoryName::from_full_name(&args.repository)?;
            if let Some(expected_owner) = &config.repository.expected_owner {
                repository.assert_matches_owner(expected_owner)?;
            }
            let uri = args.source()?.into_uri(&repository);

            ui::display_status(&format!("Fetching {} into {}", repository, args.path.display()));
            let outcome = AuthenticatedRemoteFetcher::new(
                SystemGit::with_program(config.git.program.clone()),
                args.author(&config)?,
            )
            .with_fetch_timeout(config.fetch.timeout())
            .fetch(uri, &args.path)?;
            ui::display_fetch_outcome(&outcome);
        }
        Commands::Release {
            milestone,
            fetch,
            changelog_file,
            dry_run,
            force,
        } => {
            if !force
                && !dry_run
                && !ui::confirm_action(&format!("Release {} of {}?", milestone, fetch.repository))?
            {
                println!("Release cancelled by user.");
                return Ok(());
            }

            let changelog = match changelog_file {
                Some(path) => fs::read_to_string(&path)
                    .map_err(|e| anyhow!("cannot read {}: {}", path.display(), e))?,
                None => String::new(),
            };

            let args = ReleaseWorkflowArgs {
                milestone,
                repository: fetch.repository.clone(),
                source: fetch.source()?,
                destination: fetch.path.clone(),
                author: fetch.author(&config)?,
                changelog,
                dry_run,
            };

            let result = run_release_workflow(args, &config, &ConsolePublisher)?;
            ui::display_fetch_outcome(&result.fetch);
            ui::display_plan(&result.plan);
            if let Some(ordering) = &result.ordering {
                ui::display_ordering(&result.plan.version, ordering);
            }
            if result.published {
                ui::display_success(&format!("Published {}", result.plan.tag_name()));
            } else {
                ui::display_status("Dry run: nothing published");
            }
        }
    }

    Ok(())
}
