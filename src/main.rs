use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "twig keeps snapshots of a working directory as content-addressed commits, \
    with branches, three-way merges and remotes on the same file system.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files as a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working changes")]
    Status,
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch, checkout -- <file> restores a file \
        from the current commit, checkout <commit> -- <file> restores it from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch, or a commit when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register a remote repository")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "Path to the remote's .twig directory")]
        location: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote repository")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Send the current history to a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a remote branch into <remote>/<branch>")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_PAGER").is_none()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    colored::control::set_override(std::io::stdout().is_terminal());

    let pager = cli.command.is_paged().then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let root = match &cli.command {
        Commands::Init { path: Some(path) } => path.clone(),
        _ => std::env::current_dir()?.to_string_lossy().to_string(),
    };
    let mut repository = Repository::new(&root, writer)?;

    let outcome = run(&mut repository, &cli.command).await;
    let shadow = repository.record_shadow();
    outcome?;
    shadow?;

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}

async fn run(repository: &mut Repository, command: &Commands) -> Result<()> {
    if !matches!(command, Commands::Init { .. }) {
        repository.ensure_initialized()?;
    }

    match command {
        Commands::Init { .. } => repository.init().await?,
        Commands::Add { file } => repository.add(file).await?,
        Commands::Commit { message } => {
            repository.commit(message).await?;
        }
        Commands::Rm { file } => {
            repository.rm(file).await?;
        }
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => {
            repository.find(message)?;
        }
        Commands::Status => {
            repository.status().await?;
        }
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(branch).await?,
            (None, Some(file)) => repository.checkout_file(file).await?,
            (Some(commit), Some(file)) => repository.checkout_commit_file(commit, file).await?,
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Reset { commit } => repository.reset(commit).await?,
        Commands::Merge { branch } => {
            repository.merge(branch).await?;
        }
        Commands::AddRemote { name, location } => repository.add_remote(name, location)?,
        Commands::RmRemote { name } => repository.rm_remote(name)?,
        Commands::Push { remote, branch } => repository.push(remote, branch).await?,
        Commands::Fetch { remote, branch } => {
            repository.fetch(remote, branch).await?;
        }
        Commands::Pull { remote, branch } => {
            repository.pull(remote, branch).await?;
        }
    }

    Ok(())
}
