use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use heroicons_gen::{IconSetUpdater, default_categories};
use heroicons_gen_github::GitHubReleaseProvider;

/// Marker proving the root points at a Blazor.Heroicons checkout, so a
/// stray invocation cannot wipe directories elsewhere.
const ROOT_MARKER: &str = "Blazor.Heroicons.sln";

#[derive(Parser)]
#[command(name = "heroicons-gen")]
#[command(about = "Sync the latest Heroicons release into the Blazor.Heroicons component library")]
struct Cli {
    /// Repository root to generate into (defaults to the current directory)
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn github_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    anyhow::ensure!(
        cli.root.join(ROOT_MARKER).exists(),
        "{ROOT_MARKER} not found in {}. Run from the repo root or pass --root.",
        cli.root.display(),
    );

    let provider = GitHubReleaseProvider::new(github_token(), None);
    let updater = IconSetUpdater::new(&cli.root, default_categories());

    println!("Getting latest release info...");
    let report = updater.run(&provider).await?;

    for item in &report.feedback {
        if item.is_warning() {
            eprintln!("{item}");
        } else {
            println!("{item}");
        }
    }
    println!("Done! Synced {} ({} components).", report.tag, report.components);

    Ok(())
}
