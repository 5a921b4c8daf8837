use clap::{Parser, Subcommand};
use simple_blog::generate::{self, BuildError};
use simple_blog::types::BuildMode;
use simple_blog::{config, output};
use std::path::{Path, PathBuf};

/// Shared flags for commands that compute routes.
#[derive(clap::Args, Clone)]
struct ModeArgs {
    /// Publish draft articles too (preview build)
    #[arg(long)]
    drafts: bool,
}

impl ModeArgs {
    fn mode(&self) -> BuildMode {
        BuildMode::from_drafts_flag(self.drafts)
    }
}

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Static builder for a markdown product blog")]
#[command(long_about = "\
Static builder for a markdown product blog

Every markdown file under the blog directory becomes one page at
/blog/{slug}. Front-matter supplies the metadata:

  ---
  title: Hello              # required
  date: 2025-06-04          # required
  author: Jane              # required
  tags: [release]           # optional
  draft: false              # optional, drafts publish only with --drafts
  thumbnail: /img/hello.png # optional
  slug: hello               # optional, defaults to the file name
  ---

Content structure:

  content/
  ├── config.toml          # Site config (optional)
  └── blog/
      ├── hello.md         # → /blog/hello
      └── intro/index.md   # → /blog/intro

Articles with missing or invalid metadata are skipped and listed.
Two articles with the same slug stop the build.

Run 'simple-blog gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every article and write the site
    Build(ModeArgs),
    /// Validate content and routes without writing anything
    Check(ModeArgs),
    /// Print the route table
    Routes {
        #[command(flatten)]
        mode: ModeArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(mode) => {
            println!("==> Building {}", cli.source.display());
            configure_workers(&cli.source)?;
            let report = match generate::build(&cli.source, &cli.output, mode.mode()) {
                Ok(report) => report,
                Err(BuildError::Render(errors)) => {
                    output::print_render_errors(&errors);
                    return Err(BuildError::Render(errors).into());
                }
                Err(e) => return Err(e.into()),
            };
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check(mode) => {
            println!("==> Checking {}", cli.source.display());
            configure_workers(&cli.source)?;
            let plan = generate::plan(&cli.source, mode.mode())?;
            output::print_check_output(&plan);
            println!("==> Content is valid");
        }
        Command::Routes { mode, json } => {
            configure_workers(&cli.source)?;
            let plan = generate::plan(&cli.source, mode.mode())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan.routes)?);
            } else {
                output::print_check_output(&plan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Size the worker pool from the content root's config.
///
/// Must run before the pipeline touches rayon, or the global pool is
/// already built with the default size.
fn configure_workers(source: &Path) -> Result<(), config::ConfigError> {
    let config = config::load_config(source)?;
    init_thread_pool(&config.processing);
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: the config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
