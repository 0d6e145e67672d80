//! create-monorepo - interactive generator for npm workspace monorepos

use anyhow::Result;
use clap::Parser;
use monorepo_core::CreateArgs;

#[derive(Parser, Debug)]
#[command(name = "create-monorepo")]
#[command(about = "Interactive generator for npm workspace monorepos")]
#[command(version)]
struct Args {
    /// Project directory to create (defaults to the current directory)
    directory: Option<String>,

    /// Project directory to create (same as the positional argument)
    #[arg(short, long)]
    project: Option<String>,

    /// Backend framework (laravel, django, fastify, none)
    #[arg(short, long)]
    backend: Option<String>,

    /// Frontend framework (vanilla, react, react-ts, vue, svelte, solid, qwik, preact, lit, none)
    #[arg(short, long)]
    frontend: Option<String>,

    /// Install linting and formatting tooling (ESLint + Prettier + lefthook)
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    tooling: Option<bool>,

    /// Accept the default answer for every prompt (non-interactive mode)
    #[arg(short, long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let create_args = CreateArgs {
        project: args.project.or(args.directory),
        backend: args.backend,
        frontend: args.frontend,
        tooling: args.tooling,
        yes: args.yes,
    };

    let result = monorepo_core::run(create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
