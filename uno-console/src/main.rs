use clap::Parser;

mod args;
mod command;
mod console;

use self::args::Args;
use self::console::Console;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color)
        .init();

    Console::new(&args).run(args.resume.as_deref())
}
