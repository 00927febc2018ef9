use simple_logger::SimpleLogger;

use self::args::{Args, Command};

mod args;
mod batch;

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    match args.command {
        Command::Check(check) => {
            SimpleLogger::new().with_level(check.log.to_level_filter()).init()?;
            batch::run(&check.path, check.format)
        }
    }
}
