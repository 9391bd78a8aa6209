// SPDX-License-Identifier: MPL-2.0
use iced_toasts::app::{self, Flags};

const HELP: &str = "\
IcedToasts - toast notifications over an in-memory event bus

USAGE:
  iced_toasts [OPTIONS]

OPTIONS:
  --config-dir <DIR>   Read settings.toml from DIR
  --value <TEXT>       Starting text for the shared value
  -h, --help           Print this help

ENVIRONMENT:
  ICED_TOASTS_CONFIG_DIR   Config directory (overridden by --config-dir)
  RUST_LOG                 Log filter (default: info)
";

fn parse_args() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        initial_value: args.opt_value_from_str("--value")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {remaining:?}"),
        });
    }

    Ok(flags)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = match parse_args() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    log::info!("starting IcedToasts");
    app::run(flags)
}
