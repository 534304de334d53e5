// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand, ValueEnum};
use osdetector::commands::Overrides;
use osdetector::commands::classifier::ClassifierCommand;
use osdetector::commands::detect::{DetectCommand, OutputFormat};
use osdetector::commands::release::ReleaseCommand;
use osdetector::config::new_osdetector_config;
use osdetector::error::{
    OsDetectorError, Result, format_error_chain, format_error_with_color, get_exit_code,
};
use osdetector::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "osdetector")]
#[command(author, version, about = "Operating system and architecture detector", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override a raw property (e.g., -D os.arch=aarch64)
    #[arg(short = 'D', value_name = "KEY=VALUE", global = true)]
    define: Vec<String>,

    /// Distribution family that may be appended to the classifier (repeatable, in order of preference)
    #[arg(long = "like", value_name = "TOKEN", global = true)]
    likes: Vec<String>,

    /// Alternate system root for release files
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Report unknown platforms as "unknown" instead of failing
    #[arg(long, global = true)]
    no_fail_on_unknown: bool,

    /// Snapshot properties and cache release files
    #[arg(long, global = true)]
    cached: bool,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Applies the choice to stdout and tells whether stderr gets color.
    fn apply(self) -> bool {
        match self {
            ColorChoice::Always => {
                colored::control::set_override(true);
                true
            }
            ColorChoice::Never => {
                colored::control::set_override(false);
                false
            }
            ColorChoice::Auto => {
                std::io::stderr().is_terminal()
                    && colored::control::SHOULD_COLORIZE.should_colorize()
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected platform
    Detect {
        /// Output in JSON format
        #[arg(long, conflicts_with = "properties")]
        json: bool,

        /// Output the published os.detected.* properties
        #[arg(long)]
        properties: bool,
    },

    /// Print the platform classifier
    #[command(visible_alias = "c")]
    Classifier,

    /// Show the Linux release
    Release {
        /// Exit with status 1 unless the release is like TOKEN
        #[arg(long, value_name = "TOKEN")]
        is_like: Option<String>,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            defines: self.define.clone(),
            likes: self.likes.clone(),
            root: self.root.clone(),
            no_fail_on_unknown: self.no_fail_on_unknown,
            cached: self.cached,
        }
    }
}

fn exit_with_error(e: &OsDetectorError, use_color: bool) -> ! {
    if use_color {
        eprint!("{}", format_error_with_color(e, true));
    } else {
        eprintln!("{}", format_error_chain(e));
    }
    std::process::exit(get_exit_code(e));
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);
    let use_color = cli.color.apply();

    // Load configuration once at startup; command line flags win
    let mut config = match new_osdetector_config() {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, use_color),
    };
    if let Err(e) = cli.overrides().apply(&mut config) {
        exit_with_error(&e, use_color);
    }

    let result: Result<bool> = (|| match cli.command {
        Commands::Detect { json, properties } => {
            let format = if json {
                OutputFormat::Json
            } else if properties {
                OutputFormat::Properties
            } else {
                OutputFormat::Summary
            };
            DetectCommand::new(&config)?.execute(format)?;
            Ok(true)
        }
        Commands::Classifier => {
            ClassifierCommand::new(&config)?.execute()?;
            Ok(true)
        }
        Commands::Release { is_like } => {
            ReleaseCommand::new(&config)?.execute(is_like.as_deref())
        }
    })();

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => exit_with_error(&e, use_color),
    }
}
