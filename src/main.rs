use std::path::PathBuf;

use anyhow::Result;
use clap::{command, Arg, ArgAction};
use symhide::{Options, Stripper, DEFAULT_KEEP_PREFIX};

fn main() -> Result<()> {
    let matches = command!()
        .max_term_width(100)
        .args(&[
            Arg::new("archive")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The static archive to rewrite in place"),
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .value_name("string")
                .value_parser(clap::value_parser!(String))
                .default_value(DEFAULT_KEEP_PREFIX)
                .help("Keep symbols that start with this prefix"),
            Arg::new("silent")
                .long("silent")
                .action(ArgAction::SetTrue)
                .help("Do not report progress"),
            Arg::new("nm")
                .long("nm")
                .value_name("path")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The nm binary used to list defined symbols"),
            Arg::new("objcopy")
                .long("objcopy")
                .value_name("path")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The objcopy binary used to rename symbols"),
        ])
        .get_matches();

    if !matches.get_flag("silent") {
        env_logger::builder()
            .format_level(false)
            .format_target(false)
            .target(env_logger::Target::Stdout)
            .filter_module("symhide", log::LevelFilter::Info)
            .init();
    }

    let archive = matches.get_one::<PathBuf>("archive").unwrap();
    let nm = matches.get_one::<PathBuf>("nm").unwrap();
    let objcopy = matches.get_one::<PathBuf>("objcopy").unwrap();

    let mut options = Options::new(archive, nm, objcopy);
    options.keep_prefix = matches.get_one::<String>("prefix").unwrap().clone();

    Stripper::open(options)?.run()?;
    Ok(())
}
