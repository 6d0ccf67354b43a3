use std::path::PathBuf;

use artimigrate_core::config::{
    Environment,
    DEFAULT_CONFIG_FILE,
};
use artimigrate_core::RunOptions;
use clap::{
    Parser,
    ValueEnum,
};

#[derive(Parser, Debug)]
#[command(
    name = "artimigrate",
    version,
    about = "Migrate generic artifacts from JFrog Artifactory to BKRepo"
)]
pub struct Cli {
    #[arg(
        short = 'o',
        long = "overwrite",
        help = "Upload every node, even those already present at the destination"
    )]
    pub overwrite: bool,

    #[arg(short = 'p', long = "project", help = "Project to migrate")]
    pub project: String,

    #[arg(
        short = 'e',
        long = "environment",
        value_enum,
        default_value_t = EnvironmentArg::Prod,
        help = "Endpoints to use from the config file"
    )]
    pub environment: EnvironmentArg,

    #[arg(
        short = 'f',
        long = "file",
        value_name = "ALLOW_LIST",
        help = "Restrict the run to the node names and paths listed in this file"
    )]
    pub file: Option<PathBuf>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "CONFIG_FILE",
        default_value = DEFAULT_CONFIG_FILE,
        env = "ARTIMIGRATE_CONFIG",
        help = "Endpoint and credential configuration"
    )]
    pub config: PathBuf,

    #[arg(
        long = "log-dir",
        value_name = "DIRECTORY",
        default_value = "logs",
        help = "Directory receiving <project>.log"
    )]
    pub log_dir: PathBuf,

    #[arg(
        short = 'j',
        long = "jobs",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of nodes migrated at the same time"
    )]
    pub jobs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    Dev,
    Prod,
}

impl From<EnvironmentArg> for Environment {
    fn from(value: EnvironmentArg) -> Self {
        match value {
            EnvironmentArg::Dev => Environment::Dev,
            EnvironmentArg::Prod => Environment::Prod,
        }
    }
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            project: self.project.clone(),
            environment: self.environment.into(),
            overwrite: self.overwrite,
            jobs: usize::try_from(self.jobs).unwrap_or(usize::MAX),
        }
    }
}
