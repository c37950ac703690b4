//! Application entry points: argument parsing and dispatch.

use crate::args::{Cli, Command};
use crate::config::OracleConfig;
use crate::session::{run_ask, run_watch, StdinQuestionSource};
use anyhow::Result;
use clap::Parser;

/// The parsed and validated invocation, ready to run.
pub enum Application {
    Watch(OracleConfig),
    Ask(OracleConfig, Option<String>),
}

impl Application {
    /// Reads `.env`, parses the command line, and assembles the config.
    pub fn init() -> Result<Self> {
        dotenvy::dotenv().ok();
        let cli = Cli::parse();

        match cli.cmd {
            Command::Watch(args) => Ok(Application::Watch(OracleConfig::from_watch_args(args)?)),
            Command::Ask(args) => {
                let question = args.question.clone();
                Ok(Application::Ask(
                    OracleConfig::from_ask_args(args)?,
                    question,
                ))
            }
        }
    }

    pub async fn run(self) -> Result<()> {
        match self {
            Application::Watch(config) => {
                let translator = config.build_translator()?;
                let feed = config.build_feed()?;
                run_watch(&config, translator, feed, StdinQuestionSource).await
            }
            Application::Ask(config, question) => {
                let translator = config.build_translator()?;
                let feed = config.build_feed()?;
                run_ask(&config, question, translator, feed).await
            }
        }
    }
}
