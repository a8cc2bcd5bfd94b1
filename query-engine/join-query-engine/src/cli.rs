use crate::{
    EngineResult,
    error::EngineError,
    opt::{EngineOpt, Subcommand},
};
use join_query::{Application, Hook, HookContext};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// The hooks a command runs, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookChain {
    JoinQuery,
    GroupBy,
    /// Grouping first, so `$groupBy` never reaches the join hook.
    Find,
}

pub struct CliCommand {
    application: Application,
    chain: HookChain,
    input: Option<PathBuf>,
    pretty: bool,
}

impl CliCommand {
    /// Create a CLI command from an `EngineOpt` instance. Loads and validates the datamodel.
    pub fn from_opt(opts: &EngineOpt) -> EngineResult<CliCommand> {
        let path = opts.datamodel_path();
        let document = fs::read_to_string(path).map_err(|err| EngineError::io(path, err))?;
        let application = Application::from_json(&document)?;

        let chain = match opts.subcommand {
            Subcommand::JoinQuery(_) => HookChain::JoinQuery,
            Subcommand::GroupBy(_) => HookChain::GroupBy,
            Subcommand::Find(_) => HookChain::Find,
        };

        let input = opts.subcommand.input();

        Ok(CliCommand {
            application,
            chain,
            input: input.input.clone(),
            pretty: input.pretty,
        })
    }

    pub fn new(application: Application, chain: HookChain) -> Self {
        CliCommand {
            application,
            chain,
            input: None,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn execute(self) -> EngineResult<()> {
        let input = read_input(self.input.as_deref())?;
        let output = self.run(&input)?;

        println!("{output}");

        Ok(())
    }

    /// Runs the hook chain over a serialized hook context and serializes the result.
    pub fn run(&self, input: &str) -> EngineResult<String> {
        let mut ctx: HookContext = serde_json::from_str(input)?;

        self.apply(&mut ctx)?;
        info!(service = ctx.service.as_str(), "hooks applied");

        let serialized = if self.pretty {
            serde_json::to_string_pretty(&ctx)
        } else {
            serde_json::to_string(&ctx)
        };

        serialized.map_err(|err| EngineError::Serialization(err.to_string()))
    }

    fn apply(&self, ctx: &mut HookContext) -> join_query::Result<()> {
        match self.chain {
            HookChain::JoinQuery => self.application.join_query().run(ctx),
            HookChain::GroupBy => self.application.group_by().run(ctx),
            HookChain::Find => {
                self.application.group_by().run(ctx)?;
                self.application.join_query().run(ctx)
            }
        }
    }
}

fn read_input(path: Option<&Path>) -> EngineResult<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|err| EngineError::io(path, err)),
        None => {
            let mut buf = String::new();

            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|err| EngineError::io(Path::new("<stdin>"), err))?;

            Ok(buf)
        }
    }
}
