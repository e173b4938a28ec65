//! `serpack validate` command

use anyhow::{bail, Result};

use crate::cli::{OptionArgs, ValidateArgs};
use crate::commands::gather_input;
use serpack::resolver::compat;
use serpack::util::diagnostic;

pub fn execute(args: ValidateArgs) -> Result<()> {
    let no_options = OptionArgs { options: vec![] };
    let (profile, _) = gather_input(&args.profile, &no_options)?;

    match compat::validate(&profile) {
        Ok(()) => {
            println!("profile {} is supported", profile);
            Ok(())
        }
        Err(err) => {
            diagnostic::emit(&err.to_diagnostic(), false);
            bail!("profile {} is not supported", profile);
        }
    }
}
