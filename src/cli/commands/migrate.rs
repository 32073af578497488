use anyhow::Result;

use super::super::args::MigrateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{LogSymbols, ReportOptions, print_outcome};
use crate::core::{DryRunFs, MigrateContext, OsFs, migrate_project};

/// Run the migration. Fatal project problems are reported, not returned as
/// errors, so the run still exits successfully.
pub fn migrate(cmd: MigrateCommand) -> Result<ExitStatus> {
    let MigrateCommand { args } = cmd;
    let ctx = MigrateContext::new(&args)?;

    let outcome = if args.dry_run {
        migrate_project(&ctx, &DryRunFs::new())?
    } else {
        migrate_project(&ctx, &OsFs)?
    };

    print_outcome(
        &outcome,
        &ReportOptions {
            ctx: &ctx,
            dry_run: args.dry_run,
            symbols: LogSymbols::detect(),
        },
    );

    Ok(ExitStatus::Success)
}
