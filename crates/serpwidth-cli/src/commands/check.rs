//! Single-string mode

use anyhow::Result;

use serpwidth::WidthChecker;

use crate::cli::CheckArgs;

pub fn run(args: &CheckArgs, checker: &WidthChecker) -> Result<()> {
    let mut verdicts = Vec::new();
    if let Some(title) = &args.title {
        verdicts.push(checker.check_title(title)?);
    }
    if let Some(desc) = &args.desc {
        verdicts.push(checker.check_description(desc)?);
    }

    let bytes = super::exporter(args.json).export_verdicts(&verdicts)?;
    super::emit(&bytes, args.json)?;
    Ok(())
}
