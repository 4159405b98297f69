use std::io::Write;

use flexi_logger::{DeferredNow, Record, style};

/// `LEVEL [module] message`, level colored when the terminal supports it.
pub fn cli_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    let level = record.level();
    write!(
        w,
        "{} [{}] {}",
        style(level).paint(format!("{level:<5}")),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}
