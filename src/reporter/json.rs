use crate::report::ScanReport;
use anyhow::Result;

pub fn report(scan: &ScanReport) -> Result<()> {
    println!("{}", format(scan)?);
    Ok(())
}

/// Format the full report as a JSON string without printing.
pub fn format(scan: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(scan)?)
}
