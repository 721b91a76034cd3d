use super::node::SourceUnit;
use std::path::Path;

/// Context passed to rules during analysis
pub struct AnalysisContext<'a> {
    pub file_path: &'a Path,
    pub unit: &'a SourceUnit,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(file_path: &'a Path, unit: &'a SourceUnit) -> Self {
        Self { file_path, unit }
    }
}
