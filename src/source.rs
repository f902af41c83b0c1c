//! Question data providers
//!
//! The session consumes raw JSON text; where it comes from (file, HTTP,
//! embedded string) is up to the host.

use std::path::PathBuf;

use crate::error::DataLoadError;

/// Something that can hand over the question document once
pub trait QuestionSource {
    fn fetch(&mut self) -> Result<String, DataLoadError>;
}

/// Reads questions from a JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for FileSource {
    fn fetch(&mut self) -> Result<String, DataLoadError> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| DataLoadError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}

/// Questions already in memory (embedded data, tests)
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

impl QuestionSource for StaticSource {
    fn fetch(&mut self) -> Result<String, DataLoadError> {
        Ok(self.0.clone())
    }
}

/// Source that always fails with the given reason
#[derive(Debug, Clone)]
pub struct FailingSource(pub String);

impl QuestionSource for FailingSource {
    fn fetch(&mut self) -> Result<String, DataLoadError> {
        Err(DataLoadError::Unavailable(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_unavailable() {
        let mut source = FileSource::new("/definitely/not/here/questions.json");
        assert!(matches!(source.fetch(), Err(DataLoadError::Unavailable(_))));
    }

    #[test]
    fn test_static_source() {
        let mut source = StaticSource("[]".into());
        assert_eq!(source.fetch().unwrap(), "[]");
    }
}
