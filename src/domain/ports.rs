use crate::utils::error::Result;

/// Where demo output lines go. Stdout in the CLI, a buffer in tests.
pub trait OutputSink {
    fn emit(&mut self, line: &str);
}

#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl OutputSink for BufferSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

pub trait DemoConfig {
    fn demos(&self) -> &[String];
    fn verbose(&self) -> bool;
    fn validate_selection(&self) -> Result<()>;
}
