use regex::Regex;
use std::sync::OnceLock;

/// Summary statistics for a generated test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReport {
    pub line_count: usize,
    pub test_count: usize,
    pub allure_count: usize,
}

fn test_fn_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*def\s+test_\w+").expect("valid regex"))
}

fn allure_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@allure\.\w+").expect("valid regex"))
}

/// Analyzes generated pytest code.
///
/// Counts are best-effort: the generated code is plain text as far as this
/// tool is concerned and is never executed here.
pub fn analyze(code: &str) -> CodeReport {
    CodeReport {
        line_count: code.lines().count(),
        test_count: test_fn_regex().find_iter(code).count(),
        allure_count: allure_regex().find_iter(code).count(),
    }
}

impl CodeReport {
    pub fn print(&self) {
        println!("{}", "=".repeat(60));
        println!("Generation report:");
        println!("  Lines:             {}", self.line_count);
        println!("  Test functions:    {}", self.test_count);
        println!("  Allure decorators: {}", self.allure_count);
        println!("{}", "=".repeat(60));
    }
}
