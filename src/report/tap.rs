// src/report/tap.rs

//! TAP (Test Anything Protocol) output.

use std::io::{self, Write};

use super::{Assertion, Reporter};

/// Pass/fail counts after a reporter is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Writes `ok N - description` / `not ok N - description` lines.
///
/// The trailing `1..N` plan is written by [`TapReporter::finish`]. Write
/// errors are remembered and returned from `finish` because
/// [`Reporter::record`] has no error channel.
#[derive(Debug)]
pub struct TapReporter<W: Write> {
    out: W,
    summary: Summary,
    write_error: Option<io::Error>,
}

impl TapReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TapReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: Summary::default(),
            write_error: None,
        }
    }

    /// Write the plan line and hand back the sink and counts.
    pub fn finish(mut self) -> io::Result<(W, Summary)> {
        let plan = format!("1..{}", self.summary.total());
        self.write_line(&plan);
        if let Some(err) = self.write_error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok((self.out, self.summary))
    }

    /// Write `text` as comment lines, `# ` in front of each.
    fn write_comment(&mut self, text: &str) {
        for line in text.lines() {
            self.write_line(&format!("# {line}"));
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            self.write_error = Some(err);
        }
    }
}

impl<W: Write> Reporter for TapReporter<W> {
    fn record(&mut self, assertion: Assertion) {
        let number = self.summary.total() + 1;
        let verdict = if assertion.passed {
            self.summary.passed += 1;
            "ok"
        } else {
            self.summary.failed += 1;
            "not ok"
        };

        let description = escape_description(&assertion.description);
        let line = if description.is_empty() {
            format!("{verdict} {number}")
        } else {
            format!("{verdict} {number} - {description}")
        };
        self.write_line(&line);

        if !assertion.passed {
            self.write_line(&format!("#   Failed test '{description}'"));
            for diag in &assertion.diagnostics {
                self.write_comment(diag);
            }
        }
    }

    /// One `# ` line per input line.
    fn diag(&mut self, text: &str) {
        self.write_comment(text);
    }
}

/// `#` would start a TAP directive (`# TODO`, `# SKIP`) and a newline would
/// end the test line, so escape the first and turn the second into a
/// comment continuation.
fn escape_description(description: &str) -> String {
    description.replace('#', "\\#").replace('\n', "\n# ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_of(reporter: TapReporter<Vec<u8>>) -> (String, Summary) {
        let (buf, summary) = reporter.finish().expect("writing to Vec never fails");
        (String::from_utf8(buf).expect("TAP output is UTF-8"), summary)
    }

    #[test]
    fn numbers_assertions_and_writes_plan() {
        let mut tap = TapReporter::new(Vec::new());
        assert!(tap.report_boolean(true, "spawn true"));
        assert!(tap.report_equality(&0, &0, "exit status is 0"));

        let (out, summary) = output_of(tap);
        assert_eq!(out, "ok 1 - spawn true\nok 2 - exit status is 0\n1..2\n");
        assert_eq!(summary, Summary { passed: 2, failed: 0 });
        assert!(summary.all_passed());
    }

    #[test]
    fn failing_equality_prints_got_and_expected() {
        let mut tap = TapReporter::new(Vec::new());
        assert!(!tap.report_equality(&768, &512, "exit status is 2"));

        let (out, summary) = output_of(tap);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "not ok 1 - exit status is 2");
        assert_eq!(lines[1], "#   Failed test 'exit status is 2'");
        assert_eq!(lines[2], "#          got: 768");
        assert_eq!(lines[3], "#     expected: 512");
        assert_eq!(lines[4], "1..1");
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn diag_prefixes_every_line() {
        let mut tap = TapReporter::new(Vec::new());
        tap.diag("first\nsecond");

        let (out, summary) = output_of(tap);
        assert_eq!(out, "# first\n# second\n1..0\n");
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn multi_line_description_continues_as_comments() {
        let mut tap = TapReporter::new(Vec::new());
        tap.report_boolean(true, "spawn sh -c echo a\nexit 3");
        tap.report_boolean(false, "exit status is 0: sh -c echo a\nexit 3");

        let (out, _) = output_of(tap);
        let expected = "\
ok 1 - spawn sh -c echo a
# exit 3
not ok 2 - exit status is 0: sh -c echo a
# exit 3
#   Failed test 'exit status is 0: sh -c echo a
# exit 3'
1..2
";
        assert_eq!(out, expected);
        assert!(out.lines().all(|line| line.starts_with("ok ")
            || line.starts_with("not ok ")
            || line.starts_with('#')
            || line.starts_with("1..")));
    }

    #[test]
    fn hash_in_description_is_not_a_directive() {
        let mut tap = TapReporter::new(Vec::new());
        tap.report_boolean(false, "notes: stdout matches /# TODO/");

        let (out, summary) = output_of(tap);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "not ok 1 - notes: stdout matches /\\# TODO/");
        assert_eq!(lines[1], "#   Failed test 'notes: stdout matches /\\# TODO/'");
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn multi_line_diagnostics_are_prefixed() {
        let mut tap = TapReporter::new(Vec::new());
        tap.record(Assertion::new(false, "two lines").with_diagnostic("first\nsecond"));

        let (out, _) = output_of(tap);
        assert_eq!(
            out,
            "not ok 1 - two lines\n#   Failed test 'two lines'\n# first\n# second\n1..1\n"
        );
    }
}
