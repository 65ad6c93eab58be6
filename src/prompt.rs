use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::error::ScanError;
use crate::format;
use crate::matcher::Matcher;
use crate::types::{Candidate, MatchMode, SearchCriterion};
use crate::walk::{self, WalkOptions};

/// What the guided flow collected. Candidates are already enumerated, so the
/// caller never has to re-validate the path.
#[derive(Debug)]
pub struct PromptAnswers {
    pub criterion: SearchCriterion,
    pub input: PathBuf,
    pub candidates: Vec<Candidate>,
}

/// Guided flow: search text, then (unless `mode` is fixed) regex or literal,
/// then a path, asked again until it names a PDF or a folder containing PDFs.
///
/// An empty search text ends the flow with `EmptyCriterion`, left to the
/// caller to report. A pattern that doesn't compile is warned about right
/// away and kept. End of input while a question is pending is an I/O error.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    mode: Option<MatchMode>,
    walk_opts: &WalkOptions,
) -> Result<PromptAnswers, ScanError> {
    let text = ask(input, out, "1) Text to search for: ")?;
    if text.is_empty() {
        return Err(ScanError::EmptyCriterion);
    }

    let mode = match mode {
        Some(m) => m,
        None => {
            let answer = ask(input, out, "   Treat it as a regular expression? [y/N]: ")?;
            if is_yes(&answer) {
                MatchMode::Pattern
            } else {
                MatchMode::Literal
            }
        }
    };
    let criterion = SearchCriterion::new(&text, mode)?;
    if let Err(e) = Matcher::compile(&criterion) {
        writeln!(out, "{}", format::invalid_pattern_warning(&e)).map_err(stdout_err)?;
    }

    loop {
        let raw = ask(input, out, "\n2) PDF file or folder: ")?;
        let path = PathBuf::from(unquote(&raw));
        match walk::enumerate(&path, walk_opts) {
            Ok(candidates) => {
                return Ok(PromptAnswers {
                    criterion,
                    input: path,
                    candidates,
                });
            }
            Err(e) if e.is_retryable_input() => {
                writeln!(out, "✘ {e}. Try again.").map_err(stdout_err)?;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Print `question`, read one line, return it trimmed.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String, ScanError> {
    write!(out, "{question}").map_err(stdout_err)?;
    out.flush().map_err(stdout_err)?;

    let mut line = String::new();
    let n = input.read_line(&mut line).map_err(stdin_err)?;
    if n == 0 {
        return Err(stdin_err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        )));
    }
    Ok(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Terminals quote dragged-in paths that contain spaces.
fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|r| r.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

fn stdin_err(source: io::Error) -> ScanError {
    ScanError::Io {
        path: PathBuf::from("<stdin>"),
        source,
    }
}

fn stdout_err(source: io::Error) -> ScanError {
    ScanError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}
