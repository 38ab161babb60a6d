//! Line state machine.
//!
//! ```text
//!            marker                 `(` ... `)`
//! Scanning ─────────► Header ─────────────────────┐
//!    ▲                  │ `(` ... (no `)`)        │
//!    │                  ▼                         ▼
//!    │               Params ──── `)` ────────► BodySeek
//!    │                                            │
//!    └──────────── next line (`{` consumed) ──────┘
//! ```
//!
//! A signature whose closing line already holds `{` skips `BodySeek`.

use ferry_ir::{ExportedFunction, TypeToken};

use crate::error::ExtractError;
use crate::params::{absorb, parse_parameters, split_declarator, strip_line_comment};

/// Signature whose parameter list is still being collected.
struct Pending {
    name: String,
    return_type: TypeToken,
    segments: Vec<String>,
    /// 1-based line of the signature header.
    line: usize,
}

impl Pending {
    fn finish(self) -> ExportedFunction {
        let params = parse_parameters(&self.segments);
        tracing::debug!(
            name = %self.name,
            params = params.len(),
            line = self.line,
            "extracted exported function"
        );
        ExportedFunction::new(self.name, self.return_type, params)
    }
}

enum State {
    Scanning,
    Header { marker_line: usize },
    Params(Pending),
    BodySeek,
}

/// Extracts exported signatures from one source file.
pub(crate) struct SignatureScanner<'m> {
    marker: &'m str,
    functions: Vec<ExportedFunction>,
}

impl<'m> SignatureScanner<'m> {
    pub(crate) fn new(marker: &'m str) -> Self {
        SignatureScanner {
            marker,
            functions: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, source: &str) -> Result<Vec<ExportedFunction>, ExtractError> {
        let mut state = State::Scanning;

        for (index, raw) in source.lines().enumerate() {
            let line = TypeToken::canonicalize_line(raw);
            state = self.step(state, &line, index + 1)?;
        }

        match state {
            State::Scanning | State::BodySeek => Ok(self.functions),
            State::Header { marker_line } => Err(ExtractError::MissingSignature { marker_line }),
            State::Params(pending) => Err(ExtractError::UnterminatedParameters {
                function: pending.name,
                line: pending.line,
            }),
        }
    }

    fn step(&mut self, state: State, line: &str, number: usize) -> Result<State, ExtractError> {
        match state {
            State::Scanning => Ok(self.scan(line, number)),
            State::Header { marker_line } => {
                if line.trim().is_empty() || self.is_marker(line) {
                    return Ok(State::Header { marker_line });
                }
                self.header(line, number)
            }
            State::Params(mut pending) => {
                let closed = absorb(strip_line_comment(line), &mut pending.segments);
                if closed {
                    self.functions.push(pending.finish());
                    Ok(Self::after_close(line))
                } else {
                    Ok(State::Params(pending))
                }
            }
            State::BodySeek => {
                if line.trim_start().starts_with('{') {
                    Ok(State::Scanning)
                } else {
                    Ok(self.scan(line, number))
                }
            }
        }
    }

    fn scan(&self, line: &str, number: usize) -> State {
        if self.is_marker(line) {
            State::Header {
                marker_line: number,
            }
        } else {
            State::Scanning
        }
    }

    fn is_marker(&self, line: &str) -> bool {
        !line.trim_start().starts_with('#') && line.contains(self.marker)
    }

    /// Parse the line that opens a marked signature.
    fn header(&mut self, line: &str, number: usize) -> Result<State, ExtractError> {
        let code = strip_line_comment(line);
        let missing = || ExtractError::MissingParameterList {
            line: number,
            text: line.trim().to_string(),
        };

        let open = code.find('(').ok_or_else(missing)?;
        let (return_type, name) = split_declarator(&code[..open]).ok_or_else(missing)?;
        let name = name.ok_or_else(missing)?;

        let mut pending = Pending {
            name,
            return_type: TypeToken::new(&return_type),
            segments: Vec::new(),
            line: number,
        };

        if absorb(&code[open + 1..], &mut pending.segments) {
            self.functions.push(pending.finish());
            Ok(Self::after_close(line))
        } else {
            Ok(State::Params(pending))
        }
    }

    /// State after the line holding `)`.
    fn after_close(line: &str) -> State {
        if line.contains('{') {
            State::Scanning
        } else {
            State::BodySeek
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
