//! Document iteration and record assembly.

use std::io::{self, BufRead};

use crate::decode::row::{resolve_header, tokenize_row};
use crate::error::{Error, HeaderError, Result};
use crate::options::{Options, ScanMode};
use crate::value::{Entry, Record, Value, insert_pair};

/// Lazy sequence of records (header mode) or positional rows.
///
/// Lines are pulled from the reader one at a time; each yielded entry is
/// fully scanned and assembled before the next line is read. The first blank
/// or whitespace-only line ends the document without error. Any error ends
/// the iteration: after yielding `Err`, the iterator returns `None`.
pub struct Document<R> {
    reader: R,
    mode: ScanMode,
    header: bool,
    /// Field names once the header line has been resolved.
    fields: Option<Vec<String>>,
    /// Expected row width, from the header or the first data row.
    arity: Option<usize>,
    started: bool,
    done: bool,
    line_no: usize,
}

impl<R: BufRead> Document<R> {
    pub fn new(reader: R, options: &Options) -> Self {
        Self {
            reader,
            mode: options.scan_mode(),
            header: options.header,
            fields: None,
            arity: None,
            started: false,
            done: false,
            line_no: 0,
        }
    }

    /// 1-based number of the last line read.
    pub fn line(&self) -> usize {
        self.line_no
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(buf))
    }

    fn resolve_first_line(&mut self) -> Result<()> {
        match self.read_line()? {
            Some(line) if !line.trim().is_empty() => {
                let fields = resolve_header(&line).map_err(|e| match e {
                    HeaderError::Scan(s) => Error::Scan {
                        line: self.line_no,
                        column: s.pos,
                        kind: s.kind,
                    },
                    HeaderError::Invalid(message) => Error::Header {
                        line: self.line_no,
                        message: message.to_string(),
                    },
                })?;
                self.arity = Some(fields.len());
                self.fields = Some(fields);
            }
            // A blank or absent header line is an empty document.
            _ => self.done = true,
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Option<Entry>> {
        if self.done {
            return Ok(None);
        }
        if !self.started {
            self.started = true;
            if self.header {
                self.resolve_first_line()?;
                if self.done {
                    return Ok(None);
                }
            }
        }

        let Some(line) = self.read_line()? else {
            self.done = true;
            return Ok(None);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.done = true;
            return Ok(None);
        }

        let values = tokenize_row(trimmed, self.mode).map_err(|e| Error::Scan {
            line: self.line_no,
            column: e.pos,
            kind: e.kind,
        })?;

        match self.arity {
            Some(expected) if values.len() != expected => {
                return Err(Error::Arity {
                    line: self.line_no,
                    expected,
                    found: values.len(),
                });
            }
            Some(_) => {}
            None => self.arity = Some(values.len()),
        }

        match &self.fields {
            Some(fields) => Ok(Some(Entry::Record(assemble(fields, values)))),
            None => Ok(Some(Entry::Row(values))),
        }
    }
}

/// Pair field names with row values in header order. Duplicate field names
/// overwrite in place, keeping first-occurrence order.
fn assemble(fields: &[String], values: Vec<Value>) -> Record {
    let mut record = Record::with_capacity(fields.len());
    for (name, value) in fields.iter().zip(values) {
        insert_pair(&mut record, name.clone(), value);
    }
    record
}

impl<R: BufRead> Iterator for Document<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
