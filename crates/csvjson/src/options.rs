/// Scanning mode for cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Scalars only; a `[` or `{` at the start of a cell is an error.
    #[default]
    Restricted,
    /// Cells may be arbitrarily nested arrays and objects.
    Unrestricted,
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Whether the first line is a header of field names.
    pub header: bool,
    /// Whether arrays and objects are allowed as cell values.
    pub containers: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            header: true,
            containers: false,
        }
    }
}

impl Options {
    pub fn scan_mode(&self) -> ScanMode {
        if self.containers {
            ScanMode::Unrestricted
        } else {
            ScanMode::Restricted
        }
    }
}
