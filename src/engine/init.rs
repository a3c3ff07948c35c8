//! init command - Create a starter Ravenfile in the working directory

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::core::overlay::DEFINITIONS_FILE;
use crate::engine::dispatch::DispatchError;

/// Contents of a freshly created Ravenfile.
pub const TEMPLATE: &str = "\
# Commands for this directory and everything below it.
# Each function is a command; the comments directly above it are its help.

# - say hello from this directory
# usage: rvn hello [name]
hello() {
    echo \"hello ${1:-from $(pwd)}\"
}
";

/// Create `Ravenfile` in `cwd` unless one already exists.
///
/// An existing file is left untouched and reported; both outcomes exit 0.
pub fn init<W: Write>(cwd: &Path, out: &mut W) -> Result<i32, DispatchError> {
    let path = cwd.join(DEFINITIONS_FILE);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            writeln!(out, "{} already exists.", path.display())?;
            return Ok(0);
        }
        Err(e) => return Err(DispatchError::Io(e)),
    };

    file.write_all(TEMPLATE.as_bytes())?;
    writeln!(out, "Created {}", path.display())?;
    Ok(0)
}
