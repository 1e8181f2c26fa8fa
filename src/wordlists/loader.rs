//! Word list and username list loading

use crate::collections::{DynamicString, HashSet, OrderedSet};
use crate::core::Word;
use crate::error::ReadError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Room for a typical dictionary before the first rehash
const DICTIONARY_CAP: usize = 1024;

/// Read a dictionary, one word per line
///
/// Lines are trimmed and uppercased. Lines that are not five ASCII letters
/// are skipped, as are repeats.
///
/// # Errors
/// Returns [`ReadError::Io`] if reading fails.
pub fn load_dictionary<R: BufRead + ?Sized>(
    reader: &mut R,
) -> Result<HashSet<DynamicString>, ReadError> {
    let mut dictionary = HashSet::with_capacity(DICTIONARY_CAP);
    let mut line = DynamicString::with_capacity(64);
    let mut skipped = 0usize;

    loop {
        match line.read_line_into(reader) {
            Ok(()) => {}
            Err(ReadError::EndOfStream) => break,
            Err(e) => return Err(e),
        }

        let Ok(word) = Word::from_dynamic(&line) else {
            skipped += 1;
            continue;
        };
        let word = word.to_dynamic();
        if !dictionary.contains(&word) {
            dictionary.insert(word);
        }
    }

    tracing::debug!(words = dictionary.len(), skipped, "loaded dictionary");
    Ok(dictionary)
}

/// Read the dictionary at `path`
///
/// # Errors
/// Returns [`ReadError::Io`] if the file cannot be opened or read.
pub fn load_dictionary_file(path: &Path) -> Result<HashSet<DynamicString>, ReadError> {
    let file = File::open(path)?;
    load_dictionary(&mut BufReader::new(file))
}

/// Read a username list, one name per line
///
/// Names are trimmed and lowercased; blank lines are ignored.
///
/// # Errors
/// Returns [`ReadError::Io`] if reading fails.
pub fn load_usernames<R: BufRead + ?Sized>(
    reader: &mut R,
) -> Result<OrderedSet<DynamicString>, ReadError> {
    let mut usernames = OrderedSet::new();
    let mut line = DynamicString::new();

    loop {
        match line.read_line_into(reader) {
            Ok(()) => {}
            Err(ReadError::EndOfStream) => break,
            Err(e) => return Err(e),
        }

        line.trim();
        line.make_ascii_lowercase();
        if !line.is_empty() {
            usernames.insert(line.clone());
        }
    }

    tracing::debug!(users = usernames.len(), "loaded usernames");
    Ok(usernames)
}

/// Read the username list at `path`, treating a missing file as empty
///
/// # Errors
/// Returns [`ReadError::Io`] if the file exists but cannot be read.
pub fn load_usernames_file(path: &Path) -> Result<OrderedSet<DynamicString>, ReadError> {
    match File::open(path) {
        Ok(file) => load_usernames(&mut BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(OrderedSet::new()),
        Err(e) => Err(e.into()),
    }
}

/// Write usernames one per line, in ascending order
///
/// # Errors
/// Returns any error from `writer`.
pub fn save_usernames<W: Write + ?Sized>(
    usernames: &OrderedSet<DynamicString>,
    writer: &mut W,
) -> io::Result<()> {
    for username in usernames {
        writeln!(writer, "{username}")?;
    }
    Ok(())
}

/// Replace the username list at `path`
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn save_usernames_file(usernames: &OrderedSet<DynamicString>, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save_usernames(usernames, &mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), users = usernames.len(), "saved usernames");
    Ok(())
}
