//! Transparent gzip handling for table inputs and outputs.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};

use crate::error::{Error, Result};

/// Returns whether the path looks like a gzip or bgzip file.
pub fn is_gz(path: impl AsRef<Path>) -> bool {
    matches!(
        path.as_ref().extension().and_then(|s| s.to_str()),
        Some("gz") | Some("bgz")
    )
}

/// Open `path` for buffered reading, decompressing `.gz`/`.bgz` on the fly.
///
/// A path that does not exist yields [`Error::MissingInput`] rather than a bare
/// I/O error so callers can report it by name.
pub fn open_read_maybe_gz(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingInput(path.to_path_buf()))
        },
        Err(e) => return Err(e.into()),
    };
    if is_gz(path) {
        tracing::trace!(path = %path.display(), "Opening as gzip for reading");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(
            file,
        )))))
    } else {
        tracing::trace!(path = %path.display(), "Opening as plain text for reading");
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open `path` for writing, gzip-compressing when it ends in `.gz`.
///
/// The returned writer must be dropped (or flushed) before the file is read
/// back; the gzip trailer is written on drop.
pub fn open_write_maybe_gz(path: impl AsRef<Path>) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    if is_gz(path) {
        tracing::trace!(path = %path.display(), "Opening as gzip for writing");
        Ok(Box::new(GzEncoder::new(file, Compression::default())))
    } else {
        tracing::trace!(path = %path.display(), "Opening as plain text for writing");
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write};

    use pretty_assertions::assert_eq;

    #[rstest::rstest]
    #[case("a.tsv", false)]
    #[case("a.tsv.gz", true)]
    #[case("a.tsv.bgz", true)]
    #[case("gz", false)]
    fn is_gz(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(super::is_gz(path), expected);
    }

    #[rstest::rstest]
    #[case("out.tsv")]
    #[case("out.tsv.gz")]
    fn write_then_read(#[case] filename: &str) -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join(filename);
        {
            let mut writer = super::open_write_maybe_gz(&path)?;
            writer.write_all(b"a\tb\n1\t2\n")?;
            writer.flush()?;
        }
        let mut buf = String::new();
        super::open_read_maybe_gz(&path)?.read_to_string(&mut buf)?;
        assert_eq!(buf, "a\tb\n1\t2\n");
        Ok(())
    }

    #[test]
    fn missing_input_is_reported_by_name() {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join("absent.tsv");
        match super::open_read_maybe_gz(&path) {
            Err(crate::Error::MissingInput(p)) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
