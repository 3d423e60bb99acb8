//! Header plus string rows, the shape every tab-separated table is handled in.

use std::{
    io::{Read, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    io::{open_read_maybe_gz, open_write_maybe_gz},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Data {
    pub header: Vec<String>,
    pub data:   Vec<Vec<String>>,
}

impl Data {
    pub fn new(header: Vec<String>) -> Self {
        Data {
            header,
            data: vec![],
        }
    }

    pub fn idx(&self, key: &str) -> Result<usize> {
        self.idx_opt(key)
            .ok_or_else(|| Error::MissingColumn(key.to_string()))
    }

    pub fn idx_opt(&self, key: &str) -> Option<usize> {
        self.header.iter().position(|x| x == key)
    }

    pub fn col(&self, key: &str) -> Result<impl Iterator<Item = &'_ str>> {
        let idx = self.idx(key)?;
        Ok(self.data.iter().map(move |x| x[idx].as_str()))
    }

    /// Read a tab-separated table whose first record is the header.
    pub fn read(file: impl Read) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(file);
        let header = reader
            .headers()?
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>();
        let data = reader
            .records()
            .map(|r| r.map(|r| r.iter().map(|x| x.to_string()).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(columns = header.len(), rows = data.len(), "Read table");
        Ok(Data { header, data })
    }

    pub fn read_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::read(open_read_maybe_gz(path)?)
    }

    /// Write header and rows tab-separated, quoting only where a field needs it.
    pub fn write(&self, file: impl Write) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(file);
        debug!(len = self.data.len(), "Writing rows");
        writer.write_record(&self.header)?;
        for r in &self.data {
            writer.write_record(r)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write(open_write_maybe_gz(path)?)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Data;

    fn table() -> Data {
        Data {
            header: vec!["ID".into(), "BETA".into()],
            data:   vec![
                vec!["v1".into(), "0.1".into()],
                vec!["v2".into(), "-0.3".into()],
            ],
        }
    }

    #[test]
    fn read_with_header() -> Result<(), anyhow::Error> {
        let data = Data::read("ID\tBETA\nv1\t0.1\nv2\t-0.3\n".as_bytes())?;
        assert_eq!(data, table());
        Ok(())
    }

    #[test]
    fn column_lookup() -> Result<(), anyhow::Error> {
        let data = table();
        assert_eq!(data.idx("BETA")?, 1);
        assert_eq!(data.idx_opt("P"), None);
        assert_eq!(data.col("ID")?.collect::<Vec<_>>(), vec!["v1", "v2"]);
        assert!(matches!(
            data.idx("P"),
            Err(crate::Error::MissingColumn(c)) if c == "P"
        ));
        Ok(())
    }

    #[test]
    fn write_quotes_only_when_needed() -> Result<(), anyhow::Error> {
        let mut data = table();
        data.data.push(vec!["v\t3".into(), "1".into()]);
        let mut buf = Vec::new();
        data.write(&mut buf)?;
        assert_eq!(
            String::from_utf8(buf)?,
            "ID\tBETA\nv1\t0.1\nv2\t-0.3\n\"v\t3\"\t1\n"
        );
        Ok(())
    }

    #[test]
    fn header_only_table() -> Result<(), anyhow::Error> {
        let data = Data::new(vec!["a".into(), "b".into()]);
        let mut buf = Vec::new();
        data.write(&mut buf)?;
        assert_eq!(String::from_utf8(buf)?, "a\tb\n");
        Ok(())
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = Data::read("a\tb\n1\n".as_bytes());
        assert!(matches!(res, Err(crate::Error::Csv(_))));
    }
}
