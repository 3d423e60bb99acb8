//! Loading of raw VEP tab-separated output.
//!
//! VEP writes `##` metadata lines and a `#Uploaded_variation ...` header, all of
//! which are dropped here; the 14 columns are always named from
//! [`VEP_COLUMNS`]. The free-form `Extra` column is parsed into an [`Extra`]
//! map.

use std::{fmt, io::BufRead, path::Path};

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{info, trace};

use crate::{
    data::Data,
    error::{Error, Result},
    io::open_read_maybe_gz,
};

pub const VEP_COLUMNS: [&str; 14] = [
    "Uploaded_variation",
    "Location",
    "Allele",
    "Gene",
    "Feature",
    "Feature_type",
    "Consequence",
    "cDNA_position",
    "CDS_position",
    "Protein_position",
    "Amino_acids",
    "Codons",
    "Existing_variation",
    "Extra",
];

/// Key of the `Extra` entry VEP sets for up/downstream (non-overlapping) hits.
pub const DISTANCE: &str = "DISTANCE";

/// `key=value` pairs from the VEP `Extra` column, in the order they appear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extra(IndexMap<String, String>);

impl Extra {
    /// Split on `;`, then on the first `=` of each segment. Segments without an
    /// `=` are skipped; a repeated key keeps its first position and last value.
    pub fn parse(raw: &str) -> Self {
        let mut map = IndexMap::new();
        for item in raw.split(';') {
            match item.split_once('=') {
                Some((k, v)) => {
                    map.insert(k.to_string(), v.to_string());
                },
                None => trace!(item, "Ignoring Extra segment without '='"),
            }
        }
        Extra(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|x| x.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Written back in VEP's own notation; an empty map becomes `-`.
impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        write!(
            f,
            "{}",
            self.0.iter().map(|(k, v)| format!("{k}={v}")).join(";")
        )
    }
}

/// One annotation line of VEP output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VepRecord {
    pub uploaded_variation: String,
    pub location:           String,
    pub allele:             String,
    pub gene:               String,
    pub feature:            String,
    pub feature_type:       String,
    pub consequence:        String,
    pub cdna_position:      String,
    pub cds_position:       String,
    pub protein_position:   String,
    pub amino_acids:        String,
    pub codons:             String,
    pub existing_variation: String,
    pub extra:              Extra,
}

impl VepRecord {
    /// Build a record from one data line; `line_no` is reported on failure.
    pub fn from_line(line_no: usize, line: &str) -> Result<Self> {
        let fields = line.split('\t').collect::<Vec<_>>();
        let [uploaded_variation, location, allele, gene, feature, feature_type, consequence, cdna_position, cds_position, protein_position, amino_acids, codons, existing_variation, extra] =
            fields.as_slice()
        else {
            return Err(Error::MalformedRow {
                line:   line_no,
                fields: fields.len(),
            });
        };
        Ok(VepRecord {
            uploaded_variation: uploaded_variation.to_string(),
            location:           location.to_string(),
            allele:             allele.to_string(),
            gene:               gene.to_string(),
            feature:            feature.to_string(),
            feature_type:       feature_type.to_string(),
            consequence:        consequence.to_string(),
            cdna_position:      cdna_position.to_string(),
            cds_position:       cds_position.to_string(),
            protein_position:   protein_position.to_string(),
            amino_acids:        amino_acids.to_string(),
            codons:             codons.to_string(),
            existing_variation: existing_variation.to_string(),
            extra:              Extra::parse(extra),
        })
    }

    /// Raw `DISTANCE` value, if VEP reported one.
    pub fn distance(&self) -> Option<&str> {
        self.extra.get(DISTANCE)
    }

    /// Fields in [`VEP_COLUMNS`] order.
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.uploaded_variation.clone(),
            self.location.clone(),
            self.allele.clone(),
            self.gene.clone(),
            self.feature.clone(),
            self.feature_type.clone(),
            self.consequence.clone(),
            self.cdna_position.clone(),
            self.cds_position.clone(),
            self.protein_position.clone(),
            self.amino_acids.clone(),
            self.codons.clone(),
            self.existing_variation.clone(),
            self.extra.to_string(),
        ]
    }
}

/// Parse VEP output, dropping `#` lines and blank lines in memory.
pub fn parse_vep(reader: impl BufRead) -> Result<Vec<VepRecord>> {
    let mut records = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        records.push(VepRecord::from_line(i + 1, line)?);
    }
    Ok(records)
}

#[tracing::instrument]
pub fn read_vep_file(path: &Path) -> Result<Vec<VepRecord>> {
    let records = parse_vep(open_read_maybe_gz(path)?)?;
    info!(len = records.len(), "Loaded VEP records");
    Ok(records)
}

/// Lay records out as a table with the fixed VEP header.
pub fn to_data(records: &[VepRecord]) -> Data {
    Data {
        header: VEP_COLUMNS.iter().map(|x| x.to_string()).collect(),
        data:   records.iter().map(VepRecord::to_fields).collect(),
    }
}
