//! Inner join of a highest-impact VEP table with regenie results.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::{data::Data, error::Result};

pub const VEP_KEY: &str = "Uploaded_variation";
pub const REGENIE_KEY: &str = "ID";

/// Append `_x`/`_y` to column names present on both sides.
fn joined_header(left: &[String], right: &[String]) -> Vec<String> {
    let left_names = left.iter().map(|x| x.as_str()).collect::<HashSet<_>>();
    let right_names = right.iter().map(|x| x.as_str()).collect::<HashSet<_>>();
    left.iter()
        .map(|x| {
            if right_names.contains(x.as_str()) {
                format!("{x}_x")
            } else {
                x.clone()
            }
        })
        .chain(right.iter().map(|x| {
            if left_names.contains(x.as_str()) {
                format!("{x}_y")
            } else {
                x.clone()
            }
        }))
        .collect()
}

/// Join on `left[left_key] == right[right_key]`, keeping only matched rows.
///
/// Rows come out in left order; a left row matching several right rows is
/// repeated once per match, in right order. When nothing matches the result
/// has no rows and its header is both headers concatenated as-is.
#[tracing::instrument(skip(left, right))]
pub fn inner_join(left: &Data, right: &Data, left_key: &str, right_key: &str) -> Result<Data> {
    let l = left.idx(left_key)?;
    let r = right.idx(right_key)?;

    let mut right_map: HashMap<&str, Vec<&Vec<String>>> = HashMap::new();
    for row in &right.data {
        right_map.entry(row[r].as_str()).or_default().push(row);
    }
    debug!(keys = right_map.len(), "Indexed right table");

    let data = left
        .data
        .iter()
        .flat_map(|lrow| {
            right_map
                .get(lrow[l].as_str())
                .into_iter()
                .flatten()
                .map(move |rrow| lrow.iter().chain(rrow.iter()).cloned().collect::<Vec<_>>())
        })
        .collect::<Vec<_>>();

    if data.is_empty() {
        warn!("No matching variants, writing header only");
        let header = left.header.iter().chain(&right.header).cloned().collect();
        return Ok(Data::new(header));
    }
    info!(len = data.len(), "Joined rows");
    Ok(Data {
        header: joined_header(&left.header, &right.header),
        data,
    })
}

/// Annotate regenie results with the VEP record of the same variant.
pub fn merge_vep_regenie(vep: &Data, regenie: &Data) -> Result<Data> {
    inner_join(vep, regenie, VEP_KEY, REGENIE_KEY)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> Data {
        Data {
            header: header.iter().map(|x| x.to_string()).collect(),
            data:   rows
                .iter()
                .map(|r| r.iter().map(|x| x.to_string()).collect())
                .collect(),
        }
    }

    fn vep() -> Data {
        table(
            &["Uploaded_variation", "Location", "Gene"],
            &[&["v1", "1:100", "G1"], &["v2", "1:200", "G2"], &["v3", "1:300", "G3"]],
        )
    }

    #[test]
    fn keeps_only_matching_rows_in_left_order() -> Result<(), anyhow::Error> {
        let regenie = table(
            &["CHROM", "ID", "LOG10P"],
            &[&["1", "v3", "2.1"], &["1", "v1", "7.5"], &["1", "v9", "0.2"]],
        );
        let merged = merge_vep_regenie(&vep(), &regenie)?;
        assert_eq!(
            merged,
            table(
                &["Uploaded_variation", "Location", "Gene", "CHROM", "ID", "LOG10P"],
                &[
                    &["v1", "1:100", "G1", "1", "v1", "7.5"],
                    &["v3", "1:300", "G3", "1", "v3", "2.1"],
                ],
            )
        );
        Ok(())
    }

    #[test]
    fn repeated_keys_produce_every_pair() -> Result<(), anyhow::Error> {
        let regenie = table(
            &["ID", "TEST"],
            &[&["v2", "ADD"], &["v2", "DOM"]],
        );
        let merged = merge_vep_regenie(&vep(), &regenie)?;
        assert_eq!(
            merged.data,
            vec![
                vec!["v2", "1:200", "G2", "v2", "ADD"],
                vec!["v2", "1:200", "G2", "v2", "DOM"],
            ]
        );
        Ok(())
    }

    #[test]
    fn no_match_yields_concatenated_header() -> Result<(), anyhow::Error> {
        let regenie = table(&["ID", "Gene"], &[&["x", "G9"]]);
        let merged = merge_vep_regenie(&vep(), &regenie)?;
        assert_eq!(
            merged,
            table(&["Uploaded_variation", "Location", "Gene", "ID", "Gene"], &[])
        );
        Ok(())
    }

    #[test]
    fn shared_column_names_are_suffixed() -> Result<(), anyhow::Error> {
        let regenie = table(&["ID", "Gene"], &[&["v1", "G1r"]]);
        let merged = merge_vep_regenie(&vep(), &regenie)?;
        assert_eq!(
            merged.header,
            vec!["Uploaded_variation", "Location", "Gene_x", "ID", "Gene_y"]
        );
        Ok(())
    }

    #[test]
    fn missing_key_column_fails() {
        let regenie = table(&["SNP"], &[&["v1"]]);
        assert!(matches!(
            merge_vep_regenie(&vep(), &regenie),
            Err(crate::Error::MissingColumn(c)) if c == "ID"
        ));
    }
}
