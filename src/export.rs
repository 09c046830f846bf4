//! CSV and JSON writers for catalog tables and derived view rows.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::Table;
use crate::data::{Catalog, TableKey, TableRef};

/// Serialize rows as CSV with a header taken from the row's field names.
pub fn write_rows_csv<T: Serialize, W: Write>(rows: &[T], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn rows_to_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_rows_csv(rows, &mut buf)?;
    Ok(buf)
}

/// One row per year: `Year` followed by every field, absent cells empty.
pub fn write_table_csv<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["Year"];
    header.extend(table.fields.iter().map(|f| f.name));
    writer.write_record(&header)?;

    for rec in &table.records {
        let mut row = vec![rec.year.to_string()];
        row.extend(
            rec.values
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Every registered table keyed by its catalog name.
pub fn catalog_json(catalog: &Catalog) -> Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    for &key in catalog.list_tables() {
        let value = match catalog.table(key) {
            TableRef::Annual(table) => serde_json::to_value(table)?,
            TableRef::CategoryParty(rows) => serde_json::to_value(rows)?,
        };
        map.insert(key.as_str().to_string(), value);
    }
    Ok(serde_json::Value::Object(map))
}

/// Write `<key>.csv` for every table plus `catalog.json` into `dir`,
/// creating it if needed. Returns the written paths.
pub fn export_catalog(catalog: &Catalog, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    for &key in catalog.list_tables() {
        let path = dir.join(format!("{}.csv", key.as_str()));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_catalog_table(catalog, key, file)
            .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    let path = dir.join("catalog.json");
    let json = serde_json::to_string_pretty(&catalog_json(catalog)?)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    written.push(path);

    log::info!("exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

fn write_catalog_table<W: Write>(catalog: &Catalog, key: TableKey, out: W) -> Result<()> {
    match catalog.table(key) {
        TableRef::Annual(table) => write_table_csv(table, out),
        TableRef::CategoryParty(rows) => write_rows_csv(rows, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_csv_leaves_absent_cells_empty() {
        let catalog = Catalog::load().unwrap();
        let mut buf = Vec::new();
        write_table_csv(catalog.annual(TableKey::PartyTotals).unwrap(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Year,Landlord,Tenant,Other"));
        assert_eq!(lines.next(), Some("2015,5634,1387,152"));
        assert_eq!(lines.nth(1), Some("2017,23476,6304,"));
    }

    #[test]
    fn rows_csv_uses_field_names_as_header() {
        let catalog = Catalog::load().unwrap();
        let bytes = rows_to_csv(&catalog.party_by_category()[..1]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "year,category,landlord,tenant,total\n2017,Rental Bonds,1527,3117,4787\n"
        );
    }

    #[test]
    fn json_dump_has_every_table() {
        let catalog = Catalog::load().unwrap();
        let json = catalog_json(&catalog).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 15);
        assert_eq!(map["party_by_category"].as_array().unwrap().len(), 62);
    }

    #[test]
    fn export_writes_one_file_per_table_plus_json() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load().unwrap();
        let written = export_catalog(&catalog, dir.path()).unwrap();
        assert_eq!(written.len(), 16);
        assert!(dir.path().join("tenancy_totals.csv").exists());
        assert!(dir.path().join("catalog.json").exists());
    }
}
