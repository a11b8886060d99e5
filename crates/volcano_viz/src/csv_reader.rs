use crate::constants::{
    LAT_MAX, LAT_MIN, LATITUDE_HEADER, LON_MAX, LON_MIN, LONGITUDE_HEADER, VEI_HEADER,
    VOLCANO_HEADER,
};
use crate::error::{Result, VizError};
use crate::volcano::Volcano;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// The published dataset has its Latitude/Longitude headers transposed.
    /// When set, the value under "Latitude" is read as longitude and vice versa.
    pub swap_coordinates: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            swap_coordinates: true,
        }
    }
}

/// Row accounting for one load. `kept + dropped_vei + dropped_coordinates + blank_rows == total_rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept: usize,
    pub blank_rows: usize,
    pub dropped_vei: usize,
    pub dropped_coordinates: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.dropped_vei + self.dropped_coordinates
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolcanoTable {
    volcanoes: Vec<Volcano>,
    report: LoadReport,
}

impl VolcanoTable {
    pub fn volcanoes(&self) -> &[Volcano] {
        &self.volcanoes
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.volcanoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volcanoes.is_empty()
    }

    /// (min, max) VEI over the table, None if empty
    pub fn vei_range(&self) -> Option<(u8, u8)> {
        let min = self.volcanoes.iter().map(|v| v.vei).min()?;
        let max = self.volcanoes.iter().map(|v| v.vei).max()?;
        Some((min, max))
    }

    /// Mean (latitude, longitude), None if empty
    pub fn center(&self) -> Option<(f64, f64)> {
        if self.volcanoes.is_empty() {
            return None;
        }
        let n = self.volcanoes.len() as f64;
        let lat = self.volcanoes.iter().map(|v| v.latitude).sum::<f64>() / n;
        let lon = self.volcanoes.iter().map(|v| v.longitude).sum::<f64>() / n;
        Some((lat, lon))
    }

    /// First `rows` records
    pub fn preview(&self, rows: usize) -> &[Volcano] {
        &self.volcanoes[..rows.min(self.volcanoes.len())]
    }
}

impl From<Vec<Volcano>> for VolcanoTable {
    fn from(volcanoes: Vec<Volcano>) -> Self {
        let report = LoadReport {
            total_rows: volcanoes.len(),
            kept: volcanoes.len(),
            ..Default::default()
        };
        Self { volcanoes, report }
    }
}

/// Reads volcano records from a CSV file
///
/// # Errors
/// `InputNotFound` if the path does not exist, `Io`/`Csv` if it cannot be read
/// (e.g. it is a directory), `MissingColumn` if a required header is absent,
/// `Csv` if the file is structurally malformed.
/// Rows whose VEI or coordinates cannot be coerced are dropped, not reported as errors.
pub fn read_volcanoes<P: AsRef<Path>>(path: P, opt: &LoadOptions) -> Result<VolcanoTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(VizError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Reading: {}", path.display());
    let file = std::fs::File::open(path)?;
    read_volcanoes_from_reader(file, opt)
}

pub fn read_volcanoes_from_reader<R: Read>(reader: R, opt: &LoadOptions) -> Result<VolcanoTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(rdr.headers()?, opt)?;

    let mut volcanoes = Vec::new();
    let mut report = LoadReport::default();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // 1-indexed, +1 for header
        report.total_rows += 1;

        match parse_record(&rec, i, &columns) {
            RowOutcome::Kept(volcano) => volcanoes.push(volcano),
            RowOutcome::Blank => report.blank_rows += 1,
            RowOutcome::BadVei(value) => {
                debug!("row {row}: dropping, Max VEI '{value}' is not a valid index");
                report.dropped_vei += 1;
            }
            RowOutcome::BadCoordinates => {
                debug!("row {row}: dropping, missing, non-numeric or out-of-range coordinates");
                report.dropped_coordinates += 1;
            }
        }
    }

    report.kept = volcanoes.len();
    info!(
        "Loaded {} volcanoes ({} rows, {} dropped for VEI, {} for coordinates)",
        report.kept, report.total_rows, report.dropped_vei, report.dropped_coordinates
    );

    Ok(VolcanoTable { volcanoes, report })
}

/// Field positions, already swapped according to `LoadOptions`
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    latitude: usize,
    longitude: usize,
    vei: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, opt: &LoadOptions) -> Result<Self> {
        let find = |column: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
                .ok_or(VizError::MissingColumn { column })
        };

        let name = find(VOLCANO_HEADER)?;
        let lat_header = find(LATITUDE_HEADER)?;
        let lon_header = find(LONGITUDE_HEADER)?;
        let vei = find(VEI_HEADER)?;

        let (latitude, longitude) = if opt.swap_coordinates {
            (lon_header, lat_header)
        } else {
            (lat_header, lon_header)
        };

        Ok(Self {
            name,
            latitude,
            longitude,
            vei,
        })
    }
}

#[derive(Debug)]
enum RowOutcome {
    Kept(Volcano),
    Blank,
    BadVei(String),
    BadCoordinates,
}

fn parse_record(rec: &StringRecord, index: usize, columns: &ColumnIndex) -> RowOutcome {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return RowOutcome::Blank;
    }

    let field = |i: usize| rec.get(i).map(str::trim).unwrap_or("");

    let (Some(latitude), Some(longitude)) = (
        parse_coordinate(field(columns.latitude), LAT_MIN, LAT_MAX),
        parse_coordinate(field(columns.longitude), LON_MIN, LON_MAX),
    ) else {
        return RowOutcome::BadCoordinates;
    };

    let vei_str = field(columns.vei);
    let Some(vei) = parse_vei(vei_str) else {
        return RowOutcome::BadVei(vei_str.to_string());
    };

    RowOutcome::Kept(Volcano::new(
        index,
        field(columns.name),
        latitude,
        longitude,
        vei,
    ))
}

/// Degrees within `[min, max]`, anything else is a coercion failure
fn parse_coordinate(s: &str, min: f64, max: f64) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| (min..=max).contains(v))
}

/// Numeric coercion of the VEI field. Fractions truncate toward zero;
/// empty, non-numeric, negative and out-of-range values are rejected.
pub fn parse_vei(s: &str) -> Option<u8> {
    let v = s.trim().parse::<f64>().ok()?;
    if !v.is_finite() || v < 0.0 || v >= 256.0 {
        return None;
    }
    Some(v.trunc() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Volcano,Country,Latitude,Longitude,Max VEI
Etna,Italy,14.99,37.75,3
Fuji,Japan,138.73,35.36,5
Kilauea,USA,-155.29,19.42,Unknown
Hekla,Iceland,-19.7,63.98,4.0
";

    fn load(text: &str) -> VolcanoTable {
        read_volcanoes_from_reader(text.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_swaps_transposed_columns() {
        let table = load(SAMPLE);
        let etna = &table.volcanoes()[0];
        assert_eq!(etna.name, "Etna");
        assert_eq!(etna.longitude, 14.99);
        assert_eq!(etna.latitude, 37.75);
    }

    #[test]
    fn test_no_swap_keeps_headers() {
        let opt = LoadOptions {
            swap_coordinates: false,
        };
        let table = read_volcanoes_from_reader(SAMPLE.as_bytes(), &opt).unwrap();
        let etna = &table.volcanoes()[0];
        assert_eq!(etna.latitude, 14.99);
        assert_eq!(etna.longitude, 37.75);
    }

    #[test]
    fn test_non_numeric_vei_rows_are_dropped() {
        let table = load(SAMPLE);
        let report = table.report();

        assert_eq!(report.total_rows, 4);
        assert_eq!(report.dropped_vei, 1);
        assert_eq!(table.len(), report.total_rows - report.dropped_vei);
        assert!(table.volcanoes().iter().all(|v| v.name != "Kilauea"));
    }

    #[test]
    fn test_index_tracks_original_row_position() {
        let table = load(SAMPLE);
        let indices: Vec<usize> = table.volcanoes().iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![0, 1, 3]);
    }

    #[test]
    fn test_float_vei_is_coerced() {
        let table = load(SAMPLE);
        let hekla = table.volcanoes().iter().find(|v| v.name == "Hekla").unwrap();
        assert_eq!(hekla.vei, 4);
        assert_eq!(hekla.visual, 250);
    }

    #[test]
    fn test_parse_vei() {
        assert_eq!(parse_vei("3"), Some(3));
        assert_eq!(parse_vei(" 2.0 "), Some(2));
        assert_eq!(parse_vei("2.7"), Some(2));
        assert_eq!(parse_vei(""), None);
        assert_eq!(parse_vei("?"), None);
        assert_eq!(parse_vei("-1"), None);
        assert_eq!(parse_vei("NaN"), None);
        assert_eq!(parse_vei("300"), None);
    }

    #[test]
    fn test_missing_coordinates_are_dropped() {
        let text = "Volcano,Latitude,Longitude,Max VEI\nA,,20,2\nB,10,abc,2\nC,10,21,1\n";
        let table = load(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.report().dropped_coordinates, 2);
        assert_eq!(table.report().dropped_vei, 0);
    }

    #[test]
    fn test_out_of_range_coordinates_are_dropped() {
        // swapped: first column is longitude, second latitude
        let text = "\
Volcano,Latitude,Longitude,Max VEI
Far,1e10,10,2
North,10,91,2
Edge,-180,90,1
inf,inf,0,1
Ok,20,10,3
";
        let table = load(text);
        let names: Vec<&str> = table.volcanoes().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Edge", "Ok"]);
        assert_eq!(table.report().dropped_coordinates, 3);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let text = "Volcano,Latitude,Longitude,Max VEI\nA,10,20,2\n,,,\nB,11,21,2\n";
        let table = load(text);
        assert_eq!(table.len(), 2);
        assert_eq!(table.report().blank_rows, 1);
    }

    #[test]
    fn test_short_rows_count_as_bad_coordinates() {
        let text = "Volcano,Latitude,Longitude,Max VEI\nA,10\nB,10,21,0\n";
        let table = load(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.report().dropped_coordinates, 1);
    }

    #[test]
    fn test_headers_case_insensitive_any_order() {
        let text = "max vei,  LONGITUDE ,volcano,latitude\n2,20,A,10\n";
        let table = load(text);
        let a = &table.volcanoes()[0];
        assert_eq!(a.name, "A");
        // swapped: "latitude" column holds longitude
        assert_eq!(a.longitude, 10.0);
        assert_eq!(a.latitude, 20.0);
        assert_eq!(a.vei, 2);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let text = "Volcano,Latitude,Longitude\nA,10,20\n";
        let err = read_volcanoes_from_reader(text.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, VizError::MissingColumn { column: "Max VEI" }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_nonexistent_path() {
        let err = read_volcanoes("nonexistent_dir/output.csv", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, VizError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_directory_is_not_reported_as_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_volcanoes(dir.path(), &LoadOptions::default()).unwrap_err();
        assert!(!matches!(err, VizError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = read_volcanoes(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_table_helpers() {
        let table = load(SAMPLE);
        assert_eq!(table.vei_range(), Some((3, 5)));
        assert_eq!(table.preview(2).len(), 2);
        assert_eq!(table.preview(100).len(), 3);

        let (lat, lon) = table.center().unwrap();
        assert!((lat - (37.75 + 35.36 + 63.98) / 3.0).abs() < 1e-9);
        assert!((lon - (14.99 + 138.73 - 19.7) / 3.0).abs() < 1e-9);

        let empty = VolcanoTable::default();
        assert_eq!(empty.vei_range(), None);
        assert_eq!(empty.center(), None);
    }
}
