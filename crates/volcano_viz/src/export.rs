use crate::constants::{LATITUDE_HEADER, LONGITUDE_HEADER, VEI_HEADER, VISUAL_HEADER, VOLCANO_HEADER};
use crate::csv_reader::VolcanoTable;
use crate::error::{Result, VizError};

use csv::WriterBuilder;
use log::debug;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| VizError::write_failure(dir, e))?;
    }
    let file = File::create(path).map_err(|e| VizError::write_failure(path, e))?;
    Ok(BufWriter::new(file))
}

/// Writes the cleaned table with un-swapped headers, so it reloads with
/// `swap_coordinates = false`.
pub fn export_to_csv<P: AsRef<Path>>(table: &VolcanoTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let writer = create_output(path)?;

    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }
    let mut wtr = builder.from_writer(writer);

    write_rows(&mut wtr, table).map_err(|e| VizError::write_failure(path, e))?;

    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, table: &VolcanoTable) -> csv::Result<()> {
    wtr.write_record([
        VOLCANO_HEADER,
        LATITUDE_HEADER,
        LONGITUDE_HEADER,
        VEI_HEADER,
        VISUAL_HEADER,
    ])?;
    for v in table.volcanoes() {
        let lat = v.latitude.to_string();
        let lon = v.longitude.to_string();
        let vei = v.vei.to_string();
        let visual = v.visual.to_string();
        wtr.write_record([
            v.name.as_str(),
            lat.as_str(),
            lon.as_str(),
            vei.as_str(),
            visual.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the cleaned records as a JSON array of objects
pub fn export_to_json<P: AsRef<Path>>(table: &VolcanoTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create_output(path)?;

    serde_json::to_writer_pretty(&mut writer, table.volcanoes())
        .map_err(|e| VizError::write_failure(path, e))?;
    writer
        .flush()
        .map_err(|e| VizError::write_failure(path, e))?;

    debug!("Wrote {} records to {}", table.len(), path.display());
    Ok(())
}
