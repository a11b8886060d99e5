use crate::error::{Result, VizError};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use log::{debug, info};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Encodes `frames` as a looping GIF at `fps`. Returns the number of frames written.
///
/// # Errors
/// Any create/encode/flush failure is reported as `WriteFailure` for `path`.
/// Nothing is retried.
pub fn write_gif<P, I>(path: P, frames: I, fps: u32, speed: i32) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = RgbaImage>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| VizError::write_failure(dir, e))?;
    }

    let file = File::create(path).map_err(|e| VizError::write_failure(path, e))?;
    let mut writer = BufWriter::new(file);
    let delay = Delay::from_numer_denom_ms(1000, fps.max(1));

    let mut written = 0usize;
    {
        let mut encoder = GifEncoder::new_with_speed(&mut writer, speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| VizError::write_failure(path, e))?;

        for image in frames {
            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, delay))
                .map_err(|e| VizError::write_failure(path, e))?;
            written += 1;
            debug!("encoded frame {written}");
        }
        // encoder writes the trailer on drop
    }

    writer
        .flush()
        .map_err(|e| VizError::write_failure(path, e))?;

    info!("Wrote {written} frames to {}", path.display());
    Ok(written)
}
