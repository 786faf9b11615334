use std::{
    error::Error,
    io::{BufWriter, Write},
};

use byteorder::{LittleEndian, WriteBytesExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use nalgebra::{vector, Vector3};
use rayon::prelude::*;

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    header::generate_header,
};

mod noise;
mod ramp;
mod shapes;
mod solid;

/// Generates one sample at a time, at any location.
///
/// Slices along z are filled in parallel, generators must be `Sync`.
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<usize>) -> u16;

    /// Fill slice `z`, x fastest
    fn fill_slice(&self, z: usize, dims: Vector3<usize>, slice: &mut [u16]) {
        for (i, sample) in slice.iter_mut().enumerate() {
            let coords = vector![i % dims.x, i / dims.x, z];
            *sample = self.sample_at(coords);
        }
    }
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Solid { sample, pad } => {
            Box::new(solid::SolidGenerator::new(config.dims, sample, pad))
        }
        GeneratorConfig::Noise { sample } => {
            Box::new(noise::NoiseGenerator::new(sample, config.seed))
        }
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => Box::new(shapes::ShapesGenerator::new(
            config.dims,
            n_of_shapes,
            sample,
            obj_size,
            config.seed,
        )),
        GeneratorConfig::Ramp { sample } => {
            Box::new(ramp::RampGenerator::new(config.dims, sample))
        }
    }
}

/// All samples in x-fastest order
pub fn generate_samples(
    gen: &dyn SampleGenerator,
    dims: Vector3<usize>,
    progress: &ProgressBar,
) -> Vec<u16> {
    let slice_len = dims.x * dims.y;
    let mut samples = vec![0; slice_len * dims.z];

    samples
        .par_chunks_mut(slice_len)
        .enumerate()
        .for_each(|(z, slice)| {
            gen.fill_slice(z, dims, slice);
            progress.inc(1);
        });

    samples
}

/// Header followed by little-endian samples
pub fn write_volume<W: Write>(
    writer: &mut W,
    header: &[u8],
    samples: &[u16],
) -> std::io::Result<()> {
    writer.write_all(header)?;
    for &sample in samples {
        writer.write_u16::<LittleEndian>(sample)?;
    }
    writer.flush()
}

pub fn generate_vol(config: &Config) -> Result<(), Box<dyn Error>> {
    let header = generate_header(config.header_format, config.dims)?;
    let gen = get_sample_generator(config);

    let progress = ProgressBar::new(config.dims.z as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} slices ({percent}%) {msg}")
            .progress_chars("█▉▊▋▌▍▎▏"),
    );
    progress.set_message("Generating");

    let samples = generate_samples(gen.as_ref(), config.dims, &progress);
    progress.finish_with_message("Generated");
    debug!("Generated {} samples", samples.len());

    let file = open_create_file(&config.file_name)?;
    let mut writer = BufWriter::new(file);
    write_volume(&mut writer, &header, &samples)?;

    info!(
        "Volume {}x{}x{} written to {:?}",
        config.dims.x, config.dims.y, config.dims.z, config.file_name
    );
    Ok(())
}
