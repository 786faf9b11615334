use std::{ffi::OsString, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};

use crate::header::HeaderFormat;

/// Parse a single value, `key` must have a default or be required
fn parse_value<T: FromStr>(args: &ArgMatches, key: &str) -> Result<T, String> {
    let value = args
        .value_of(key)
        .ok_or_else(|| format!("missing value of '{key}'"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value of '{key}': {value}"))
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T: FromStr + Copy>(
    args: &ArgMatches,
    key: &str,
) -> Result<Vector3<T>, String> {
    let vals = args
        .values_of(key)
        .ok_or_else(|| format!("missing value of '{key}'"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("invalid value of '{key}': {v}")))
        .collect::<Result<Vec<T>, String>>()?;

    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("'{key}' needs three values")),
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug, Clone)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Output container
    pub header_format: HeaderFormat,
    /// Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3::<u16>(args, "dims")?.map(usize::from);
        let generator = GeneratorConfig::from_args(args)?;

        let header_format = match args.value_of("format") {
            Some("raw") => HeaderFormat::Raw,
            _ => HeaderFormat::Dat,
        };

        let file_name = args
            .value_of_os("output-file")
            .ok_or("missing output file")?
            .into();

        let seed = match args.value_of("seed") {
            Some(_) => Some(parse_value(args, "seed")?),
            None => None,
        };

        Ok(Config {
            dims,
            generator,
            header_format,
            file_name,
            seed,
        })
    }

    pub fn n_of_samples(&self) -> usize {
        self.dims.x * self.dims.y * self.dims.z
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorConfig {
    /// Constant block surrounded by zeros
    Solid { sample: u16, pad: usize },
    /// Uniform random samples in `<0;sample>`
    Noise { sample: u16 },
    /// Randomly placed spheres and cuboids
    Shapes {
        n_of_shapes: usize,
        sample: u16,
        obj_size: usize,
    },
    /// Density rising along x, `0` to `sample`
    Ramp { sample: u16 },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let sample = parse_value(args, "sample")?;

        match args.value_of("generator") {
            Some("solid") => Ok(GeneratorConfig::Solid {
                sample,
                pad: parse_value(args, "pad")?,
            }),
            Some("noise") => Ok(GeneratorConfig::Noise { sample }),
            Some("shapes") => Ok(GeneratorConfig::Shapes {
                n_of_shapes: parse_value(args, "n-of-shapes")?,
                sample,
                obj_size: parse_value(args, "object-size")?,
            }),
            Some("ramp") => Ok(GeneratorConfig::Ramp { sample }),
            Some(other) => Err(format!("unknown generator '{other}'")),
            None => Err("missing generator".into()),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::args::get_command;

    fn config(args: &[&str]) -> Result<Config, String> {
        let matches = get_command()
            .try_get_matches_from(args)
            .map_err(|e| e.to_string())?;
        Config::from_args(&matches)
    }

    #[test]
    fn solid_defaults() {
        let cfg = config(&["vol_gen", "--dims=8,16,4", "-g", "solid"]).unwrap();
        assert_eq!(cfg.dims, vector![8, 16, 4]);
        assert_eq!(cfg.n_of_samples(), 512);
        assert_eq!(cfg.generator, GeneratorConfig::Solid { sample: 4095, pad: 5 });
        assert_eq!(cfg.header_format, HeaderFormat::Dat);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn shapes_with_seed() {
        let cfg = config(&[
            "vol_gen",
            "--dims=32,32,32",
            "--generator",
            "shapes",
            "--n-of-shapes",
            "3",
            "--seed",
            "7",
            "--format",
            "raw",
            "-o",
            "out.raw",
        ])
        .unwrap();

        assert_eq!(
            cfg.generator,
            GeneratorConfig::Shapes {
                n_of_shapes: 3,
                sample: 4095,
                obj_size: 16
            }
        );
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.header_format, HeaderFormat::Raw);
        assert_eq!(cfg.file_name, OsString::from("out.raw"));
    }

    #[test]
    fn rejects_bad_dims() {
        assert!(config(&["vol_gen", "--dims=0,4,4", "-g", "ramp"]).is_err());
        assert!(config(&["vol_gen", "--dims=4,4", "-g", "ramp"]).is_err());
        assert!(config(&["vol_gen", "-g", "ramp"]).is_err());
    }
}
