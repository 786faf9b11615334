//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 16bit value, dimensions are stored as u16 in `.dat` headers
pub fn is_dimension(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(0) => Err("Dimension must be greater than 0".into()),
        Ok(_) => Ok(()),
        Err(_) => Err("Dimension must be a number in range <1;65535>".into()),
    }
}

pub fn is_sample(num: &str) -> Result<(), String> {
    num.parse::<u16>()
        .map(|_| ())
        .map_err(|_| "Sample does not fit in range <0;65535>".into())
}

pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(0) => Err("Number must be greater than 0".into()),
        Ok(_) => Ok(()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_number(num: &str) -> Result<(), String> {
    num.parse::<u64>()
        .map(|_| ())
        .map_err(|_| "Number required".into())
}

pub const GENERATOR_NAMES: &[&str] = &["solid", "noise", "shapes", "ramp"];
pub const FORMAT_NAMES: &[&str] = &["dat", "raw"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("vol_gen")
        .version("0.1.0")
        .about("Generator of synthetic 16-bit volumes")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_dimension),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("sample")
                .help("Sample value of generated objects, peak value of noise and ramp")
                .long("sample")
                .short('s')
                .value_name("VALUE")
                .default_value("4095")
                .validator(is_sample),
        )
        .arg(
            Arg::new("pad")
                .help("Zero padding around the solid block")
                .long("pad")
                .value_name("VOXELS")
                .default_value("5")
                .validator(is_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in volume")
                .long("n-of-shapes")
                .value_name("N")
                .default_value("10")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("object-size")
                .help("Side of individual generated shapes")
                .long("object-size")
                .value_name("SIDE")
                .default_value("16")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_number),
        )
        .arg(
            Arg::new("format")
                .help("Output container")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .default_value("dat")
                .possible_values(FORMAT_NAMES),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("volume.dat")),
        )
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn validators() {
        assert!(is_dimension("256").is_ok());
        assert!(is_dimension("0").is_err());
        assert!(is_dimension("70000").is_err());
        assert!(is_sample("0").is_ok());
        assert!(is_sample("-1").is_err());
        assert!(is_positive_number("x").is_err());
    }

    #[test]
    fn command_is_valid() {
        get_command().debug_assert();
    }
}
