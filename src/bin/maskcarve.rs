use std::path::{Path, PathBuf};
use std::process;

extern crate clap;
extern crate image;

use clap::{App, Arg};
use maskcarve::{mask_from_image, CarveError, Carver};

// The original file name with the extension swapped for "-seam.png",
// beside the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    input.with_file_name(format!("{}-seam.png", stem))
}

fn run() -> Result<(), CarveError> {
    let matches = App::new("maskcarve")
        .version("0.1.0")
        .about("Content-aware image narrowing, steered by painted masks")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("remove")
                .short("r")
                .long("remove")
                .takes_value(true)
                .required(true)
                .help("Number of vertical seams to remove"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output path (default: the input path with a -seam.png suffix)"),
        )
        .arg(
            Arg::with_name("mask")
                .short("m")
                .long("mask")
                .takes_value(true)
                .help("Protection mask image: green pixels are kept, red ones go first"),
        )
        .arg(
            Arg::with_name("dump-energy")
                .long("dump-energy")
                .takes_value(true)
                .help("Also write the input's energy map as a greyscale image"),
        )
        .get_matches();

    let input = matches.value_of("input").unwrap();
    let seams: usize = matches
        .value_of("remove")
        .unwrap()
        .parse()
        .map_err(|_| CarveError::Config("the seam count must be a positive integer".to_string()))?;

    let img = image::open(input)
        .map_err(|e| CarveError::Decode {
            path: input.to_string(),
            reason: e.to_string(),
        })?
        .to_rgba();
    println!(
        "[INFO] Image loaded successfully (width: {}, height: {})",
        img.width(),
        img.height()
    );

    let mask = match matches.value_of("mask") {
        Some(path) => {
            let painted = image::open(path)
                .map_err(|e| CarveError::Decode {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?
                .to_rgba();
            if painted.dimensions() != img.dimensions() {
                return Err(CarveError::Config(format!(
                    "mask {} is {}x{} but the image is {}x{}",
                    path,
                    painted.width(),
                    painted.height(),
                    img.width(),
                    img.height()
                )));
            }
            Some(mask_from_image(&painted))
        }
        None => None,
    };

    let mut carver = Carver::new(&img, mask)?;

    if let Some(path) = matches.value_of("dump-energy") {
        carver.energy_image().save(path).map_err(|e| CarveError::Encode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    }

    carver.carve(seams)?;
    println!(
        "[INFO] Image resized to: width: {}, height: {}",
        carver.width(),
        carver.height()
    );

    let output = matches
        .value_of("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(Path::new(input)));
    println!("[INFO] Writing output image to {}", output.display());
    carver.to_image().save(&output).map_err(|e| CarveError::Encode {
        path: output.display().to_string(),
        reason: e.to_string(),
    })?;
    println!("[INFO] Output image written to disk");
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("[ERROR] {}", e);
        process::exit(1);
    }
}
