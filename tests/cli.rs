use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

fn solid_image(width: u32, height: u32, px: [u8; 4]) -> image::RgbaImage {
    let samples = px
        .iter()
        .cloned()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    image::RgbaImage::from_raw(width, height, samples).unwrap()
}

fn write_image(path: &Path, width: u32, height: u32) {
    solid_image(width, height, [40, 80, 120, 255]).save(path).unwrap();
}

fn maskcarve() -> Command {
    Command::cargo_bin("maskcarve").unwrap()
}

#[test]
fn rejects_a_zero_seam_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    write_image(&input, 8, 6);

    maskcarve()
        .arg(&input)
        .args(&["-r", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("[ERROR]"));
}

#[test]
fn rejects_a_seam_count_at_the_image_width() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    write_image(&input, 8, 6);

    maskcarve()
        .arg(&input)
        .args(&["-r", "8"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("more pixels than the image width"));
}

#[test]
fn rejects_a_non_numeric_seam_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    write_image(&input, 8, 6);

    maskcarve()
        .arg(&input)
        .args(&["-r", "plenty"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("[ERROR]"));
}

#[test]
fn rejects_a_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("no-such-image.png");

    maskcarve()
        .arg(&input)
        .args(&["-r", "3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot load image"));
}

#[test]
fn rejects_a_mask_of_the_wrong_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    let mask = dir.path().join("mask.png");
    write_image(&input, 8, 6);
    write_image(&mask, 4, 4);

    maskcarve()
        .arg(&input)
        .args(&["-r", "3"])
        .arg("-m")
        .arg(&mask)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("mask"));
}

#[test]
fn writes_the_derived_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    write_image(&input, 8, 6);

    maskcarve()
        .arg(&input)
        .args(&["-r", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[INFO]"));

    let output = dir.path().join("flat-seam.png");
    let carved = image::open(&output).unwrap().to_rgba();
    assert_eq!(carved.dimensions(), (5, 6));
}

#[test]
fn honors_an_explicit_output_and_energy_dump() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    let output = dir.path().join("narrow.png");
    let energy = dir.path().join("energy.png");
    write_image(&input, 8, 6);

    maskcarve()
        .arg(&input)
        .args(&["-r", "2"])
        .arg("-o")
        .arg(&output)
        .arg("--dump-energy")
        .arg(&energy)
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().to_rgba().dimensions(), (6, 6));
    // the dump happens before any seam is removed
    assert_eq!(image::open(&energy).unwrap().to_luma().dimensions(), (8, 6));
}

#[test]
fn can_carve_down_to_a_single_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    write_image(&input, 8, 6);

    maskcarve()
        .arg(&input)
        .args(&["-r", "7"])
        .assert()
        .success();

    let output = dir.path().join("flat-seam.png");
    assert_eq!(image::open(&output).unwrap().to_rgba().dimensions(), (1, 6));
}
