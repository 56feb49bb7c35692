use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile;

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

#[test]
fn round_trip_defaults() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let packed = temp_dir.path().join("sample.ash");
    let restored = temp_dir.path().join("sample.out");

    Command::cargo_bin("ashcomp")?
        .arg("-i").arg(fixture("sample.txt"))
        .arg("-o").arg(&packed)
        .assert()
        .success();

    Command::cargo_bin("ashdec")?
        .arg("-i").arg(&packed)
        .arg("-o").arg(&restored)
        .assert()
        .success();

    let original = std::fs::read(fixture("sample.txt"))?;
    let round_tripped = std::fs::read(restored)?;
    assert_eq!(original, round_tripped);
    Ok(())
}

#[test]
fn round_trip_with_retokenize_passes() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let packed = temp_dir.path().join("sample.ash");
    let restored = temp_dir.path().join("sample.out");

    Command::cargo_bin("ashcomp")?
        .arg("-i").arg(fixture("sample.txt"))
        .arg("-o").arg(&packed)
        .arg("-p").arg("2")
        .assert()
        .success();

    Command::cargo_bin("ashdec")?
        .arg("-i").arg(&packed)
        .arg("-o").arg(&restored)
        .assert()
        .success();

    let original = std::fs::read(fixture("sample.txt"))?;
    let round_tripped = std::fs::read(restored)?;
    assert_eq!(original, round_tripped);
    Ok(())
}

/// `-l` must bind to the symbol/length alphabet and `-d` to the distance
/// alphabet, independently of one another: widening one without the other
/// still round-trips, and widening neither at decode time (when the encoder
/// used a wider one) must fail rather than silently produce garbage.
#[test]
fn dash_l_and_dash_d_bind_independently() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let packed = temp_dir.path().join("sample.ash");
    let restored = temp_dir.path().join("sample.out");

    Command::cargo_bin("ashcomp")?
        .arg("-i").arg(fixture("sample.txt"))
        .arg("-o").arg(&packed)
        .arg("-l").arg("10")
        .arg("-d").arg("12")
        .assert()
        .success();

    // correct widths on both sides round-trip
    Command::cargo_bin("ashdec")?
        .arg("-i").arg(&packed)
        .arg("-o").arg(&restored)
        .arg("-l").arg("10")
        .arg("-d").arg("12")
        .assert()
        .success();
    let original = std::fs::read(fixture("sample.txt"))?;
    assert_eq!(original, std::fs::read(&restored)?);

    // decoding with the default (narrower) widths must not succeed
    let bad_restored = temp_dir.path().join("sample.bad");
    Command::cargo_bin("ashdec")?
        .arg("-i").arg(&packed)
        .arg("-o").arg(&bad_restored)
        .assert()
        .failure();

    Ok(())
}

#[test]
fn bad_magic_exits_nonzero() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let bogus = temp_dir.path().join("bogus.ash");
    std::fs::write(&bogus, [0u8; 16])?;
    let restored = temp_dir.path().join("bogus.out");

    Command::cargo_bin("ashdec")?
        .arg("-i").arg(&bogus)
        .arg("-o").arg(&restored)
        .assert()
        .failure()
        .stderr(predicate::str::contains("BadMagic"));
    Ok(())
}

#[test]
fn empty_file_round_trips() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let empty_in = temp_dir.path().join("empty.txt");
    std::fs::write(&empty_in, [])?;
    let packed = temp_dir.path().join("empty.ash");
    let restored = temp_dir.path().join("empty.out");

    Command::cargo_bin("ashcomp")?
        .arg("-i").arg(&empty_in)
        .arg("-o").arg(&packed)
        .assert()
        .success();

    Command::cargo_bin("ashdec")?
        .arg("-i").arg(&packed)
        .arg("-o").arg(&restored)
        .assert()
        .success();

    assert_eq!(std::fs::read(restored)?, Vec::<u8>::new());
    Ok(())
}
