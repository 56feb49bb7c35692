use clap::{arg, crate_version, Command};
use ash0codec::ash0::{decompress, Options};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Expand with defaults:   `ashdec -i my_file.ash -o my_file`
Expand a stream built with a wider distance alphabet:   `ashdec -i my_file.ash -o my_file -d 16`";

    let matches = Command::new("ashdec")
        .about("Decompress an ASH0 container")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(false))
        .arg(arg!(-l --symbits <BITS> "symbol/length alphabet width").required(false))
        .arg(arg!(-d --distbits <BITS> "distance alphabet width").required(false))
        .get_matches();

    let path_in = matches.get_one::<String>("input").expect(RCH);
    let path_out = match matches.get_one::<String>("output") {
        Some(p) => p.clone(),
        None => format!("{}.arc", path_in),
    };
    let sym_bits: u32 = match matches.get_one::<String>("symbits") {
        Some(s) => s.parse()?,
        None => 9,
    };
    let dist_bits: u32 = match matches.get_one::<String>("distbits") {
        Some(s) => s.parse()?,
        None => 11,
    };

    let opts = Options { sym_bits, dist_bits, passes: 0 };
    let dat = std::fs::read(path_in)?;
    log::info!("read {} bytes from {}", dat.len(), path_in);

    let unpacked = decompress(&dat, &opts)?;
    log::info!("decompressed to {} bytes, writing {}", unpacked.len(), path_out);
    std::fs::write(path_out, unpacked)?;

    Ok(())
}
