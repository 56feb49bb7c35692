use clap::{arg, crate_version, Command};
use ash0codec::ash0::{compress, Options};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Compress with defaults:   `ashcomp -i my_file -o my_file.ash`
Compress with wider distance alphabet:   `ashcomp -i my_file -o my_file.ash -d 16`";

    let matches = Command::new("ashcomp")
        .about("Compress a file into an ASH0 container")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(false))
        .arg(arg!(-l --symbits <BITS> "symbol/length alphabet width").required(false))
        .arg(arg!(-d --distbits <BITS> "distance alphabet width").required(false))
        .arg(arg!(-p --passes <N> "optimal retokenize passes").required(false))
        .get_matches();

    let path_in = matches.get_one::<String>("input").expect(RCH);
    let path_out = match matches.get_one::<String>("output") {
        Some(p) => p.clone(),
        None => format!("{}.ash", path_in),
    };
    let sym_bits: u32 = match matches.get_one::<String>("symbits") {
        Some(s) => s.parse()?,
        None => 9,
    };
    let dist_bits: u32 = match matches.get_one::<String>("distbits") {
        Some(s) => s.parse()?,
        None => 11,
    };
    let passes: u32 = match matches.get_one::<String>("passes") {
        Some(s) => s.parse()?,
        None => 0,
    };

    if !(9..=16).contains(&sym_bits) {
        log::error!("symbol alphabet width {} out of range [9,16]", sym_bits);
        return Err(Box::new(std::fmt::Error));
    }
    if !(1..=24).contains(&dist_bits) {
        log::error!("distance alphabet width {} out of range [1,24]", dist_bits);
        return Err(Box::new(std::fmt::Error));
    }

    let opts = Options { sym_bits, dist_bits, passes };
    let dat = std::fs::read(path_in)?;
    log::info!("read {} bytes from {}", dat.len(), path_in);

    let packed = compress(&dat, &opts)?;
    log::info!("compressed to {} bytes, writing {}", packed.len(), path_out);
    std::fs::write(path_out, packed)?;

    Ok(())
}
