use argh::FromArgs;
use log::{Level, LevelFilter, Metadata, Record};
use std::path::PathBuf;
use std::process::ExitCode;
use zentga::{ConvertOptions, RGB8, WHITE};

#[derive(FromArgs, Debug)]
/// Convert a TGA image of any pixel format into an uncompressed 24-bit RGB TGA.
struct Args {
    /// input TGA file
    #[argh(positional)]
    input: PathBuf,

    /// output TGA file
    #[argh(positional)]
    output: PathBuf,

    /// background for flattening alpha, as RRGGBB hex [default: ffffff]
    #[argh(option, short = 'b', from_str_fn(parse_hex_color))]
    background: Option<RGB8>,

    /// log decoder details
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn parse_hex_color(s: &str) -> Result<RGB8, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let invalid = || format!("invalid color '{s}': expected RRGGBB hex");
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGB8::new(channel(0)?, channel(2)?, channel(4)?))
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Info => eprintln!("{}", record.args()),
            level => eprintln!("[{}] {}", level.as_str().to_lowercase(), record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    let options = ConvertOptions::default().with_background(args.background.unwrap_or(WHITE));
    match zentga::convert_file(&args.input, &args.output, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("ffffff").unwrap(), RGB8::new(255, 255, 255));
        assert_eq!(parse_hex_color("#102030").unwrap(), RGB8::new(16, 32, 48));
        assert_eq!(parse_hex_color("A0b0C0").unwrap(), RGB8::new(160, 176, 192));
    }

    #[test]
    fn bad_hex_colors() {
        for bad in ["", "fff", "fffffff", "gggggg", "#12345", "ééé", "+f+f+f"] {
            assert!(parse_hex_color(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
