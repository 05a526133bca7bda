use clap::Parser;
use log::{debug, error};
use rawwav::{
    convert, convert_streaming, stream, ConvertConfig, ConvertError, Outcome,
    DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_WIDTH,
};
use std::path::PathBuf;

/// Wrap the synthesizer's raw PCM output in a WAV container
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Raw little-endian PCM input
    #[arg(long, default_value = "output.raw")]
    input: PathBuf,

    /// WAV file to write
    #[arg(long, default_value = "output.wav")]
    output: PathBuf,

    /// Sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Number of interleaved channels
    #[arg(long, default_value_t = DEFAULT_CHANNELS)]
    channels: u16,

    /// Bytes per sample
    #[arg(long, default_value_t = DEFAULT_SAMPLE_WIDTH)]
    sample_width: u16,

    /// Copy through a fixed buffer instead of loading the whole input
    #[arg(long)]
    streaming: bool,
}

impl Args {
    fn config(&self) -> ConvertConfig {
        ConvertConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            sample_width: self.sample_width,
        }
    }
}

fn run(args: &Args) -> Result<Outcome, ConvertError> {
    let config = args.config();
    debug!("Converting with {:?}", config);

    if args.streaming {
        convert_streaming(&args.input, &args.output, &config, stream::DEFAULT_BUFFER_SIZE)
    } else {
        convert(&args.input, &args.output, &config)
    }
}

fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Every outcome ends in a single status line and a normal exit
    match run(&args) {
        Ok(outcome) => println!("{outcome}"),
        Err(e) => {
            error!("Conversion failed: {:?}", e);
            println!("Error converting file: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_default_paths_and_format() {
        let args = Args::parse_from(["rawwav"]);

        assert_eq!(args.input, PathBuf::from("output.raw"));
        assert_eq!(args.output, PathBuf::from("output.wav"));
        assert_eq!(args.config(), ConvertConfig::default());
        assert!(!args.streaming);
    }

    #[test]
    fn flags_override_the_defaults() {
        let args = Args::parse_from([
            "rawwav",
            "--input",
            "synth.pcm",
            "--sample-rate",
            "48000",
            "--channels",
            "2",
            "--sample-width",
            "3",
            "--streaming",
        ]);

        assert_eq!(args.input, PathBuf::from("synth.pcm"));
        assert_eq!(
            args.config(),
            ConvertConfig {
                sample_rate: 48_000,
                channels: 2,
                sample_width: 3,
            }
        );
        assert!(args.streaming);
    }

    #[test]
    fn run_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let argv: [std::ffi::OsString; 5] = [
            "rawwav".into(),
            "--input".into(),
            dir.path().join("output.raw").into_os_string(),
            "--output".into(),
            dir.path().join("output.wav").into_os_string(),
        ];
        let args = Args::parse_from(argv);

        let outcome = run(&args).unwrap();

        assert!(matches!(outcome, Outcome::SourceMissing { .. }));
        assert!(!dir.path().join("output.wav").exists());
    }
}
