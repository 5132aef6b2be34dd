mod clipboard;
mod config;
mod errors;
mod generators;
mod password;
mod prompt;

use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::errors::AppError;
use crate::password::{ GenerationRequest, PasswordGenerator, RngSource };
use crate::prompt::{ Prompter, run_session };

/// Generates random passwords from the chosen character categories.
///
/// Without `--length` the questions are asked interactively.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Password length, skips the interactive questions
    #[arg(short = 'L', long)]
    length: Option<usize>,

    /// Leave out uppercase letters
    #[arg(short = 'u', long, requires = "length")]
    no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(short = 'l', long, requires = "length")]
    no_lowercase: bool,

    /// Leave out digits
    #[arg(short = 'n', long, requires = "length")]
    no_numbers: bool,

    /// Leave out special characters
    #[arg(short = 's', long, requires = "length")]
    no_specials: bool,

    /// Only use specials that are easy to read back: !@#$%^&*()-_=+
    #[arg(short = 'S', long, requires = "length")]
    safe_specials: bool,

    /// Number of passwords to print
    #[arg(short, long, default_value_t = 1, requires = "length")]
    count: usize,

    /// Copy the last generated password to the clipboard
    #[arg(long)]
    copy: bool,

    /// Draw every character from the operating system generator
    #[arg(long, conflicts_with = "seed")]
    os_rng: bool,

    /// Seed for reproducible output, never use for real passwords
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides `min_length` from the config file
    #[arg(long)]
    min_length: Option<usize>,

    /// Config file, defaults to $PASSGEN_CONFIG or <config dir>/passgen/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn rng_source(&self) -> RngSource {
        match (self.os_rng, self.seed) {
            (_, Some(seed)) => RngSource::Seeded(seed),
            (true, None) => RngSource::Os,
            (false, None) => RngSource::Thread,
        }
    }

    fn request(&self, length: usize, config: &Config) -> GenerationRequest {
        GenerationRequest {
            length,
            uppercase: !self.no_uppercase,
            lowercase: !self.no_lowercase,
            numbers: !self.no_numbers,
            specials: !self.no_specials,
            allow_all_specials: config.allow_all_specials && !self.safe_specials,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\nOperation cancelled by user.");
        std::process::exit(0);
    }) {
        log::warn!("could not install Ctrl-C handler: {}", e);
    }

    match run(args) {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => println!("\nOperation cancelled by user."),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(min) = args.min_length {
        config.min_length = min.max(1);
    }

    let mut generator = PasswordGenerator::new(args.rng_source());

    let passwords: Vec<String> = match args.length {
        Some(length) => {
            let request = args.request(length, &config);
            request.check_minimum(config.min_length)?;

            let passwords = generator.generate_batch(&request, args.count)?;
            for password in &passwords {
                println!("{}", password);
            }
            passwords
        }
        None => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            run_session(&mut prompter, &mut generator, config.min_length)?
                .into_iter()
                .collect()
        }
    };

    if args.copy || config.copy_to_clipboard {
        if let Some(last) = passwords.last() {
            clipboard::copy_to_clipboard(last)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerationError;
    use crate::password::MAX_LENGTH;

    #[test]
    fn defaults_enable_every_category() {
        let args = Args::try_parse_from(["passgen", "-L", "12"]).unwrap();
        let request = args.request(12, &Config::default());

        assert_eq!(request, GenerationRequest::new(12));
        assert_eq!(args.count, 1);
        assert_eq!(args.rng_source(), RngSource::Thread);
    }

    #[test]
    fn flags_disable_categories() {
        let args = Args::try_parse_from(["passgen", "-L", "8", "-u", "-s", "-c", "3"]).unwrap();
        let request = args.request(8, &Config::default());

        assert!(!request.uppercase && !request.specials);
        assert!(request.lowercase && request.numbers);
        assert_eq!(args.count, 3);
    }

    #[test]
    fn safe_specials_from_flag_or_config() {
        let args = Args::try_parse_from(["passgen", "-L", "8", "-S"]).unwrap();
        assert!(!args.request(8, &Config::default()).allow_all_specials);

        let args = Args::try_parse_from(["passgen"]).unwrap();
        let config = Config { allow_all_specials: false, ..Config::default() };
        assert!(!args.request(8, &config).allow_all_specials);
    }

    #[test]
    fn composition_flags_need_a_length() {
        for flag in ["-u", "-l", "-n", "-s", "-S", "--count=3"] {
            assert!(Args::try_parse_from(["passgen", flag]).is_err(), "{flag} accepted without -L");
            assert!(Args::try_parse_from(["passgen", "-L", "12", flag]).is_ok());
        }

        assert!(Args::try_parse_from(["passgen", "--seed", "3", "--copy"]).is_ok());
    }

    #[test]
    fn huge_length_flag_is_an_error() {
        let args = Args::try_parse_from(["passgen", "-L", "1000000"]).unwrap();
        let length = args.length.unwrap();
        let request = args.request(length, &Config::default());

        assert_eq!(
            PasswordGenerator::default().generate_batch(&request, args.count),
            Err(GenerationError::TooLong { length, max: MAX_LENGTH })
        );
    }

    #[test]
    fn rng_flags() {
        let args = Args::try_parse_from(["passgen", "--seed", "9"]).unwrap();
        assert_eq!(args.rng_source(), RngSource::Seeded(9));

        let args = Args::try_parse_from(["passgen", "--os-rng"]).unwrap();
        assert_eq!(args.rng_source(), RngSource::Os);

        assert!(Args::try_parse_from(["passgen", "--os-rng", "--seed", "1"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let args = Args::try_parse_from(["passgen", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
