use std::env;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use pwforge::breach::BreachChecker;
use pwforge::config::parse_length;
use pwforge::{password_generation, GenerationRequest, Mode};
use rand::rngs::OsRng;

mod clipboard;
mod output;
mod table;
mod wizard;

const MAX_COUNT: usize = 100;

/// Generate secure passwords and passphrases.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Length in characters (random mode) or in words (passphrase mode).
    #[arg(short, long, value_parser = parse_length)]
    length: Option<usize>,
    /// `random` or `passphrase`.
    #[arg(short, long)]
    mode: Option<Mode>,
    /// Include special characters in the default alphabet, even if a preset leaves them out.
    #[arg(long, overrides_with = "no_special")]
    special: bool,
    /// Leave special characters out of the default alphabet.
    #[arg(long, overrides_with = "special")]
    no_special: bool,
    /// Draw from these characters instead of the default alphabet.
    #[arg(long)]
    charset: Option<String>,
    /// How many secrets to generate (1-100).
    #[arg(short, long, default_value_t = 1)]
    count: usize,
    /// Leave out characters that are easily confused, such as `l`, `1` and `O`.
    #[arg(long, overrides_with = "no_exclude_similar")]
    exclude_similar: bool,
    /// Keep easily confused characters, even if a preset leaves them out.
    #[arg(long, overrides_with = "exclude_similar")]
    no_exclude_similar: bool,
    /// Show the entropy and strength of each secret.
    #[arg(short, long)]
    verbose: bool,
    /// Print the results as JSON.
    #[arg(long)]
    json: bool,
    /// Copy the results to the clipboard.
    #[arg(long)]
    copy: bool,
    /// Answer a few questions instead of passing flags.
    #[arg(short, long)]
    interactive: bool,
    /// Look each secret up in a database of breached passwords.
    #[arg(long)]
    check_breach: bool,
    #[arg(long, value_name = "N")]
    min_lower: Option<usize>,
    #[arg(long, value_name = "N")]
    min_upper: Option<usize>,
    #[arg(long, value_name = "N")]
    min_digit: Option<usize>,
    #[arg(long, value_name = "N")]
    min_special: Option<usize>,
    /// What to put between passphrase words.
    #[arg(long)]
    separator: Option<String>,
    /// A newline-delimited list of passphrase words. Defaults to $PWFORGE_WORDLIST, then to the
    /// built-in list.
    #[arg(long)]
    wordlist: Option<PathBuf>,
    /// One of `wifi`, `enterprise`, `legacy` or `ultra`.
    #[arg(long)]
    preset: Option<String>,
}

impl Args {
    fn request(&self) -> GenerationRequest {
        GenerationRequest {
            mode: self.mode,
            length: self.length,
            special: toggle(self.special, self.no_special),
            charset: self.charset.clone(),
            exclude_similar: toggle(self.exclude_similar, self.no_exclude_similar),
            min_lower: self.min_lower,
            min_upper: self.min_upper,
            min_digit: self.min_digit,
            min_special: self.min_special,
            separator: self.separator.clone(),
            words: None,
            preset: self.preset.clone(),
        }
    }
}

/// A `--flag`/`--no-flag` pair; unset when neither was given.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn run(args: Args) -> Result<(), ProgError> {
    if !(1..=MAX_COUNT).contains(&args.count) {
        return Err(ProgError::InvalidCount(args.count));
    }

    let (mut request, count, check_breach, copy) = if args.interactive {
        let choices = wizard::run_wizard()?;
        (
            choices.request,
            choices.count,
            choices.check_breach || args.check_breach,
            choices.copy || args.copy,
        )
    } else {
        (args.request(), args.count, args.check_breach, args.copy)
    };
    if let Some(path) = wordlist_path(&args, request.mode) {
        request.words = Some(pwforge::wordlist::load_wordlist(&path)?);
    }

    let plan = pwforge::resolve(request)?;
    let results = (0..count)
        .map(|_| password_generation::generate(&mut OsRng, &plan))
        .collect::<Vec<_>>();

    let breaches = if check_breach {
        let checker = breach_checker();
        Some(
            results
                .iter()
                .map(|result| checker.count(&result.secret))
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };

    let report = output::Report {
        mode: plan.mode(),
        results,
        breaches,
    };
    if args.json {
        output::print_json(&report)?;
    } else if args.verbose {
        output::print_verbose(&report)?;
    } else {
        output::print_plain(&report)?;
    }

    if copy {
        clipboard::send_to_clipboard(report.joined().as_bytes())?;
        eprintln!("Copied to the clipboard.");
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("{err:#}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// An explicit `--wordlist` always applies; `$PWFORGE_WORDLIST` only when making passphrases.
fn wordlist_path(args: &Args, mode: Option<Mode>) -> Option<PathBuf> {
    match &args.wordlist {
        Some(p) => Some(p.clone()),
        None if mode == Some(Mode::Passphrase) => {
            env::var_os("PWFORGE_WORDLIST").map(PathBuf::from)
        }
        None => None,
    }
}

fn breach_checker() -> BreachChecker {
    match env::var("PWFORGE_BREACH_API") {
        Ok(endpoint) => BreachChecker::with_endpoint(endpoint),
        Err(_) => BreachChecker::new(),
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Invalid count {0}; it must be between 1 and {}.", MAX_COUNT)]
    InvalidCount(usize),
    #[error("Cancelled; exiting.")]
    WizardCancelled,
    #[error("{0}")]
    Config(pwforge::ConfigError),
    #[error("{0}")]
    Wordlist(pwforge::WordlistError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<pwforge::ConfigError> for ProgError {
    fn from(err: pwforge::ConfigError) -> ProgError {
        ProgError::Config(err)
    }
}

impl From<pwforge::WordlistError> for ProgError {
    fn from(err: pwforge::WordlistError) -> ProgError {
        ProgError::Wordlist(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pwforge").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_map_onto_the_request() {
        let args = parse(&[
            "-l",
            "20",
            "--no-special",
            "--exclude-similar",
            "--min-digit",
            "3",
            "--preset",
            "wifi",
        ]);
        let request = args.request();
        assert_eq!(request.length, Some(20));
        assert_eq!(request.special, Some(false));
        assert_eq!(request.exclude_similar, Some(true));
        assert_eq!(request.min_digit, Some(3));
        assert_eq!(request.preset.as_deref(), Some("wifi"));
    }

    #[test]
    fn unset_flags_leave_room_for_presets() {
        let request = parse(&["--preset", "legacy"]).request();
        assert_eq!(request.special, None);
        assert_eq!(request.exclude_similar, None);
        assert_eq!(request.length, None);
    }

    #[test]
    fn flags_override_preset_fields_both_ways() {
        let alphabet = |argv: &[&str]| match pwforge::resolve(parse(argv).request()).unwrap() {
            pwforge::GenerationPlan::Random(plan) => plan.alphabet().to_vec(),
            pwforge::GenerationPlan::Passphrase(_) => panic!("expected a random plan"),
        };

        let with_special = alphabet(&["--preset", "wifi", "--special"]);
        assert_eq!(with_special.len(), 91 - 7);
        assert!(with_special.contains(&'!'));

        let everything = alphabet(&["--preset", "wifi", "--special", "--no-exclude-similar"]);
        assert_eq!(everything.len(), 91);

        let plain = alphabet(&["--preset", "legacy", "--no-special"]);
        assert_eq!(plain.len(), 62);
    }

    #[test]
    fn the_last_of_a_flag_pair_wins() {
        let request = parse(&["--no-special", "--special"]).request();
        assert_eq!(request.special, Some(true));
        let request = parse(&["--special", "--no-special"]).request();
        assert_eq!(request.special, Some(false));
        let request = parse(&["--exclude-similar", "--no-exclude-similar"]).request();
        assert_eq!(request.exclude_similar, Some(false));
    }

    #[test]
    fn mode_and_length_parsing() {
        let args = parse(&["--mode", "passphrase", "--length", "6.0", "--separator", "_"]);
        assert_eq!(args.mode, Some(Mode::Passphrase));
        assert_eq!(args.length, Some(6));

        let args = ["pwforge", "--length", "twelve"];
        assert!(Args::try_parse_from(args).is_err());
        let args = ["pwforge", "--mode", "pin"];
        assert!(Args::try_parse_from(args).is_err());
    }

    #[test]
    fn count_is_bounded() {
        for count in ["0", "101"] {
            let args = parse(&["--count", count]);
            assert!(matches!(run(args), Err(ProgError::InvalidCount(_))));
        }
    }

    #[test]
    fn configuration_errors_surface() {
        let args = parse(&["--length", "7"]);
        assert!(matches!(run(args), Err(ProgError::Config(_))));
    }

    #[test]
    fn explicit_wordlist_always_wins() {
        let args = parse(&["--wordlist", "/tmp/words.txt"]);
        assert_eq!(
            wordlist_path(&args, None),
            Some(PathBuf::from("/tmp/words.txt"))
        );
    }
}
