//! The interactive flow behind `--interactive`.

use std::ops::RangeInclusive;

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use pwforge::config::{PASSPHRASE_WORDS, PASSWORD_LENGTHS};
use pwforge::{GenerationRequest, Mode};

use crate::{ProgError, MAX_COUNT};

pub(crate) struct WizardChoices {
    pub request: GenerationRequest,
    pub count: usize,
    pub check_breach: bool,
    pub copy: bool,
}

pub(crate) fn run_wizard() -> Result<WizardChoices, ProgError> {
    let theme = ColorfulTheme::default();

    let mode = match Select::with_theme(&theme)
        .with_prompt("What would you like to generate?")
        .items(&["A random password", "A passphrase of words"])
        .default(0)
        .interact_opt()
        .context("failed to query your selection")?
        .ok_or(ProgError::WizardCancelled)?
    {
        0 => Mode::Random,
        _ => Mode::Passphrase,
    };

    let mut request = GenerationRequest {
        mode: Some(mode),
        ..GenerationRequest::default()
    };
    match mode {
        Mode::Random => {
            request.length = Some(ask_number(&theme, "Length", 12, PASSWORD_LENGTHS)?);
            request.special = Some(confirm(&theme, "Include special characters?", true)?);
            request.exclude_similar = Some(confirm(
                &theme,
                "Leave out look-alike characters (i, l, 1, L, o, 0, O)?",
                false,
            )?);
        }
        Mode::Passphrase => {
            request.length = Some(ask_number(&theme, "Number of words", 5, PASSPHRASE_WORDS)?);
            let separator = Input::<String>::with_theme(&theme)
                .with_prompt("Separator")
                .default("-".to_owned())
                .allow_empty(true)
                .interact_text()
                .context("failed to get your answer to a prompt")?;
            request.separator = Some(separator);
        }
    }

    let count = ask_number(&theme, "How many?", 1, 1..=MAX_COUNT)?;
    let check_breach = confirm(&theme, "Check against known data breaches?", false)?;
    let copy = confirm(&theme, "Copy to the clipboard?", false)?;

    Ok(WizardChoices {
        request,
        count,
        check_breach,
        copy,
    })
}

fn ask_number(
    theme: &ColorfulTheme,
    prompt: &str,
    default: usize,
    range: RangeInclusive<usize>,
) -> Result<usize, ProgError> {
    let (min, max) = (*range.start(), *range.end());
    let answer = Input::<usize>::with_theme(theme)
        .with_prompt(format!("{prompt} ({min}-{max})"))
        .default(default)
        .validate_with(move |n: &usize| -> Result<(), String> {
            if range.contains(n) {
                Ok(())
            } else {
                Err(format!("must be between {min} and {max}"))
            }
        })
        .interact_text()
        .context("failed to get your answer to a prompt")?;
    Ok(answer)
}

fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool, ProgError> {
    let answer = Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .context("failed to prompt you, somehow")?;
    Ok(answer)
}
