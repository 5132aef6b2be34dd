use std::io::{ BufRead, Write };

use crate::errors::PromptError;
use crate::password::{ GenerationRequest, MAX_LENGTH, PasswordGenerator };

const YES: [&str; 4] = ["y", "yes", "o", "oui"];
const NO: [&str; 3] = ["n", "no", "non"];

/// Asks questions on `output` and reads answers from `input` until they are valid.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Cancelled);
        }

        Ok(line.trim().to_string())
    }

    pub fn ask_length(&mut self, min: usize) -> Result<usize, PromptError> {
        let too_large = format!("The length must be at most {} characters.", MAX_LENGTH);

        loop {
            let answer = self.ask(&format!("Password length (minimum {}) : ", min))?;

            match answer.parse::<i64>() {
                Ok(n) if n <= 0 => self.say("Please enter a positive number.")?,
                Ok(n) if n as u64 > MAX_LENGTH as u64 => self.say(&too_large)?,
                Ok(n) if (n as usize) < min => {
                    self.say(&format!("The length must be at least {} characters.", min))?
                }
                Ok(n) => return Ok(n as usize),
                // Digits only but out of i64 range.
                Err(_) if !answer.is_empty() && answer.bytes().all(|b| b.is_ascii_digit()) => {
                    self.say(&too_large)?
                }
                Err(_) => self.say("Please enter a whole number.")?,
            }
        }
    }

    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool, PromptError> {
        loop {
            let answer = self.ask(&format!("{} (y/n) : ", question))?.to_lowercase();

            if YES.contains(&answer.as_str()) {
                return Ok(true);
            }
            if NO.contains(&answer.as_str()) {
                return Ok(false);
            }

            self.say("Please answer 'y' (yes) or 'n' (no).")?;
        }
    }

    pub fn ask_request(&mut self, min: usize) -> Result<GenerationRequest, PromptError> {
        let length = self.ask_length(min)?;
        let uppercase = self.ask_yes_no("Include uppercase letters?")?;
        let lowercase = self.ask_yes_no("Include lowercase letters?")?;
        let numbers = self.ask_yes_no("Include digits?")?;
        let specials = self.ask_yes_no("Include special characters?")?;

        let allow_all_specials = if specials {
            self.ask_yes_no("Allow ALL special characters (including hard to read ones)?")?
        } else {
            true
        };

        Ok(GenerationRequest {
            length,
            uppercase,
            lowercase,
            numbers,
            specials,
            allow_all_specials,
        })
    }
}

/// Runs one interactive session and returns the generated password.
///
/// A rejected request is reported and the user may start over. `None` means
/// they declined after an error, which already has been shown to them.
pub fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    generator: &mut PasswordGenerator,
    min_length: usize,
) -> Result<Option<String>, PromptError> {
    prompter.say("=== Secure password generator ===")?;

    loop {
        let request = prompter.ask_request(min_length)?;

        match generator.generate(&request) {
            Ok(password) => {
                prompter.say(&format!("\nGenerated password: {}\n", password))?;
                return Ok(Some(password));
            }
            Err(e) => {
                log::info!("rejected request: {}", e);
                prompter.say(&format!("\nError: {}", e))?;

                if !prompter.ask_yes_no("Start over?")? {
                    return Ok(None);
                }
            }
        }
    }
}
