use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

/// Line based prompts that re-ask until the answer is usable.
///
/// Reads from any [`BufRead`] and writes prompts to any [`Write`], so the
/// menu can be driven by stdin in the binary and by a byte slice in tests.
/// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Prints `prompt` and returns the trimmed answer, which may be empty.
    pub fn ask_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_text(&mut self, prompt: &str, empty_msg: &str) -> io::Result<String> {
        loop {
            let value = self.ask_line(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.say(empty_msg)?;
        }
    }

    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        let prompt = format!("{}? [Y]es or [N]o: ", question.trim_end_matches('?'));
        loop {
            match self.ask_line(&prompt)?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please enter \"Y\" or \"N\"")?,
            }
        }
    }

    /// Asks for a number within the optional inclusive bounds.
    pub fn ask_number<T>(
        &mut self,
        prompt: &str,
        error_msg: &str,
        min: Option<T>,
        max: Option<T>,
    ) -> io::Result<T>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        loop {
            let Ok(value) = self.ask_line(prompt)?.parse::<T>() else {
                self.say(error_msg)?;
                continue;
            };

            if let Some(min) = min.filter(|min| value < *min) {
                self.say(format!("Value must be at least {min}"))?;
                continue;
            }
            if let Some(max) = max.filter(|max| value > *max) {
                self.say(format!("Value must be at most {max}"))?;
                continue;
            }
            return Ok(value);
        }
    }

    /// Returns `None` for a blank answer.
    pub fn ask_optional<T: FromStr>(
        &mut self,
        prompt: &str,
        error_msg: &str,
    ) -> io::Result<Option<T>> {
        let prompt = format!("{prompt} (leave blank for no value): ");
        loop {
            let value = self.ask_line(&prompt)?;
            if value.is_empty() {
                return Ok(None);
            }
            match value.parse::<T>() {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(_) => self.say(error_msg)?,
            }
        }
    }
}
