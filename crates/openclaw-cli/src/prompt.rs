use openclaw_core::consent::Prompt;
use openclaw_core::Result;
use std::io::{BufRead, Write};

/// Interactive prompt over stdin/stdout.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        print!("{question}");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}
