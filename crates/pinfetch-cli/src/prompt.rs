use std::io::{self, BufRead, Write};

/// Print `prompt` and read one trimmed line.
pub fn ask_with(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
    }
    Ok(line.trim().to_owned())
}

/// Ask a yes/no question. Only `y` / `yes` (any case) counts as yes.
pub fn confirm_with(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<bool> {
    let answer = ask_with(input, output, &format!("{prompt} (y/n): "))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

pub fn ask(prompt: &str) -> io::Result<String> {
    ask_with(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}

pub fn confirm(prompt: &str) -> io::Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}
