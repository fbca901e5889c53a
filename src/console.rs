// src/console.rs

use std::io::{self, BufRead, Write};

const BANNER: &str = r#"
                                       ______
                    |\_______________ (_____\\______________
            HH======#H###############H#######################
                    ' ~""""""""""""""`##(_))#H\"""""Y########
                                      ))    \#H\       `"Y###
                                      "      }#H)

                                powered by xqi
"#;

const BORDER_WIDTH: usize = 70;
const DEFAULT_WIDTH: usize = 80;
const RESET: &str = "\x1b[39m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Main,
    Accent,
    Success,
    Error,
    Warning,
    Tts,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Main => "\x1b[96m",
            Color::Accent => "\x1b[35m",
            Color::Success => "\x1b[92m",
            Color::Error => "\x1b[91m",
            Color::Warning => "\x1b[93m",
            Color::Tts => "\x1b[94m",
        }
    }

    fn tag(self) -> char {
        match self {
            Color::Main => 'M',
            Color::Accent => 'A',
            Color::Success => 'S',
            Color::Error => 'E',
            Color::Warning => 'W',
            Color::Tts => 'T',
        }
    }
}

/// Width from `COLUMNS`, else 80. The terminal itself is not queried.
pub fn terminal_width() -> usize {
    width_from(std::env::var("COLUMNS").ok().as_deref())
}

fn width_from(columns: Option<&str>) -> usize {
    columns
        .and_then(|c| c.trim().parse().ok())
        .filter(|&w: &usize| w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

pub struct Console<R, W> {
    input: R,
    output: W,
    width: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, width: usize) -> Self {
        Self { input, output, width }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        write!(self.output, "{}", CLEAR_SCREEN)
    }

    pub fn print_banner(&mut self, status: &str, status_color: Color) -> io::Result<()> {
        self.clear()?;
        writeln!(self.output, "{}{}{}", Color::Main.code(), BANNER, RESET)?;
        writeln!(self.output, "{}{}{}", status_color.code(), status, RESET)
    }

    pub fn print_centered(&mut self, text: &str, color: Color) -> io::Result<()> {
        writeln!(self.output, "{}{}{}", color.code(), center(text, self.width), RESET)
    }

    pub fn top_border(&mut self) -> io::Result<()> {
        self.print_centered(&format!("┌{}┐", "─".repeat(BORDER_WIDTH)), Color::Accent)
    }

    pub fn bottom_border(&mut self) -> io::Result<()> {
        self.print_centered(&format!("└{}┘", "─".repeat(BORDER_WIDTH)), Color::Accent)
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn menu_option(&mut self, key: &str, text: &str) -> io::Result<()> {
        writeln!(
            self.output,
            " {}{}{} > {}{}{}",
            Color::Accent.code(),
            key,
            RESET,
            Color::Main.code(),
            text,
            RESET
        )
    }

    pub fn message(&mut self, color: Color, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}[{}] {}{}", color.code(), color.tag(), text, RESET)
    }

    /// Returns `None` once input is exhausted.
    pub fn input_prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}[?] {}{} > ", Color::Accent.code(), prompt, RESET)?;
        self.output.flush()?;

        // bytes that are not UTF-8 become U+FFFD instead of an error
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 40)
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn center_pads_on_the_left() {
        assert_eq!(center("abcd", 10), "   abcd");
        assert_eq!(center("äöü", 7), "  äöü");
        assert_eq!(center("too long", 4), "too long");
    }

    #[test]
    fn prompt_reads_one_line_without_newline() {
        let mut console = console("1\r\nHallo Welt\n");
        assert_eq!(console.input_prompt("AUSWAHL").unwrap().as_deref(), Some("1"));
        assert_eq!(console.input_prompt("Text").unwrap().as_deref(), Some("Hallo Welt"));
        assert_eq!(console.input_prompt("Text").unwrap(), None);
        assert!(output(console).contains("[?] AUSWAHL"));
    }

    #[test]
    fn empty_line_is_not_end_of_input() {
        let mut console = console("\n");
        assert_eq!(console.input_prompt("x").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn non_utf8_input_is_read_lossily() {
        let mut console = Console::new(Cursor::new(b"Gr\xfc\xdfe\nweiter\n".to_vec()), Vec::new(), 40);
        assert_eq!(
            console.input_prompt("Text").unwrap().as_deref(),
            Some("Gr\u{fffd}\u{fffd}e")
        );
        assert_eq!(console.input_prompt("Text").unwrap().as_deref(), Some("weiter"));
    }

    #[test]
    fn width_falls_back_to_default() {
        assert_eq!(width_from(Some("120")), 120);
        assert_eq!(width_from(Some(" 100 ")), 100);
        assert_eq!(width_from(Some("0")), DEFAULT_WIDTH);
        assert_eq!(width_from(Some("wide")), DEFAULT_WIDTH);
        assert_eq!(width_from(None), DEFAULT_WIDTH);
    }

    #[test]
    fn message_is_tagged_and_colored() {
        let mut console = console("");
        console.message(Color::Error, "kaputt").unwrap();
        let out = output(console);
        assert!(out.starts_with("\x1b[91m[E] kaputt"));
        assert!(out.trim_end().ends_with(RESET));
    }

    #[test]
    fn borders_are_centered() {
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new(), 80);
        console.top_border().unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.starts_with("\x1b[35m    ┌──"));
        assert!(out.contains("─┐"));
    }
}
