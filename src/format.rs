#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "colored")]
use colored::{Color, Colorize};
use std::fmt::{self, Write};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
    pub clean: bool,
    pub position: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
            clean: true,
            position: true,
        }
    }
}

impl Format {
    pub fn message(self, f: &mut fmt::Formatter, msg: &str, level: Option<usize>) -> fmt::Result {
        let lines = msg.lines();
        if self.detailed {
            for line in lines {
                if let Some(level) = level {
                    for i in 0..=level {
                        self.edge(f, i)?;
                        f.write_char(' ')?;
                    }
                }
                writeln!(f, "{}", line.trim())?;
            }
        } else if let Some(line) = lines.map(str::trim).find(|s| !s.is_empty()) {
            f.write_str(line)?;
        }
        Ok(())
    }

    pub fn mark(self, f: &mut fmt::Formatter, level: usize) -> fmt::Result {
        self.styled(f, "*", Tone::Level(level))?;
        f.write_char(' ')
    }

    pub fn edge(self, f: &mut fmt::Formatter, level: usize) -> fmt::Result {
        self.styled(f, "|", Tone::Level(level))
    }

    pub fn position(self, f: &mut fmt::Formatter, head: usize) -> fmt::Result {
        if self.position {
            self.styled(f, &head.to_string(), Tone::Position)?;
        }
        Ok(())
    }

    /// Writes ` [HEAD, CLEAN]`, ` [HEAD]` or ` [CLEAN]` for the entry at `at`.
    pub fn labels(
        self,
        f: &mut fmt::Formatter,
        at: usize,
        head: usize,
        clean: Option<usize>,
    ) -> fmt::Result {
        let is_head = self.head && at == head;
        let is_clean = self.clean && clean == Some(at);
        if !is_head && !is_clean {
            return Ok(());
        }
        f.write_char(' ')?;
        self.styled(f, "[", Tone::Accent)?;
        if is_head {
            self.styled(f, "HEAD", Tone::Head)?;
        }
        if is_head && is_clean {
            self.styled(f, ",", Tone::Accent)?;
            f.write_char(' ')?;
        }
        if is_clean {
            self.styled(f, "CLEAN", Tone::Clean)?;
        }
        self.styled(f, "]", Tone::Accent)
    }

    #[cfg(feature = "chrono")]
    pub fn timestamp(self, f: &mut fmt::Formatter, timestamp: &DateTime<Utc>) -> fmt::Result {
        f.write_char(' ')?;
        self.styled(f, &timestamp.format("%H:%M:%S").to_string(), Tone::Accent)
    }

    fn styled(self, f: &mut fmt::Formatter, text: &str, tone: Tone) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            let text = match tone {
                Tone::Level(level) => text.color(LEVEL_COLORS[level % LEVEL_COLORS.len()]),
                Tone::Position => text.yellow().bold(),
                Tone::Head => text.cyan().bold(),
                Tone::Clean => text.green().bold(),
                Tone::Accent => text.yellow(),
            };
            return write!(f, "{text}");
        }
        f.write_str(text)
    }
}

/// How a piece of the listing is highlighted when colors are on.
#[cfg_attr(not(feature = "colored"), allow(dead_code))]
#[derive(Copy, Clone)]
enum Tone {
    /// Marks and edges, colored by nesting level.
    Level(usize),
    Position,
    Head,
    Clean,
    Accent,
}

#[cfg(feature = "colored")]
const LEVEL_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Red,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
];
