use std::io::Write;

use crossterm::{
    queue,
    style::{Print, PrintStyledContent, Stylize},
};

const MIN_DIGITS: usize = 3;
const PADDING: usize = 1;
const BORDER: &str = "│";

/// Line-number column drawn left of the text.
pub struct Gutter {
    pub enabled: bool,
}

impl Gutter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn digits(&self, line_count: usize) -> usize {
        line_count.max(1).to_string().len().max(MIN_DIGITS)
    }

    pub fn width(&self, line_count: usize) -> usize {
        if !self.enabled {
            return 0;
        }

        self.digits(line_count) + 2 * PADDING + BORDER.chars().count()
    }

    pub fn render_number<W: Write>(
        &self,
        w: &mut W,
        number: usize,
        digits: usize,
    ) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let label = format!("{:pad$}{number:>digits$}{:pad$}", "", "", pad = PADDING);
        queue!(w, PrintStyledContent(label.dark_grey()), Print(BORDER))?;

        Ok(())
    }

    pub fn render_blank<W: Write>(&self, w: &mut W, digits: usize) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        queue!(
            w,
            Print(" ".repeat(digits + 2 * PADDING)),
            Print(BORDER)
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_past_three_digits() {
        let gutter = Gutter::new(true);

        assert_eq!(gutter.width(1), 6);
        assert_eq!(gutter.width(999), 6);
        assert_eq!(gutter.width(1000), 7);
        assert_eq!(gutter.width(123_456), 9);
    }

    #[test]
    fn disabled_gutter_takes_no_space() {
        let gutter = Gutter::new(false);
        let mut out = Vec::new();

        gutter.render_number(&mut out, 7, 3).unwrap();

        assert_eq!(gutter.width(5000), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn numbers_are_right_aligned() {
        let gutter = Gutter::new(true);
        let mut out = Vec::new();

        gutter.render_number(&mut out, 42, 4).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("   42 "));
        assert!(out.ends_with("│"));
    }
}
