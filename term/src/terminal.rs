//! TerminalRenderer: puts laid-out lines on a real terminal.

use std::io::{self, Write};
use std::panic;

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal,
};

use crate::view::{Line, Tone};

pub fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Unopened => Some(Color::Rgb { r: 0x63, g: 0x11, b: 0xcf }),
        Tone::Selected | Tone::Won => Some(Color::Rgb { r: 0x00, g: 0xdb, b: 0x25 }),
        Tone::Flagged => Some(Color::Rgb { r: 0x5c, g: 0x11, b: 0x11 }),
        Tone::Lost => Some(Color::Rgb { r: 0xff, g: 0x00, b: 0x00 }),
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        encode_restore(&mut self.buf)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Full redraw with every line centered horizontally in a `width` wide terminal.
    pub fn draw(&mut self, lines: &[Line], width: u16) -> Result<()> {
        self.buf.clear();
        encode_into(lines, width, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn encode_restore(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Puts the terminal back in cooked mode before the panic message is printed.
///
/// Installed before [`TerminalRenderer::enter`], the release profile aborts on panic so no
/// destructor would get the chance.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let mut buf = Vec::new();
        let restored = encode_restore(&mut buf)
            .and_then(|()| {
                let mut stdout = io::stdout();
                stdout.write_all(&buf)?;
                stdout.flush()?;
                Ok(())
            })
            .and_then(|()| Ok(terminal::disable_raw_mode()?));
        if let Err(err) = restored {
            log::warn!("Could not restore the terminal after a panic: {err:#}");
        }

        original_hook(panic_info);
    }));
}

/// Encode a full redraw of `lines` into `out` without writing to stdout.
pub fn encode_into(lines: &[Line], width: u16, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for (y, line) in lines.iter().enumerate() {
        let x = usize::from(width).saturating_sub(line.width()) / 2;
        out.queue(cursor::MoveTo(x as u16, y as u16))?;

        for span in &line.spans {
            match tone_color(span.tone) {
                Some(color) => out.queue(SetForegroundColor(color))?,
                None => out.queue(ResetColor)?,
            };
            out.queue(Print(&span.text))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}
