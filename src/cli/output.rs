use std::{cell::RefCell, rc::Rc};

use super::formatting::{format_error, style_help};

/// User-visible channels an interface reports through.
///
/// Help goes to the paging channel, engine failures to the error channel.
/// Handler output is the handler's own business.
pub trait Output {
    /// Displays a rendered help page.
    fn page(&self, text: &str);

    /// Displays a failure message.
    fn error(&self, message: &str);
}

impl<T: Output + ?Sized> Output for Rc<T> {
    fn page(&self, text: &str) {
        (**self).page(text);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Writes help to stdout and errors to stderr, prefixed with `Error: `.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    styled: bool,
}

impl ConsoleOutput {
    /// Creates a console output, with or without ANSI styling.
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Output for ConsoleOutput {
    fn page(&self, text: &str) {
        if self.styled {
            println!("{}", style_help(text));
        } else {
            print!("{text}");
        }
    }

    fn error(&self, message: &str) {
        let line = format!("Error: {message}");
        if self.styled {
            eprintln!("{}", format_error(&line));
        } else {
            eprintln!("{line}");
        }
    }
}

/// Keeps everything reported in memory.
///
/// Useful for hosts that render output themselves, and for tests.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pages: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl RecordingOutput {
    /// Help pages displayed so far.
    pub fn pages(&self) -> Vec<String> {
        self.pages.borrow().clone()
    }

    /// Error messages displayed so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Forgets everything recorded.
    pub fn clear(&self) {
        self.pages.borrow_mut().clear();
        self.errors.borrow_mut().clear();
    }
}

impl Output for RecordingOutput {
    fn page(&self, text: &str) {
        self.pages.borrow_mut().push(text.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
