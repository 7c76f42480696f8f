// UI prompts and user interaction module

use colored::Colorize;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

/// Display an error message
pub fn error(message: &str) {
    println!("{}", format!("Error: {message}").red().bold());
}

static PROMPT_ACTIVE: AtomicBool = AtomicBool::new(false);
static INTERCEPT_INSTALLED: Once = Once::new();

/// Scoped exit-code interceptor for the duration of a prompt.
///
/// An interrupt that lands while the prompt is open must not let the process
/// report success to chained callers; while a guard is alive it is turned into
/// exit status 1. The flag is released on every exit path via `Drop`.
pub struct ExitIntercept(());

impl ExitIntercept {
    pub fn acquire() -> Self {
        INTERCEPT_INSTALLED.call_once(|| {
            let _ = ctrlc::set_handler(|| {
                let _ = terminal::disable_raw_mode();
                let code = if PROMPT_ACTIVE.load(Ordering::SeqCst) {
                    1
                } else {
                    130
                };
                process::exit(code);
            });
        });
        PROMPT_ACTIVE.store(true, Ordering::SeqCst);
        ExitIntercept(())
    }
}

impl Drop for ExitIntercept {
    fn drop(&mut self) {
        PROMPT_ACTIVE.store(false, Ordering::SeqCst);
    }
}

/// Interactive single-choice selection over a list of items.
/// Returns the index of the selected item, or None if cancelled.
pub fn select(title: &str, items: &[String], default_index: usize) -> io::Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut selected_index = default_index.min(items.len() - 1);
    let mut stdout = io::stdout();

    let _intercept = ExitIntercept::acquire();

    // Enable raw mode to capture key events
    terminal::enable_raw_mode().map_err(|e| {
        io::Error::other(format!(
            "Failed to enable raw mode: {}. Try running in a different terminal.",
            e
        ))
    })?;

    // Clear any pending events in the buffer
    while event::poll(std::time::Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    let result = run_selection_loop(title, items, &mut selected_index, &mut stdout);

    // Always disable raw mode, even if there was an error
    let _ = terminal::disable_raw_mode();

    println!("\n");

    result
}

/// Internal function that runs the selection loop
fn run_selection_loop(
    title: &str,
    items: &[String],
    selected_index: &mut usize,
    stdout: &mut io::Stdout,
) -> io::Result<Option<usize>> {
    loop {
        // Clear screen and reset cursor
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        // Print title
        println!("{}\r", title.white().bold());
        println!("\r");
        println!(
            "{}\r",
            "Use ↑/↓ arrows to navigate, Enter to select, Esc to cancel".dimmed()
        );
        println!("\r");

        // Print items
        for (index, item) in items.iter().enumerate() {
            if index == *selected_index {
                println!("  {} {}\r", "→".green().bold(), item.green().bold());
            } else {
                println!("    {}\r", item.dimmed());
            }
        }

        // List terminator, never part of the navigable entries
        println!("    {}\r", "─".repeat(16).dimmed());

        stdout.flush()?;

        // Wait for and handle key events - block until we get a real keyboard event
        loop {
            match event::read() {
                Ok(Event::Key(KeyEvent {
                    code, modifiers, ..
                })) => {
                    match code {
                        KeyCode::Up => {
                            // Circular navigation: if at first item, go to last
                            if *selected_index == 0 {
                                *selected_index = items.len() - 1;
                            } else {
                                *selected_index -= 1;
                            }
                            // Clear any pending events to avoid skipping items
                            while event::poll(std::time::Duration::from_millis(0))? {
                                let _ = event::read()?;
                            }
                            break; // Redraw
                        }
                        KeyCode::Down => {
                            // Circular navigation: if at last item, go to first
                            if *selected_index >= items.len() - 1 {
                                *selected_index = 0;
                            } else {
                                *selected_index += 1;
                            }
                            // Clear any pending events to avoid skipping items
                            while event::poll(std::time::Duration::from_millis(0))? {
                                let _ = event::read()?;
                            }
                            break; // Redraw
                        }
                        KeyCode::Enter => {
                            return Ok(Some(*selected_index));
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(None);
                        }
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                            return Ok(None);
                        }
                        _ => {
                            // Ignore other keys, keep waiting
                        }
                    }
                }
                Ok(_) => {
                    // Ignore non-keyboard events (mouse, resize, etc.)
                }
                Err(e) => {
                    return Err(io::Error::other(format!(
                        "Error reading keyboard input: {}",
                        e
                    )))
                }
            }
        }
    }
}
